use crate::coordinates::{Bounds, GridCoordinate, Point};

/// The four directions a passage can be carved in, North being towards row 0.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Neighbour search order used by the carving algorithm: up, down, left, right.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::East];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Creates a new coordinate offset 1 cell away in this direction.
    /// Returns None if the coordinate is not representable, i.e. it would be negative.
    /// An upper bound check is the grid's job.
    pub fn offset(self, coord: GridCoordinate) -> Option<GridCoordinate> {
        let (column, row) = (coord.column, coord.row);
        match self {
            CompassPrimary::North => row.checked_sub(1).map(|r| GridCoordinate::new(column, r)),
            CompassPrimary::South => row.checked_add(1).map(|r| GridCoordinate::new(column, r)),
            CompassPrimary::East => column.checked_add(1).map(|c| GridCoordinate::new(c, row)),
            CompassPrimary::West => column.checked_sub(1).map(|c| GridCoordinate::new(c, row)),
        }
    }

    /// The direction of travel from `a` to the grid adjacent `b`.
    /// None if the coordinates are equal or not next to each other.
    pub fn between(a: GridCoordinate, b: GridCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|dir| dir.offset(a) == Some(b))
    }
}

/// Wall flags of a single cell. `true` means the wall is standing.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Walls {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Default for Walls {
    /// A fully enclosed cell.
    fn default() -> Walls {
        Walls {
            left: true,
            right: true,
            top: true,
            bottom: true,
        }
    }
}

impl Walls {
    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.top,
            CompassPrimary::South => self.bottom,
            CompassPrimary::East => self.right,
            CompassPrimary::West => self.left,
        }
    }

    #[inline]
    pub fn set_wall(&mut self, dir: CompassPrimary, standing: bool) {
        match dir {
            CompassPrimary::North => self.top = standing,
            CompassPrimary::South => self.bottom = standing,
            CompassPrimary::East => self.right = standing,
            CompassPrimary::West => self.left = standing,
        }
    }
}

/// One unit of the maze grid.
///
/// `visited` is scratch state for a single carving or traversal pass.
/// `bounds` is a cache of the grid's pixel layout for this cell's position.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub walls: Walls,
    pub visited: bool,
    bounds: Bounds,
}

impl Cell {
    pub fn new(bounds: Bounds) -> Cell {
        Cell {
            walls: Walls::default(),
            visited: false,
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn centre(&self) -> Point {
        self.bounds.centre()
    }

    #[inline]
    pub fn has_left_wall(&self) -> bool {
        self.walls.left
    }
    #[inline]
    pub fn has_right_wall(&self) -> bool {
        self.walls.right
    }
    #[inline]
    pub fn has_top_wall(&self) -> bool {
        self.walls.top
    }
    #[inline]
    pub fn has_bottom_wall(&self) -> bool {
        self.walls.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gc(column: u32, row: u32) -> GridCoordinate {
        GridCoordinate::new(column, row)
    }

    #[test]
    fn offsets() {
        assert_eq!(CompassPrimary::North.offset(gc(0, 0)), None);
        assert_eq!(CompassPrimary::West.offset(gc(0, 0)), None);
        assert_eq!(CompassPrimary::South.offset(gc(0, 0)), Some(gc(0, 1)));
        assert_eq!(CompassPrimary::East.offset(gc(0, 0)), Some(gc(1, 0)));
        assert_eq!(CompassPrimary::North.offset(gc(4, 4)), Some(gc(4, 3)));
        assert_eq!(CompassPrimary::West.offset(gc(4, 4)), Some(gc(3, 4)));
        assert_eq!(CompassPrimary::East.offset(gc(u32::MAX, 0)), None);
    }

    #[test]
    fn opposites_round_trip() {
        for dir in CompassPrimary::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn direction_between_adjacent_cells() {
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(1, 0)), Some(CompassPrimary::North));
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(1, 2)), Some(CompassPrimary::South));
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(2, 1)), Some(CompassPrimary::East));
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(0, 1)), Some(CompassPrimary::West));
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(1, 1)), None);
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(2, 2)), None);
        assert_eq!(CompassPrimary::between(gc(0, 0), gc(0, 2)), None);
    }

    #[test]
    fn new_cell_is_enclosed_and_unvisited() {
        let cell = Cell::new(Bounds::new(Point::new(0, 0), Point::new(10, 10)));
        assert!(cell.has_left_wall());
        assert!(cell.has_right_wall());
        assert!(cell.has_top_wall());
        assert!(cell.has_bottom_wall());
        assert!(!cell.visited);
        assert_eq!(cell.walls, Walls::default());
        assert_eq!(cell.centre(), Point::new(5, 5));
    }

    #[test]
    fn walls_by_direction() {
        let mut walls = Walls::default();
        walls.set_wall(CompassPrimary::East, false);
        assert!(!walls.right);
        assert!(!walls.has_wall(CompassPrimary::East));
        assert!(walls.has_wall(CompassPrimary::West));
        walls.set_wall(CompassPrimary::North, false);
        assert!(!walls.top);
        assert!(walls.has_wall(CompassPrimary::South));
    }
}
