use std::convert::From;

/// A cell position on the grid. Column first, matching the (x, y) order of pixel space.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub column: u32,
    pub row: u32,
}

impl GridCoordinate {
    pub fn new(column: u32, row: u32) -> GridCoordinate {
        GridCoordinate { column, row }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(column_row_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(column_row_pair.0, column_row_pair.1)
    }
}

/// A point in pixel space. The origin may be anywhere, so the components are signed.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

/// The pixel bounding box of a cell.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Bounds {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Bounds {
    pub fn new(top_left: Point, bottom_right: Point) -> Bounds {
        Bounds {
            top_left,
            bottom_right,
        }
    }

    /// Midpoint of the box, rounded towards the top left on odd sizes.
    pub fn centre(&self) -> Point {
        Point::new((self.top_left.x + self.bottom_right.x) / 2,
                   (self.top_left.y + self.bottom_right.y) / 2)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.bottom_right.x, self.top_left.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x, self.bottom_right.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_from_pair() {
        assert_eq!(GridCoordinate::from((3, 7)), GridCoordinate::new(3, 7));
    }

    #[test]
    fn bounds_corners_and_centre() {
        let b = Bounds::new(Point::new(5, 5), Point::new(25, 45));
        assert_eq!(b.centre(), Point::new(15, 25));
        assert_eq!(b.top_right(), Point::new(25, 5));
        assert_eq!(b.bottom_left(), Point::new(5, 45));
    }

    #[test]
    fn centre_with_negative_origin() {
        let b = Bounds::new(Point::new(-10, -10), Point::new(10, 0));
        assert_eq!(b.centre(), Point::new(0, -5));
    }
}
