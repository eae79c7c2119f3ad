use std::fmt;

use log::debug;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

use crate::cells::{Cell, CompassPrimary, Walls};
use crate::coordinates::{Bounds, GridCoordinate, Point};
use crate::errors::*;
use crate::generators;
use crate::render::{Headless, RenderHook};
use crate::units::{ColumnsCount, Height, RowsCount, Width};

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// Size and pixel placement of a grid. Only constructible with valid, non zero values.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GridLayout {
    origin: Point,
    rows: RowsCount,
    columns: ColumnsCount,
    cell_width: Width,
    cell_height: Height,
}

impl GridLayout {
    /// Validates a grid configuration.
    ///
    /// Rejects zero rows, columns or cell sizes, and any layout whose far pixel edge would not
    /// fit in an `i32`.
    pub fn new(x1: i32,
               y1: i32,
               rows: RowsCount,
               columns: ColumnsCount,
               cell_width: Width,
               cell_height: Height)
               -> Result<GridLayout> {

        let invalid = |reason: String| -> Result<GridLayout> {
            Err(ErrorKind::InvalidConfiguration(reason).into())
        };

        let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
        let (Width(width), Height(height)) = (cell_width, cell_height);

        if rows_count == 0 || columns_count == 0 {
            return invalid(format!("the grid needs at least one row and one column, got {} x {}",
                                   columns_count,
                                   rows_count));
        }
        if width == 0 || height == 0 {
            return invalid(format!("cell pixel sizes must be positive, got {} x {}", width, height));
        }
        if rows_count > u32::MAX as usize || columns_count > u32::MAX as usize {
            return invalid(format!("{} x {} cells cannot be addressed", columns_count, rows_count));
        }
        if rows_count.checked_mul(columns_count).is_none() {
            return invalid(format!("{} x {} cells cannot be stored", columns_count, rows_count));
        }

        let far_edge = |origin: i32, cell_length: u32, count: usize| -> Option<i32> {
            (cell_length as i64)
                .checked_mul(count as i64)
                .filter(|extent| *extent <= i32::MAX as i64)
                .and_then(|extent| extent.checked_add(origin as i64))
                .filter(|edge| *edge <= i32::MAX as i64)
                .map(|edge| edge as i32)
        };
        if far_edge(x1, width, columns_count).is_none() ||
           far_edge(y1, height, rows_count).is_none() {
            return invalid(format!("a {} x {} grid of {} x {} pixel cells at ({}, {}) overflows pixel space",
                                   columns_count,
                                   rows_count,
                                   width,
                                   height,
                                   x1,
                                   y1));
        }

        Ok(GridLayout {
            origin: Point::new(x1, y1),
            rows,
            columns,
            cell_width,
            cell_height,
        })
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn cell_width(&self) -> Width {
        self.cell_width
    }

    #[inline]
    pub fn cell_height(&self) -> Height {
        self.cell_height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    /// Pixel bounds of the cell at `coord`. Does not check the coordinate is on the grid.
    pub fn cell_bounds(&self, coord: GridCoordinate) -> Bounds {
        let (Width(w), Height(h)) = (self.cell_width, self.cell_height);
        let (w, h) = (w as i32, h as i32);
        let (column, row) = (coord.column as i32, coord.row as i32);

        let top_left = Point::new(self.origin.x + (w * column), self.origin.y + (h * row));
        let bottom_right = Point::new(self.origin.x + (w * (column + 1)),
                                      self.origin.y + (h * (row + 1)));
        Bounds::new(top_left, bottom_right)
    }

    /// The pixel box covering the whole grid.
    pub fn pixel_extent(&self) -> Bounds {
        let last = GridCoordinate::new(self.columns.0 as u32 - 1, self.rows.0 as u32 - 1);
        Bounds::new(self.origin, self.cell_bounds(last).bottom_right)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

/// A rectangular maze grid.
///
/// Cells are stored in one flat vector, column by column, so cell (column, row) lives at
/// `column * rows + row`.
#[derive(Eq, PartialEq, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    layout: GridLayout,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: columns: {:?}, rows: {:?}, origin: {:?}, passages: {:?}",
               self.columns(),
               self.rows(),
               self.layout.origin(),
               self.passages_count())
    }
}

impl Grid {
    /// Builds a fully walled, unvisited grid, drawing every cell as it is created.
    pub fn new(layout: GridLayout, hook: &mut dyn RenderHook) -> Grid {

        debug!("Building a {} x {} grid at {:?}",
               layout.columns().0,
               layout.rows().0,
               layout.origin());

        let ColumnsCount(columns) = layout.columns();
        let RowsCount(rows) = layout.rows();
        let mut cells = Vec::with_capacity(layout.size());
        for column in 0..columns {
            for row in 0..rows {
                let coord = GridCoordinate::new(column as u32, row as u32);
                let cell = Cell::new(layout.cell_bounds(coord));
                hook.draw_cell(cell.bounds(), cell.walls);
                hook.on_progress();
                cells.push(cell);
            }
        }

        Grid { cells, layout }
    }

    /// Builds and carves a maze: randomized backtracking from (0, 0), an entrance in the top
    /// wall of the first cell and an exit in the bottom wall of the last, visited flags cleared.
    ///
    /// With a seed every random choice is reproducible.
    pub fn generate(layout: GridLayout, seed: Option<u64>, hook: &mut dyn RenderHook) -> Grid {

        let mut rng = match seed {
            Some(s) => XorShiftRng::seed_from_u64(s),
            None => XorShiftRng::from_entropy(),
        };

        let mut grid = Grid::new(layout, hook);
        generators::recursive_backtracker(&mut grid, &mut rng, hook);
        generators::open_entrance_and_exit(&mut grid, hook);
        generators::reset_visited(&mut grid);

        debug!("Generated maze {:?} (seed {:?})", grid, seed);
        grid
    }

    pub fn generate_headless(layout: GridLayout, seed: Option<u64>) -> Grid {
        Grid::generate(layout, seed, &mut Headless)
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.layout.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.layout.columns()
    }

    /// Top left cell, where carving starts and the entrance is placed.
    #[inline]
    pub fn first_cell(&self) -> GridCoordinate {
        GridCoordinate::new(0, 0)
    }

    /// Bottom right cell, where the exit is placed.
    #[inline]
    pub fn last_cell(&self) -> GridCoordinate {
        GridCoordinate::new(self.columns().0 as u32 - 1, self.rows().0 as u32 - 1)
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|i| &self.cells[i])
    }

    #[inline]
    fn cell_mut(&mut self, coord: GridCoordinate) -> Option<&mut Cell> {
        match self.grid_coordinate_to_index(coord) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    #[inline]
    pub fn walls(&self, coord: GridCoordinate) -> Option<Walls> {
        self.cell(coord).map(|c| c.walls)
    }

    #[inline]
    pub fn is_visited(&self, coord: GridCoordinate) -> Option<bool> {
        self.cell(coord).map(|c| c.visited)
    }

    /// Returns false, doing nothing, if the coordinate is invalid.
    pub fn set_visited(&mut self, coord: GridCoordinate, visited: bool) -> bool {
        self.cell_mut(coord).map(|c| c.visited = visited).is_some()
    }

    /// Clear the visited flag of every cell.
    pub fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    #[inline]
    pub fn cell_bounds(&self, coord: GridCoordinate) -> Option<Bounds> {
        if self.is_valid_coordinate(coord) {
            Some(self.layout.cell_bounds(coord))
        } else {
            None
        }
    }

    /// Send the current state of a cell to the render hook.
    pub fn draw_cell(&self, coord: GridCoordinate, hook: &mut dyn RenderHook) {
        if let Some(cell) = self.cell(coord) {
            hook.draw_cell(cell.bounds(), cell.walls);
        }
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.column as usize * self.rows().0 + coord.row as usize)
        } else {
            None
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.column as usize) < self.columns().0 && (coord.row as usize) < self.rows().0
    }

    /// Cells that are up, down, left or right of a particular cell, in that order, whether
    /// or not a wall separates them.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        direction.offset(coord).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Knock down the wall on the `direction` side of a cell.
    ///
    /// An interior wall is shared, so the matching wall of the neighbour comes down as well.
    /// A wall on the grid's outer boundary only exists on this cell.
    pub fn remove_wall(&mut self,
                       coord: GridCoordinate,
                       direction: CompassPrimary)
                       -> ::std::result::Result<(), CellLinkError> {

        let neighbour_opt = self.neighbour_at_direction(coord, direction);
        match self.cell_mut(coord) {
            Some(cell) => cell.walls.set_wall(direction, false),
            None => return Err(CellLinkError::InvalidGridCoordinate),
        }
        if let Some(neighbour) = neighbour_opt {
            if let Some(cell) = self.cell_mut(neighbour) {
                cell.walls.set_wall(direction.opposite(), false);
            }
        }
        Ok(())
    }

    /// Carve a passage between two grid adjacent cells, clearing the shared wall on both.
    pub fn open_passage(&mut self,
                        a: GridCoordinate,
                        b: GridCoordinate)
                        -> ::std::result::Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        match CompassPrimary::between(a, b) {
            Some(direction) => self.remove_wall(a, direction),
            None => Err(CellLinkError::NotAdjacent),
        }
    }

    /// Is there a passage from the cell to its neighbour in `direction`?
    /// Both sides of the shared wall must be down. Always false on the outer boundary.
    pub fn is_neighbour_open(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        let this_side_open = self.walls(coord).map_or(false, |w| !w.has_wall(direction));
        this_side_open &&
        self.neighbour_at_direction(coord, direction)
            .and_then(|neighbour| self.walls(neighbour))
            .map_or(false, |w| !w.has_wall(direction.opposite()))
    }

    /// Are two cells joined by a passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        CompassPrimary::between(a, b).map_or(false, |dir| self.is_neighbour_open(a, dir))
    }

    /// Neighbours reachable from a cell through a passage.
    pub fn links(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter(|dir| self.is_neighbour_open(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Number of interior passages. A perfect maze has `size() - 1`.
    pub fn passages_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                [CompassPrimary::East, CompassPrimary::South]
                    .iter()
                    .filter(|dir| self.is_neighbour_open(coord, **dir))
                    .count()
            })
            .sum()
    }

    /// Coordinates in storage order: down each column, then on to the next column.
    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            rows: self.rows().0,
            cells_count: self.size(),
        }
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Row, self.rows(), self.columns())
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Column, self.rows(), self.columns())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    rows: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let column = self.current_cell_number / self.rows;
            let row = self.current_cell_number % self.rows;
            self.current_cell_number += 1;
            Some(GridCoordinate::new(column as u32, row as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

/// Iterates whole rows (left to right) or whole columns (top to bottom) at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    batches_count: usize,
    batch_length: usize,
}

impl BatchIter {
    fn new(iter_type: BatchIterType, rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
        let (batches_count, batch_length) = match iter_type {
            BatchIterType::Row => (rows_count, columns_count),
            BatchIterType::Column => (columns_count, rows_count),
        };
        BatchIter {
            iter_type,
            current_index: 0,
            batches_count,
            batch_length,
        }
    }
}

impl ExactSizeIterator for BatchIter {}
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.batches_count {
            let coords = (0..self.batch_length)
                .map(|i| {
                    if let BatchIterType::Row = self.iter_type {
                        GridCoordinate::new(i as u32, self.current_index as u32)
                    } else {
                        GridCoordinate::new(self.current_index as u32, i as u32)
                    }
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
