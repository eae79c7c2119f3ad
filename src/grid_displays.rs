use std::fmt;

use crate::coordinates::GridCoordinate;
use crate::grid::Grid;
use crate::pathing::Distances;
use crate::units::{ColumnsCount, RowsCount};
use crate::utils;
use crate::utils::FnvHashSet;

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";
const EMPTY_BODY: &str = "   ";

/// Supplies the 3 character wide text drawn inside each cell.
pub trait GridDisplay {
    fn render_cell_body(&self, _coord: GridCoordinate) -> String {
        String::from(EMPTY_BODY)
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from(EMPTY_BODY)
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from(EMPTY_BODY)
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: Vec<GridCoordinate>,
    end_coordinates: Vec<GridCoordinate>,
}
impl StartEndPointsDisplay {
    pub fn new(starts: Vec<GridCoordinate>, ends: Vec<GridCoordinate>) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }

    /// Marks the maze's entrance and exit cells.
    pub fn entrance_and_exit(grid: &Grid) -> StartEndPointsDisplay {
        StartEndPointsDisplay::new(vec![grid.first_cell()], vec![grid.last_cell()])
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {

        let contains_coordinate = |coordinates: &[GridCoordinate]| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates[..]) {
            String::from(" S ")
        } else if contains_coordinate(&self.end_coordinates[..]) {
            String::from(" E ")
        } else {
            String::from(EMPTY_BODY)
        }
    }
}

/// Several displays stacked over each other, e.g. start and end markers over a path.
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn GridDisplay>,
}
impl<'a> LayeredDisplay<'a> {
    /// Earlier layers win where more than one has something to show.
    pub fn new(layers: Vec<&'a dyn GridDisplay>) -> LayeredDisplay<'a> {
        LayeredDisplay { layers }
    }
}
impl<'a> GridDisplay for LayeredDisplay<'a> {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        self.layers
            .iter()
            .map(|layer| layer.render_cell_body(coord))
            .find(|body| body.as_str() != EMPTY_BODY)
            .unwrap_or_else(|| String::from(EMPTY_BODY))
    }
}

/// A grid rendered with custom cell bodies, see `Grid::display_with`.
pub struct GridWithDisplay<'a> {
    grid: &'a Grid,
    displayer: &'a dyn GridDisplay,
}

impl Grid {
    pub fn display_with<'a>(&'a self, displayer: &'a dyn GridDisplay) -> GridWithDisplay<'a> {
        GridWithDisplay {
            grid: self,
            displayer,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self, |_| String::from(EMPTY_BODY)))
    }
}

impl<'a> fmt::Display for GridWithDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "{}",
               render_text(self.grid, |coord| self.displayer.render_cell_body(coord)))
    }
}

/// Is there a wall along the top edge of `column` at horizontal grid line `line`?
/// Line 0 is the top boundary, line `rows` the bottom boundary.
fn horizontal_wall(grid: &Grid, column: u32, line: u32) -> bool {
    let below = grid.walls(GridCoordinate::new(column, line)).map_or(false, |w| w.top);
    let above = line.checked_sub(1)
        .and_then(|row| grid.walls(GridCoordinate::new(column, row)))
        .map_or(false, |w| w.bottom);
    below || above
}

/// Is there a wall along the left edge of `row` at vertical grid line `line`?
fn vertical_wall(grid: &Grid, line: u32, row: u32) -> bool {
    let right_of = grid.walls(GridCoordinate::new(line, row)).map_or(false, |w| w.left);
    let left_of = line.checked_sub(1)
        .and_then(|column| grid.walls(GridCoordinate::new(column, row)))
        .map_or(false, |w| w.right);
    right_of || left_of
}

/// The glyph where grid lines cross, joining whichever of the four wall segments meet there.
fn corner(grid: &Grid, column_line: u32, row_line: u32) -> &'static str {
    let left = column_line > 0 && horizontal_wall(grid, column_line - 1, row_line);
    let right = horizontal_wall(grid, column_line, row_line) &&
                (column_line as usize) < grid.columns().0;
    let up = row_line > 0 && vertical_wall(grid, column_line, row_line - 1);
    let down = vertical_wall(grid, column_line, row_line) && (row_line as usize) < grid.rows().0;

    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}

/// Each grid line crossing gets a corner glyph, each cell edge its wall or a gap. Openings in
/// the outer boundary, like the entrance and exit, show as gaps.
fn render_text<F>(grid: &Grid, cell_body: F) -> String
    where F: Fn(GridCoordinate) -> String
{
    let ColumnsCount(columns_count) = grid.columns();
    let RowsCount(rows_count) = grid.rows();
    let (columns, rows) = (columns_count as u32, rows_count as u32);

    let mut output = String::new();
    for row_line in 0..(rows + 1) {

        for column_line in 0..(columns + 1) {
            output.push_str(corner(grid, column_line, row_line));
            if column_line < columns {
                output.push_str(if horizontal_wall(grid, column_line, row_line) {
                    WALL_LR_3
                } else {
                    EMPTY_BODY
                });
            }
        }
        output.push('\n');

        if row_line < rows {
            for column_line in 0..(columns + 1) {
                output.push_str(if vertical_wall(grid, column_line, row_line) { WALL_UD } else { " " });
                if column_line < columns {
                    output.push_str(&cell_body(GridCoordinate::new(column_line, row_line)));
                }
            }
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CompassPrimary;
    use crate::grid::GridLayout;
    use crate::pathing;
    use crate::render::Headless;
    use crate::units::{Height, Width};

    fn layout(columns: usize, rows: usize) -> GridLayout {
        GridLayout::new(0, 0, RowsCount(rows), ColumnsCount(columns), Width(10), Height(10))
            .expect("valid layout")
    }

    fn gc(column: u32, row: u32) -> GridCoordinate {
        GridCoordinate::new(column, row)
    }

    #[test]
    fn walled_grid_text() {
        let g = Grid::new(layout(2, 1), &mut Headless);
        assert_eq!(format!("{}", g), "┌───┬───┐\n│   │   │\n└───┴───┘\n");
    }

    #[test]
    fn passages_and_openings_are_gaps() {
        let mut g = Grid::new(layout(2, 2), &mut Headless);
        g.open_passage(gc(0, 0), gc(1, 0)).unwrap();
        g.open_passage(gc(1, 0), gc(1, 1)).unwrap();
        g.open_passage(gc(1, 1), gc(0, 1)).unwrap();
        g.remove_wall(gc(0, 0), CompassPrimary::North).unwrap();
        g.remove_wall(gc(1, 1), CompassPrimary::South).unwrap();

        let expected = ["╷   ╶───┐",
                        "│       │",
                        "├───╴   │",
                        "│       │",
                        "└───╴   ╵",
                        ""]
            .join("\n");
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn single_cell_maze_text() {
        let g = Grid::generate_headless(layout(1, 1), Some(1));
        assert_eq!(g.to_string(), "╷   ╷\n│   │\n╵   ╵\n");
    }

    #[test]
    fn every_generated_row_has_the_same_width() {
        let g = Grid::generate_headless(layout(9, 6), Some(2));
        let text = g.to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 6 * 2 + 1);
        assert!(lines.iter().all(|line| line.chars().count() == 9 * 4 + 1));
    }

    #[test]
    fn path_display() {
        let g = Grid::new(layout(2, 1), &mut Headless);
        let path = PathDisplay::new(&[gc(1, 0)]);
        assert_eq!(g.display_with(&path).to_string(),
                   "┌───┬───┐\n│   │ . │\n└───┴───┘\n");
    }

    #[test]
    fn start_end_points_over_a_path() {
        let g = Grid::generate_headless(layout(3, 1), Some(5));
        let path = pathing::entrance_to_exit_path(&g).unwrap();
        let path_display = PathDisplay::new(&path);
        let start_end = StartEndPointsDisplay::entrance_and_exit(&g);
        let layered = LayeredDisplay::new(vec![&start_end, &path_display]);

        assert_eq!(layered.render_cell_body(gc(0, 0)), " S ");
        assert_eq!(layered.render_cell_body(gc(1, 0)), " . ");
        assert_eq!(layered.render_cell_body(gc(2, 0)), " E ");
        assert!(g.display_with(&layered).to_string().contains("│ S   .   E │"));
    }

    #[test]
    fn distances_as_hex() {
        let g = Grid::generate_headless(layout(20, 1), Some(6));
        let distances = pathing::Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.render_cell_body(gc(0, 0)), " 0 ");
        assert_eq!(distances.render_cell_body(gc(17, 0)), "11 ");
        assert_eq!(distances.render_cell_body(gc(20, 0)), "   ");
    }
}
