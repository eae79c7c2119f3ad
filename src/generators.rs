use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::CompassPrimary;
use crate::coordinates::GridCoordinate;
use crate::grid::Grid;
use crate::render::RenderHook;

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid, starting
/// from the top left cell.
///
/// A depth first walk: from the current cell pick a random unvisited neighbour, knock down the
/// wall between them and carry on from the neighbour. When a cell has no unvisited neighbours
/// left we back up to the previous cell and try again from there. Every cell is visited once,
/// so the passages form a spanning tree - a perfect maze.
///
/// The walk keeps its own stack of cells rather than recursing, so large grids cannot exhaust
/// the call stack. The unvisited neighbours of a cell are worked out again every time the walk
/// comes back to it, since other branches may have reached some of them in the meantime.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R, hook: &mut dyn RenderHook) {

    let start = grid.first_cell();
    let mut stack: Vec<GridCoordinate> = Vec::with_capacity(grid.size());
    grid.set_visited(start, true);
    stack.push(start);

    let mut max_depth = stack.len();
    while let Some(&current) = stack.last() {

        let unvisited = unvisited_neighbours(grid, current);
        match unvisited.choose(rng) {
            None => {
                // backtrack
                grid.draw_cell(current, hook);
                hook.on_progress();
                stack.pop();
            }
            Some(&(direction, next)) => {
                trace!("Carving {:?} from {:?} to {:?}", direction, current, next);
                let carved = grid.remove_wall(current, direction);
                debug_assert!(carved.is_ok());

                grid.draw_cell(current, hook);
                grid.draw_cell(next, hook);
                hook.on_progress();

                grid.set_visited(next, true);
                stack.push(next);
                max_depth = max_depth.max(stack.len());
            }
        }
    }

    debug!("Carved {} passages, deepest walk {} cells",
           grid.passages_count(),
           max_depth);
}

/// In bounds neighbours not yet visited, paired with the direction to reach them, in
/// up, down, left, right order.
fn unvisited_neighbours(grid: &Grid,
                        coord: GridCoordinate)
                        -> SmallVec<[(CompassPrimary, GridCoordinate); 4]> {
    CompassPrimary::ALL
        .iter()
        .filter_map(|dir| grid.neighbour_at_direction(coord, *dir).map(|n| (*dir, n)))
        .filter(|&(_, n)| grid.is_visited(n) == Some(false))
        .collect()
}

/// Open the top wall of the first cell and the bottom wall of the last cell, whatever the
/// carving left there. On a single cell grid both openings are on the same cell.
pub fn open_entrance_and_exit(grid: &mut Grid, hook: &mut dyn RenderHook) {

    let (entrance, exit) = (grid.first_cell(), grid.last_cell());
    let opened_entrance = grid.remove_wall(entrance, CompassPrimary::North);
    let opened_exit = grid.remove_wall(exit, CompassPrimary::South);
    debug_assert!(opened_entrance.is_ok() && opened_exit.is_ok());

    grid.draw_cell(entrance, hook);
    grid.draw_cell(exit, hook);
    hook.on_progress();

    debug!("Entrance at {:?}, exit at {:?}", entrance, exit);
}

/// Clear the scratch visited flags left by carving so that a later traversal starts clean.
/// Nothing is redrawn.
pub fn reset_visited(grid: &mut Grid) {
    grid.clear_visited();
}
