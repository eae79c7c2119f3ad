use itertools::Itertools;
use log::trace;
use smallvec::SmallVec;

use crate::coordinates::GridCoordinate;
use crate::grid::Grid;
use crate::render::{PathStyle, RenderHook};
use crate::utils;
use crate::utils::FnvHashMap;

/// Steps from a start cell to every cell reachable from it through open passages.
///
/// Computed once against a grid; carving more passages afterwards leaves it stale.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Breadth first flood fill from `start_coordinate`.
    /// None if the start is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every step costs the same, so the first distance recorded for a cell is the shortest
        // and the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in &*grid.links(*cell_coord) {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        trace!("Flood fill from {:?} reached {} cells, max distance {}",
               start_coordinate,
               distances.len(),
               max);

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// The cells at the maximum distance, in storage order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// The cells from the distances' start to `end_point`, both included.
/// None if the end point cannot be reached.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        // Walk back through whichever linked neighbour is one step closer to the start.
        let closer = grid.links(current_coord)
            .iter()
            .cloned()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(coord).map(|d| (coord, d))
            })
            .find(|&(_, d)| d + 1 == current_distance);

        match closer {
            Some((closer_coord, closer_distance)) => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // The grid has changed since the distances were computed.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The route through the maze from the entrance cell to the exit cell.
pub fn entrance_to_exit_path(grid: &Grid) -> Option<Vec<GridCoordinate>> {
    let distances = Distances::new(grid, grid.first_cell())?;
    shortest_path(grid, &distances, grid.last_cell())
}

/// Works only as long as we are looking at a perfect maze, otherwise you get back some
/// arbitrary path.
pub fn longest_path(grid: &Grid) -> Option<Vec<GridCoordinate>> {
    // The furthest point from anywhere is one end of the longest path.
    let first_distances = Distances::new(grid, grid.first_cell())?;
    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}

/// Draw a route as segments between consecutive cell centres, then ask for a repaint.
pub fn draw_path(grid: &Grid, path: &[GridCoordinate], style: PathStyle, hook: &mut dyn RenderHook) {
    let centres = path.iter().filter_map(|coord| grid.cell(*coord).map(|cell| cell.centre()));
    for (from, to) in centres.tuple_windows() {
        hook.draw_path(from, to, style);
    }
    hook.on_progress();
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::coordinates::Point;
    use crate::grid::GridLayout;
    use crate::render::testing::{HookCall, RecordingHook};
    use crate::render::Headless;
    use crate::units::{ColumnsCount, Height, RowsCount, Width};

    static OUT_OF_GRID_COORDINATE: GridCoordinate = GridCoordinate {
        column: u32::MAX,
        row: u32::MAX,
    };

    fn layout(columns: usize, rows: usize) -> GridLayout {
        GridLayout::new(0, 0, RowsCount(rows), ColumnsCount(columns), Width(10), Height(10))
            .expect("valid layout")
    }

    fn walled_grid(side: usize) -> Grid {
        Grid::new(layout(side, side), &mut Headless)
    }

    fn gc(column: u32, row: u32) -> GridCoordinate {
        GridCoordinate::new(column, row)
    }

    /// 2x2 with passages all the way round.
    fn ring_grid() -> Grid {
        let mut g = walled_grid(2);
        g.open_passage(gc(0, 0), gc(1, 0)).expect("Link Failed");
        g.open_passage(gc(0, 0), gc(0, 1)).expect("Link Failed");
        g.open_passage(gc(1, 0), gc(1, 1)).expect("Link Failed");
        g.open_passage(gc(0, 1), gc(1, 1)).expect("Link Failed");
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = walled_grid(3);
        assert!(Distances::new(&g, OUT_OF_GRID_COORDINATE).is_none());
    }

    #[test]
    fn start() {
        let g = walled_grid(3);
        let distances = Distances::new(&g, gc(1, 1)).unwrap();
        assert_eq!(gc(1, 1), distances.start());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = walled_grid(3);
        let start_coordinate = gc(0, 0);
        let distances = Distances::new(&g, start_coordinate).unwrap();
        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.reachable_count(), 1);
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn distances_on_open_grid() {
        let g = ring_grid();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(1, 1)]);
    }

    #[test]
    fn entrance_wall_is_not_a_passage() {
        let mut g = walled_grid(2);
        g.remove_wall(gc(0, 0), crate::cells::CompassPrimary::North).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.reachable_count(), 1);
    }

    #[test]
    fn shortest_path_follows_passages() {
        let mut g = walled_grid(3);
        // An S bend: down the first column, along the bottom, up the last.
        for &(a, b) in &[(gc(0, 0), gc(0, 1)),
                         (gc(0, 1), gc(0, 2)),
                         (gc(0, 2), gc(1, 2)),
                         (gc(1, 2), gc(2, 2)),
                         (gc(2, 2), gc(2, 1)),
                         (gc(2, 1), gc(2, 0))] {
            g.open_passage(a, b).expect("Link Failed");
        }
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        let path = shortest_path(&g, &distances, gc(2, 0)).unwrap();
        assert_eq!(path,
                   vec![gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 2), gc(2, 2), gc(2, 1), gc(2, 0)]);

        assert_eq!(shortest_path(&g, &distances, gc(1, 1)), None);
        assert_eq!(shortest_path(&g, &distances, gc(0, 0)), Some(vec![gc(0, 0)]));
    }

    #[test]
    fn shortest_path_on_stale_distances() {
        let mut g = ring_grid();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        let mut walled = walled_grid(2);
        ::std::mem::swap(&mut g, &mut walled);
        assert_eq!(shortest_path(&g, &distances, gc(1, 1)), None);
    }

    #[test]
    fn entrance_to_exit_in_a_carved_maze() {
        let g = Grid::generate_headless(layout(12, 9), Some(3));
        let path = entrance_to_exit_path(&g).expect("exit unreachable");
        assert_eq!(path.first(), Some(&gc(0, 0)));
        assert_eq!(path.last(), Some(&gc(11, 8)));
        assert!(path.iter().tuple_windows().all(|(a, b)| g.is_linked(*a, *b)));
    }

    #[test]
    fn longest_path_on_a_corridor() {
        let g = Grid::generate_headless(layout(6, 1), Some(4));
        assert_eq!(longest_path(&g),
                   Some((0..6).rev().map(|c| gc(c, 0)).collect::<Vec<_>>()));
    }

    #[test]
    fn drawing_a_path() {
        let g = ring_grid();
        let mut hook = RecordingHook::default();
        draw_path(&g, &[gc(0, 0), gc(1, 0), gc(1, 1)], PathStyle::Normal, &mut hook);
        assert_eq!(hook.calls,
                   vec![HookCall::Path(Point::new(5, 5), Point::new(15, 5), PathStyle::Normal),
                        HookCall::Path(Point::new(15, 5), Point::new(15, 15), PathStyle::Normal),
                        HookCall::Progress]);
    }

    #[test]
    fn drawing_a_single_cell_path() {
        let g = ring_grid();
        let mut hook = RecordingHook::default();
        draw_path(&g, &[gc(1, 1)], PathStyle::Undo, &mut hook);
        assert_eq!(hook.calls, vec![HookCall::Progress]);
    }

    #[test]
    fn quickcheck_every_cell_reachable_from_the_entrance() {
        fn p(columns: u8, rows: u8, seed: u64) -> bool {
            let (columns, rows) = (columns as usize % 20 + 1, rows as usize % 20 + 1);
            let g = Grid::generate_headless(layout(columns, rows), Some(seed));
            let distances = Distances::new(&g, g.first_cell()).unwrap();
            let path = entrance_to_exit_path(&g).unwrap();

            distances.reachable_count() == g.size() &&
            path.len() as u32 == distances.distance_from_start_to(g.last_cell()).unwrap() + 1
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }
}
