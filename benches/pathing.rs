use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use maze_carver::coordinates::GridCoordinate;
use maze_carver::grid::{Grid, GridLayout};
use maze_carver::pathing;
use maze_carver::units::{ColumnsCount, Height, RowsCount, Width};

fn large_maze() -> Grid {
    let layout = GridLayout::new(0, 0, RowsCount(350), ColumnsCount(350), Width(10), Height(10))
        .unwrap();
    Grid::generate_headless(layout, Some(350))
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        b.iter(|| pathing::Distances::new(&g, start_coord))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let distances = pathing::Distances::new(&g, start_coord).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let distances = pathing::Distances::new(&g, start_coord).unwrap();
        let end_coord = GridCoordinate::new(0, 0);
        b.iter(|| pathing::shortest_path(&g, &distances, end_coord))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_points,
    bench_shortest_path
);
criterion_main!(benches);
