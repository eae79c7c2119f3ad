use std::{
    fs::File,
    io,
    io::prelude::*,
};

use docopt::Docopt;
use error_chain::bail;
use log::info;
use serde_derive::Deserialize;
use maze_carver::{
    coordinates::GridCoordinate,
    grid::{Grid, GridLayout},
    grid_displays::{GridDisplay, LayeredDisplay, PathDisplay, StartEndPointsDisplay},
    pathing,
    render::PathStyle,
    renderers::ImageRenderer,
    units::{ColumnsCount, Height, RowsCount, Width},
};

const USAGE: &str = "Maze Carver

Usage:
    maze_carver_driver -h | --help
    maze_carver_driver [options] [text [--text-out=<path>]] [image --image-out=<path>] [--screen-view]

Options:
    -h --help               Show this screen.
    --rows=<n>              Number of rows of cells [default: 20].
    --columns=<n>           Number of columns of cells [default: 20].
    --cell-width=<px>       Pixel width of one cell [default: 20].
    --cell-height=<px>      Pixel height of one cell [default: 20].
    --origin-x=<x>          Pixel x of the maze's top left corner [default: 5].
    --origin-y=<y>          Pixel y of the maze's top left corner [default: 5].
    --seed=<n>              Seed for the random carving choices. A random seed is picked and logged if not given.
    --show-path             Show the route from the entrance to the exit.
    --longest-path          Show the longest route through the maze instead of the entrance to exit route.
    --mark-start-end        Draw an 'S' at the start and an 'E' at the end of the shown route in the text maze.
                            Without a route the entrance and exit cells are marked.
    --frame-delay-ms=<ms>   Pause after each on screen repaint while carving [default: 5].
    --text-out=<path>       Output file path for a textual rendering of the maze. Printed if not given.
    --image-out=<path>      Output file path for an image rendering of the maze. Always PNG format.
    --screen-view           Watch the maze being carved in a window. Needs the sdl feature.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_cell_width: u32,
    flag_cell_height: u32,
    flag_origin_x: i32,
    flag_origin_y: i32,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_longest_path: bool,
    flag_mark_start_end: bool,
    #[cfg(feature = "sdl")]
    flag_frame_delay_ms: u64,
    cmd_text: bool,
    flag_text_out: String,
    cmd_image: bool,
    flag_image_out: String,
    flag_screen_view: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_carver::errors::Error, ::maze_carver::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let layout = GridLayout::new(args.flag_origin_x,
                                 args.flag_origin_y,
                                 RowsCount(args.flag_rows),
                                 ColumnsCount(args.flag_columns),
                                 Width(args.flag_cell_width),
                                 Height(args.flag_cell_height))?;

    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("Carving a {} x {} maze with seed {}",
          args.flag_columns,
          args.flag_rows,
          seed);

    let maze_grid = if args.flag_screen_view {
        screen_view(layout, seed, &args)?
    } else {
        Grid::generate_headless(layout, Some(seed))
    };

    let path = chosen_path(&maze_grid, &args)?;

    // Print the text maze if nothing else was asked for.
    let do_text_render = args.cmd_text || !(args.cmd_image || args.flag_screen_view);
    if do_text_render {
        let text = text_render(&maze_grid, &args, &path);
        if args.flag_text_out.is_empty() {
            println!("{}", text);
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
            info!("Wrote text maze to {}", args.flag_text_out);
        }
    }

    if args.cmd_image {
        let mut renderer = ImageRenderer::new(maze_grid.layout())?;
        for coord in maze_grid.iter() {
            maze_grid.draw_cell(coord, &mut renderer);
        }
        pathing::draw_path(&maze_grid, &path, PathStyle::Normal, &mut renderer);
        renderer.save(&args.flag_image_out)
            .chain_err(|| format!("Failed to write maze image {}", args.flag_image_out))?;
    }

    Ok(())
}

/// The route asked for on the command line, empty if none was.
fn chosen_path(maze_grid: &Grid, maze_args: &MazeArgs) -> Result<Vec<GridCoordinate>> {
    if maze_args.flag_longest_path {
        Ok(pathing::longest_path(maze_grid).ok_or("The maze has no longest route.")?)
    } else if maze_args.flag_show_path {
        Ok(pathing::entrance_to_exit_path(maze_grid).ok_or("The exit cannot be reached from the entrance.")?)
    } else {
        Ok(vec![])
    }
}

/// Decide what goes in each text cell: the start and end markers win over the path.
fn text_render(maze_grid: &Grid, maze_args: &MazeArgs, path: &[GridCoordinate]) -> String {

    let path_display = PathDisplay::new(path);
    let start_end_display = match (path.first(), path.last()) {
        (Some(&start), Some(&end)) => StartEndPointsDisplay::new(vec![start], vec![end]),
        _ => StartEndPointsDisplay::entrance_and_exit(maze_grid),
    };

    let mut layers: Vec<&dyn GridDisplay> = vec![];
    if maze_args.flag_mark_start_end {
        layers.push(&start_end_display);
    }
    if !path.is_empty() {
        layers.push(&path_display);
    }
    format!("{}", maze_grid.display_with(&LayeredDisplay::new(layers)))
}

#[cfg(feature = "sdl")]
fn screen_view(layout: GridLayout, seed: u64, maze_args: &MazeArgs) -> Result<Grid> {
    use std::time::Duration;
    use maze_carver::sdl::ScreenRenderer;

    let mut screen = ScreenRenderer::new(&layout, Duration::from_millis(maze_args.flag_frame_delay_ms))?;
    let maze_grid = Grid::generate(layout, Some(seed), &mut screen);

    if !screen.is_closed() {
        let path = chosen_path(&maze_grid, maze_args)?;
        pathing::draw_path(&maze_grid, &path, PathStyle::Normal, &mut screen);
    }
    screen.wait_for_close()?;
    Ok(maze_grid)
}

#[cfg(not(feature = "sdl"))]
fn screen_view(_: GridLayout, _: u64, _: &MazeArgs) -> Result<Grid> {
    bail!("--screen-view needs a build with the sdl feature, e.g. cargo run --features sdl")
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
