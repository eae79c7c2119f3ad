//! **maze_carver** generates rectangular mazes by randomized depth first backtracking, and draws
//! them as text, as images or live on screen while they are carved.

pub mod cells;
pub mod coordinates;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod render;
pub mod renderers;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod units;
mod utils;
