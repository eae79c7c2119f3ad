use std::convert::TryFrom;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::info;

use crate::cells::Walls;
use crate::coordinates::{Bounds, Point};
use crate::errors::*;
use crate::grid::GridLayout;
use crate::render::{PathStyle, RenderHook};

pub const WALL_COLOUR: Rgb<u8> = Rgb([0, 0, 0]);
pub const OPEN_COLOUR: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
pub const PATH_COLOUR: Rgb<u8> = Rgb([0x80, 0x80, 0x80]);
pub const UNDO_COLOUR: Rgb<u8> = Rgb([0xff, 0, 0]);

/// Minimum blank border around the maze, in pixels.
const MARGIN: i64 = 5;

/// Largest in-memory image buffer, in bytes, the renderer will allocate.
pub const MAX_IMAGE_BYTES: u64 = 1 << 30;

/// Draws the maze into an in-memory RGB image that can be written out as a PNG.
///
/// The image keeps the layout's pixel coordinates where it can. A grid placed too close to,
/// or past, the top left of pixel space is shifted to leave a margin.
pub struct ImageRenderer {
    image: RgbImage,
    shift_x: i64,
    shift_y: i64,
}

impl ImageRenderer {
    /// Errors with `InvalidConfiguration` if the image for the layout would not fit in memory.
    pub fn new(layout: &GridLayout) -> Result<ImageRenderer> {
        let extent = layout.pixel_extent();
        let shift = |near_edge: i32| (MARGIN - near_edge as i64).max(0);
        let (shift_x, shift_y) = (shift(extent.top_left.x), shift(extent.top_left.y));

        let width = extent.bottom_right.x as i64 + shift_x + MARGIN + 1;
        let height = extent.bottom_right.y as i64 + shift_y + MARGIN + 1;
        let (width, height) = image_dimensions(width, height)?;
        let image = RgbImage::from_pixel(width, height, OPEN_COLOUR);

        Ok(ImageRenderer {
            image,
            shift_x,
            shift_y,
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// The colour at a layout pixel position. None if it is outside the image.
    pub fn pixel_at(&self, point: Point) -> Option<Rgb<u8>> {
        self.to_image_space(point.x as i64, point.y as i64)
            .map(|(x, y)| *self.image.get_pixel(x, y))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save_with_format(path.as_ref(), ImageFormat::Png)?;
        info!("Wrote {} x {} maze image to {}",
              self.image.width(),
              self.image.height(),
              path.as_ref().display());
        Ok(())
    }

    fn to_image_space(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let (x, y) = (x + self.shift_x, y + self.shift_y);
        if x >= 0 && y >= 0 && x < self.image.width() as i64 && y < self.image.height() as i64 {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }

    fn plot(&mut self, x: i64, y: i64, colour: Rgb<u8>) {
        if let Some((x, y)) = self.to_image_space(x, y) {
            self.image.put_pixel(x, y, colour);
        }
    }

    /// Bresenham line. Open cell edges skip their end points as those corners are shared with
    /// the walls of neighbouring cells.
    fn draw_line(&mut self, from: Point, to: Point, colour: Rgb<u8>, include_ends: bool) {
        let (mut x, mut y) = (from.x as i64, from.y as i64);
        let (x_end, y_end) = (to.x as i64, to.y as i64);
        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let step_x = if x < x_end { 1 } else { -1 };
        let step_y = if y < y_end { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            let is_end = (x, y) == (from.x as i64, from.y as i64) || (x, y) == (x_end, y_end);
            if include_ends || !is_end {
                self.plot(x, y, colour);
            }
            if x == x_end && y == y_end {
                break;
            }
            let doubled_error = 2 * error;
            if doubled_error >= dy {
                error += dy;
                x += step_x;
            }
            if doubled_error <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    fn draw_edge(&mut self, from: Point, to: Point, standing: bool) {
        if standing {
            self.draw_line(from, to, WALL_COLOUR, true);
        } else {
            self.draw_line(from, to, OPEN_COLOUR, false);
        }
    }
}

impl RenderHook for ImageRenderer {
    fn draw_cell(&mut self, bounds: Bounds, walls: Walls) {
        let (top_left, bottom_right) = (bounds.top_left, bounds.bottom_right);
        let (top_right, bottom_left) = (bounds.top_right(), bounds.bottom_left());

        // Openings first so that no wall end is painted over.
        let edges = [(top_left, bottom_left, walls.left),
                     (top_right, bottom_right, walls.right),
                     (top_left, top_right, walls.top),
                     (bottom_left, bottom_right, walls.bottom)];
        for &(from, to, standing) in edges.iter().filter(|edge| !edge.2) {
            self.draw_edge(from, to, standing);
        }
        for &(from, to, standing) in edges.iter().filter(|edge| edge.2) {
            self.draw_edge(from, to, standing);
        }
    }

    fn draw_path(&mut self, from: Point, to: Point, style: PathStyle) {
        let colour = match style {
            PathStyle::Normal => PATH_COLOUR,
            PathStyle::Undo => UNDO_COLOUR,
        };
        self.draw_line(from, to, colour, true);
    }
}

fn image_dimensions(width: i64, height: i64) -> Result<(u32, u32)> {
    let too_large = || -> Error {
        ErrorKind::InvalidConfiguration(format!("a {} x {} pixel image is larger than the {} byte limit",
                                                width,
                                                height,
                                                MAX_IMAGE_BYTES)).into()
    };
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(too_large()),
    };
    let bytes = (w as u64)
        .checked_mul(h as u64)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(too_large)?;
    if bytes > MAX_IMAGE_BYTES {
        return Err(too_large());
    }
    Ok((w, h))
}
