use std::thread;
use std::time::{Duration, Instant};

use image::Rgb;
use log::{debug, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::cells::Walls;
use crate::coordinates::{Bounds, Point};
use crate::errors::*;
use crate::grid::GridLayout;
use crate::render::{PathStyle, RenderHook};
use crate::renderers::{OPEN_COLOUR, PATH_COLOUR, UNDO_COLOUR, WALL_COLOUR};
use crate::utils;
use crate::utils::FnvHashMap;

pub const WINDOW_TITLE: &str = "Maze Carver";
const MIN_WINDOW_WIDTH: u32 = 800;
const MIN_WINDOW_HEIGHT: u32 = 600;
const WINDOW_MARGIN: i64 = 5;
const IDLE_FRAME: Duration = Duration::from_millis(16);

pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
}

pub fn init() -> Result<SdlSetup> {
    let sdl_context = sdl2::init().map_err(ErrorKind::DisplaySurface)?;
    let video_subsystem = sdl_context.video().map_err(ErrorKind::DisplaySurface)?;

    Ok(SdlSetup {
        sdl_context,
        video_subsystem,
    })
}

/// Big enough for the whole grid, never smaller than the default window.
pub fn window_size(layout: &GridLayout) -> (u32, u32) {
    let extent = layout.pixel_extent();
    let fit = |far_edge: i32, minimum: u32| {
        let needed = (far_edge as i64 + WINDOW_MARGIN).max(0).min(u32::MAX as i64) as u32;
        needed.max(minimum)
    };
    (fit(extent.bottom_right.x, MIN_WINDOW_WIDTH), fit(extent.bottom_right.y, MIN_WINDOW_HEIGHT))
}

fn colour(rgb: Rgb<u8>) -> Color {
    Color::RGB(rgb[0], rgb[1], rgb[2])
}

/// Decides when a changed picture should be presented, so that at most one full repaint
/// happens per frame interval however quickly the maze changes.
#[derive(Debug)]
struct RepaintThrottle {
    min_interval: Duration,
    last_repaint: Option<Instant>,
    dirty: bool,
}

impl RepaintThrottle {
    fn new(min_interval: Duration) -> RepaintThrottle {
        RepaintThrottle {
            min_interval,
            last_repaint: None,
            dirty: false,
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_due(&self, now: Instant) -> bool {
        self.dirty &&
        self.last_repaint.map_or(true, |last| now.saturating_duration_since(last) >= self.min_interval)
    }

    fn repainted(&mut self, now: Instant) {
        self.dirty = false;
        self.last_repaint = Some(now);
    }
}

/// Shows the maze in a window as it is carved.
///
/// Every drawn cell and path segment is kept. The whole picture is repainted on `on_progress`
/// when something changed, at most once per frame interval. An optional delay after each
/// progress step slows carving down enough to watch.
pub struct ScreenRenderer {
    canvas: Canvas<Window>,
    events: sdl2::EventPump,
    cells: FnvHashMap<Bounds, Walls>,
    paths: Vec<(Point, Point, PathStyle)>,
    frame_delay: Duration,
    throttle: RepaintThrottle,
    closed: bool,
    _sdl_setup: SdlSetup,
}

impl ScreenRenderer {
    pub fn new(layout: &GridLayout, frame_delay: Duration) -> Result<ScreenRenderer> {

        let sdl_setup = init()?;
        let (width, height) = window_size(layout);
        let window = sdl_setup.video_subsystem
            .window(WINDOW_TITLE, width, height)
            .position_centered()
            .build()
            .map_err(|e| ErrorKind::DisplaySurface(e.to_string()))?;
        let canvas = window.into_canvas()
            .accelerated()
            .build()
            .map_err(|e| ErrorKind::DisplaySurface(e.to_string()))?;
        let events = sdl_setup.sdl_context.event_pump().map_err(ErrorKind::DisplaySurface)?;

        debug!("Opened a {} x {} window", width, height);

        Ok(ScreenRenderer {
            canvas,
            events,
            cells: utils::fnv_hashmap(layout.size()),
            paths: vec![],
            frame_delay,
            throttle: RepaintThrottle::new(frame_delay.max(IDLE_FRAME)),
            closed: false,
            _sdl_setup: sdl_setup,
        })
    }

    /// Has the window been closed, or `q` pressed?
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Keep showing the maze until the window is closed or `q` is pressed.
    pub fn wait_for_close(&mut self) -> Result<()> {
        while !self.closed {
            self.pump_events();
            if self.throttle.is_due(Instant::now()) {
                self.repaint()?;
            }
            thread::sleep(IDLE_FRAME);
        }
        Ok(())
    }

    fn pump_events(&mut self) {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. } |
                Event::KeyDown { keycode: Some(Keycode::Q), .. } => self.closed = true,
                // Exposed, resized, restored and so on.
                Event::Window { .. } => self.throttle.mark_dirty(),
                _ => continue,
            }
        }
    }

    fn repaint(&mut self) -> Result<()> {
        self.canvas.set_draw_color(colour(OPEN_COLOUR));
        self.canvas.clear();

        // Open edges are left as background.
        self.canvas.set_draw_color(colour(WALL_COLOUR));
        for (bounds, walls) in &self.cells {
            let (top_left, bottom_right) = (bounds.top_left, bounds.bottom_right);
            let (top_right, bottom_left) = (bounds.top_right(), bounds.bottom_left());
            let edges = [(top_left, bottom_left, walls.left),
                         (top_right, bottom_right, walls.right),
                         (top_left, top_right, walls.top),
                         (bottom_left, bottom_right, walls.bottom)];
            for &(from, to, _) in edges.iter().filter(|edge| edge.2) {
                self.canvas
                    .draw_line((from.x, from.y), (to.x, to.y))
                    .map_err(ErrorKind::DisplaySurface)?;
            }
        }

        for &(from, to, style) in &self.paths {
            let path_colour = match style {
                PathStyle::Normal => PATH_COLOUR,
                PathStyle::Undo => UNDO_COLOUR,
            };
            self.canvas.set_draw_color(colour(path_colour));
            self.canvas
                .draw_line((from.x, from.y), (to.x, to.y))
                .map_err(ErrorKind::DisplaySurface)?;
        }

        self.canvas.present();
        self.throttle.repainted(Instant::now());
        Ok(())
    }
}

impl RenderHook for ScreenRenderer {
    fn draw_cell(&mut self, bounds: Bounds, walls: Walls) {
        self.cells.insert(bounds, walls);
        self.throttle.mark_dirty();
    }

    fn draw_path(&mut self, from: Point, to: Point, style: PathStyle) {
        self.paths.push((from, to, style));
        self.throttle.mark_dirty();
    }

    fn on_progress(&mut self) {
        self.pump_events();
        if self.closed {
            return;
        }
        if self.throttle.is_due(Instant::now()) {
            if let Err(e) = self.repaint() {
                warn!("Repaint failed: {}", e);
            }
        }
        if self.frame_delay > Duration::from_millis(0) {
            thread::sleep(self.frame_delay);
        }
    }
}
