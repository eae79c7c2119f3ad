//! The drawing boundary between maze generation and whatever displays it.

use crate::cells::Walls;
use crate::coordinates::{Bounds, Point};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PathStyle {
    /// A step forward along a route.
    Normal,
    /// A step that has been taken back.
    Undo,
}

/// Receives drawing requests as the maze is built and walked.
///
/// Every method defaults to doing nothing, so a collaborator only implements what it can draw.
/// Generation must behave identically whichever implementation is passed in.
pub trait RenderHook {
    /// Draw or redraw one cell's four edges. Absent walls should look different to standing ones.
    fn draw_cell(&mut self, _bounds: Bounds, _walls: Walls) {}

    /// Draw a route segment between two cell centres.
    fn draw_path(&mut self, _from: Point, _to: Point, _style: PathStyle) {}

    /// Called after each structural change so a display can repaint.
    /// May be called any number of times.
    fn on_progress(&mut self) {}
}

/// The no-op collaborator for generating mazes without any display.
#[derive(Debug, Default, Copy, Clone)]
pub struct Headless;

impl RenderHook for Headless {}

impl<'a, R: RenderHook + ?Sized> RenderHook for &'a mut R {
    fn draw_cell(&mut self, bounds: Bounds, walls: Walls) {
        (**self).draw_cell(bounds, walls)
    }

    fn draw_path(&mut self, from: Point, to: Point, style: PathStyle) {
        (**self).draw_path(from, to, style)
    }

    fn on_progress(&mut self) {
        (**self).on_progress()
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Every hook call, in order.
    #[derive(Eq, PartialEq, Copy, Clone, Debug)]
    pub enum HookCall {
        Cell(Bounds, Walls),
        Path(Point, Point, PathStyle),
        Progress,
    }

    #[derive(Debug, Default)]
    pub struct RecordingHook {
        pub calls: Vec<HookCall>,
    }

    impl RecordingHook {
        pub fn cell_draws(&self) -> Vec<(Bounds, Walls)> {
            self.calls
                .iter()
                .filter_map(|call| match *call {
                    HookCall::Cell(b, w) => Some((b, w)),
                    _ => None,
                })
                .collect()
        }

        pub fn progress_count(&self) -> usize {
            self.calls.iter().filter(|call| **call == HookCall::Progress).count()
        }
    }

    impl RenderHook for RecordingHook {
        fn draw_cell(&mut self, bounds: Bounds, walls: Walls) {
            self.calls.push(HookCall::Cell(bounds, walls));
        }

        fn draw_path(&mut self, from: Point, to: Point, style: PathStyle) {
            self.calls.push(HookCall::Path(from, to, style));
        }

        fn on_progress(&mut self) {
            self.calls.push(HookCall::Progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::{HookCall, RecordingHook};

    #[test]
    fn headless_accepts_everything() {
        let mut hook = Headless;
        let b = Bounds::new(Point::new(0, 0), Point::new(1, 1));
        hook.draw_cell(b, Walls::default());
        hook.draw_path(Point::new(0, 0), Point::new(1, 1), PathStyle::Undo);
        hook.on_progress();
    }

    #[test]
    fn mutable_reference_forwards_calls() {
        fn drive<H: RenderHook>(mut hook: H) {
            hook.on_progress();
            hook.draw_path(Point::new(1, 2), Point::new(3, 4), PathStyle::Normal);
        }

        let mut recorder = RecordingHook::default();
        drive(&mut recorder);
        assert_eq!(recorder.calls,
                   vec![HookCall::Progress,
                        HookCall::Path(Point::new(1, 2), Point::new(3, 4), PathStyle::Normal)]);
    }
}
