use drawerkit_graphics::Point;

use crate::types::{PointerEvent, PointerEventKind};

/// Recognises a tap: a gesture whose first pointer never leaves the slop
/// circle around where it went down.
///
/// The detector only watches; it never claims the gesture, so it can run
/// alongside a [`DragEngine`](crate::DragEngine) on the same events.
#[derive(Clone, Debug)]
pub struct TapDetector {
    touch_slop: f32,
    initial: Point,
    has_moved: bool,
    tracking: bool,
}

impl TapDetector {
    pub fn new(touch_slop: f32) -> Self {
        Self {
            touch_slop,
            initial: Point::ZERO,
            has_moved: false,
            tracking: false,
        }
    }

    /// Feeds one event; returns the release point when it completes a tap.
    pub fn on_event(&mut self, event: &PointerEvent) -> Option<Point> {
        match event.kind {
            PointerEventKind::Down => {
                self.initial = event.position();
                self.has_moved = false;
                self.tracking = true;
                None
            }
            PointerEventKind::Move => {
                if self.tracking && !self.has_moved {
                    let delta = event.position() - self.initial;
                    let slop = self.touch_slop;
                    self.has_moved = delta.x * delta.x + delta.y * delta.y > slop * slop;
                }
                None
            }
            PointerEventKind::Up => {
                let tapped = self.tracking && !self.has_moved;
                self.tracking = false;
                tapped.then(|| event.position())
            }
            PointerEventKind::Cancel => {
                self.tracking = false;
                None
            }
            PointerEventKind::PointerDown | PointerEventKind::PointerUp => None,
        }
    }
}
