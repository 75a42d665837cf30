//! Robot-style gesture driver for drawerkit containers
//!
//! The robot plays the part of the host's event dispatch: it builds pointer
//! events with a monotonically increasing uptime, routes them through the
//! container's intercept and touch phases the way a view hierarchy would,
//! and pumps animation frames until a settle completes.
//!
//! # Example
//!
//! ```
//! use drawerkit_drawer::{Constraints, DrawerLayout, Gravity, LayoutParams};
//! use drawerkit_gesture::ElementId;
//! use drawerkit_testing::robot::GestureRobot;
//!
//! let mut layout = DrawerLayout::default();
//! layout.add_child(ElementId(1), LayoutParams::content()).unwrap();
//! layout.add_child(ElementId(2), LayoutParams::drawer(Gravity::Left)).unwrap();
//! layout.measure(Constraints::tight(1000.0, 800.0)).unwrap();
//! layout.layout();
//!
//! let mut robot = GestureRobot::new(layout);
//! robot.drag((500.0, 400.0), (900.0, 400.0), 20);
//! robot.pump_frames();
//! assert!(robot.host().is_open());
//! ```

use drawerkit_drawer::{DrawerLayout, PullDownLayout};
use drawerkit_gesture::{PointerEvent, PointerEventKind, PointerId, PointerSample};
use drawerkit_graphics::Point;

/// One display frame at 60 Hz, in nanoseconds.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Default time between generated pointer events, in milliseconds.
pub const DEFAULT_STEP_MS: i64 = 16;

/// Upper bound on frames pumped by [`GestureRobot::pump_frames`].
const MAX_FRAMES: usize = 1_000;

/// A container the robot can drive.
pub trait GestureHost {
    fn intercept(&mut self, event: &PointerEvent) -> bool;
    fn touch(&mut self, event: &PointerEvent) -> bool;
    /// Returns the effective value of the request.
    fn request_disallow_intercept(&mut self, disallow: bool) -> bool;
    /// Advances animations; `true` while another frame is needed.
    fn advance_frame(&mut self, frame_time_nanos: u64) -> bool;
}

impl GestureHost for DrawerLayout {
    fn intercept(&mut self, event: &PointerEvent) -> bool {
        self.on_intercept_event(event)
    }

    fn touch(&mut self, event: &PointerEvent) -> bool {
        self.on_touch_event(event)
    }

    fn request_disallow_intercept(&mut self, disallow: bool) -> bool {
        DrawerLayout::request_disallow_intercept(self, disallow);
        disallow
    }

    fn advance_frame(&mut self, frame_time_nanos: u64) -> bool {
        self.compute_scroll(frame_time_nanos)
    }
}

impl GestureHost for PullDownLayout {
    fn intercept(&mut self, event: &PointerEvent) -> bool {
        self.on_intercept_event(event)
    }

    fn touch(&mut self, event: &PointerEvent) -> bool {
        self.on_touch_event(event)
    }

    fn request_disallow_intercept(&mut self, disallow: bool) -> bool {
        PullDownLayout::request_disallow_intercept(self, disallow)
    }

    fn advance_frame(&mut self, frame_time_nanos: u64) -> bool {
        self.compute_scroll(frame_time_nanos)
    }
}

/// Who receives the rest of the current gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    None,
    /// A child consumed the down; the container still watches through its
    /// intercept phase.
    Child,
    /// The container's touch phase receives every event.
    Container,
}

/// Drives a [`GestureHost`] with synthetic pointer input.
pub struct GestureRobot<H: GestureHost> {
    host: H,
    pointers: Vec<PointerSample>,
    owner: Owner,
    children_consume: bool,
    disallow_intercept: bool,
    child_events: Vec<PointerEventKind>,
    uptime_ms: i64,
    step_ms: i64,
    frame_time_nanos: u64,
}

impl<H: GestureHost> GestureRobot<H> {
    /// Creates a robot whose children ignore touches, so every gesture
    /// falls through to the container's touch phase.
    pub fn new(host: H) -> Self {
        Self {
            host,
            pointers: Vec::new(),
            owner: Owner::None,
            children_consume: false,
            disallow_intercept: false,
            child_events: Vec::new(),
            uptime_ms: 0,
            step_ms: DEFAULT_STEP_MS,
            frame_time_nanos: 0,
        }
    }

    /// When set, a child consumes every down and the container only sees
    /// the gesture through its intercept phase until it claims it.
    pub fn with_consuming_children(mut self, consume: bool) -> Self {
        self.children_consume = consume;
        self
    }

    pub fn with_step_ms(mut self, step_ms: i64) -> Self {
        self.step_ms = step_ms;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Event kinds the consuming child received during the last gesture.
    pub fn child_events(&self) -> &[PointerEventKind] {
        &self.child_events
    }

    pub fn uptime_ms(&self) -> i64 {
        self.uptime_ms
    }

    /// Lets time pass without any pointer event.
    pub fn wait(&mut self, millis: i64) {
        self.uptime_ms += millis;
    }

    pub fn down(&mut self, x: f32, y: f32) {
        self.pointer_down(0, x, y);
    }

    /// Puts another pointer down; the first one produces a `Down`.
    pub fn pointer_down(&mut self, id: PointerId, x: f32, y: f32) {
        self.pointers.push(PointerSample::new(id, x, y));
        let kind = if self.pointers.len() == 1 {
            PointerEventKind::Down
        } else {
            PointerEventKind::PointerDown
        };
        let index = self.pointers.len() - 1;
        self.dispatch(kind, index);
    }

    /// Moves the first pointer still down.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if let Some(id) = self.pointers.first().map(|sample| sample.id) {
            self.move_pointer(id, x, y);
        }
    }

    pub fn move_pointer(&mut self, id: PointerId, x: f32, y: f32) {
        let Some(sample) = self.pointers.iter_mut().find(|sample| sample.id == id) else {
            log::warn!("move for pointer {id} that is not down");
            return;
        };
        sample.position = Point::new(x, y);
        self.uptime_ms += self.step_ms;
        self.dispatch(PointerEventKind::Move, 0);
    }

    /// Lifts one pointer; the last one produces an `Up`.
    pub fn pointer_up(&mut self, id: PointerId) {
        let Some(index) = self.pointers.iter().position(|sample| sample.id == id) else {
            log::warn!("up for pointer {id} that is not down");
            return;
        };
        let kind = if self.pointers.len() == 1 {
            PointerEventKind::Up
        } else {
            PointerEventKind::PointerUp
        };
        self.dispatch(kind, index);
        self.pointers.remove(index);
    }

    /// Lifts the first pointer still down.
    pub fn up(&mut self) {
        if let Some(id) = self.pointers.first().map(|sample| sample.id) {
            self.pointer_up(id);
        }
    }

    pub fn cancel(&mut self) {
        if self.pointers.is_empty() {
            return;
        }
        self.dispatch(PointerEventKind::Cancel, 0);
        self.pointers.clear();
    }

    /// Puts a pointer down at `from` and moves it to `to` in `steps`
    /// evenly spaced moves, leaving it down.
    pub fn drag_to(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) {
        self.down(from.0, from.1);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.move_to(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
        }
    }

    /// A full drag: down, `steps` moves, then up without pausing, so the
    /// release carries the drag's speed.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) {
        self.drag_to(from, to, steps);
        self.up();
    }

    /// A drag that holds still before lifting, releasing with no velocity.
    pub fn drag_and_hold(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) {
        self.drag_to(from, to, steps);
        self.wait(200);
        self.move_to(to.0, to.1);
        self.up();
    }

    pub fn tap(&mut self, x: f32, y: f32) {
        self.down(x, y);
        self.up();
    }

    /// Forwards a child's request to keep the current gesture.
    pub fn request_disallow_intercept(&mut self, disallow: bool) {
        self.disallow_intercept = self.host.request_disallow_intercept(disallow);
    }

    /// Advances one frame. Returns `true` while the host wants more frames.
    pub fn advance_frame(&mut self) -> bool {
        self.frame_time_nanos += FRAME_NANOS;
        self.host.advance_frame(self.frame_time_nanos)
    }

    /// Advances frames until the host is idle. Returns the frame count.
    pub fn pump_frames(&mut self) -> usize {
        let mut frames = 0;
        while self.advance_frame() {
            frames += 1;
            if frames >= MAX_FRAMES {
                log::warn!("host still animating after {MAX_FRAMES} frames");
                break;
            }
        }
        frames
    }

    fn dispatch(&mut self, kind: PointerEventKind, action_index: usize) {
        let event =
            PointerEvent::with_pointers(kind, action_index, self.pointers.iter().copied(), self.uptime_ms);

        if kind == PointerEventKind::Down {
            self.disallow_intercept = false;
            self.child_events.clear();
            if self.host.intercept(&event) {
                self.owner = Owner::Container;
                self.host.touch(&event);
            } else if self.children_consume {
                self.owner = Owner::Child;
                self.child_events.push(kind);
            } else {
                self.owner = Owner::Container;
                self.host.touch(&event);
            }
            return;
        }

        match self.owner {
            Owner::Child => {
                if !self.disallow_intercept && self.host.intercept(&event) {
                    log::debug!("container claimed the gesture on {kind:?}");
                    self.owner = Owner::Container;
                    self.child_events.push(PointerEventKind::Cancel);
                } else {
                    self.child_events.push(kind);
                }
            }
            Owner::Container => {
                self.host.touch(&event);
            }
            Owner::None => {}
        }
    }
}
