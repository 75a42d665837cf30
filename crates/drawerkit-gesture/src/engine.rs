//! Pointer-drag state machine shared by every sliding container.
//!
//! The engine sees each pointer event twice at most: once while the host
//! asks whether the container wants to steal the gesture from its children
//! ([`DragEngine::on_intercept_event`]) and once when the container owns it
//! ([`DragEngine::on_touch_event`]). Both paths run the same slop and edge
//! resolution; only the touch path moves anything.

use drawerkit_animation::{clamp_magnitude, SettleModel};
use drawerkit_graphics::Point;

use crate::constants::DragConfig;
use crate::policy::{DragAxis, DragPolicy, Edges};
use crate::types::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker;

/// State of the gesture currently in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSession {
    /// Pointer whose motion drives the drag; `None` outside a gesture.
    pub active_pointer: Option<PointerId>,
    pub initial: Point,
    pub last: Point,
    pub dragging: bool,
    /// Set once the gesture moved past slop along the axis the policy does
    /// not drag. Sticks until the next `Down`.
    pub wrong_axis_first: bool,
}

pub struct DragEngine {
    config: DragConfig,
    session: PointerSession,
    velocity_tracker: Option<VelocityTracker>,
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragEngine {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: PointerSession::default(),
            velocity_tracker: None,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    pub fn touch_slop(&self) -> f32 {
        self.config.touch_slop
    }

    pub fn edge_size(&self) -> f32 {
        self.config.edge_size_px()
    }

    pub fn min_fling_velocity(&self) -> f32 {
        self.config.min_fling_velocity
    }

    pub fn set_min_fling_velocity(&mut self, velocity: f32) {
        self.config.min_fling_velocity = velocity;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.dragging
    }

    /// Lets the owner end a drag it decided to stop on its own, e.g. after
    /// settling a panel from a tap.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.session.dragging = dragging;
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.session.active_pointer
    }

    /// Settle-duration model using this engine's fling range.
    pub fn settle_model(&self, container_width: f32) -> SettleModel {
        SettleModel::new(
            self.config.min_fling_velocity,
            self.config.max_fling_velocity,
            container_width,
        )
    }

    /// Ends the gesture: drops the active pointer and the velocity history.
    pub fn cancel(&mut self) {
        self.session.dragging = false;
        self.session.active_pointer = None;
        self.velocity_tracker = None;
    }

    /// Intercept-phase handler. Returns whether the container now owns the
    /// gesture.
    pub fn on_intercept_event(&mut self, event: &PointerEvent, policy: &mut dyn DragPolicy) -> bool {
        if event.kind == PointerEventKind::Move && self.session.dragging {
            return true;
        }
        if event.kind == PointerEventKind::Down {
            self.cancel();
        }
        self.velocity_tracker
            .get_or_insert_with(VelocityTracker::new)
            .add_movement(event);

        match event.kind {
            PointerEventKind::Down => self.start_session(event, policy),
            PointerEventKind::Move => {
                let Some(position) = self.active_position(event, "on_intercept_event") else {
                    return self.session.dragging;
                };
                if !self.session.dragging {
                    self.try_begin_drag(position, policy);
                }
                self.session.last = position;
            }
            PointerEventKind::PointerUp => self.on_secondary_pointer_up(event),
            PointerEventKind::Up | PointerEventKind::Cancel => self.cancel(),
            PointerEventKind::PointerDown => {}
        }

        self.session.dragging
    }

    /// Touch-phase handler. Always consumes the event.
    pub fn on_touch_event(&mut self, event: &PointerEvent, policy: &mut dyn DragPolicy) -> bool {
        if event.kind == PointerEventKind::Down {
            self.cancel();
        }
        self.velocity_tracker
            .get_or_insert_with(VelocityTracker::new)
            .add_movement(event);

        match event.kind {
            PointerEventKind::Down => self.start_session(event, policy),
            PointerEventKind::Move => {
                let Some(position) = self.active_position(event, "on_touch_event") else {
                    return true;
                };
                let mut delta = (
                    position.x - self.session.last.x,
                    position.y - self.session.last.y,
                );
                if !self.session.dragging {
                    if let Some(used) = self.try_begin_drag(position, policy) {
                        delta = used;
                    }
                }
                self.session.last = position;
                if self.session.dragging {
                    policy.on_scroll(position.x, position.y, delta.0, delta.1);
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                if self.session.dragging {
                    self.release(policy);
                }
                self.cancel();
            }
            PointerEventKind::PointerUp => self.on_secondary_pointer_up(event),
            PointerEventKind::PointerDown => {}
        }

        true
    }

    /// Whether `(dx, dy)` exceeds the slop along the policy's axis.
    ///
    /// A single-axis policy flags the session when the gesture first moves
    /// past slop along the other axis; from then on nothing in this gesture
    /// passes, unless the policy allows wrong-axis-first gestures.
    pub fn check_touch_slop(&mut self, dx: f32, dy: f32, policy: &mut dyn DragPolicy) -> bool {
        let slop = self.config.touch_slop;
        policy.select_target(dx, dy, slop);

        match policy.scroll_axis() {
            DragAxis::Both => dx * dx + dy * dy > slop * slop,
            DragAxis::Horizontal => {
                self.note_wrong_axis(dy.abs() > dx.abs() && dy.abs() > slop, policy);
                !self.session.wrong_axis_first && dx.abs() > slop
            }
            DragAxis::Vertical => {
                self.note_wrong_axis(dx.abs() > dy.abs() && dx.abs() > slop, policy);
                !self.session.wrong_axis_first && dy.abs() > slop
            }
            DragAxis::None => false,
        }
    }

    fn note_wrong_axis(&mut self, wrong_axis: bool, policy: &dyn DragPolicy) {
        if policy.allow_drag_if_wrong_axis_first() || self.session.wrong_axis_first {
            return;
        }
        if wrong_axis {
            log::debug!("gesture moved along the wrong axis first");
            self.session.wrong_axis_first = true;
        }
    }

    fn start_session(&mut self, event: &PointerEvent, policy: &mut dyn DragPolicy) {
        let position = event.position();
        self.session = PointerSession {
            active_pointer: event.pointer_id(0),
            initial: position,
            last: position,
            dragging: policy.is_settling(),
            wrong_axis_first: false,
        };
        if self.session.dragging {
            log::debug!("touch down caught an in-flight settle");
        }
    }

    fn active_position(&self, event: &PointerEvent, phase: &str) -> Option<Point> {
        // No active pointer means the down never reached this container.
        let active = self.session.active_pointer?;
        match event.find_pointer_index(active) {
            Some(index) => event.position_at(index),
            None => {
                log::error!("invalid pointer id {active} in {phase}");
                None
            }
        }
    }

    /// Runs the slop check against the last, then the initial position and,
    /// when it passes, offers the drag to the policy. Returns the delta the
    /// successful check used.
    fn try_begin_drag(&mut self, position: Point, policy: &mut dyn DragPolicy) -> Option<(f32, f32)> {
        let mut dx = position.x - self.session.last.x;
        let mut dy = position.y - self.session.last.y;
        let mut slop = self.check_touch_slop(dx, dy, policy);
        if !slop {
            dx = position.x - self.session.initial.x;
            dy = position.y - self.session.initial.y;
            slop = self.check_touch_slop(dx, dy, policy);
        }
        if !slop || self.session.wrong_axis_first {
            return None;
        }

        let child = policy.find_top_child_under(position.x, position.y)?;
        let edges = self.edges_for(dx, dy, policy);
        self.session.dragging = policy.on_drag_begin(child, position.x, position.y, dx, dy, edges);
        if self.session.dragging {
            log::debug!("drag begins on {child:?} edges={edges:?} delta=({dx}, {dy})");
        }
        Some((dx, dy))
    }

    /// Edges next to which the gesture started, counted only in the
    /// direction of motion and only while no earlier move was recorded.
    fn edges_for(&self, dx: f32, dy: f32, policy: &dyn DragPolicy) -> Edges {
        let mut edges = Edges::NONE;
        if self.session.initial != self.session.last {
            return edges;
        }
        let size = policy.container_size();
        let edge_size = self.config.edge_size_px();
        let Point { x, y } = self.session.initial;

        if dy > 0.0 && y < edge_size {
            edges |= Edges::TOP;
        }
        if dy < 0.0 && y > size.height - edge_size {
            edges |= Edges::BOTTOM;
        }
        if dx > 0.0 && x < edge_size {
            edges |= Edges::LEFT;
        }
        if dx < 0.0 && x > size.width - edge_size {
            edges |= Edges::RIGHT;
        }
        if !edges.is_empty() {
            log::debug!("drag edge {edges:?}");
        }
        edges
    }

    fn on_secondary_pointer_up(&mut self, event: &PointerEvent) {
        let leaving = event.action_index;
        if event.pointer_id(leaving) != self.session.active_pointer {
            return;
        }
        let next = if leaving == 0 { 1 } else { 0 };
        match (event.pointer_id(next), event.position_at(next)) {
            (Some(id), Some(position)) => {
                self.session.last = position;
                self.session.active_pointer = Some(id);
                if let Some(tracker) = self.velocity_tracker.as_mut() {
                    tracker.clear();
                }
            }
            _ => log::error!("pointer up without a remaining pointer to adopt"),
        }
    }

    fn release(&mut self, policy: &mut dyn DragPolicy) {
        self.session.dragging = false;
        let (min, max) = (self.config.min_fling_velocity, self.config.max_fling_velocity);
        let velocity = match (self.velocity_tracker.as_ref(), self.session.active_pointer) {
            (Some(tracker), Some(pointer)) => tracker.velocity(pointer, max),
            _ => None,
        };
        let (xvel, yvel) = velocity.unwrap_or_else(|| {
            log::error!("drag released without velocity history");
            (0.0, 0.0)
        });
        policy.on_drag_end(clamp_magnitude(xvel, min, max), clamp_magnitude(yvel, min, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ElementId, PointerSample};
    use drawerkit_graphics::Size;

    const CHILD: ElementId = ElementId(1);

    #[derive(Default)]
    struct RecordingPolicy {
        axis: DragAxis,
        allow_wrong_axis: bool,
        accept: bool,
        settling: bool,
        begins: Vec<(f32, f32, f32, f32, Edges)>,
        scrolls: Vec<(f32, f32)>,
        ends: Vec<(f32, f32)>,
    }

    impl RecordingPolicy {
        fn horizontal() -> Self {
            Self {
                axis: DragAxis::Horizontal,
                accept: true,
                ..Default::default()
            }
        }
    }

    impl DragPolicy for RecordingPolicy {
        fn scroll_axis(&self) -> DragAxis {
            self.axis
        }

        fn allow_drag_if_wrong_axis_first(&self) -> bool {
            self.allow_wrong_axis
        }

        fn container_size(&self) -> Size {
            Size::new(1000.0, 800.0)
        }

        fn find_top_child_under(&self, _x: f32, _y: f32) -> Option<ElementId> {
            Some(CHILD)
        }

        fn is_settling(&self) -> bool {
            self.settling
        }

        fn on_drag_begin(
            &mut self,
            _child: ElementId,
            x: f32,
            y: f32,
            dx: f32,
            dy: f32,
            edges: Edges,
        ) -> bool {
            self.begins.push((x, y, dx, dy, edges));
            self.accept
        }

        fn on_scroll(&mut self, _x: f32, _y: f32, dx: f32, dy: f32) -> bool {
            self.scrolls.push((dx, dy));
            true
        }

        fn on_drag_end(&mut self, xvel: f32, yvel: f32) {
            self.ends.push((xvel, yvel));
        }
    }

    fn event(kind: PointerEventKind, x: f32, y: f32, time: i64) -> PointerEvent {
        PointerEvent::new(kind, 0, Point::new(x, y), time)
    }

    #[test]
    fn horizontal_slop_uses_magnitude() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        assert!(!engine.check_touch_slop(8.0, 0.0, &mut policy));
        assert!(engine.check_touch_slop(-9.0, 2.0, &mut policy));
    }

    #[test]
    fn both_axes_use_distance() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy {
            axis: DragAxis::Both,
            ..Default::default()
        };
        assert!(!engine.check_touch_slop(5.0, 5.0, &mut policy));
        assert!(engine.check_touch_slop(6.0, 6.0, &mut policy));
    }

    #[test]
    fn no_axis_never_passes() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::default();
        assert!(!engine.check_touch_slop(500.0, 500.0, &mut policy));
    }

    #[test]
    fn wrong_axis_first_blocks_rest_of_gesture() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        assert!(!engine.check_touch_slop(2.0, 20.0, &mut policy));
        assert!(engine.session().wrong_axis_first);
        assert!(!engine.check_touch_slop(200.0, 0.0, &mut policy));
    }

    #[test]
    fn wrong_axis_first_allowed_by_policy() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy {
            axis: DragAxis::Vertical,
            allow_wrong_axis: true,
            accept: true,
            ..Default::default()
        };
        assert!(!engine.check_touch_slop(30.0, 1.0, &mut policy));
        assert!(!engine.session().wrong_axis_first);
        assert!(engine.check_touch_slop(0.0, 30.0, &mut policy));
    }

    #[test]
    fn intercept_claims_after_slop_and_reports_edge() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();

        assert!(!engine.on_intercept_event(&event(PointerEventKind::Down, 5.0, 300.0, 0), &mut policy));
        assert!(!engine.on_intercept_event(&event(PointerEventKind::Move, 10.0, 300.0, 10), &mut policy));
        assert!(policy.begins.is_empty());
        assert!(engine.on_intercept_event(&event(PointerEventKind::Move, 16.0, 300.0, 20), &mut policy));

        // Slop failed against the last position, passed against the initial.
        let (_, _, dx, _, edges) = policy.begins[0];
        assert_eq!(dx, 11.0);
        // A prior sub-slop move already happened, so no edge is reported.
        assert!(edges.is_empty());
        assert!(engine.is_dragging());
    }

    #[test]
    fn first_move_from_edge_reports_edge_in_direction_of_motion() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        engine.on_intercept_event(&event(PointerEventKind::Down, 995.0, 300.0, 0), &mut policy);
        engine.on_intercept_event(&event(PointerEventKind::Move, 950.0, 300.0, 10), &mut policy);
        assert_eq!(policy.begins[0].4, Edges::RIGHT);

        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        engine.on_intercept_event(&event(PointerEventKind::Down, 995.0, 300.0, 0), &mut policy);
        engine.on_intercept_event(&event(PointerEventKind::Move, 1040.0, 300.0, 10), &mut policy);
        assert!(policy.begins[0].4.is_empty());
    }

    #[test]
    fn rejected_drag_keeps_session_open() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy {
            accept: false,
            ..RecordingPolicy::horizontal()
        };
        engine.on_intercept_event(&event(PointerEventKind::Down, 500.0, 300.0, 0), &mut policy);
        assert!(!engine.on_intercept_event(&event(PointerEventKind::Move, 550.0, 300.0, 10), &mut policy));
        assert_eq!(engine.session().last, Point::new(550.0, 300.0));
        assert_eq!(engine.active_pointer(), Some(0));
    }

    #[test]
    fn down_during_settle_is_already_dragging() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy {
            settling: true,
            ..RecordingPolicy::horizontal()
        };
        assert!(engine.on_intercept_event(&event(PointerEventKind::Down, 500.0, 300.0, 0), &mut policy));
        assert!(engine.on_intercept_event(&event(PointerEventKind::Move, 501.0, 300.0, 5), &mut policy));
        assert!(policy.begins.is_empty());
    }

    #[test]
    fn touch_path_scrolls_with_the_claiming_delta_then_incrementally() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        engine.on_touch_event(&event(PointerEventKind::Down, 5.0, 300.0, 0), &mut policy);
        engine.on_touch_event(&event(PointerEventKind::Move, 205.0, 300.0, 16), &mut policy);
        engine.on_touch_event(&event(PointerEventKind::Move, 215.0, 302.0, 32), &mut policy);
        assert_eq!(policy.scrolls, vec![(200.0, 0.0), (10.0, 2.0)]);
        assert_eq!(policy.begins[0].4, Edges::LEFT);
    }

    #[test]
    fn release_reports_clamped_velocity_and_cancels() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        engine.on_touch_event(&event(PointerEventKind::Down, 0.0, 300.0, 0), &mut policy);
        for step in 1..=4 {
            let t = step * 10;
            engine.on_touch_event(&event(PointerEventKind::Move, t as f32 * 20.0, 300.0, t), &mut policy);
        }
        assert!(engine.on_touch_event(&event(PointerEventKind::Up, 800.0, 300.0, 40), &mut policy));

        assert_eq!(policy.ends.len(), 1);
        let (xvel, yvel) = policy.ends[0];
        assert_eq!(xvel, 8_000.0);
        assert_eq!(yvel, 0.0);
        assert!(!engine.is_dragging());
        assert_eq!(engine.active_pointer(), None);
    }

    #[test]
    fn up_without_drag_does_not_end_anything() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        engine.on_touch_event(&event(PointerEventKind::Down, 500.0, 300.0, 0), &mut policy);
        engine.on_touch_event(&event(PointerEventKind::Up, 501.0, 300.0, 50), &mut policy);
        assert!(policy.ends.is_empty());
    }

    #[test]
    fn unknown_active_pointer_is_skipped() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        engine.on_touch_event(&event(PointerEventKind::Down, 500.0, 300.0, 0), &mut policy);
        let stray = PointerEvent::new(PointerEventKind::Move, 42, Point::new(900.0, 300.0), 10);
        assert!(engine.on_touch_event(&stray, &mut policy));
        assert!(policy.begins.is_empty());
        assert_eq!(engine.session().last, Point::new(500.0, 300.0));
    }

    #[test]
    fn active_pointer_up_hands_over_to_remaining_pointer() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        engine.on_touch_event(&event(PointerEventKind::Down, 100.0, 300.0, 0), &mut policy);
        let two = |kind, index, time| {
            PointerEvent::with_pointers(
                kind,
                index,
                [PointerSample::new(0, 100.0, 300.0), PointerSample::new(1, 400.0, 200.0)],
                time,
            )
        };
        engine.on_touch_event(&two(PointerEventKind::PointerDown, 1, 10), &mut policy);
        assert_eq!(engine.active_pointer(), Some(0));

        engine.on_touch_event(&two(PointerEventKind::PointerUp, 0, 20), &mut policy);
        assert_eq!(engine.active_pointer(), Some(1));
        assert_eq!(engine.session().last, Point::new(400.0, 200.0));

        // Lifting a pointer that is not active changes nothing.
        engine.on_touch_event(&two(PointerEventKind::PointerUp, 0, 30), &mut policy);
        assert_eq!(engine.active_pointer(), Some(1));
    }

    #[test]
    fn new_down_resets_wrong_axis_flag() {
        let mut engine = DragEngine::default();
        let mut policy = RecordingPolicy::horizontal();
        engine.on_intercept_event(&event(PointerEventKind::Down, 500.0, 300.0, 0), &mut policy);
        engine.on_intercept_event(&event(PointerEventKind::Move, 500.0, 350.0, 10), &mut policy);
        assert!(engine.session().wrong_axis_first);
        engine.on_intercept_event(&event(PointerEventKind::Down, 500.0, 300.0, 100), &mut policy);
        assert!(!engine.session().wrong_axis_first);
    }
}
