//! Pull-down container: dragging the body down reveals a head above it.
//!
//! The first child attached is the head, the second the body. It shares the
//! drag engine, settle model and release thresholds with [`DrawerLayout`],
//! but only ever slides along the top edge.
//!
//! [`DrawerLayout`]: crate::DrawerLayout

use drawerkit_animation::{SettleModel, SettleScroller};
use drawerkit_gesture::{
    DragAxis, DragConfig, DragEngine, DragPolicy, Edges, ElementId, PointerEvent, PointerEventKind,
    PointerId,
};
use drawerkit_graphics::{Point, Rect, Size};

use crate::constraints::Constraints;
use crate::coordinator::MIN_SETTLE_VELOCITY;
use crate::error::DrawerError;
use crate::events::EventQueue;
use crate::panel::{top_child_under, Child, ChildTable};
use crate::params::{CloseType, LayoutParams};
use crate::scroll::{NoScroll, ScrollQuery};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PullDownMode {
    /// The head stays in place and the body slides off it.
    #[default]
    Under,
    /// The head is parked above the container and slides in with the body.
    Top,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullDownEvent {
    Opened,
    Closed,
}

pub trait PullDownListener {
    fn on_head_opened(&mut self);
    fn on_head_closed(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullDownConfig {
    pub drag: DragConfig,
    pub mode: PullDownMode,
    pub close_type: CloseType,
    /// Blocks every drag; programmatic open still works.
    pub forbid_open: bool,
    pub pull_to_open: f32,
    pub pull_to_close: f32,
    pub min_settle_velocity: f32,
}

impl Default for PullDownConfig {
    fn default() -> Self {
        Self {
            drag: DragConfig::default(),
            mode: PullDownMode::Under,
            close_type: CloseType::Normal,
            forbid_open: false,
            pull_to_open: 0.5,
            pull_to_close: 0.5,
            min_settle_velocity: MIN_SETTLE_VELOCITY,
        }
    }
}

impl PullDownConfig {
    pub fn with_mode(mut self, mode: PullDownMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_close_type(mut self, close_type: CloseType) -> Self {
        self.close_type = close_type;
        self
    }

    pub fn with_pull_to_open(mut self, fraction: f32) -> Self {
        self.pull_to_open = fraction;
        self
    }

    pub fn with_pull_to_close(mut self, fraction: f32) -> Self {
        self.pull_to_close = fraction;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FirstMove {
    None,
    Up,
    Other,
}

/// Watches the first upward move of a gesture. An open head claims any
/// gesture that starts by moving up, even if a child asked to keep it.
#[derive(Clone, Debug)]
struct FirstMoveTracker {
    active_pointer: Option<PointerId>,
    last: Point,
    first_move: FirstMove,
}

impl FirstMoveTracker {
    fn new() -> Self {
        Self {
            active_pointer: None,
            last: Point::ZERO,
            first_move: FirstMove::None,
        }
    }

    fn is_moving_up(&self) -> bool {
        self.first_move == FirstMove::Up
    }

    fn on_event(&mut self, event: &PointerEvent) {
        match event.kind {
            PointerEventKind::Down => {
                self.first_move = FirstMove::None;
                self.last = event.position();
                self.active_pointer = event.pointer_id(0);
            }
            PointerEventKind::Move => {
                if self.first_move != FirstMove::None {
                    return;
                }
                let Some(position) = self
                    .active_pointer
                    .and_then(|id| event.find_pointer_index(id))
                    .and_then(|index| event.position_at(index))
                else {
                    return;
                };
                let delta = position - self.last;
                if delta.y < 0.0 {
                    self.first_move = if delta.x.abs() > delta.y.abs() {
                        FirstMove::Other
                    } else {
                        FirstMove::Up
                    };
                }
                self.last = position;
            }
            PointerEventKind::PointerUp => {
                let leaving = event.action_index;
                if event.pointer_id(leaving) == self.active_pointer {
                    let next = if leaving == 0 { 1 } else { 0 };
                    if let (Some(id), Some(position)) = (event.pointer_id(next), event.position_at(next)) {
                        self.active_pointer = Some(id);
                        self.last = position;
                    }
                }
            }
            _ => {}
        }
    }
}

/// Everything the drag policy touches, kept apart from the engine so both
/// can be borrowed at once.
struct PullDownState {
    config: PullDownConfig,
    children: ChildTable,
    head: Option<ElementId>,
    body: Option<ElementId>,
    container: Size,
    head_height: f32,
    is_open: bool,
    scroller: SettleScroller,
    events: EventQueue<PullDownEvent>,
}

impl PullDownState {
    fn body_offset_top(&self) -> f32 {
        self.body
            .and_then(|id| self.children.get(&id))
            .map_or(0.0, |body| body.frame.y - body.params.margins.top)
    }

    fn scroll_body_by(&mut self, dy: f32) {
        if self.body.is_none() {
            return;
        }
        let target = self.body_offset_top() + dy;
        let offset = self.scroller.clamp_or_abort(target, self.head_height);
        self.place(offset);
    }

    /// Puts the body `offset` below its resting position and the head
    /// where the mode wants it.
    fn place(&mut self, offset: f32) {
        let Some(body) = self.body.and_then(|id| self.children.get_mut(&id)) else {
            return;
        };
        body.frame.y = body.params.margins.top + offset;

        let Some(head) = self.head.and_then(|id| self.children.get_mut(&id)) else {
            return;
        };
        head.frame.y = match self.config.mode {
            PullDownMode::Top => offset - self.head_height + head.params.margins.top,
            PullDownMode::Under => head.params.margins.top,
        };
    }

    fn settle(&mut self, open: bool, model: &SettleModel) {
        let changed = open != self.is_open;
        self.is_open = open;
        let top = self.body_offset_top();
        let dy = if open { self.head_height - top } else { -top };
        let duration = model.compute_settle_duration(0.0, self.head_height, 0.0, dy, 0.0, 0.0);
        log::debug!("pull-down settle open={open} from {top} over {duration}ms");
        self.scroller.start_scroll(top, dy, duration);
        if changed {
            self.events.push(if open {
                PullDownEvent::Opened
            } else {
                PullDownEvent::Closed
            });
        }
    }
}

pub struct PullDownLayout {
    engine: DragEngine,
    first_move: FirstMoveTracker,
    state: PullDownState,
    scroll_query: Box<dyn ScrollQuery>,
}

impl Default for PullDownLayout {
    fn default() -> Self {
        Self::new(PullDownConfig::default())
    }
}

impl PullDownLayout {
    pub const MAX_CHILDREN: usize = 2;

    pub fn new(config: PullDownConfig) -> Self {
        Self {
            engine: DragEngine::new(config.drag),
            first_move: FirstMoveTracker::new(),
            state: PullDownState {
                config,
                children: ChildTable::default(),
                head: None,
                body: None,
                container: Size::ZERO,
                head_height: 0.0,
                is_open: false,
                scroller: SettleScroller::new(),
                events: EventQueue::default(),
            },
            scroll_query: Box::new(NoScroll),
        }
    }

    pub fn set_scroll_query(&mut self, scroll_query: Box<dyn ScrollQuery>) {
        self.scroll_query = scroll_query;
    }

    pub fn config(&self) -> &PullDownConfig {
        &self.state.config
    }

    pub fn set_mode(&mut self, mode: PullDownMode) {
        self.state.config.mode = mode;
    }

    pub fn set_close_type(&mut self, close_type: CloseType) {
        self.state.config.close_type = close_type;
    }

    pub fn set_forbid_open(&mut self, forbid: bool) {
        self.state.config.forbid_open = forbid;
    }

    pub fn is_forbid_open(&self) -> bool {
        self.state.config.forbid_open
    }

    /// The first child becomes the head, the second the body.
    pub fn add_child(&mut self, id: ElementId, params: LayoutParams) -> Result<(), DrawerError> {
        if self.state.children.contains_key(&id) {
            return Err(DrawerError::DuplicateChild { id });
        }
        if self.state.head.is_none() {
            self.state.head = Some(id);
        } else if self.state.body.is_none() {
            self.state.body = Some(id);
        } else {
            return Err(DrawerError::TooManyChildren {
                max: Self::MAX_CHILDREN,
            });
        }
        self.state.children.insert(id, Child::new(params));
        Ok(())
    }

    pub fn remove_child(&mut self, id: ElementId) -> Result<LayoutParams, DrawerError> {
        let child = self
            .state
            .children
            .shift_remove(&id)
            .ok_or(DrawerError::UnknownChild { id })?;
        if self.state.head == Some(id) {
            self.state.head = None;
        }
        if self.state.body == Some(id) {
            self.state.body = None;
        }
        Ok(child.params)
    }

    pub fn head(&self) -> Option<ElementId> {
        self.state.head
    }

    pub fn body(&self) -> Option<ElementId> {
        self.state.body
    }

    pub fn child_frame(&self, id: ElementId) -> Option<Rect> {
        self.state.children.get(&id).map(|child| child.frame)
    }

    pub fn head_height(&self) -> f32 {
        self.state.head_height
    }

    /// How far the body is pulled down from its resting position.
    pub fn body_offset_top(&self) -> f32 {
        self.state.body_offset_top()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn is_settling(&self) -> bool {
        !self.state.scroller.is_finished()
    }

    /// Measures against bounded constraints; the container takes the
    /// maximum size.
    pub fn measure(&mut self, constraints: Constraints) -> Result<Size, DrawerError> {
        if !constraints.is_bounded() {
            return Err(DrawerError::NotExactlyMeasured);
        }
        let container = Size::new(constraints.max_width, constraints.max_height);
        self.state.container = container;
        for child in self.state.children.values_mut() {
            let margins = child.params.margins;
            let available_width = (container.width - margins.horizontal_sum()).max(0.0);
            let available_height = (container.height - margins.vertical_sum()).max(0.0);
            let (width, height) = Constraints::loose(available_width, available_height).constrain(
                child.params.width.resolve(available_width),
                child.params.height.resolve(available_height),
            );
            child.measured = Size::new(width, height);
        }
        Ok(container)
    }

    pub fn layout(&mut self) {
        let state = &mut self.state;
        if let Some(head) = state.head.and_then(|id| state.children.get_mut(&id)) {
            let margins = head.params.margins;
            let height = head.measured.height;
            state.head_height = height + margins.vertical_sum();
            let top = if state.config.mode == PullDownMode::Top && !state.is_open {
                -margins.bottom - height
            } else {
                margins.top
            };
            head.frame = Rect::from_origin_size(Point::new(margins.left, top), head.measured);
        }
        let head_height = state.head_height;
        let is_open = state.is_open;
        if let Some(body) = state.body.and_then(|id| state.children.get_mut(&id)) {
            let margins = body.params.margins;
            let shift = if is_open { head_height } else { 0.0 };
            body.frame = Rect::from_origin_size(
                Point::new(margins.left, margins.top + shift),
                body.measured,
            );
        }
    }

    pub fn on_intercept_event(&mut self, event: &PointerEvent) -> bool {
        self.track_first_move(event);
        let model = self.engine.settle_model(self.state.container.width);
        let mut policy = PullDownPolicy {
            state: &mut self.state,
            scroll_query: self.scroll_query.as_mut(),
            model,
        };
        self.engine.on_intercept_event(event, &mut policy)
    }

    pub fn on_touch_event(&mut self, event: &PointerEvent) -> bool {
        self.track_first_move(event);
        let model = self.engine.settle_model(self.state.container.width);
        let mut policy = PullDownPolicy {
            state: &mut self.state,
            scroll_query: self.scroll_query.as_mut(),
            model,
        };
        self.engine.on_touch_event(event, &mut policy)
    }

    fn track_first_move(&mut self, event: &PointerEvent) {
        let was_moving_up = self.first_move.is_moving_up();
        self.first_move.on_event(event);
        let claims = match event.kind {
            PointerEventKind::Move => !was_moving_up && self.first_move.is_moving_up(),
            PointerEventKind::PointerUp => self.first_move.is_moving_up(),
            _ => false,
        };
        if claims && self.state.is_open {
            log::debug!("upward gesture on open head claimed");
            self.engine.set_dragging(true);
        }
    }

    /// Effective value of a child's request to keep its gesture: an open
    /// head ignores it while the gesture moves up.
    pub fn request_disallow_intercept(&self, disallow: bool) -> bool {
        if self.state.is_open && self.first_move.is_moving_up() {
            false
        } else {
            disallow
        }
    }

    pub fn open(&mut self) {
        if !self.state.is_open {
            let model = self.engine.settle_model(self.state.container.width);
            self.state.settle(true, &model);
        }
    }

    pub fn close(&mut self) {
        if self.state.is_open {
            let model = self.engine.settle_model(self.state.container.width);
            self.state.settle(false, &model);
        }
    }

    /// Moves the body by `dy`, clamped to `[0, head height]`.
    pub fn scroll_body_by(&mut self, dy: f32) {
        self.state.scroll_body_by(dy);
    }

    pub fn compute_scroll(&mut self, frame_time_nanos: u64) -> bool {
        let state = &mut self.state;
        if !state.scroller.compute_offset(frame_time_nanos) {
            return false;
        }
        let offset = state.scroller.current().clamp(0.0, state.head_height);
        state.place(offset);
        true
    }

    pub fn take_events(&mut self) -> Vec<PullDownEvent> {
        self.state.events.take().into_vec()
    }

    pub fn dispatch_events(&mut self, listener: &mut dyn PullDownListener) {
        for event in self.state.events.take() {
            match event {
                PullDownEvent::Opened => listener.on_head_opened(),
                PullDownEvent::Closed => listener.on_head_closed(),
            }
        }
    }
}

struct PullDownPolicy<'a> {
    state: &'a mut PullDownState,
    scroll_query: &'a mut dyn ScrollQuery,
    model: SettleModel,
}

impl DragPolicy for PullDownPolicy<'_> {
    fn scroll_axis(&self) -> DragAxis {
        DragAxis::Vertical
    }

    fn allow_drag_if_wrong_axis_first(&self) -> bool {
        true
    }

    fn container_size(&self) -> Size {
        self.state.container
    }

    fn find_top_child_under(&self, x: f32, y: f32) -> Option<ElementId> {
        top_child_under(&self.state.children, x, y)
    }

    fn is_settling(&self) -> bool {
        !self.state.scroller.is_finished()
    }

    fn on_drag_begin(
        &mut self,
        child: ElementId,
        x: f32,
        y: f32,
        _dx: f32,
        dy: f32,
        edges: Edges,
    ) -> bool {
        if self.state.config.forbid_open {
            return false;
        }
        let body_top = self
            .state
            .body
            .and_then(|id| self.state.children.get(&id))
            .map_or(0.0, |body| body.frame.y);
        let drag = if edges.contains(Edges::TOP) || self.is_settling() || y < body_top {
            true
        } else if dy > 0.0 && !self.state.is_open {
            let frame = self
                .state
                .children
                .get(&child)
                .map(|child| child.frame)
                .unwrap_or_default();
            !self
                .scroll_query
                .can_scroll(child, x - frame.x, y - frame.y, 0.0, dy)
        } else {
            dy < 0.0 && self.state.is_open
        };
        if drag {
            if let Some(body) = self.state.body {
                self.scroll_query.stop_nested_scroll(body);
            }
        }
        drag
    }

    fn on_scroll(&mut self, _x: f32, _y: f32, _dx: f32, dy: f32) -> bool {
        if !self.state.scroller.is_finished() {
            self.state.scroller.abort_animation();
        }
        self.state.scroll_body_by(dy);
        true
    }

    fn on_drag_end(&mut self, _xvel: f32, yvel: f32) {
        let state = &mut *self.state;
        let offset = state.body_offset_top();
        let min = state.config.min_settle_velocity;
        let mut open = if yvel > min {
            true
        } else if yvel < -min {
            false
        } else if state.is_open {
            offset > state.head_height * state.config.pull_to_close
        } else {
            offset > state.head_height * state.config.pull_to_open
        };
        if state.config.close_type == CloseType::AlwaysClose {
            open = false;
        }
        state.settle(open, &self.model);
    }
}
