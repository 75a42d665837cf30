//! The drawer container: routes pointer events through the drag engine into
//! the panel coordinator, measures and positions its direct children, and
//! queues open/close notifications for the host.

use drawerkit_animation::SettleModel;
use drawerkit_gesture::{
    DragAxis, DragConfig, DragEngine, DragPolicy, Edges, ElementId, PointerEvent, TapDetector,
};
use drawerkit_graphics::{Color, Point, Rect, Size};

use crate::constraints::Constraints;
use crate::coordinator::{PanelCoordinator, Scrim, MIN_SETTLE_VELOCITY};
use crate::edge::DrawerEdge;
use crate::error::DrawerError;
use crate::events::{DrawerEvent, DrawerListener};
use crate::panel::Child;
use crate::params::{Gravity, LayoutDirection, LayoutParams};
use crate::scroll::{NoScroll, ScrollQuery};

/// `0x99000000`: black at 60% alpha.
pub const DEFAULT_SCRIM_COLOR: Color = Color::from_argb_u32(0x9900_0000);

/// Container-wide settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerConfig {
    pub drag: DragConfig,
    pub scrim_color: Color,
    pub min_settle_velocity: f32,
    pub layout_direction: LayoutDirection,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            drag: DragConfig::default(),
            scrim_color: DEFAULT_SCRIM_COLOR,
            min_settle_velocity: MIN_SETTLE_VELOCITY,
            layout_direction: LayoutDirection::Ltr,
        }
    }
}

impl DrawerConfig {
    pub fn with_drag(mut self, drag: DragConfig) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_scrim_color(mut self, color: Color) -> Self {
        self.scrim_color = color;
        self
    }

    pub fn with_min_settle_velocity(mut self, velocity: f32) -> Self {
        self.min_settle_velocity = velocity;
        self
    }

    pub fn with_layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }
}

/// Up to four edge drawers sharing one content child.
pub struct DrawerLayout {
    config: DrawerConfig,
    engine: DragEngine,
    tap: TapDetector,
    panels: PanelCoordinator,
    scroll_query: Box<dyn ScrollQuery>,
}

impl Default for DrawerLayout {
    fn default() -> Self {
        Self::new(DrawerConfig::default())
    }
}

impl DrawerLayout {
    pub fn new(config: DrawerConfig) -> Self {
        let engine = DragEngine::new(config.drag);
        let tap = TapDetector::new(engine.touch_slop());
        Self {
            config,
            engine,
            tap,
            panels: PanelCoordinator::new(config.min_settle_velocity),
            scroll_query: Box::new(NoScroll),
        }
    }

    pub fn set_scroll_query(&mut self, scroll_query: Box<dyn ScrollQuery>) {
        self.scroll_query = scroll_query;
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    pub fn engine(&self) -> &DragEngine {
        &self.engine
    }

    pub fn coordinator(&self) -> &PanelCoordinator {
        &self.panels
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Attaches a child on top of the existing ones.
    pub fn add_child(&mut self, id: ElementId, params: LayoutParams) -> Result<(), DrawerError> {
        self.panels.attach(id, params, self.config.layout_direction)
    }

    pub fn remove_child(&mut self, id: ElementId) -> Result<LayoutParams, DrawerError> {
        self.panels.detach(id).map(|child| child.params)
    }

    pub fn child(&self, id: ElementId) -> Option<&Child> {
        self.panels.children.get(&id)
    }

    pub fn child_frame(&self, id: ElementId) -> Option<Rect> {
        self.child(id).map(|child| child.frame)
    }

    pub fn is_child_visible(&self, id: ElementId) -> bool {
        self.child(id).is_some_and(|child| child.visible)
    }

    pub fn size(&self) -> Size {
        self.panels.container
    }

    // ------------------------------------------------------------------
    // Measure and layout
    // ------------------------------------------------------------------

    /// Measures the container and its direct children. The container only
    /// accepts exact constraints and exactly one content child.
    pub fn measure(&mut self, constraints: Constraints) -> Result<Size, DrawerError> {
        if !constraints.is_tight() {
            return Err(DrawerError::NotExactlyMeasured);
        }
        let width = constraints.max_width;
        let height = constraints.max_height;
        if self.panels.content().is_none() {
            return Err(DrawerError::MissingContent);
        }
        self.panels.container = Size::new(width, height);

        let direction = self.config.layout_direction;
        for child in self.panels.children.values_mut() {
            let params = child.params;
            let h_margin = params.margins.horizontal_sum();
            let v_margin = params.margins.vertical_sum();
            child.measured = match params.gravity.resolve(direction) {
                None => Size::new((width - h_margin).max(0.0), (height - v_margin).max(0.0)),
                Some(edge) => {
                    let mut drawer_width = params.width.resolve(width - h_margin);
                    let mut drawer_height = params.height.resolve(height - v_margin);
                    if edge.axis() == DragAxis::Horizontal {
                        if params.has_size_weight() {
                            drawer_width = (width * params.size_weight).floor().min(width - h_margin);
                        }
                        drawer_height = height - v_margin;
                    } else {
                        if params.has_size_weight() {
                            drawer_height = (height * params.size_weight).floor().min(height - v_margin);
                        }
                        drawer_width = width - h_margin;
                    }
                    Size::new(drawer_width.max(0.0), drawer_height.max(0.0))
                }
            };
        }
        Ok(self.panels.container)
    }

    /// Positions every child from the measured sizes and the open state.
    ///
    /// Each drawer sits parked past its edge, or in place when open or when
    /// it stays behind a moving content. The content is shifted by the open
    /// drawer when it moves with it.
    pub fn layout(&mut self) {
        let container = self.panels.container;
        let mut content_laid_out = false;
        for edge in DrawerEdge::ALL {
            let panel = self.panels.panel(edge).clone();
            let Some(drawer_id) = panel.drawer else {
                continue;
            };
            let is_open = panel.is_open(&self.panels.children);
            let shown = is_open || !panel.drawer_moves(&self.panels.children);
            if let Some(drawer) = self.panels.children.get_mut(&drawer_id) {
                let origin =
                    edge.orientation()
                        .drawer_origin(drawer.measured, drawer.params.margins, container, shown);
                drawer.frame = Rect::from_origin_size(origin, drawer.measured);
                drawer.visible = is_open;
            }
            if is_open {
                self.layout_content(edge);
                content_laid_out = true;
            }
        }
        if !content_laid_out {
            self.layout_content(DrawerEdge::Left);
        }
    }

    fn layout_content(&mut self, edge: DrawerEdge) {
        let panel = self.panels.panel(edge);
        let shift = if panel.is_open(&self.panels.children) && panel.content_moves(&self.panels.children) {
            panel.size(&self.panels.children)
        } else {
            0.0
        };
        let Some(content_id) = panel.content else {
            return;
        };
        if let Some(content) = self.panels.children.get_mut(&content_id) {
            let margins = content.params.margins;
            let resting = Rect::from_origin_size(Point::new(margins.left, margins.top), content.measured);
            content.frame = edge.orientation().offset(resting, shift);
        }
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Intercept phase: whether the container takes the gesture from the
    /// child under the pointer.
    pub fn on_intercept_event(&mut self, event: &PointerEvent) -> bool {
        self.track_tap(event);
        let model = self.settle_model();
        let mut claimed = {
            let mut policy = DrawerPolicy {
                panels: &mut self.panels,
                scroll_query: self.scroll_query.as_mut(),
                model,
            };
            self.engine.on_intercept_event(event, &mut policy)
        };
        if !claimed && self.panels.is_open() {
            // Touches on the content of an open drawer belong to the container.
            let position = event.position();
            let hit = self.panels.find_top_child_under(position.x, position.y);
            claimed = hit.is_some() && hit == self.panels.content();
        }
        claimed
    }

    /// Touch phase: the container owns the gesture. Always consumes.
    pub fn on_touch_event(&mut self, event: &PointerEvent) -> bool {
        self.track_tap(event);
        let model = self.settle_model();
        let mut policy = DrawerPolicy {
            panels: &mut self.panels,
            scroll_query: self.scroll_query.as_mut(),
            model,
        };
        self.engine.on_touch_event(event, &mut policy)
    }

    /// A child asking to keep its gesture closes any open drawer.
    pub fn request_disallow_intercept(&mut self, disallow: bool) {
        if disallow {
            self.close();
        }
    }

    /// Runs before the engine sees the event, so a tap that caught an
    /// in-flight settle ends it closed instead of being released as a drag.
    fn track_tap(&mut self, event: &PointerEvent) {
        let Some(point) = self.tap.on_event(event) else {
            return;
        };
        let hit = self.panels.find_top_child_under(point.x, point.y);
        if hit.is_none() || hit != self.panels.content() {
            return;
        }
        let target = match self.panels.opened_edge() {
            Some(edge) => Some(edge),
            None if self.engine.is_dragging() => self.panels.active_edge(),
            None => return,
        };
        self.engine.set_dragging(false);
        if let Some(edge) = target {
            log::debug!("tap on content closes {edge} panel");
            let model = self.settle_model();
            self.panels.settle(edge, false, &model);
        }
    }

    // ------------------------------------------------------------------
    // Programmatic control
    // ------------------------------------------------------------------

    pub fn open(&mut self, gravity: Gravity) {
        let Some(edge) = gravity.resolve(self.config.layout_direction) else {
            log::warn!("open called with content gravity");
            return;
        };
        if self.panels.panel(edge).drawer().is_none() {
            log::warn!("no drawer on the {edge} edge to open");
            return;
        }
        let model = self.settle_model();
        self.panels.set_active(Some(edge));
        self.panels.settle(edge, true, &model);
    }

    /// Closes the open drawer, or the one last dragged.
    pub fn close(&mut self) {
        let target = self.panels.opened_edge().or(self.panels.active_edge());
        if let Some(edge) = target {
            let model = self.settle_model();
            self.panels.settle(edge, false, &model);
        }
    }

    pub fn is_open(&self) -> bool {
        self.panels.is_open()
    }

    pub fn opened_edge(&self) -> Option<DrawerEdge> {
        self.panels.opened_edge()
    }

    pub fn opened_drawer(&self) -> Option<ElementId> {
        self.opened_edge()
            .and_then(|edge| self.panels.panel(edge).drawer())
    }

    /// Locking stops drags from opening or closing the drawer; programmatic
    /// `open`/`close` still work.
    pub fn lock(&mut self, gravity: Gravity, locked: bool) {
        if let Some(edge) = gravity.resolve(self.config.layout_direction) {
            self.panels.lock(edge, locked);
        }
    }

    pub fn is_locked(&self, gravity: Gravity) -> bool {
        gravity
            .resolve(self.config.layout_direction)
            .is_some_and(|edge| self.panels.is_locked(edge))
    }

    pub fn visible_size(&self, edge: DrawerEdge) -> f32 {
        self.panels.visible_size(edge)
    }

    pub fn panel_size(&self, edge: DrawerEdge) -> f32 {
        self.panels.panel_size(edge)
    }

    /// Reveals `edge` by `distance` more, clamped to the panel's extent.
    pub fn scroll_panel_by(&mut self, edge: DrawerEdge, distance: f32) {
        self.panels.apply_distance(edge, distance);
    }

    /// Animates `edge` open or closed from its current position.
    pub fn settle(&mut self, edge: DrawerEdge, open: bool) {
        let model = self.settle_model();
        self.panels.settle(edge, open, &model);
    }

    /// Advances a running settle to `frame_time_nanos`. Returns `true` while
    /// the host should request another frame.
    pub fn compute_scroll(&mut self, frame_time_nanos: u64) -> bool {
        self.panels.compute_scroll(frame_time_nanos)
    }

    pub fn is_settling(&self) -> bool {
        self.panels.is_settling()
    }

    pub fn scrim(&self) -> Option<Scrim> {
        self.panels.scrim(self.config.scrim_color)
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn has_pending_events(&self) -> bool {
        self.panels.has_pending_events()
    }

    /// Removes and returns queued transitions, oldest first.
    pub fn take_events(&mut self) -> Vec<DrawerEvent> {
        self.panels.take_events().into_vec()
    }

    /// Delivers queued transitions to `listener`.
    pub fn dispatch_events(&mut self, listener: &mut dyn DrawerListener) {
        for event in self.panels.take_events() {
            if event.is_open {
                listener.on_drawer_opened(event.drawer, event.edge);
            } else {
                listener.on_drawer_closed(event.drawer, event.edge);
            }
        }
    }

    fn settle_model(&self) -> SettleModel {
        self.engine.settle_model(self.panels.container.width)
    }
}

/// Per-event view of the coordinator handed to the drag engine.
struct DrawerPolicy<'a> {
    panels: &'a mut PanelCoordinator,
    scroll_query: &'a mut dyn ScrollQuery,
    model: SettleModel,
}

impl DragPolicy for DrawerPolicy<'_> {
    fn scroll_axis(&self) -> DragAxis {
        self.panels.scroll_axis()
    }

    fn allow_drag_if_wrong_axis_first(&self) -> bool {
        // An open drawer takes the gesture whichever way it starts.
        self.panels.is_open()
    }

    fn select_target(&mut self, dx: f32, dy: f32, touch_slop: f32) {
        self.panels.select_active_edge(dx, dy, touch_slop);
    }

    fn container_size(&self) -> Size {
        self.panels.container_size()
    }

    fn find_top_child_under(&self, x: f32, y: f32) -> Option<ElementId> {
        self.panels.find_top_child_under(x, y)
    }

    fn is_settling(&self) -> bool {
        self.panels.is_settling()
    }

    fn on_drag_begin(
        &mut self,
        child: ElementId,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        edges: Edges,
    ) -> bool {
        self.panels
            .on_drag_begin(child, x, y, dx, dy, edges, &mut *self.scroll_query)
    }

    fn on_scroll(&mut self, _x: f32, _y: f32, dx: f32, dy: f32) -> bool {
        self.panels.on_scroll(dx, dy)
    }

    fn on_drag_end(&mut self, xvel: f32, yvel: f32) {
        self.panels.on_drag_end(xvel, yvel, &self.model);
    }
}
