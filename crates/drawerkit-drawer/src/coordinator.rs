//! Multi-edge panel coordination.
//!
//! Owns the child table, the four edge panels and the single settle
//! animation they share. Every panel reads its revealed size off the
//! current child frames, so moving a panel means offsetting frames.

use drawerkit_animation::{SettleModel, SettleScroller};
use drawerkit_gesture::{DragAxis, Edges, ElementId};
use drawerkit_graphics::{Color, Point, Rect, Size};

use crate::edge::DrawerEdge;
use crate::error::DrawerError;
use crate::events::{DrawerEvent, EventQueue};
use crate::panel::{top_child_under, Child, ChildTable, Panel};
use crate::params::{CloseType, LayoutDirection, LayoutParams};
use crate::scroll::ScrollQuery;

/// One content child plus a drawer per edge.
pub const MAX_CHILDREN: usize = 5;

/// Release speed (px/s) beyond which the fling direction alone decides
/// whether a panel ends open or closed.
pub const MIN_SETTLE_VELOCITY: f32 = 1_000.0;

/// Dimming drawn over the part of the container the drawer leaves
/// uncovered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrim {
    pub rect: Rect,
    pub color: Color,
}

pub struct PanelCoordinator {
    pub(crate) children: ChildTable,
    pub(crate) panels: [Panel; 4],
    scroller: SettleScroller,
    /// Panel the current gesture or settle applies to.
    active: Option<DrawerEdge>,
    pub(crate) container: Size,
    min_settle_velocity: f32,
    events: EventQueue<DrawerEvent>,
}

impl Default for PanelCoordinator {
    fn default() -> Self {
        Self::new(MIN_SETTLE_VELOCITY)
    }
}

impl PanelCoordinator {
    pub fn new(min_settle_velocity: f32) -> Self {
        Self {
            children: ChildTable::default(),
            panels: DrawerEdge::ALL.map(Panel::new),
            scroller: SettleScroller::new(),
            active: None,
            container: Size::ZERO,
            min_settle_velocity,
            events: EventQueue::default(),
        }
    }

    pub fn panel(&self, edge: DrawerEdge) -> &Panel {
        &self.panels[edge.index()]
    }

    pub fn children(&self) -> &ChildTable {
        &self.children
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    pub fn content(&self) -> Option<ElementId> {
        self.panels[0].content
    }

    pub fn active_edge(&self) -> Option<DrawerEdge> {
        self.active
    }

    pub fn is_settling(&self) -> bool {
        !self.scroller.is_finished()
    }

    pub fn opened_edge(&self) -> Option<DrawerEdge> {
        DrawerEdge::ALL
            .into_iter()
            .find(|&edge| self.panel(edge).is_open(&self.children))
    }

    pub fn is_open(&self) -> bool {
        self.opened_edge().is_some()
    }

    pub fn visible_size(&self, edge: DrawerEdge) -> f32 {
        self.panel(edge).visible_size(&self.children, self.container)
    }

    pub fn panel_size(&self, edge: DrawerEdge) -> f32 {
        self.panel(edge).size(&self.children)
    }

    pub fn lock(&mut self, edge: DrawerEdge, locked: bool) {
        self.panels[edge.index()].locked = locked;
    }

    pub fn is_locked(&self, edge: DrawerEdge) -> bool {
        self.panel(edge).locked
    }

    pub(crate) fn set_active(&mut self, edge: Option<DrawerEdge>) {
        self.active = edge;
    }

    pub(crate) fn take_events(&mut self) -> smallvec::SmallVec<[DrawerEvent; 2]> {
        self.events.take()
    }

    pub(crate) fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub(crate) fn attach(
        &mut self,
        id: ElementId,
        params: LayoutParams,
        direction: LayoutDirection,
    ) -> Result<(), DrawerError> {
        if self.children.contains_key(&id) {
            return Err(DrawerError::DuplicateChild { id });
        }
        if self.children.len() >= MAX_CHILDREN {
            return Err(DrawerError::TooManyChildren { max: MAX_CHILDREN });
        }
        let edge = params.gravity.resolve(direction);
        match edge {
            None => {
                if let Some(existing) = self.content() {
                    return Err(DrawerError::DuplicateContent { existing, added: id });
                }
            }
            Some(edge) => {
                if let Some(existing) = self.panel(edge).drawer {
                    return Err(DrawerError::EdgeOccupied { edge, existing });
                }
            }
        }

        self.children.insert(id, Child::new(params));
        match edge {
            None => {
                for panel in &mut self.panels {
                    panel.content = Some(id);
                    panel.decide_front(&self.children);
                }
            }
            Some(edge) => {
                let panel = &mut self.panels[edge.index()];
                panel.drawer = Some(id);
                panel.decide_front(&self.children);
            }
        }
        log::debug!("attached {id} as {}", edge.map_or("content".to_string(), |e| e.to_string()));
        Ok(())
    }

    pub(crate) fn detach(&mut self, id: ElementId) -> Result<Child, DrawerError> {
        let child = self
            .children
            .shift_remove(&id)
            .ok_or(DrawerError::UnknownChild { id })?;
        for panel in &mut self.panels {
            if panel.content == Some(id) {
                panel.content = None;
            }
            if panel.drawer == Some(id) {
                panel.drawer = None;
                if self.active == Some(panel.edge) {
                    self.scroller.force_finished();
                    self.active = None;
                }
            }
        }
        Ok(child)
    }

    /// Topmost child whose frame contains the container-local point.
    pub fn find_top_child_under(&self, x: f32, y: f32) -> Option<ElementId> {
        top_child_under(&self.children, x, y)
    }

    /// Axis the active panel drags along.
    pub fn scroll_axis(&self) -> DragAxis {
        match self.active {
            Some(edge) if self.panel(edge).drawer.is_some() => edge.axis(),
            _ => DragAxis::None,
        }
    }

    /// Picks the panel a gesture moving by `(dx, dy)` applies to.
    ///
    /// An open panel always wins. Otherwise the dominant axis of the motion
    /// and its sign choose among the edges that hold a drawer.
    pub fn select_active_edge(&mut self, dx: f32, dy: f32, touch_slop: f32) {
        if self.is_settling() {
            return;
        }
        let mut selected = self.opened_edge();
        if selected.is_none() {
            let has_drawer = |edge: DrawerEdge| self.panel(edge).drawer.is_some();
            if dx.abs() > dy.abs() && dx.abs() > touch_slop {
                if dx > 0.0 && has_drawer(DrawerEdge::Left) {
                    selected = Some(DrawerEdge::Left);
                }
                if dx < 0.0 && has_drawer(DrawerEdge::Right) {
                    selected = Some(DrawerEdge::Right);
                }
            }
            if dy.abs() > dx.abs() && dy.abs() > touch_slop {
                if dy > 0.0 && has_drawer(DrawerEdge::Top) {
                    selected = Some(DrawerEdge::Top);
                }
                if dy < 0.0 && has_drawer(DrawerEdge::Bottom) {
                    selected = Some(DrawerEdge::Bottom);
                }
            }
        }
        self.active = selected;
    }

    /// Asks the active panel whether the gesture becomes a drag.
    #[allow(clippy::too_many_arguments)]
    pub fn on_drag_begin(
        &mut self,
        child: ElementId,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        edges: Edges,
        scroll_query: &mut dyn ScrollQuery,
    ) -> bool {
        let Some(edge) = self.active else {
            return false;
        };
        let panel = self.panel(edge);
        if panel.drawer.is_none() || panel.locked {
            return false;
        }
        let drag = self.should_drag_begin(edge, child, x, y, dx, dy, edges, &*scroll_query);
        if drag {
            log::debug!("{edge} panel takes the drag");
            if let Some(content) = self.content() {
                scroll_query.stop_nested_scroll(content);
            }
        }
        drag
    }

    /// Drag eligibility of `edge` for a gesture that passed slop.
    #[allow(clippy::too_many_arguments)]
    pub fn should_drag_begin(
        &self,
        edge: DrawerEdge,
        child: ElementId,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        edges: Edges,
        scroll_query: &dyn ScrollQuery,
    ) -> bool {
        let orientation = edge.orientation();
        let is_open = self.panel(edge).is_open(&self.children);
        let toward_open = orientation.open_component(dx, dy);

        if self.opened_edge().is_none() && edges.contains(edge.flag()) {
            return true;
        }
        if self.is_settling() {
            return true;
        }
        if toward_open > 0.0 && !is_open {
            let (scroll_dx, scroll_dy) = match orientation.axis {
                DragAxis::Horizontal => (dx, 0.0),
                _ => (0.0, dy),
            };
            let frame = self
                .children
                .get(&child)
                .map(|child| child.frame)
                .unwrap_or_default();
            return !scroll_query.can_scroll(child, x - frame.x, y - frame.y, scroll_dx, scroll_dy);
        }
        toward_open < 0.0 && is_open
    }

    /// Moves the active panel by a pointer delta.
    pub fn on_scroll(&mut self, dx: f32, dy: f32) -> bool {
        if self.is_settling() {
            self.scroller.abort_animation();
        }
        let Some(edge) = self.active else {
            return false;
        };
        self.apply_distance(edge, edge.orientation().open_component(dx, dy));
        true
    }

    /// Reveals `edge` by `distance` more (negative hides), clamped to
    /// `[0, panel size]`. Hitting either bound stops a running settle.
    pub fn apply_distance(&mut self, edge: DrawerEdge, distance: f32) {
        let panel = self.panel(edge);
        if panel.drawer.is_none() {
            return;
        }
        let size = panel.size(&self.children).max(0.0);
        let target = panel.visible_size(&self.children, self.container) + distance;
        let visible = self.scroller.clamp_or_abort(target, size);
        self.place(edge, visible);
    }

    /// Positions the panel's children for a reveal of exactly `visible`.
    ///
    /// Frames are derived from the resting positions rather than nudged, so
    /// a settle that lands on its target leaves exact frames behind.
    fn place(&mut self, edge: DrawerEdge, visible: f32) {
        let panel = self.panel(edge);
        let Some(drawer_id) = panel.drawer else {
            return;
        };
        let drawer_moves = panel.drawer_moves(&self.children);
        let content_moves = panel.content_moves(&self.children);
        let content_id = panel.content;
        let orientation = edge.orientation();
        let container = self.container;

        if content_moves {
            if let Some(content) = content_id.and_then(|id| self.children.get_mut(&id)) {
                let margins = content.params.margins;
                let resting =
                    Rect::from_origin_size(Point::new(margins.left, margins.top), content.frame.size());
                content.frame = orientation.offset(resting, visible);
            }
        }
        if let Some(drawer) = self.children.get_mut(&drawer_id) {
            if drawer_moves {
                let size = drawer.frame.size();
                let parked = orientation.drawer_origin(size, drawer.params.margins, container, false);
                drawer.frame = orientation.offset(Rect::from_origin_size(parked, size), visible);
            }
            drawer.visible = visible > 0.0;
        }
    }

    /// Decides the resting state after a release and settles toward it.
    pub fn on_drag_end(&mut self, xvel: f32, yvel: f32, model: &SettleModel) {
        let Some(edge) = self.active else {
            return;
        };
        let Some(params) = self.drawer_params(edge) else {
            return;
        };
        if params.close_type == CloseType::AlwaysClose {
            self.settle(edge, false, model);
            return;
        }

        let velocity = edge.orientation().open_component(xvel, yvel);
        let open = if velocity > self.min_settle_velocity {
            true
        } else if velocity < -self.min_settle_velocity {
            false
        } else {
            let visible = self.visible_size(edge);
            let size = self.panel_size(edge);
            if self.panel(edge).is_open(&self.children) {
                visible > size * params.pull_to_close
            } else {
                visible > size * params.pull_to_open
            }
        };
        log::debug!("{edge} released at {xvel},{yvel}; open={open}");
        self.settle(edge, open, model);
    }

    /// Animates `edge` fully open or closed from wherever it is now.
    ///
    /// Opening snaps every other revealed panel shut first, including one
    /// caught part-way through its own settle.
    pub fn settle(&mut self, edge: DrawerEdge, open: bool, model: &SettleModel) {
        self.scroller.force_finished();
        let Some(drawer) = self.panel(edge).drawer else {
            log::warn!("settle requested for {edge} edge without a drawer");
            return;
        };

        if open {
            for other in DrawerEdge::ALL {
                if other == edge {
                    continue;
                }
                if self.panel(other).is_open(&self.children) || self.visible_size(other) > 0.0 {
                    self.snap_closed(other);
                }
            }
        }

        let was_open = self.panel(edge).is_open(&self.children);
        if let Some(child) = self.children.get_mut(&drawer) {
            child.is_open = open;
        }
        self.active = Some(edge);

        let size = self.panel_size(edge);
        let visible = self.visible_size(edge);
        let distance = if open { size - visible } else { -visible };
        let duration = model.compute_settle_duration(size, 0.0, distance, 0.0, 0.0, 0.0);
        log::debug!("settle {edge} open={open} from {visible} over {duration}ms");
        // Offsets travel along one abstract axis; place maps them onto the
        // edge's real axis.
        self.scroller.start_scroll(visible, distance, duration);

        if was_open != open {
            self.events.push(DrawerEvent {
                drawer,
                edge,
                is_open: open,
            });
        }
    }

    fn snap_closed(&mut self, edge: DrawerEdge) {
        let Some(drawer) = self.panel(edge).drawer else {
            return;
        };
        let was_open = self.panel(edge).is_open(&self.children);
        self.place(edge, 0.0);
        if let Some(child) = self.children.get_mut(&drawer) {
            child.is_open = false;
        }
        log::debug!("{edge} panel closed to open another");
        if was_open {
            self.events.push(DrawerEvent {
                drawer,
                edge,
                is_open: false,
            });
        }
    }

    /// Advances the running settle. Returns `true` while another frame is
    /// needed.
    pub fn compute_scroll(&mut self, frame_time_nanos: u64) -> bool {
        if !self.scroller.compute_offset(frame_time_nanos) {
            return false;
        }
        if let Some(edge) = self.active {
            let size = self.panel_size(edge).max(0.0);
            self.place(edge, self.scroller.current().clamp(0.0, size));
        }
        true
    }

    /// Scrim for the active panel, or for the open one when nothing is active.
    pub fn scrim(&self, base: Color) -> Option<Scrim> {
        let edge = self.active.or_else(|| self.opened_edge())?;
        let drawer = self.panel(edge).drawer.and_then(|id| self.children.get(&id))?;
        let size = self.panel_size(edge);
        let fraction = if size > 0.0 {
            self.visible_size(edge) / size
        } else {
            0.0
        };
        Some(Scrim {
            rect: edge.orientation().uncovered_area(drawer.frame, self.container),
            color: base.scale_alpha(fraction),
        })
    }

    fn drawer_params(&self, edge: DrawerEdge) -> Option<LayoutParams> {
        self.panel(edge)
            .drawer
            .and_then(|id| self.children.get(&id))
            .map(|child| child.params)
    }
}
