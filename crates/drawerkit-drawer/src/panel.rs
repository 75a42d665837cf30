//! One edge-anchored panel and the child records it reads from.

use drawerkit_gesture::ElementId;
use drawerkit_graphics::{Rect, Size};
use indexmap::IndexMap;

use crate::edge::{DrawerEdge, EdgeOrientation};
use crate::params::{LayoutParams, Mode, Stacking};

/// State the container keeps per child.
#[derive(Clone, Debug, PartialEq)]
pub struct Child {
    pub params: LayoutParams,
    pub measured: Size,
    pub frame: Rect,
    pub visible: bool,
    /// Open state of a drawer child; meaningless for the content.
    pub is_open: bool,
}

impl Child {
    pub(crate) fn new(params: LayoutParams) -> Self {
        Self {
            params,
            measured: Size::ZERO,
            frame: Rect::default(),
            visible: true,
            is_open: false,
        }
    }
}

/// Children in z-order, bottom first.
pub type ChildTable = IndexMap<ElementId, Child>;

/// Topmost child whose frame contains the container-local point.
pub(crate) fn top_child_under(children: &ChildTable, x: f32, y: f32) -> Option<ElementId> {
    children
        .iter()
        .rev()
        .find(|(_, child)| child.frame.contains(x, y))
        .map(|(id, _)| *id)
}

/// Which children play which role for one edge.
///
/// Panels never own elements; they refer to rows of the [`ChildTable`].
#[derive(Clone, Debug)]
pub struct Panel {
    pub(crate) edge: DrawerEdge,
    pub(crate) drawer: Option<ElementId>,
    pub(crate) content: Option<ElementId>,
    pub(crate) locked: bool,
    /// Resolved when either child is attached.
    pub(crate) drawer_in_front: bool,
}

impl Panel {
    pub(crate) fn new(edge: DrawerEdge) -> Self {
        Self {
            edge,
            drawer: None,
            content: None,
            locked: false,
            drawer_in_front: true,
        }
    }

    pub fn edge(&self) -> DrawerEdge {
        self.edge
    }

    pub fn drawer(&self) -> Option<ElementId> {
        self.drawer
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn orientation(&self) -> &'static EdgeOrientation {
        self.edge.orientation()
    }

    pub(crate) fn decide_front(&mut self, children: &ChildTable) {
        let (Some(drawer), Some(content)) = (self.drawer, self.content) else {
            return;
        };
        let explicit = children.get(&drawer).and_then(|child| child.params.stacking);
        self.drawer_in_front = match explicit {
            Some(Stacking::Front) => true,
            Some(Stacking::Behind) => false,
            None => match (children.get_index_of(&drawer), children.get_index_of(&content)) {
                (Some(drawer_index), Some(content_index)) => drawer_index > content_index,
                _ => true,
            },
        };
    }

    fn mode(&self, children: &ChildTable) -> Option<Mode> {
        self.drawer
            .and_then(|id| children.get(&id))
            .map(|child| child.params.mode)
    }

    /// Whether the drawer frame follows the gesture.
    pub fn drawer_moves(&self, children: &ChildTable) -> bool {
        if self.drawer.is_none() || self.content.is_none() {
            return false;
        }
        match self.mode(children) {
            Some(Mode::Concat) => true,
            _ => self.drawer_in_front,
        }
    }

    /// Whether the content frame follows the gesture.
    pub fn content_moves(&self, children: &ChildTable) -> bool {
        match self.mode(children) {
            Some(Mode::Concat) => true,
            Some(Mode::Cover) => !self.drawer_in_front,
            None => false,
        }
    }

    pub fn is_open(&self, children: &ChildTable) -> bool {
        self.drawer
            .and_then(|id| children.get(&id))
            .is_some_and(|child| child.is_open)
    }

    /// Full extent of the drawer along the edge axis.
    pub fn size(&self, children: &ChildTable) -> f32 {
        self.drawer
            .and_then(|id| children.get(&id))
            .map_or(0.0, |child| self.orientation().extent(child.frame.size()))
    }

    /// How far the panel is currently revealed, derived from frames.
    pub fn visible_size(&self, children: &ChildTable, container: Size) -> f32 {
        let (Some(drawer), Some(content)) = (
            self.drawer.and_then(|id| children.get(&id)),
            self.content.and_then(|id| children.get(&id)),
        ) else {
            return 0.0;
        };
        let orientation = self.orientation();
        if self.drawer_moves(children) {
            orientation.revealed_by_drawer(drawer.frame, drawer.params.margins, container)
        } else {
            orientation.revealed_by_content(content.frame, content.params.margins, container)
        }
    }
}
