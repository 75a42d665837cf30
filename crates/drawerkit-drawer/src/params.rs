//! Per-child configuration of a drawer container.

use drawerkit_graphics::EdgeInsets;

use crate::edge::DrawerEdge;

/// Where a child is anchored. `None` marks the content child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Gravity {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
    /// Left in left-to-right layouts, right otherwise.
    Start,
    /// Right in left-to-right layouts, left otherwise.
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl Gravity {
    /// Edge this gravity anchors to, or `None` for the content child.
    pub fn resolve(self, direction: LayoutDirection) -> Option<DrawerEdge> {
        match (self, direction) {
            (Gravity::None, _) => None,
            (Gravity::Left, _) => Some(DrawerEdge::Left),
            (Gravity::Right, _) => Some(DrawerEdge::Right),
            (Gravity::Top, _) => Some(DrawerEdge::Top),
            (Gravity::Bottom, _) => Some(DrawerEdge::Bottom),
            (Gravity::Start, LayoutDirection::Ltr) | (Gravity::End, LayoutDirection::Rtl) => {
                Some(DrawerEdge::Left)
            }
            (Gravity::End, LayoutDirection::Ltr) | (Gravity::Start, LayoutDirection::Rtl) => {
                Some(DrawerEdge::Right)
            }
        }
    }
}

/// Requested size along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Dimension {
    #[default]
    MatchParent,
    Fixed(f32),
}

impl Dimension {
    /// Size for `available` space left after margins.
    pub fn resolve(self, available: f32) -> f32 {
        match self {
            Dimension::MatchParent => available.max(0.0),
            Dimension::Fixed(size) => size.max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CloseType {
    /// Release position and velocity decide.
    #[default]
    Normal,
    /// Every release closes the panel.
    AlwaysClose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Only the element in front moves; the other stays put.
    Cover,
    /// Drawer and content move together.
    #[default]
    Concat,
}

/// Explicit stacking of a drawer relative to the content. Without one, the
/// order children were added in decides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stacking {
    Front,
    Behind,
}

/// Layout attributes of one child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub gravity: Gravity,
    pub margins: EdgeInsets,
    pub width: Dimension,
    pub height: Dimension,
    /// Fraction of the panel that must be revealed for a release to open it.
    pub pull_to_open: f32,
    /// Fraction of the panel that must stay revealed for a release to keep it open.
    pub pull_to_close: f32,
    pub close_type: CloseType,
    pub mode: Mode,
    /// Panel extent as a share of the container; ignored unless above 0.01.
    pub size_weight: f32,
    pub stacking: Option<Stacking>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            gravity: Gravity::None,
            margins: EdgeInsets::default(),
            width: Dimension::MatchParent,
            height: Dimension::MatchParent,
            pull_to_open: 0.5,
            pull_to_close: 0.5,
            close_type: CloseType::Normal,
            mode: Mode::Concat,
            size_weight: 0.0,
            stacking: None,
        }
    }
}

impl LayoutParams {
    pub fn content() -> Self {
        Self::default()
    }

    pub fn drawer(gravity: Gravity) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    pub fn with_margins(mut self, margins: EdgeInsets) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = height;
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

    pub fn with_close_type(mut self, close_type: CloseType) -> Self {
        self.close_type = close_type;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_size_weight(mut self, weight: f32) -> Self {
        self.size_weight = weight;
        self
    }

    pub fn with_stacking(mut self, stacking: Stacking) -> Self {
        self.stacking = Some(stacking);
        self
    }

    pub fn is_content(&self) -> bool {
        self.gravity == Gravity::None
    }

    pub(crate) fn has_size_weight(&self) -> bool {
        self.size_weight > 0.01
    }
}
