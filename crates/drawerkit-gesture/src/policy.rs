//! The capability a container hands to the [`DragEngine`](crate::DragEngine).

use std::ops::{BitOr, BitOrAssign};

use drawerkit_graphics::Size;

use crate::types::ElementId;

/// Axes along which the active policy wants drags to be recognised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DragAxis {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

/// Container edges a gesture started next to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Edges(u8);

impl Edges {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const TOP: Self = Self(1 << 2);
    pub const BOTTOM: Self = Self(1 << 3);

    pub fn contains(&self, other: Edges) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    pub fn insert(&mut self, other: Edges) {
        self.0 |= other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl BitOr for Edges {
    type Output = Edges;

    fn bitor(self, rhs: Self) -> Self::Output {
        Edges(self.0 | rhs.0)
    }
}

impl BitOrAssign for Edges {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Per-gesture policy consumed by the drag engine.
///
/// The engine owns pointer bookkeeping and slop detection; everything that
/// depends on what is being dragged is asked of the policy. Implementors are
/// usually short-lived views borrowing a container's state for one event.
pub trait DragPolicy {
    /// Axis the currently targeted panel moves along.
    fn scroll_axis(&self) -> DragAxis;

    /// Whether a gesture that first moved along the wrong axis may still be
    /// claimed. Nested scrollers that never opt out of interception would
    /// otherwise lose their gesture to the container halfway through.
    fn allow_drag_if_wrong_axis_first(&self) -> bool {
        false
    }

    /// Called before every slop check with the candidate delta, so the policy
    /// can pick which target the rest of the check applies to.
    fn select_target(&mut self, _dx: f32, _dy: f32, _touch_slop: f32) {}

    fn container_size(&self) -> Size;

    /// Topmost child whose frame contains the container-local point.
    fn find_top_child_under(&self, x: f32, y: f32) -> Option<ElementId>;

    /// Whether a settle animation is in flight; a touch-down then grabs it.
    fn is_settling(&self) -> bool {
        false
    }

    /// Asked once slop is exceeded; `true` claims the gesture.
    fn on_drag_begin(
        &mut self,
        child: ElementId,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        edges: Edges,
    ) -> bool;

    fn on_scroll(&mut self, x: f32, y: f32, dx: f32, dy: f32) -> bool;

    /// Velocities are already clamped to the engine's fling range.
    fn on_drag_end(&mut self, xvel: f32, yvel: f32);
}
