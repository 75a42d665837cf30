//! Edge drawer containers.
//!
//! [`DrawerLayout`] hosts one content child and up to four drawers, one per
//! edge, each revealed by dragging from its edge or by a programmatic
//! [`open`](DrawerLayout::open). [`PullDownLayout`] is the single-edge
//! variant where pulling a body down reveals a head above it.
//!
//! Both containers are host-agnostic. The host feeds pointer events into
//! the intercept/touch pair, pumps [`compute_scroll`](DrawerLayout::compute_scroll)
//! once per frame while a settle runs, reads child frames after
//! [`layout`](DrawerLayout::layout), and drains queued open/close events.

mod constraints;
mod coordinator;
mod edge;
mod error;
mod events;
mod layout;
mod panel;
mod params;
mod pull_down;
mod scroll;

pub use constraints::Constraints;
pub use coordinator::{PanelCoordinator, Scrim, MAX_CHILDREN, MIN_SETTLE_VELOCITY};
pub use edge::{DrawerEdge, EdgeOrientation};
pub use error::DrawerError;
pub use events::{DrawerEvent, DrawerListener};
pub use layout::{DrawerConfig, DrawerLayout, DEFAULT_SCRIM_COLOR};
pub use panel::{Child, ChildTable, Panel};
pub use params::{
    CloseType, Dimension, Gravity, LayoutDirection, LayoutParams, Mode, Stacking,
};
pub use pull_down::{
    PullDownConfig, PullDownEvent, PullDownLayout, PullDownListener, PullDownMode,
};
pub use scroll::{NoScroll, ScrollQuery};

pub mod prelude {
    pub use crate::constraints::Constraints;
    pub use crate::edge::DrawerEdge;
    pub use crate::layout::{DrawerConfig, DrawerLayout};
    pub use crate::params::{Gravity, LayoutParams, Mode};
    pub use crate::pull_down::PullDownLayout;
    pub use crate::scroll::ScrollQuery;
}
