//! Gesture plumbing for drawerkit: pointer events, velocity tracking and the
//! drag engine that decides when a container takes a gesture from its
//! children.

pub mod constants;
mod engine;
mod policy;
mod tap;
mod types;
mod velocity_tracker;

pub use constants::{DragConfig, DRAG_THRESHOLD, EDGE_SIZE, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY};
pub use engine::{DragEngine, PointerSession};
pub use policy::{DragAxis, DragPolicy, Edges};
pub use tap::TapDetector;
pub use types::{ElementId, PointerEvent, PointerEventKind, PointerId, PointerSample};
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D, ASSUME_STOPPED_MS};

pub mod prelude {
    pub use crate::engine::DragEngine;
    pub use crate::policy::{DragAxis, DragPolicy, Edges};
    pub use crate::types::{ElementId, PointerEvent, PointerEventKind, PointerId};
}
