//! Pure math/data for geometry & units in drawerkit
//!
//! This crate contains geometry primitives, color definitions and unit types
//! that are shared by the gesture engine and the panel containers.

mod color;
mod geometry;
mod unit;

pub use color::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::unit::Dp;
}
