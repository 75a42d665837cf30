//! Settle motion for drawerkit
//!
//! Provides the duration model used when a panel finishes the rest of its
//! travel after a gesture, and the frame-driven scroller that turns a
//! start/target/duration triple into positions over time.

mod easing;
mod scroller;
mod settle;

pub use easing::*;
pub use scroller::*;
pub use settle::*;
