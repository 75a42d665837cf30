//! Testing utilities for drawerkit containers

pub mod robot;
pub mod robot_assertions;
pub mod testing;

pub use robot::*;
pub use robot_assertions::{assert_approx_eq, assert_rect_approx_eq};
pub use testing::*;

pub mod prelude {
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use crate::testing::*;
}
