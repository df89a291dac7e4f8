#![allow(dead_code)]

mod assertions;
mod fixtures;
mod test_app;

// Re-export
pub use assertions::{assert_attitude_eq, assert_position_eq, assert_spatial_valid};
pub use fixtures::*;
pub use test_app::{ShapeCount, TestApp, TestAppBuilder};
