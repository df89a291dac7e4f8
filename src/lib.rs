pub mod components;
pub mod physics;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{AngleConverter, AttitudeHold, PidController, SpatialComponent, VariableIo};
pub use physics::{FlightDynamics, FlightStateAdapter, KinematicFdm};
pub use plugins::{FdmPlugin, FdmSet};
pub use resources::{FdmConfig, LocalCartesian, ProjectionResource};
pub use utils::FdmError;
