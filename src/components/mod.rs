pub mod angles;
pub mod channels;
pub mod commands;
pub mod controller;
pub mod shapes;
pub mod spatial;

pub use angles::{AngleConvention, AngleConverter, HeadingZero, Rotate};
pub use channels::{ChannelType, Direction, VariableIo};
pub use commands::FdmCommands;
pub use controller::{AttitudeHold, PidController, PidGains, SURFACE_COMMAND_SIGNS};
pub use shapes::{DebugShape, DebugShapeEvent, ShapeKind};
pub use spatial::SpatialComponent;
