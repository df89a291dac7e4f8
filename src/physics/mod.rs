pub mod adapter;
pub mod initial_condition;
pub mod kinematic;
pub mod paths;
pub mod properties;
pub mod traits;

pub use adapter::{AdapterPhase, ControlChannels, FlightStateAdapter, StepDiagnostics};
pub use initial_condition::InitialCondition;
pub use kinematic::{KinematicFdm, KinematicParams};
pub use properties::{PropertyManager, PropertyNode};
pub use traits::{FdmFactory, FlightDynamics};
