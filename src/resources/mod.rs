pub mod config;
pub mod projection;
pub mod transformations;

pub use config::{ConfigError, FdmConfig, FdmConfigBuilder, FdmParameters};
pub use projection::{geodetic_to_ecef, EarthProjection, LocalCartesian, ProjectionResource};
pub use transformations::{FdmSample, FrameReconciler, ReconciledState};
