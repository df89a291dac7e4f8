pub mod fdm;

pub use fdm::{ConfigError, FdmConfig, FdmConfigBuilder, FdmParameters};
