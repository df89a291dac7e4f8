use thiserror::Error;

use crate::components::Direction;
use crate::resources::config::ConfigError;

#[derive(Error, Debug)]
pub enum FdmError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to resolve FDM property: {0}")]
    PropertyResolution(String),

    #[error("FDM adapter stepped before a successful initialization")]
    NotInitialized,

    #[error("Channel index {0} was never declared")]
    UndeclaredChannel(usize),

    #[error("Channel index {index} is not an {expected:?} channel")]
    ChannelDirection { index: usize, expected: Direction },

    #[error("Integrator error: {0}")]
    Integrator(String),
}
