mod fdm;

pub use fdm::{fdm_initialize_system, fdm_step_system};
