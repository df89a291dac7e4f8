mod fdm;

pub use fdm::{FdmPlugin, FdmSet};
