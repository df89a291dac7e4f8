mod frames;
mod reconcile;

pub use frames::{body_to_world, frd_to_flu_matrix, ned_to_enu_matrix, world_to_body};
pub use reconcile::{frd_to_flu, FdmSample, FrameReconciler, ReconciledState};
