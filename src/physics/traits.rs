use std::path::Path;

use crate::physics::initial_condition::InitialCondition;
use crate::physics::properties::PropertyManager;
use crate::utils::errors::FdmError;

/// External flight dynamics exec driven by the adapter.
///
/// Implementations own their property tree and publish every output the
/// adapter reads through it. The adapter resolves nodes once after the first
/// `run` and reuses them every tick.
pub trait FlightDynamics: Send + Sync {
    fn set_debug_level(&mut self, level: u32);
    fn set_root_dir(&mut self, path: &Path);
    fn set_aircraft_path(&mut self, path: &Path);
    fn set_engine_path(&mut self, path: &Path);
    fn set_systems_path(&mut self, path: &Path);

    /// Load a script relative to the root directory.
    fn load_script(&mut self, script: &Path) -> Result<(), FdmError>;

    fn initial_condition_mut(&mut self) -> &mut InitialCondition;

    /// Apply the initial condition to the model state.
    fn run_ic(&mut self) -> Result<(), FdmError>;

    fn set_dt(&mut self, dt: f64);
    fn dt(&self) -> f64;

    /// Advance the model by one timestep.
    fn run(&mut self) -> Result<(), FdmError>;

    fn properties(&self) -> &PropertyManager;
    fn properties_mut(&mut self) -> &mut PropertyManager;
}

/// Builds a fresh exec for every adapter initialization.
pub type FdmFactory = Box<dyn Fn() -> Box<dyn FlightDynamics> + Send + Sync>;
