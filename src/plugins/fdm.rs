use bevy::prelude::*;

use crate::components::DebugShapeEvent;
use crate::resources::ProjectionResource;
use crate::systems::{fdm_initialize_system, fdm_step_system};

/// FDM adapter stages
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum FdmSet {
    Initialize,
    Step,
}

pub struct FdmPlugin {
    pub timestep: f64,
}

impl Default for FdmPlugin {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 120.0,
        }
    }
}

impl Plugin for FdmPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DebugShapeEvent>();

        if !app.world().contains_resource::<ProjectionResource>() {
            app.init_resource::<ProjectionResource>();
        }

        app.insert_resource(Time::<Fixed>::from_seconds(self.timestep));

        app.configure_sets(FixedUpdate, (FdmSet::Initialize, FdmSet::Step).chain());

        app.add_systems(
            FixedUpdate,
            (
                fdm_initialize_system.in_set(FdmSet::Initialize),
                fdm_step_system.in_set(FdmSet::Step),
            ),
        );
    }
}
