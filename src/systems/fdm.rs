use bevy::prelude::*;

use crate::components::{DebugShapeEvent, FdmCommands, SpatialComponent};
use crate::physics::FlightStateAdapter;
use crate::resources::{FdmParameters, ProjectionResource};

/// Initialize every adapter whose entity still carries [`FdmParameters`].
///
/// The parameters are consumed whether or not initialization succeeds, so a
/// bad configuration is reported once rather than retried every tick.
pub fn fdm_initialize_system(
    mut commands: Commands,
    mut query: Query<(
        Entity,
        &mut FlightStateAdapter,
        &mut SpatialComponent,
        &FdmParameters,
    )>,
    projection: Res<ProjectionResource>,
) {
    for (entity, mut adapter, mut spatial, parameters) in query.iter_mut() {
        match adapter.initialize(
            &parameters.info,
            &parameters.params,
            &mut spatial,
            projection.0.as_ref(),
        ) {
            Ok(()) => info!("FDM adapter ready for {:?}", entity),
            Err(e) => error!("Failed to initialize FDM adapter for {:?}: {}", entity, e),
        }
        commands.entity(entity).remove::<FdmParameters>();
    }
}

/// Step every initialized adapter by one fixed timestep.
pub fn fdm_step_system(
    mut query: Query<(
        Entity,
        &mut FlightStateAdapter,
        &mut SpatialComponent,
        Option<&FdmCommands>,
    )>,
    projection: Res<ProjectionResource>,
    time: Res<Time<Fixed>>,
    mut shapes: EventWriter<DebugShapeEvent>,
) {
    let dt = time.delta_secs_f64();
    let now = time.elapsed_secs_f64();

    for (entity, mut adapter, mut spatial, fdm_commands) in query.iter_mut() {
        if !adapter.is_initialized() {
            continue;
        }
        if let Some(fdm_commands) = fdm_commands {
            if let Err(e) = adapter.apply_commands(fdm_commands) {
                warn!("Dropping commands for {:?}: {}", entity, e);
            }
        }
        if let Err(e) = adapter.step(now, dt, &mut spatial, projection.0.as_ref()) {
            error!("FDM step failed for {:?}: {}", entity, e);
            continue;
        }
        for shape in adapter.drain_shapes() {
            shapes.send(DebugShapeEvent { entity, shape });
        }
    }
}
