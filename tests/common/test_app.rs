use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use flyer_jsbsim::{
    components::{DebugShapeEvent, FdmCommands, SpatialComponent},
    physics::FlightStateAdapter,
    plugins::FdmPlugin,
    resources::{FdmParameters, LocalCartesian, ProjectionResource},
};
use std::collections::HashMap;

/// Number of debug shapes seen by the app so far
#[derive(Resource, Default, Debug)]
pub struct ShapeCount(pub usize);

fn count_shapes(mut events: EventReader<DebugShapeEvent>, mut count: ResMut<ShapeCount>) {
    count.0 += events.read().count();
}

// Builder for creating a test application with FDM-driven vehicles
pub struct TestAppBuilder {
    vehicles: Vec<(SpatialComponent, HashMap<String, String>, Option<FdmCommands>)>,
    projection: Option<LocalCartesian>,
    time_step: f64,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            vehicles: Vec::new(),
            projection: None,
            time_step: 1.0 / 120.0,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicle(
        mut self,
        spatial: SpatialComponent,
        params: HashMap<String, String>,
        commands: Option<FdmCommands>,
    ) -> Self {
        self.vehicles.push((spatial, params, commands));
        self
    }

    pub fn with_projection(mut self, projection: LocalCartesian) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        app.add_plugins(MinimalPlugins)
            .insert_resource(ProjectionResource::new(
                self.projection.unwrap_or_default(),
            ))
            .add_plugins(FdmPlugin {
                timestep: self.time_step,
            })
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
                self.time_step,
            )))
            .init_resource::<ShapeCount>()
            .add_systems(Update, count_shapes);

        let mut entities = Vec::new();
        for (spatial, params, commands) in self.vehicles {
            let mut entity = app.world_mut().spawn((
                FlightStateAdapter::kinematic(),
                spatial,
                FdmParameters::new(HashMap::new(), params),
            ));
            if let Some(commands) = commands {
                entity.insert(commands);
            }
            entities.push(entity.id());
        }

        TestApp { app, entities }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
    pub entities: Vec<Entity>,
}

impl TestApp {
    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.update();
        }
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.app.world().get::<T>(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<Mut<T>> {
        self.app.world_mut().get_mut::<T>(entity)
    }

    pub fn shape_count(&self) -> usize {
        self.app.world().resource::<ShapeCount>().0
    }
}
