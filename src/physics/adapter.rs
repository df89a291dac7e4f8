use std::collections::HashMap;

use bevy::log::{debug, info};
use bevy::prelude::Component;
use nalgebra::Vector3;
use serde::Serialize;

use crate::components::{
    AngleConverter, AttitudeHold, ChannelType, DebugShape, Direction, FdmCommands,
    SpatialComponent, VariableIo,
};
use crate::physics::initial_condition::InitialCondition;
use crate::physics::kinematic::KinematicFdm;
use crate::physics::paths;
use crate::physics::properties::{PropertyManager, PropertyNode};
use crate::physics::traits::{FdmFactory, FlightDynamics};
use crate::resources::config::FdmConfig;
use crate::resources::projection::EarthProjection;
use crate::resources::transformations::{FdmSample, FrameReconciler};
use crate::utils::constants::ATTITUDE_INTEGRAL_BAND;
use crate::utils::errors::FdmError;
use crate::utils::math::{clamp_command, feet_to_meters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdapterPhase {
    Uninitialized,
    Initialized,
    Stepping,
}

/// Indices of the four control inputs, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlChannels {
    pub thrust: usize,
    pub elevator: usize,
    pub aileron: usize,
    pub rudder: usize,
}

impl ControlChannels {
    fn declare(vars: &mut VariableIo) -> Self {
        Self {
            thrust: vars.declare(ChannelType::Thrust, Direction::In),
            elevator: vars.declare(ChannelType::Elevator, Direction::In),
            aileron: vars.declare(ChannelType::Aileron, Direction::In),
            rudder: vars.declare(ChannelType::Rudder, Direction::In),
        }
    }

    pub fn index(&self, kind: ChannelType) -> usize {
        match kind {
            ChannelType::Thrust => self.thrust,
            ChannelType::Elevator => self.elevator,
            ChannelType::Aileron => self.aileron,
            ChannelType::Rudder => self.rudder,
        }
    }
}

/// Structured record of one adapter step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepDiagnostics {
    pub time: f64,
    /// [m]
    pub altitude_agl: f64,
    /// Weight on wheels per gear unit, `None` where the FDM has no such unit
    pub weight_on_wheels: [Option<bool>; 3],
    /// FLU body acceleration with gravity restored [m/s^2]
    pub accel_body: Vector3<f64>,
    /// Clamped commands written to the FDM
    pub commands: FdmCommands,
    pub aileron_pos: Option<f64>,
    pub elevator_pos: Option<f64>,
    pub rudder_pos: Option<f64>,
    pub thrust_lbs: Option<f64>,
}

/// Property handles the adapter cannot run without.
#[derive(Debug, Clone, Copy)]
struct FdmNodes {
    latitude: PropertyNode,
    longitude: PropertyNode,
    altitude_sl: PropertyNode,
    altitude_agl: PropertyNode,
    roll: PropertyNode,
    pitch: PropertyNode,
    heading: PropertyNode,
    aileron_cmd: PropertyNode,
    elevator_cmd: PropertyNode,
    rudder_cmd: PropertyNode,
    throttle_cmd: PropertyNode,
    v_north: PropertyNode,
    v_east: PropertyNode,
    v_down: PropertyNode,
    u_body: PropertyNode,
    p: PropertyNode,
    q: PropertyNode,
    r: PropertyNode,
    ax_pilot: PropertyNode,
    ay_pilot: PropertyNode,
    az_pilot: PropertyNode,
}

impl FdmNodes {
    fn resolve(props: &PropertyManager) -> Result<Self, FdmError> {
        Ok(Self {
            latitude: props.resolve(paths::LATITUDE)?,
            longitude: props.resolve(paths::LONGITUDE)?,
            altitude_sl: props.resolve(paths::ALTITUDE_SL)?,
            altitude_agl: props.resolve(paths::ALTITUDE_AGL)?,
            roll: props.resolve(paths::ROLL)?,
            pitch: props.resolve(paths::PITCH)?,
            heading: props.resolve(paths::HEADING)?,
            aileron_cmd: props.resolve(paths::AILERON_CMD)?,
            elevator_cmd: props.resolve(paths::ELEVATOR_CMD)?,
            rudder_cmd: props.resolve(paths::RUDDER_CMD)?,
            throttle_cmd: props.resolve(paths::THROTTLE_CMD)?,
            v_north: props.resolve(paths::V_NORTH)?,
            v_east: props.resolve(paths::V_EAST)?,
            v_down: props.resolve(paths::V_DOWN)?,
            u_body: props.resolve(paths::U_BODY)?,
            p: props.resolve(paths::P)?,
            q: props.resolve(paths::Q)?,
            r: props.resolve(paths::R)?,
            ax_pilot: props.resolve(paths::AX_PILOT)?,
            ay_pilot: props.resolve(paths::AY_PILOT)?,
            az_pilot: props.resolve(paths::AZ_PILOT)?,
        })
    }

    fn sample(&self, props: &PropertyManager) -> FdmSample {
        FdmSample {
            latitude_deg: props.get_double(self.latitude),
            longitude_deg: props.get_double(self.longitude),
            altitude_sl_ft: props.get_double(self.altitude_sl),
            roll_rad: props.get_double(self.roll),
            pitch_rad: props.get_double(self.pitch),
            heading_rad: props.get_double(self.heading),
            v_north_fps: props.get_double(self.v_north),
            v_east_fps: props.get_double(self.v_east),
            v_down_fps: props.get_double(self.v_down),
            p_rad_sec: props.get_double(self.p),
            q_rad_sec: props.get_double(self.q),
            r_rad_sec: props.get_double(self.r),
            ax_pilot_fps2: props.get_double(self.ax_pilot),
            ay_pilot_fps2: props.get_double(self.ay_pilot),
            az_pilot_fps2: props.get_double(self.az_pilot),
        }
    }

    /// Measured (roll, pitch, heading) in the FDM's own convention.
    fn attitude(&self, props: &PropertyManager) -> Vector3<f64> {
        Vector3::new(
            props.get_double(self.roll),
            props.get_double(self.pitch),
            props.get_double(self.heading),
        )
    }
}

/// Handles that only feed diagnostics. Missing ones are skipped.
#[derive(Debug, Clone, Copy, Default)]
struct DiagnosticNodes {
    weight_on_wheels: [Option<PropertyNode>; 3],
    aileron_pos: Option<PropertyNode>,
    elevator_pos: Option<PropertyNode>,
    rudder_pos: Option<PropertyNode>,
    thrust_lbs: Option<PropertyNode>,
}

impl DiagnosticNodes {
    fn resolve(props: &PropertyManager) -> Self {
        Self {
            weight_on_wheels: paths::WOW.map(|path| props.get_node(path)),
            aileron_pos: props.get_node(paths::AILERON_POS),
            elevator_pos: props.get_node(paths::ELEVATOR_POS),
            rudder_pos: props.get_node(paths::RUDDER_POS),
            thrust_lbs: props.get_node(paths::THRUST_LBS),
        }
    }
}

/// Everything built by a successful initialization.
struct Session {
    config: FdmConfig,
    fdm: Box<dyn FlightDynamics>,
    nodes: FdmNodes,
    diagnostics: DiagnosticNodes,
    reconciler: FrameReconciler,
    hold: AttitudeHold,
    channels: ControlChannels,
}

/// Drives an external flight dynamics model on behalf of one vehicle.
///
/// `initialize` builds and settles a fresh FDM from the vehicle's current
/// state. Every `step` then forwards the clamped control channels, advances
/// the FDM by `dt` and writes the reconciled result back into the vehicle's
/// [`SpatialComponent`].
#[derive(Component)]
pub struct FlightStateAdapter {
    factory: FdmFactory,
    from_fdm: AngleConverter,
    to_fdm: AngleConverter,
    vars: VariableIo,
    session: Option<Box<Session>>,
    phase: AdapterPhase,
    shapes: Vec<DebugShape>,
    linear_accel_body: Vector3<f64>,
    last_diagnostics: Option<StepDiagnostics>,
}

impl Default for FlightStateAdapter {
    fn default() -> Self {
        Self::kinematic()
    }
}

impl FlightStateAdapter {
    pub fn new(factory: FdmFactory) -> Self {
        Self {
            factory,
            from_fdm: AngleConverter::from_fdm(),
            to_fdm: AngleConverter::to_fdm(),
            vars: VariableIo::new(),
            session: None,
            phase: AdapterPhase::Uninitialized,
            shapes: Vec::new(),
            linear_accel_body: Vector3::zeros(),
            last_diagnostics: None,
        }
    }

    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn FlightDynamics> + Send + Sync + 'static,
    {
        Self::new(Box::new(factory))
    }

    /// Adapter backed by the built-in [`KinematicFdm`].
    pub fn kinematic() -> Self {
        Self::with_factory(|| Box::new(KinematicFdm::default()))
    }

    pub fn phase(&self) -> AdapterPhase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn from_fdm(&self) -> &AngleConverter {
        &self.from_fdm
    }

    pub fn to_fdm(&self) -> &AngleConverter {
        &self.to_fdm
    }

    pub fn vars(&self) -> &VariableIo {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut VariableIo {
        &mut self.vars
    }

    pub fn channels(&self) -> Option<ControlChannels> {
        self.session.as_ref().map(|s| s.channels)
    }

    pub fn config(&self) -> Option<&FdmConfig> {
        self.session.as_ref().map(|s| &s.config)
    }

    pub fn fdm(&self) -> Option<&dyn FlightDynamics> {
        self.session.as_ref().map(|s| s.fdm.as_ref())
    }

    pub fn attitude_hold(&self) -> Option<&AttitudeHold> {
        self.session.as_ref().map(|s| &s.hold)
    }

    pub fn attitude_hold_mut(&mut self) -> Option<&mut AttitudeHold> {
        self.session.as_mut().map(|s| &mut s.hold)
    }

    /// Target (roll, pitch, heading) for the hold loops, FDM convention [rad].
    pub fn set_attitude_setpoint(&mut self, setpoint: Vector3<f64>) -> Result<(), FdmError> {
        let session = self.session.as_mut().ok_or(FdmError::NotInitialized)?;
        session.hold.setpoint = setpoint;
        Ok(())
    }

    /// Body-frame linear acceleration from the latest reconciliation [m/s^2].
    pub fn linear_accel_body(&self) -> Vector3<f64> {
        self.linear_accel_body
    }

    pub fn last_diagnostics(&self) -> Option<&StepDiagnostics> {
        self.last_diagnostics.as_ref()
    }

    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    /// Hand over every queued debug shape, leaving the queue empty.
    pub fn drain_shapes(&mut self) -> Vec<DebugShape> {
        std::mem::take(&mut self.shapes)
    }

    /// Copy upstream commands into the input channels.
    pub fn apply_commands(&mut self, commands: &FdmCommands) -> Result<(), FdmError> {
        let channels = self.channels().ok_or(FdmError::NotInitialized)?;
        for kind in [
            ChannelType::Thrust,
            ChannelType::Elevator,
            ChannelType::Aileron,
            ChannelType::Rudder,
        ] {
            self.vars.set_input(channels.index(kind), commands.get(kind))?;
        }
        Ok(())
    }

    /// Drop the current session and everything it produced.
    fn reset(&mut self) {
        self.session = None;
        self.phase = AdapterPhase::Uninitialized;
        self.shapes.clear();
        self.linear_accel_body = Vector3::zeros();
        self.last_diagnostics = None;
    }

    pub fn initialize(
        &mut self,
        info: &HashMap<String, String>,
        params: &HashMap<String, String>,
        state: &mut SpatialComponent,
        projection: &dyn EarthProjection,
    ) -> Result<(), FdmError> {
        self.reset();
        let config = FdmConfig::from_maps(info, params)?;
        self.initialize_with_config(config, state, projection)
    }

    pub fn initialize_with_config(
        &mut self,
        config: FdmConfig,
        state: &mut SpatialComponent,
        projection: &dyn EarthProjection,
    ) -> Result<(), FdmError> {
        self.reset();
        config.validate()?;

        let mut hold = AttitudeHold::from_gains(
            config.roll,
            config.pitch,
            config.yaw,
            ATTITUDE_INTEGRAL_BAND,
        );
        if config.attitude_hold {
            hold.enable();
        }

        let channels = ControlChannels::declare(&mut self.vars);
        self.vars.reset_values();

        let root = &config.jsbsim_root;
        let mut fdm = (self.factory)();
        fdm.set_debug_level(config.debug_level);
        fdm.set_root_dir(root);
        fdm.set_aircraft_path(&root.join("aircraft"));
        fdm.set_engine_path(&root.join("engine"));
        fdm.set_systems_path(&root.join("systems"));
        fdm.load_script(&config.script_path())?;

        *fdm.initial_condition_mut() = InitialCondition::from_vehicle(state, projection, &self.to_fdm);
        fdm.run_ic()?;
        fdm.set_dt(config.dt);
        fdm.run()?;

        let nodes = FdmNodes::resolve(fdm.properties())?;
        let diagnostics = DiagnosticNodes::resolve(fdm.properties());

        let reconciler = FrameReconciler::new(self.from_fdm, config.gravity);
        let reconciled = reconciler.reconcile(&nodes.sample(fdm.properties()), projection);
        reconciled.apply_to(state);
        self.linear_accel_body = reconciled.accel_body;

        info!(
            "FDM initialized from {} at position {:?}",
            config.script_path().display(),
            state.position
        );

        self.session = Some(Box::new(Session {
            config,
            fdm,
            nodes,
            diagnostics,
            reconciler,
            hold,
            channels,
        }));
        self.phase = AdapterPhase::Initialized;
        Ok(())
    }

    pub fn step(
        &mut self,
        time: f64,
        dt: f64,
        state: &mut SpatialComponent,
        projection: &dyn EarthProjection,
    ) -> Result<(), FdmError> {
        let session = self.session.as_deref_mut().ok_or(FdmError::NotInitialized)?;
        let channels = session.channels;
        let nodes = session.nodes;

        let mut commands = FdmCommands::new(
            self.vars.input(channels.thrust)?,
            self.vars.input(channels.elevator)?,
            self.vars.input(channels.aileron)?,
            self.vars.input(channels.rudder)?,
        );
        if session.hold.active {
            let measured = nodes.attitude(session.fdm.properties());
            let correction = session.hold.evaluate(measured, dt);
            commands.aileron = correction.x;
            commands.elevator = correction.y;
            commands.rudder = correction.z;
        }
        commands = FdmCommands::new(
            clamp_command(commands.thrust),
            clamp_command(commands.elevator),
            clamp_command(commands.aileron),
            clamp_command(commands.rudder),
        );

        let props = session.fdm.properties_mut();
        props.set_double(nodes.aileron_cmd, commands.aileron);
        props.set_double(nodes.elevator_cmd, commands.elevator);
        props.set_double(nodes.rudder_cmd, commands.rudder);
        props.set_double(nodes.throttle_cmd, commands.thrust);

        session.fdm.set_dt(dt);
        session.fdm.run()?;

        let props = session.fdm.properties();
        let reconciled = session.reconciler.reconcile(&nodes.sample(props), projection);
        reconciled.apply_to(state);
        self.linear_accel_body = reconciled.accel_body;

        let config = &session.config;
        let origin = state.position;
        if config.draw_vel != 0.0 {
            self.shapes.push(DebugShape::vector_line(
                origin,
                state.velocity,
                config.draw_vel,
                DebugShape::VELOCITY_COLOR,
            ));
        }
        if config.draw_ang_vel != 0.0 {
            self.shapes.push(DebugShape::vector_line(
                origin,
                state.angular_velocity,
                config.draw_ang_vel,
                DebugShape::ANGULAR_VELOCITY_COLOR,
            ));
        }
        if config.draw_acc != 0.0 {
            self.shapes.push(DebugShape::vector_line(
                origin,
                reconciled.accel_world,
                config.draw_acc,
                DebugShape::ACCELERATION_COLOR,
            ));
        }

        let optional = |node: Option<PropertyNode>| node.map(|n| props.get_double(n));
        let diag = StepDiagnostics {
            time,
            altitude_agl: feet_to_meters(props.get_double(nodes.altitude_agl)),
            weight_on_wheels: session
                .diagnostics
                .weight_on_wheels
                .map(|node| optional(node).map(|v| v != 0.0)),
            accel_body: reconciled.accel_body,
            commands,
            aileron_pos: optional(session.diagnostics.aileron_pos),
            elevator_pos: optional(session.diagnostics.elevator_pos),
            rudder_pos: optional(session.diagnostics.rudder_pos),
            thrust_lbs: optional(session.diagnostics.thrust_lbs),
        };
        debug!(
            time = diag.time,
            altitude_agl = diag.altitude_agl,
            u_fps = props.get_double(nodes.u_body),
            weight_on_wheels = ?diag.weight_on_wheels,
            accel_body = ?diag.accel_body,
            commands = ?diag.commands,
            thrust_lbs = ?diag.thrust_lbs,
            "fdm step"
        );
        self.last_diagnostics = Some(diag);
        self.phase = AdapterPhase::Stepping;
        Ok(())
    }
}
