use std::path::{Path, PathBuf};

use bevy::log::debug;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::physics::initial_condition::InitialCondition;
use crate::physics::paths;
use crate::physics::properties::{PropertyManager, PropertyNode};
use crate::physics::traits::FlightDynamics;
use crate::utils::constants::{FDM_GRAVITY, METERS_TO_FEET, WGS84_A, WGS84_E2};
use crate::utils::errors::FdmError;
use crate::utils::math::{deg_to_rad, feet_to_meters, rad_to_deg, wrap_pi};

/// Tuning for the kinematic integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicParams {
    /// Roll rate per unit aileron [rad/s]
    pub roll_rate_gain: f64,
    /// Pitch rate per unit elevator [rad/s]
    pub pitch_rate_gain: f64,
    /// Yaw rate per unit rudder [rad/s]
    pub yaw_rate_gain: f64,
    /// Body-x acceleration at full throttle [ft/s^2]
    pub max_thrust_accel_fps2: f64,
    /// Thrust reported at full throttle [lbs]
    pub max_thrust_lbs: f64,
    /// [ft/s^2]
    pub gravity_fps2: f64,
}

impl Default for KinematicParams {
    fn default() -> Self {
        Self {
            roll_rate_gain: 1.0,
            pitch_rate_gain: 0.5,
            yaw_rate_gain: 0.3,
            max_thrust_accel_fps2: 10.0,
            max_thrust_lbs: 400.0,
            gravity_fps2: FDM_GRAVITY * METERS_TO_FEET,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Nodes {
    aileron_cmd: PropertyNode,
    elevator_cmd: PropertyNode,
    rudder_cmd: PropertyNode,
    throttle_cmd: PropertyNode,
    lat: PropertyNode,
    lon: PropertyNode,
    alt_sl: PropertyNode,
    alt_agl: PropertyNode,
    roll: PropertyNode,
    pitch: PropertyNode,
    heading: PropertyNode,
    v_north: PropertyNode,
    v_east: PropertyNode,
    v_down: PropertyNode,
    u_body: PropertyNode,
    p: PropertyNode,
    q: PropertyNode,
    r: PropertyNode,
    ax: PropertyNode,
    ay: PropertyNode,
    az: PropertyNode,
    wow: [PropertyNode; 3],
    aileron_pos: PropertyNode,
    elevator_pos: PropertyNode,
    rudder_pos: PropertyNode,
    thrust_lbs: PropertyNode,
    sim_time: PropertyNode,
}

/// Rigid-body kinematic integrator exposing a JSBSim-shaped property tree.
///
/// Surface commands map straight onto body rates with JSBSim's signs:
/// positive aileron rolls right, positive elevator pitches the nose down and
/// positive rudder yaws the nose left. Throttle maps onto body-x
/// acceleration. The ground at the IC terrain elevation stops any descent. Output properties only exist once a script
/// has been loaded, matching an exec whose model is not yet built.
pub struct KinematicFdm {
    params: KinematicParams,
    properties: PropertyManager,
    nodes: Option<Nodes>,
    ic: InitialCondition,
    dt: f64,
    debug_level: u32,
    root_dir: PathBuf,
    aircraft_path: PathBuf,
    engine_path: PathBuf,
    systems_path: PathBuf,
    script: Option<PathBuf>,

    latitude_deg: f64,
    longitude_deg: f64,
    altitude_ft: f64,
    terrain_ft: f64,
    /// NED velocity [ft/s]
    velocity: Vector3<f64>,
    roll: f64,
    pitch: f64,
    heading: f64,
    /// FRD body rates [rad/s]
    rates: Vector3<f64>,
    sim_time: f64,
}

impl Default for KinematicFdm {
    fn default() -> Self {
        Self::new(KinematicParams::default())
    }
}

impl KinematicFdm {
    pub fn new(params: KinematicParams) -> Self {
        Self {
            params,
            properties: PropertyManager::new(),
            nodes: None,
            ic: InitialCondition::default(),
            dt: 1.0 / 120.0,
            debug_level: 0,
            root_dir: PathBuf::new(),
            aircraft_path: PathBuf::new(),
            engine_path: PathBuf::new(),
            systems_path: PathBuf::new(),
            script: None,
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_ft: 0.0,
            terrain_ft: 0.0,
            velocity: Vector3::zeros(),
            roll: 0.0,
            pitch: 0.0,
            heading: 0.0,
            rates: Vector3::zeros(),
            sim_time: 0.0,
        }
    }

    pub fn params(&self) -> &KinematicParams {
        &self.params
    }

    pub fn debug_level(&self) -> u32 {
        self.debug_level
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn aircraft_path(&self) -> &Path {
        &self.aircraft_path
    }

    pub fn engine_path(&self) -> &Path {
        &self.engine_path
    }

    pub fn systems_path(&self) -> &Path {
        &self.systems_path
    }

    pub fn script(&self) -> Option<&Path> {
        self.script.as_deref()
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    fn tie_all(&mut self) -> Nodes {
        let p = &mut self.properties;
        Nodes {
            aileron_cmd: p.tie(paths::AILERON_CMD, 0.0),
            elevator_cmd: p.tie(paths::ELEVATOR_CMD, 0.0),
            rudder_cmd: p.tie(paths::RUDDER_CMD, 0.0),
            throttle_cmd: p.tie(paths::THROTTLE_CMD, 0.0),
            lat: p.tie(paths::LATITUDE, 0.0),
            lon: p.tie(paths::LONGITUDE, 0.0),
            alt_sl: p.tie(paths::ALTITUDE_SL, 0.0),
            alt_agl: p.tie(paths::ALTITUDE_AGL, 0.0),
            roll: p.tie(paths::ROLL, 0.0),
            pitch: p.tie(paths::PITCH, 0.0),
            heading: p.tie(paths::HEADING, 0.0),
            v_north: p.tie(paths::V_NORTH, 0.0),
            v_east: p.tie(paths::V_EAST, 0.0),
            v_down: p.tie(paths::V_DOWN, 0.0),
            u_body: p.tie(paths::U_BODY, 0.0),
            p: p.tie(paths::P, 0.0),
            q: p.tie(paths::Q, 0.0),
            r: p.tie(paths::R, 0.0),
            ax: p.tie(paths::AX_PILOT, 0.0),
            ay: p.tie(paths::AY_PILOT, 0.0),
            az: p.tie(paths::AZ_PILOT, 0.0),
            wow: [
                p.tie(paths::WOW[0], 0.0),
                p.tie(paths::WOW[1], 0.0),
                p.tie(paths::WOW[2], 0.0),
            ],
            aileron_pos: p.tie(paths::AILERON_POS, 0.0),
            elevator_pos: p.tie(paths::ELEVATOR_POS, 0.0),
            rudder_pos: p.tie(paths::RUDDER_POS, 0.0),
            thrust_lbs: p.tie(paths::THRUST_LBS, 0.0),
            sim_time: p.tie(paths::SIM_TIME, 0.0),
        }
    }

    fn nodes(&self) -> Result<Nodes, FdmError> {
        self.nodes
            .ok_or_else(|| FdmError::Integrator("no script loaded".to_string()))
    }

    /// Body to NED rotation.
    fn attitude(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(self.roll, self.pitch, self.heading)
    }

    fn on_ground(&self) -> bool {
        self.altitude_ft - self.terrain_ft <= 1e-9
    }

    /// Meridian and prime vertical radii of curvature [m].
    fn earth_radii(latitude: f64) -> (f64, f64) {
        let s2 = latitude.sin().powi(2);
        let w = (1.0 - WGS84_E2 * s2).sqrt();
        let n = WGS84_A / w;
        let m = WGS84_A * (1.0 - WGS84_E2) / (w * w * w);
        (m, n)
    }

    fn publish(&mut self, nodes: &Nodes, accel_ned: &Vector3<f64>) {
        let attitude = self.attitude();
        let specific_force = attitude.inverse_transform_vector(
            &(accel_ned - Vector3::new(0.0, 0.0, self.params.gravity_fps2)),
        );
        let body_velocity = attitude.inverse_transform_vector(&self.velocity);
        let wow = if self.on_ground() { 1.0 } else { 0.0 };

        let p = &mut self.properties;
        p.set_double(nodes.lat, self.latitude_deg);
        p.set_double(nodes.lon, self.longitude_deg);
        p.set_double(nodes.alt_sl, self.altitude_ft);
        p.set_double(nodes.alt_agl, self.altitude_ft - self.terrain_ft);
        p.set_double(nodes.roll, self.roll);
        p.set_double(nodes.pitch, self.pitch);
        p.set_double(nodes.heading, self.heading);
        p.set_double(nodes.v_north, self.velocity.x);
        p.set_double(nodes.v_east, self.velocity.y);
        p.set_double(nodes.v_down, self.velocity.z);
        p.set_double(nodes.u_body, body_velocity.x);
        p.set_double(nodes.p, self.rates.x);
        p.set_double(nodes.q, self.rates.y);
        p.set_double(nodes.r, self.rates.z);
        p.set_double(nodes.ax, specific_force.x);
        p.set_double(nodes.ay, specific_force.y);
        p.set_double(nodes.az, specific_force.z);
        for node in nodes.wow {
            p.set_double(node, wow);
        }
        p.set_double(nodes.sim_time, self.sim_time);
    }
}

impl FlightDynamics for KinematicFdm {
    fn set_debug_level(&mut self, level: u32) {
        self.debug_level = level;
    }

    fn set_root_dir(&mut self, path: &Path) {
        self.root_dir = path.to_path_buf();
    }

    fn set_aircraft_path(&mut self, path: &Path) {
        self.aircraft_path = path.to_path_buf();
    }

    fn set_engine_path(&mut self, path: &Path) {
        self.engine_path = path.to_path_buf();
    }

    fn set_systems_path(&mut self, path: &Path) {
        self.systems_path = path.to_path_buf();
    }

    fn load_script(&mut self, script: &Path) -> Result<(), FdmError> {
        if script.file_name().is_none() {
            return Err(FdmError::Integrator(format!(
                "invalid script path: {}",
                script.display()
            )));
        }
        self.script = Some(self.root_dir.join(script));
        if self.nodes.is_none() {
            self.nodes = Some(self.tie_all());
        }
        Ok(())
    }

    fn initial_condition_mut(&mut self) -> &mut InitialCondition {
        &mut self.ic
    }

    fn run_ic(&mut self) -> Result<(), FdmError> {
        let nodes = self.nodes()?;
        let ic = self.ic;
        self.latitude_deg = ic.latitude_deg;
        self.longitude_deg = ic.longitude_deg;
        self.terrain_ft = ic.terrain_elevation_ft;
        self.altitude_ft = ic.altitude_asl_ft.max(ic.terrain_elevation_ft);
        self.velocity = Vector3::new(ic.v_north_fps, ic.v_east_fps, ic.v_down_fps);
        self.roll = 0.0;
        self.pitch = 0.0;
        self.heading = deg_to_rad(ic.psi_deg);
        self.rates = Vector3::zeros();
        self.sim_time = 0.0;
        self.publish(&nodes, &Vector3::zeros());
        Ok(())
    }

    fn set_dt(&mut self, dt: f64) {
        self.dt = dt;
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn run(&mut self) -> Result<(), FdmError> {
        let nodes = self.nodes()?;
        let dt = self.dt;

        let aileron = self.properties.get_double(nodes.aileron_cmd);
        let elevator = self.properties.get_double(nodes.elevator_cmd);
        let rudder = self.properties.get_double(nodes.rudder_cmd);
        let throttle = self.properties.get_double(nodes.throttle_cmd);

        self.rates = Vector3::new(
            self.params.roll_rate_gain * aileron,
            -self.params.pitch_rate_gain * elevator,
            -self.params.yaw_rate_gain * rudder,
        );

        // Euler angle kinematics for the ZYX sequence
        let (p, q, r) = (self.rates.x, self.rates.y, self.rates.z);
        let (sin_phi, cos_phi) = self.roll.sin_cos();
        let cos_theta = self.pitch.cos().max(1e-6);
        let roll_dot = p + (q * sin_phi + r * cos_phi) * self.pitch.tan();
        let pitch_dot = q * cos_phi - r * sin_phi;
        let heading_dot = (q * sin_phi + r * cos_phi) / cos_theta;
        self.roll = wrap_pi(self.roll + roll_dot * dt);
        self.pitch = (self.pitch + pitch_dot * dt)
            .clamp(-std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2);
        self.heading = (self.heading + heading_dot * dt).rem_euclid(std::f64::consts::TAU);

        let thrust = Vector3::new(throttle * self.params.max_thrust_accel_fps2, 0.0, 0.0);
        let mut accel_ned = self.attitude().transform_vector(&thrust);
        self.velocity += accel_ned * dt;

        let lat = deg_to_rad(self.latitude_deg);
        let (m, n) = Self::earth_radii(lat);
        let h = feet_to_meters(self.altitude_ft);
        let v_n = feet_to_meters(self.velocity.x);
        let v_e = feet_to_meters(self.velocity.y);
        self.latitude_deg += rad_to_deg(v_n * dt / (m + h));
        self.longitude_deg += rad_to_deg(v_e * dt / ((n + h) * lat.cos().max(1e-9)));
        self.altitude_ft -= self.velocity.z * dt;

        if self.on_ground() {
            self.altitude_ft = self.terrain_ft;
            if self.velocity.z > 0.0 {
                self.velocity.z = 0.0;
            }
            accel_ned.z = accel_ned.z.min(0.0);
        }

        self.sim_time += dt;
        self.publish(&nodes, &accel_ned);

        let p = &mut self.properties;
        p.set_double(nodes.aileron_pos, aileron);
        p.set_double(nodes.elevator_pos, elevator);
        p.set_double(nodes.rudder_pos, rudder);
        p.set_double(nodes.thrust_lbs, throttle * self.params.max_thrust_lbs);

        if self.debug_level > 1 {
            debug!(
                "kinematic fdm t={:.3} alt={:.1}ft vel={:?}",
                self.sim_time, self.altitude_ft, self.velocity
            );
        }
        Ok(())
    }

    fn properties(&self) -> &PropertyManager {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PropertyManager {
        &mut self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn loaded() -> KinematicFdm {
        let mut fdm = KinematicFdm::default();
        fdm.set_root_dir(Path::new("/opt/jsbsim"));
        fdm.load_script(Path::new("scripts/c172_cruise.xml")).unwrap();
        fdm
    }

    fn value(fdm: &KinematicFdm, path: &str) -> f64 {
        let props = fdm.properties();
        props.get_double(props.resolve(path).unwrap())
    }

    #[test]
    fn test_outputs_exist_only_after_script_load() {
        let mut fdm = KinematicFdm::default();
        assert!(!fdm.properties().has_node(paths::ALTITUDE_SL));
        assert!(fdm.run().is_err());

        let fdm = loaded();
        assert!(fdm.properties().has_node(paths::ALTITUDE_SL));
        assert!(fdm.properties().has_node(paths::WOW[2]));
        assert_eq!(fdm.script(), Some(Path::new("/opt/jsbsim/scripts/c172_cruise.xml")));
    }

    #[test]
    fn test_rest_on_ground_reads_one_g_up() {
        let mut fdm = loaded();
        *fdm.initial_condition_mut() = InitialCondition {
            terrain_elevation_ft: 100.0,
            altitude_asl_ft: 100.0,
            latitude_deg: 35.0,
            longitude_deg: -120.0,
            ..Default::default()
        };
        fdm.run_ic().unwrap();
        fdm.set_dt(0.01);
        for _ in 0..10 {
            fdm.run().unwrap();
        }

        let g = fdm.params().gravity_fps2;
        assert_relative_eq!(value(&fdm, paths::AZ_PILOT), -g, epsilon = 1e-9);
        assert_relative_eq!(value(&fdm, paths::ALTITUDE_SL), 100.0);
        assert_relative_eq!(value(&fdm, paths::LATITUDE), 35.0);
        assert_eq!(value(&fdm, paths::WOW[0]), 1.0);
        assert_relative_eq!(fdm.sim_time(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_setup_paths_are_kept() {
        let mut fdm = KinematicFdm::default();
        fdm.set_debug_level(2);
        fdm.set_root_dir(Path::new("/opt/jsbsim"));
        fdm.set_aircraft_path(Path::new("/opt/jsbsim/aircraft"));
        fdm.set_engine_path(Path::new("/opt/jsbsim/engine"));
        fdm.set_systems_path(Path::new("/opt/jsbsim/systems"));

        assert_eq!(fdm.debug_level(), 2);
        assert_eq!(fdm.root_dir(), Path::new("/opt/jsbsim"));
        assert_eq!(fdm.aircraft_path(), Path::new("/opt/jsbsim/aircraft"));
        assert_eq!(fdm.engine_path(), Path::new("/opt/jsbsim/engine"));
        assert_eq!(fdm.systems_path(), Path::new("/opt/jsbsim/systems"));
        assert!(fdm.script().is_none());
    }

    #[test]
    fn test_elevator_and_rudder_follow_jsbsim_signs() {
        let mut fdm = loaded();
        fdm.initial_condition_mut().altitude_asl_ft = 1000.0;
        fdm.run_ic().unwrap();
        let elevator = fdm.properties().resolve(paths::ELEVATOR_CMD).unwrap();
        let rudder = fdm.properties().resolve(paths::RUDDER_CMD).unwrap();
        fdm.properties_mut().set_double(elevator, 1.0);
        fdm.properties_mut().set_double(rudder, 1.0);
        fdm.set_dt(0.1);
        fdm.run().unwrap();

        // Positive elevator is nose down, positive rudder is nose left
        assert_relative_eq!(value(&fdm, paths::Q), -0.5);
        assert_relative_eq!(value(&fdm, paths::R), -0.3);
        assert!(value(&fdm, paths::PITCH) < 0.0);
        assert!(value(&fdm, paths::HEADING) > std::f64::consts::PI);
    }

    #[test]
    fn test_aileron_produces_roll_rate() {
        let mut fdm = loaded();
        fdm.initial_condition_mut().altitude_asl_ft = 1000.0;
        fdm.run_ic().unwrap();
        let node = fdm.properties().resolve(paths::AILERON_CMD).unwrap();
        fdm.properties_mut().set_double(node, 0.5);
        fdm.set_dt(0.1);
        fdm.run().unwrap();

        assert_relative_eq!(value(&fdm, paths::P), 0.5);
        assert_relative_eq!(value(&fdm, paths::ROLL), 0.05, epsilon = 1e-12);
        assert_relative_eq!(value(&fdm, paths::AILERON_POS), 0.5);
    }

    #[test]
    fn test_throttle_accelerates_along_heading() {
        let mut fdm = loaded();
        *fdm.initial_condition_mut() = InitialCondition {
            altitude_asl_ft: 1000.0,
            psi_deg: 90.0,
            ..Default::default()
        };
        fdm.run_ic().unwrap();
        let node = fdm.properties().resolve(paths::THROTTLE_CMD).unwrap();
        fdm.properties_mut().set_double(node, 1.0);
        fdm.set_dt(1.0);
        fdm.run().unwrap();

        assert_relative_eq!(value(&fdm, paths::V_EAST), 10.0, epsilon = 1e-9);
        assert_relative_eq!(value(&fdm, paths::V_NORTH), 0.0, epsilon = 1e-9);
        assert!(value(&fdm, paths::LONGITUDE) > 0.0);
        assert_relative_eq!(value(&fdm, paths::THRUST_LBS), 400.0);
        // Lift always balances weight, so only thrust shows up along body x
        assert_relative_eq!(value(&fdm, paths::AX_PILOT), 10.0, epsilon = 1e-9);
    }
}
