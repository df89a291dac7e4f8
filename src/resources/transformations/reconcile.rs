use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::components::{AngleConverter, SpatialComponent};
use crate::resources::projection::EarthProjection;
use crate::resources::transformations::frames::{
    body_to_world, frd_to_flu_matrix, ned_to_enu_matrix, world_to_body,
};
use crate::utils::math::{deg_to_rad, feet_to_meters, rad_to_deg};

/// Raw integrator outputs for one tick, in the FDM's own frames and units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FdmSample {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_sl_ft: f64,
    pub roll_rad: f64,
    pub pitch_rad: f64,
    pub heading_rad: f64,
    pub v_north_fps: f64,
    pub v_east_fps: f64,
    pub v_down_fps: f64,
    /// Body rates about x-forward, y-right, z-down [rad/s]
    pub p_rad_sec: f64,
    pub q_rad_sec: f64,
    pub r_rad_sec: f64,
    /// Specific force at the pilot station, FRD body frame [ft/s^2]
    pub ax_pilot_fps2: f64,
    pub ay_pilot_fps2: f64,
    pub az_pilot_fps2: f64,
}

/// FDM state converted into the internal ENU/FLU frames and SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub attitude: UnitQuaternion<f64>,
    /// Angular velocity in the world frame [rad/s]
    pub angular_velocity: Vector3<f64>,
    /// Linear acceleration in the FLU body frame, gravity restored [m/s^2]
    pub accel_body: Vector3<f64>,
    /// Linear acceleration in the world frame [m/s^2]
    pub accel_world: Vector3<f64>,
}

impl ReconciledState {
    pub fn apply_to(&self, spatial: &mut SpatialComponent) {
        spatial.position = self.position;
        spatial.velocity = self.velocity;
        spatial.attitude = self.attitude;
        spatial.angular_velocity = self.angular_velocity;
    }
}

/// FDM body (x-forward, y-right, z-down) to FLU.
#[inline]
pub fn frd_to_flu(x: f64, y: f64, z: f64) -> Vector3<f64> {
    frd_to_flu_matrix() * Vector3::new(x, y, z)
}

/// Converts FDM outputs into internal vehicle state.
///
/// The same conversion runs when seeding the vehicle at initialization and
/// after every integration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReconciler {
    heading: AngleConverter,
    /// Gravity magnitude restored onto the FDM's specific force [m/s^2]
    gravity: f64,
}

impl FrameReconciler {
    pub fn new(heading: AngleConverter, gravity: f64) -> Self {
        Self { heading, gravity }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn position(&self, sample: &FdmSample, projection: &dyn EarthProjection) -> Vector3<f64> {
        projection.forward(
            sample.latitude_deg,
            sample.longitude_deg,
            feet_to_meters(sample.altitude_sl_ft),
        )
    }

    /// Roll passes through, pitch flips sign, heading goes through the angle
    /// converter into ENU yaw.
    pub fn attitude(&self, sample: &FdmSample) -> UnitQuaternion<f64> {
        let yaw = deg_to_rad(self.heading.convert(rad_to_deg(sample.heading_rad)));
        UnitQuaternion::from_euler_angles(sample.roll_rad, -sample.pitch_rad, yaw)
    }

    pub fn velocity(&self, sample: &FdmSample) -> Vector3<f64> {
        let ned = Vector3::new(sample.v_north_fps, sample.v_east_fps, sample.v_down_fps);
        ned_to_enu_matrix() * ned.map(feet_to_meters)
    }

    pub fn angular_velocity_body(&self, sample: &FdmSample) -> Vector3<f64> {
        frd_to_flu(sample.p_rad_sec, sample.q_rad_sec, sample.r_rad_sec)
    }

    /// Specific force converted to FLU and corrected by gravity.
    ///
    /// The FDM reports what an accelerometer would read, so gravity expressed
    /// in the body frame is added back to recover kinematic acceleration.
    pub fn acceleration_body(&self, sample: &FdmSample, attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
        let specific_force = frd_to_flu(
            feet_to_meters(sample.ax_pilot_fps2),
            feet_to_meters(sample.ay_pilot_fps2),
            feet_to_meters(sample.az_pilot_fps2),
        );
        specific_force + world_to_body(attitude, &Vector3::new(0.0, 0.0, -self.gravity))
    }

    pub fn reconcile(&self, sample: &FdmSample, projection: &dyn EarthProjection) -> ReconciledState {
        let attitude = self.attitude(sample);
        let accel_body = self.acceleration_body(sample, &attitude);
        ReconciledState {
            position: self.position(sample, projection),
            velocity: self.velocity(sample),
            attitude,
            angular_velocity: body_to_world(&attitude, &self.angular_velocity_body(sample)),
            accel_body,
            accel_world: body_to_world(&attitude, &accel_body),
        }
    }
}
