use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Kinematic state of a vehicle in the local ENU frame.
///
/// The FDM adapter overwrites every field once per tick.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Position relative to the projection origin, east-north-up [m]
    pub position: Vector3<f64>,

    /// Linear velocity, east-north-up [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from FLU body to ENU world frame)
    pub attitude: UnitQuaternion<f64>,

    /// Angular velocity expressed in the world frame [rad/s]
    pub angular_velocity: Vector3<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl SpatialComponent {
    /// Create a new spatial component with initial values
    pub fn new(
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        attitude: UnitQuaternion<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        Self {
            position,
            velocity,
            attitude,
            angular_velocity,
        }
    }

    /// Create a new spatial component at a specific position
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Yaw of the attitude, counter-clockwise from east [rad]
    pub fn yaw(&self) -> f64 {
        self.attitude.euler_angles().2
    }
}
