use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::math::wrap_pi;

/// Proportional, integral and derivative gains for a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

/// Single-axis PID controller with integral windup limiting.
///
/// When `integral_band` is positive, any error whose magnitude exceeds the
/// band resets the accumulated integral to zero, so the integral term only
/// acts close to the setpoint. A band of zero disables the limit.
///
/// Angle-valued controllers wrap the error into (-PI, PI] so that a setpoint
/// of 179 deg and a measurement of -179 deg produce a 2 deg error rather than
/// 358 deg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    gains: PidGains,
    integral_band: f64,
    is_angle: bool,
    integral: f64,
    prev_error: Option<f64>,
}

impl PidController {
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            integral_band: 0.0,
            is_angle: false,
            integral: 0.0,
            prev_error: None,
        }
    }

    pub fn with_integral_band(mut self, band: f64) -> Self {
        self.integral_band = band.abs();
        self
    }

    pub fn with_angle_error(mut self, is_angle: bool) -> Self {
        self.is_angle = is_angle;
        self
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn integral_band(&self) -> f64 {
        self.integral_band
    }

    pub fn is_angle(&self) -> bool {
        self.is_angle
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    fn error(&self, setpoint: f64, measurement: f64) -> f64 {
        let error = setpoint - measurement;
        if self.is_angle {
            wrap_pi(error)
        } else {
            error
        }
    }

    /// Run one control evaluation and return the correction.
    pub fn evaluate(&mut self, setpoint: f64, measurement: f64, dt: f64) -> f64 {
        let error = self.error(setpoint, measurement);

        if self.integral_band > 0.0 && error.abs() > self.integral_band {
            self.integral = 0.0;
        } else if dt > 0.0 {
            self.integral += error * dt;
        }

        let derivative = match self.prev_error {
            Some(prev) if dt > 0.0 => {
                let delta = if self.is_angle {
                    wrap_pi(error - prev)
                } else {
                    error - prev
                };
                delta / dt
            }
            _ => 0.0,
        };
        self.prev_error = Some(error);

        self.gains.kp * error + self.gains.ki * self.integral + self.gains.kd * derivative
    }
}

/// Maps a positive (roll, pitch, heading) correction onto JSBSim surface
/// commands. Positive aileron rolls right, positive elevator pitches the nose
/// down and positive rudder yaws the nose left.
pub const SURFACE_COMMAND_SIGNS: [f64; 3] = [1.0, -1.0, -1.0];

/// Roll, pitch and yaw hold loops with an activation switch.
///
/// While inactive the adapter passes channel commands straight through to the
/// FDM and the controllers are never evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttitudeHold {
    pub active: bool,
    /// Target (roll, pitch, heading) in the FDM's own angle convention [rad]
    pub setpoint: Vector3<f64>,
    roll: PidController,
    pitch: PidController,
    yaw: PidController,
}

impl AttitudeHold {
    pub fn new(roll: PidController, pitch: PidController, yaw: PidController) -> Self {
        Self {
            active: false,
            setpoint: Vector3::zeros(),
            roll,
            pitch,
            yaw,
        }
    }

    /// Build the three loops with angle-valued errors and a shared integral band.
    pub fn from_gains(roll: PidGains, pitch: PidGains, yaw: PidGains, integral_band: f64) -> Self {
        let build = |gains| {
            PidController::new(gains)
                .with_integral_band(integral_band)
                .with_angle_error(true)
        };
        Self::new(build(roll), build(pitch), build(yaw))
    }

    pub fn enable(&mut self) {
        self.active = true;
    }

    pub fn disable(&mut self) {
        self.active = false;
    }

    pub fn roll(&self) -> &PidController {
        &self.roll
    }

    pub fn pitch(&self) -> &PidController {
        &self.pitch
    }

    pub fn yaw(&self) -> &PidController {
        &self.yaw
    }

    /// Evaluate all three loops against the measured (roll, pitch, heading).
    /// Returns (aileron, elevator, rudder) commands signed per
    /// [`SURFACE_COMMAND_SIGNS`].
    pub fn evaluate(&mut self, measured: Vector3<f64>, dt: f64) -> Vector3<f64> {
        let [aileron, elevator, rudder] = SURFACE_COMMAND_SIGNS;
        Vector3::new(
            aileron * self.roll.evaluate(self.setpoint.x, measured.x, dt),
            elevator * self.pitch.evaluate(self.setpoint.y, measured.y, dt),
            rudder * self.yaw.evaluate(self.setpoint.z, measured.z, dt),
        )
    }
}
