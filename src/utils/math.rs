use std::f64::consts::PI;

use crate::utils::constants::{CONTROL_MAX, CONTROL_MIN, FEET_TO_METERS, METERS_TO_FEET};

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

#[inline]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * METERS_TO_FEET
}

#[inline]
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * FEET_TO_METERS
}

/// Wrap an angle in degrees into [0, 360)
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle in radians into (-PI, PI]
pub fn wrap_pi(rad: f64) -> f64 {
    let wrapped = (rad + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}

/// Clamp a normalized control command into [-1, 1]
#[inline]
pub fn clamp_command(value: f64) -> f64 {
    value.clamp(CONTROL_MIN, CONTROL_MAX)
}
