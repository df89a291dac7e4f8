pub const METERS_TO_FEET: f64 = 3.28084;
pub const FEET_TO_METERS: f64 = 1.0 / METERS_TO_FEET;

/// Gravity used to turn FDM specific force back into acceleration [m/s^2]
pub const FDM_GRAVITY: f64 = 9.81;

// WGS-84 ellipsoid
pub const WGS84_A: f64 = 6_378_137.0; // semi-major axis [m]
pub const WGS84_F: f64 = 1.0 / 298.257_223_563; // flattening
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F); // first eccentricity squared

// Control limits for normalized FDM commands
pub const CONTROL_MIN: f64 = -1.0;
pub const CONTROL_MAX: f64 = 1.0;

/// Integral band applied to every attitude-hold PID [rad]
pub const ATTITUDE_INTEGRAL_BAND: f64 = std::f64::consts::PI / 40.0;
