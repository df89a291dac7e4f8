//! JSBSim property paths read and written by the adapter.

pub const LATITUDE: &str = "position/lat-gc-deg";
pub const LONGITUDE: &str = "position/long-gc-deg";
pub const ALTITUDE_SL: &str = "position/h-sl-ft";
pub const ALTITUDE_AGL: &str = "position/h-agl-ft";

pub const ROLL: &str = "attitude/roll-rad";
pub const PITCH: &str = "attitude/pitch-rad";
pub const HEADING: &str = "attitude/heading-true-rad";

pub const AILERON_CMD: &str = "fcs/aileron-cmd-norm";
pub const ELEVATOR_CMD: &str = "fcs/elevator-cmd-norm";
pub const RUDDER_CMD: &str = "fcs/rudder-cmd-norm";
pub const THROTTLE_CMD: &str = "fcs/throttle-cmd-norm";

pub const V_NORTH: &str = "velocities/v-north-fps";
pub const V_EAST: &str = "velocities/v-east-fps";
pub const V_DOWN: &str = "velocities/v-down-fps";
pub const U_BODY: &str = "velocities/u-fps";

// Body rates
pub const P: &str = "velocities/p-rad_sec";
pub const Q: &str = "velocities/q-rad_sec";
pub const R: &str = "velocities/r-rad_sec";

// Specific force at the pilot station, body frame
pub const AX_PILOT: &str = "accelerations/a-pilot-x-ft_sec2";
pub const AY_PILOT: &str = "accelerations/a-pilot-y-ft_sec2";
pub const AZ_PILOT: &str = "accelerations/a-pilot-z-ft_sec2";

// Diagnostics only
pub const WOW: [&str; 3] = ["gear/unit/WOW", "gear/unit[1]/WOW", "gear/unit[2]/WOW"];
pub const AILERON_POS: &str = "fcs/right-aileron-pos-norm";
pub const ELEVATOR_POS: &str = "fcs/elevator-pos-norm";
pub const RUDDER_POS: &str = "fcs/rudder-pos-norm";
pub const THRUST_LBS: &str = "propulsion/engine/thrust-lbs";
pub const SIM_TIME: &str = "simulation/sim-time-sec";
