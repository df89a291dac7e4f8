use std::collections::HashMap;

use flyer_jsbsim::components::SpatialComponent;
use flyer_jsbsim::physics::FlightStateAdapter;
use flyer_jsbsim::resources::LocalCartesian;
use nalgebra::{UnitQuaternion, Vector3};

pub const TEST_DT: f64 = 0.01;

/// Projection origin shared by the end-to-end tests
pub fn create_test_projection() -> LocalCartesian {
    LocalCartesian::new(37.62, -122.38, 4.0)
}

/// Initialization parameters with unit proportional gains
pub fn create_test_params(overrides: &[(&str, &str)]) -> HashMap<String, String> {
    let mut params: HashMap<String, String> = [
        ("JSBSIM_ROOT", "/opt/jsbsim"),
        ("script_name", "c172_cruise.xml"),
        ("dt", "0.01"),
        ("roll_kp", "1.0"),
        ("roll_ki", "0.0"),
        ("roll_kd", "0.0"),
        ("pitch_kp", "1.0"),
        ("pitch_ki", "0.0"),
        ("pitch_kd", "0.0"),
        ("yaw_kp", "1.0"),
        ("yaw_ki", "0.0"),
        ("yaw_kd", "0.0"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (key, value) in overrides {
        params.insert(key.to_string(), value.to_string());
    }
    params
}

/// Vehicle at rest on the ground at the projection origin, facing east
pub fn create_ground_spatial() -> SpatialComponent {
    SpatialComponent::default()
}

/// Vehicle at rest `altitude` meters above the origin with the given ENU yaw
pub fn create_airborne_spatial(altitude: f64, yaw: f64) -> SpatialComponent {
    SpatialComponent::new(
        Vector3::new(0.0, 0.0, altitude),
        Vector3::zeros(),
        UnitQuaternion::from_euler_angles(0.0, 0.0, yaw),
        Vector3::zeros(),
    )
}

/// Kinematic adapter initialized against `spatial`
pub fn create_initialized_adapter(
    spatial: &mut SpatialComponent,
    overrides: &[(&str, &str)],
) -> FlightStateAdapter {
    let mut adapter = FlightStateAdapter::kinematic();
    adapter
        .initialize(
            &HashMap::new(),
            &create_test_params(overrides),
            spatial,
            &create_test_projection(),
        )
        .expect("adapter should initialize");
    adapter
}
