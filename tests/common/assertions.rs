use approx::assert_relative_eq;
use flyer_jsbsim::components::SpatialComponent;
use nalgebra::{UnitQuaternion, Vector3};

/// Assert that a spatial component's state is valid
#[track_caller]
pub fn assert_spatial_valid(spatial: &SpatialComponent) {
    assert!(
        spatial.position.iter().all(|x| x.is_finite()),
        "Position is not finite"
    );
    assert!(
        spatial.velocity.iter().all(|x| x.is_finite()),
        "Velocity is not finite"
    );
    assert!(
        spatial.angular_velocity.iter().all(|x| x.is_finite()),
        "Angular velocity is not finite"
    );
    assert!(
        spatial.attitude.coords.iter().all(|x| x.is_finite()),
        "Attitude is not finite"
    );
}

/// Assert that two positions are approximately equal
#[track_caller]
pub fn assert_position_eq(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_relative_eq!(actual.z, expected.z, epsilon = epsilon);
}

/// Assert that two attitudes are approximately equal
#[track_caller]
pub fn assert_attitude_eq(
    actual: &UnitQuaternion<f64>,
    expected: &UnitQuaternion<f64>,
    epsilon: f64,
) {
    let angle = (actual.inverse() * expected).angle();
    assert!(
        angle < epsilon,
        "Attitude difference {} exceeds epsilon {}",
        angle,
        epsilon
    );
}
