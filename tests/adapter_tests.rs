mod common;

use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use flyer_jsbsim::components::ChannelType;
use flyer_jsbsim::physics::{paths, AdapterPhase, FlightStateAdapter};
use flyer_jsbsim::resources::{FdmConfigBuilder, LocalCartesian};
use flyer_jsbsim::components::PidGains;
use flyer_jsbsim::utils::FEET_TO_METERS;
use nalgebra::{UnitQuaternion, Vector3};
use pretty_assertions::assert_eq;

use crate::common::{
    assert_attitude_eq, assert_position_eq, assert_spatial_valid, create_airborne_spatial,
    create_ground_spatial, create_initialized_adapter, create_test_projection, TEST_DT,
};

#[test]
fn test_level_rest_on_ground_stays_put() {
    let projection = create_test_projection();
    let mut spatial = create_ground_spatial();
    let mut adapter = create_initialized_adapter(&mut spatial, &[]);

    assert_eq!(adapter.phase(), AdapterPhase::Initialized);
    assert_position_eq(&spatial.position, &Vector3::zeros(), 1e-6);
    assert_relative_eq!(adapter.linear_accel_body(), Vector3::zeros(), epsilon = 1e-9);

    for i in 0..100 {
        adapter
            .step(i as f64 * TEST_DT, TEST_DT, &mut spatial, &projection)
            .unwrap();
        adapter.drain_shapes();
    }

    assert_spatial_valid(&spatial);
    assert_position_eq(&spatial.position, &Vector3::zeros(), 1e-6);
    assert_position_eq(&spatial.velocity, &Vector3::zeros(), 1e-12);
    assert_relative_eq!(adapter.linear_accel_body(), Vector3::zeros(), epsilon = 1e-9);
    assert_attitude_eq(&spatial.attitude, &UnitQuaternion::identity(), 1e-9);
}

#[test]
fn test_initial_heading_survives_round_trip() {
    let yaw = 30.0_f64.to_radians();
    let mut spatial = create_airborne_spatial(50.0, yaw);
    let _adapter = create_initialized_adapter(&mut spatial, &[]);

    let (_, _, actual_yaw) = spatial.attitude.euler_angles();
    assert_relative_eq!(actual_yaw, yaw, epsilon = 1e-9);
    assert_relative_eq!(spatial.position.z, 50.0, epsilon = 1e-6);
}

#[test]
fn test_throttle_accelerates_north() {
    let projection = create_test_projection();
    let mut spatial = create_airborne_spatial(100.0, FRAC_PI_2);
    let mut adapter = create_initialized_adapter(&mut spatial, &[]);
    let thrust = adapter.channels().unwrap().index(ChannelType::Thrust);
    adapter.vars_mut().set_input(thrust, 1.0).unwrap();

    for i in 0..100 {
        adapter
            .step(i as f64 * TEST_DT, TEST_DT, &mut spatial, &projection)
            .unwrap();
    }

    assert_spatial_valid(&spatial);
    assert!(spatial.velocity.y > 0.0);
    assert_relative_eq!(spatial.velocity.x, 0.0, epsilon = 1e-9);
    assert!(spatial.position.y > 0.0);
    assert_relative_eq!(spatial.position.x, 0.0, epsilon = 1e-3);
    assert_relative_eq!(spatial.position.z, 100.0, epsilon = 1e-3);

    // Full throttle is 10 ft/s^2 along body x, gravity fully restored
    assert_relative_eq!(
        adapter.linear_accel_body(),
        Vector3::new(10.0 * FEET_TO_METERS, 0.0, 0.0),
        epsilon = 1e-6
    );

    let shapes = adapter.drain_shapes();
    assert_eq!(shapes.len(), 300);
}

#[test]
fn test_attitude_hold_tracks_roll_setpoint() {
    let projection = create_test_projection();
    let mut spatial = create_airborne_spatial(200.0, 0.0);
    let mut adapter = create_initialized_adapter(
        &mut spatial,
        &[
            ("attitude_hold", "true"),
            ("roll_kp", "2.0"),
            ("pitch_kp", "0.0"),
            ("yaw_kp", "0.0"),
        ],
    );
    adapter
        .set_attitude_setpoint(Vector3::new(0.3, 0.0, 0.0))
        .unwrap();

    for i in 0..500 {
        adapter
            .step(i as f64 * TEST_DT, TEST_DT, &mut spatial, &projection)
            .unwrap();
    }

    let (roll, pitch, _) = spatial.attitude.euler_angles();
    assert_relative_eq!(roll, 0.3, epsilon = 1e-3);
    assert_relative_eq!(pitch, 0.0, epsilon = 1e-9);
}

#[test]
fn test_attitude_hold_tracks_pitch_setpoint() {
    let projection = create_test_projection();
    let mut spatial = create_airborne_spatial(200.0, 0.0);
    let mut adapter = create_initialized_adapter(
        &mut spatial,
        &[
            ("attitude_hold", "true"),
            ("roll_kp", "0.0"),
            ("pitch_kp", "4.0"),
            ("yaw_kp", "0.0"),
        ],
    );
    adapter
        .set_attitude_setpoint(Vector3::new(0.0, 0.2, 0.0))
        .unwrap();

    for i in 0..500 {
        adapter
            .step(i as f64 * TEST_DT, TEST_DT, &mut spatial, &projection)
            .unwrap();
    }

    let props = adapter.fdm().unwrap().properties();
    let pitch = props.get_double(props.resolve(paths::PITCH).unwrap());
    let elevator = props.get_double(props.resolve(paths::ELEVATOR_CMD).unwrap());
    assert_relative_eq!(pitch, 0.2, epsilon = 1e-3);
    // Holding nose up settles on a small trailing-edge-up command
    assert!(elevator <= 0.0);
    assert_spatial_valid(&spatial);
}

#[test]
fn test_initialize_from_built_config() {
    let config = FdmConfigBuilder::new()
        .jsbsim_root("/opt/jsbsim")
        .script_name("c172_cruise.xml")
        .dt(0.02)
        .roll(PidGains::new(1.0, 0.1, 0.0))
        .pitch(PidGains::new(1.0, 0.1, 0.0))
        .yaw(PidGains::new(1.0, 0.1, 0.0))
        .draw_vel(0.0)
        .draw_ang_vel(0.0)
        .draw_acc(0.0)
        .build()
        .unwrap();

    let projection = LocalCartesian::default();
    let mut spatial = create_ground_spatial();
    let mut adapter = FlightStateAdapter::kinematic();
    adapter
        .initialize_with_config(config, &mut spatial, &projection)
        .unwrap();

    assert_eq!(adapter.fdm().unwrap().dt(), 0.02);
    adapter.step(0.0, 0.05, &mut spatial, &projection).unwrap();
    assert_eq!(adapter.fdm().unwrap().dt(), 0.05);
    assert!(adapter.drain_shapes().is_empty());
}

#[test]
fn test_missing_gain_is_fatal() {
    let mut params = crate::common::create_test_params(&[]);
    params.remove("yaw_kd");

    let mut spatial = create_ground_spatial();
    let mut adapter = FlightStateAdapter::kinematic();
    let result = adapter.initialize(
        &HashMap::new(),
        &params,
        &mut spatial,
        &create_test_projection(),
    );

    assert!(result.is_err());
    assert_eq!(adapter.phase(), AdapterPhase::Uninitialized);
    assert_eq!(spatial, create_ground_spatial());
}

#[test]
fn test_keys_fall_back_to_info() {
    let mut params = crate::common::create_test_params(&[]);
    let root = params.remove("JSBSIM_ROOT").unwrap();
    let info: HashMap<String, String> = [("JSBSIM_ROOT".to_string(), root)].into_iter().collect();

    let mut spatial = create_ground_spatial();
    let mut adapter = FlightStateAdapter::kinematic();
    adapter
        .initialize(&info, &params, &mut spatial, &create_test_projection())
        .unwrap();
    assert_eq!(
        adapter.config().unwrap().jsbsim_root,
        std::path::PathBuf::from("/opt/jsbsim")
    );
}
