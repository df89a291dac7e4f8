use nalgebra::{Matrix3, UnitQuaternion, Vector3};

/// FDM body (FRD) to FLU: keep forward, flip the lateral and vertical axes.
#[rustfmt::skip]
pub fn frd_to_flu_matrix() -> Matrix3<f64> {
    Matrix3::new(
        1.0,  0.0,  0.0,
        0.0, -1.0,  0.0,
        0.0,  0.0, -1.0,
    )
}

/// NED to ENU: swap north/east, flip down.
#[rustfmt::skip]
pub fn ned_to_enu_matrix() -> Matrix3<f64> {
    Matrix3::new(
        0.0, 1.0,  0.0,
        1.0, 0.0,  0.0,
        0.0, 0.0, -1.0,
    )
}

/// Rotate a body (FLU) vector into the world (ENU) frame.
pub fn body_to_world(attitude: &UnitQuaternion<f64>, body: &Vector3<f64>) -> Vector3<f64> {
    attitude * body
}

/// Rotate a world (ENU) vector into the body (FLU) frame.
pub fn world_to_body(attitude: &UnitQuaternion<f64>, world: &Vector3<f64>) -> Vector3<f64> {
    attitude.inverse() * world
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_frd_rates_to_flu() {
        let flu = frd_to_flu_matrix() * Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(flu, Vector3::new(1.0, -2.0, -3.0));
    }

    #[test]
    fn test_axis_remaps_are_involutions() {
        let ned = Vector3::new(10.0, 5.0, -2.0);
        let enu = ned_to_enu_matrix() * ned;
        assert_eq!(enu, Vector3::new(5.0, 10.0, 2.0));
        assert_eq!(ned_to_enu_matrix() * enu, ned);
        assert_eq!(frd_to_flu_matrix() * frd_to_flu_matrix(), Matrix3::identity());
    }

    #[test]
    fn test_body_world_rotation() {
        // Yawed 90 deg CCW: body forward points north
        let attitude = UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2);
        let world = body_to_world(&attitude, &Vector3::x());
        assert_relative_eq!(world, Vector3::y(), epsilon = 1e-12);
        let body = world_to_body(&attitude, &world);
        assert_relative_eq!(body, Vector3::x(), epsilon = 1e-12);
    }
}
