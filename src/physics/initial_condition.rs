use serde::{Deserialize, Serialize};

use crate::components::{AngleConverter, SpatialComponent};
use crate::resources::projection::EarthProjection;
use crate::utils::math::{meters_to_feet, rad_to_deg};

/// One-shot initial condition handed to the FDM before its first run, in
/// FDM units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InitialCondition {
    pub v_north_fps: f64,
    pub v_east_fps: f64,
    pub v_down_fps: f64,
    pub terrain_elevation_ft: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_asl_ft: f64,
    /// True heading, clockwise from north [deg]
    pub psi_deg: f64,
}

impl InitialCondition {
    /// Seed from the vehicle's pre-init state and the shared projection origin.
    ///
    /// The FDM starts over the projection origin at the vehicle's altitude
    /// (`height_origin + position.z`) with the terrain at `height_origin`.
    pub fn from_vehicle(
        spatial: &SpatialComponent,
        projection: &dyn EarthProjection,
        to_fdm: &AngleConverter,
    ) -> Self {
        let height_origin = projection.height_origin();
        Self {
            v_north_fps: meters_to_feet(spatial.velocity.y),
            v_east_fps: meters_to_feet(spatial.velocity.x),
            v_down_fps: -meters_to_feet(spatial.velocity.z),
            terrain_elevation_ft: meters_to_feet(height_origin),
            latitude_deg: projection.latitude_origin(),
            longitude_deg: projection.longitude_origin(),
            altitude_asl_ft: meters_to_feet(height_origin + spatial.position.z),
            psi_deg: to_fdm.convert(rad_to_deg(spatial.yaw())),
        }
    }
}
