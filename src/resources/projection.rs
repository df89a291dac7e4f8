use bevy::prelude::*;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::constants::{WGS84_A, WGS84_E2};
use crate::utils::math::deg_to_rad;

/// Projection from geodetic coordinates into the simulation's local frame.
pub trait EarthProjection: Send + Sync {
    /// Project latitude/longitude [deg] and height [m] to local ENU [m].
    fn forward(&self, lat: f64, lon: f64, height: f64) -> Vector3<f64>;

    fn latitude_origin(&self) -> f64;
    fn longitude_origin(&self) -> f64;
    fn height_origin(&self) -> f64;
}

/// Geodetic to ECEF on the WGS-84 ellipsoid [m].
pub fn geodetic_to_ecef(lat: f64, lon: f64, height: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = deg_to_rad(lat).sin_cos();
    let (sin_lon, cos_lon) = deg_to_rad(lon).sin_cos();
    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    Vector3::new(
        (n + height) * cos_lat * cos_lon,
        (n + height) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + height) * sin_lat,
    )
}

/// Local east-north-up tangent plane anchored at a geodetic origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalCartesian {
    lat0: f64,
    lon0: f64,
    h0: f64,
    origin_ecef: Vector3<f64>,
    /// Rows are the east, north and up unit vectors in ECEF
    ecef_to_enu: Matrix3<f64>,
}

impl LocalCartesian {
    pub fn new(lat0: f64, lon0: f64, h0: f64) -> Self {
        let (sin_lat, cos_lat) = deg_to_rad(lat0).sin_cos();
        let (sin_lon, cos_lon) = deg_to_rad(lon0).sin_cos();
        #[rustfmt::skip]
        let ecef_to_enu = Matrix3::new(
            -sin_lon,            cos_lon,            0.0,
            -sin_lat * cos_lon, -sin_lat * sin_lon,  cos_lat,
             cos_lat * cos_lon,  cos_lat * sin_lon,  sin_lat,
        );
        Self {
            lat0,
            lon0,
            h0,
            origin_ecef: geodetic_to_ecef(lat0, lon0, h0),
            ecef_to_enu,
        }
    }
}

impl Default for LocalCartesian {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl EarthProjection for LocalCartesian {
    fn forward(&self, lat: f64, lon: f64, height: f64) -> Vector3<f64> {
        self.ecef_to_enu * (geodetic_to_ecef(lat, lon, height) - self.origin_ecef)
    }

    fn latitude_origin(&self) -> f64 {
        self.lat0
    }

    fn longitude_origin(&self) -> f64 {
        self.lon0
    }

    fn height_origin(&self) -> f64 {
        self.h0
    }
}

/// Shared projection used by every FDM-driven entity in the app.
#[derive(Resource)]
pub struct ProjectionResource(pub Box<dyn EarthProjection>);

impl ProjectionResource {
    pub fn new(projection: impl EarthProjection + 'static) -> Self {
        Self(Box::new(projection))
    }
}

impl Default for ProjectionResource {
    fn default() -> Self {
        Self::new(LocalCartesian::default())
    }
}
