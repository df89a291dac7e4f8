use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
}

/// Debug visualization record produced by the FDM adapter.
///
/// Shapes are built fresh every tick and never mutated once queued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugShape {
    pub kind: ShapeKind,
    /// RGB, 0-255 per channel
    pub color: [u8; 3],
    pub opacity: f64,
    pub points: Vec<Vector3<f64>>,
}

impl DebugShape {
    pub const VELOCITY_COLOR: [u8; 3] = [255, 255, 0];
    pub const ANGULAR_VELOCITY_COLOR: [u8; 3] = [0, 255, 255];
    pub const ACCELERATION_COLOR: [u8; 3] = [0, 0, 255];

    /// Opaque line from `origin` along `vector` scaled by `scale`.
    pub fn vector_line(origin: Vector3<f64>, vector: Vector3<f64>, scale: f64, color: [u8; 3]) -> Self {
        Self {
            kind: ShapeKind::Line,
            color,
            opacity: 1.0,
            points: vec![origin, origin + vector * scale],
        }
    }
}

/// Emitted by the FDM step system for every queued debug shape.
#[derive(Event, Debug, Clone)]
pub struct DebugShapeEvent {
    pub entity: Entity,
    pub shape: DebugShape,
}
