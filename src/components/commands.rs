use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::channels::ChannelType;

/// Upstream control commands for an FDM-driven vehicle.
///
/// Values are nominally in [-1, 1]. Anything outside is clamped by the adapter
/// before it reaches the FDM, never rejected.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FdmCommands {
    pub thrust: f64,
    pub elevator: f64,
    pub aileron: f64,
    pub rudder: f64,
}

impl FdmCommands {
    pub fn new(thrust: f64, elevator: f64, aileron: f64, rudder: f64) -> Self {
        Self {
            thrust,
            elevator,
            aileron,
            rudder,
        }
    }

    pub fn get(&self, kind: ChannelType) -> f64 {
        match kind {
            ChannelType::Thrust => self.thrust,
            ChannelType::Elevator => self.elevator,
            ChannelType::Aileron => self.aileron,
            ChannelType::Rudder => self.rudder,
        }
    }
}
