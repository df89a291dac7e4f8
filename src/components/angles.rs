use serde::{Deserialize, Serialize};

use crate::utils::math::wrap_degrees;

/// Direction in which an angle convention counts positive angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotate {
    /// Clockwise, e.g. compass headings
    CW,
    /// Counter-clockwise, e.g. math angles in an ENU frame
    CCW,
}

impl Rotate {
    fn sign(self) -> f64 {
        match self {
            Rotate::CW => -1.0,
            Rotate::CCW => 1.0,
        }
    }
}

/// Axis that an angle convention measures zero from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingZero {
    PosX,
    PosY,
    NegX,
    NegY,
}

impl HeadingZero {
    /// Angle of this axis measured CCW from +X [deg]
    fn offset(self) -> f64 {
        match self {
            HeadingZero::PosX => 0.0,
            HeadingZero::PosY => 90.0,
            HeadingZero::NegX => 180.0,
            HeadingZero::NegY => 270.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleConvention {
    pub clock_direction: Rotate,
    pub zero_axis: HeadingZero,
}

impl AngleConvention {
    pub const fn new(clock_direction: Rotate, zero_axis: HeadingZero) -> Self {
        Self {
            clock_direction,
            zero_axis,
        }
    }

    /// Compass convention used by JSBSim headings: clockwise from north (+Y).
    pub const fn compass() -> Self {
        Self::new(Rotate::CW, HeadingZero::PosY)
    }

    /// Math convention used internally: counter-clockwise from east (+X).
    pub const fn enu() -> Self {
        Self::new(Rotate::CCW, HeadingZero::PosX)
    }

    fn to_canonical(self, deg: f64) -> f64 {
        self.clock_direction.sign() * deg + self.zero_axis.offset()
    }

    fn from_canonical(self, deg: f64) -> f64 {
        self.clock_direction.sign() * (deg - self.zero_axis.offset())
    }
}

/// Stateless mapping of angles from one convention to another.
///
/// Output angles are always in [0, 360). Converting with a converter and then
/// with its [`AngleConverter::inverse`] recovers the original angle modulo 360.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleConverter {
    input: AngleConvention,
    output: AngleConvention,
}

impl AngleConverter {
    pub const fn new(input: AngleConvention, output: AngleConvention) -> Self {
        Self { input, output }
    }

    /// Converter from FDM compass headings to internal ENU yaw.
    pub const fn from_fdm() -> Self {
        Self::new(AngleConvention::compass(), AngleConvention::enu())
    }

    /// Converter from internal ENU yaw to FDM compass headings.
    pub const fn to_fdm() -> Self {
        Self::new(AngleConvention::enu(), AngleConvention::compass())
    }

    pub fn inverse(&self) -> Self {
        Self::new(self.output, self.input)
    }

    pub fn input(&self) -> AngleConvention {
        self.input
    }

    pub fn output(&self) -> AngleConvention {
        self.output
    }

    pub fn convert(&self, deg: f64) -> f64 {
        wrap_degrees(self.output.from_canonical(self.input.to_canonical(deg)))
    }
}
