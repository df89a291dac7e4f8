use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::components::PidGains;
use crate::utils::constants::FDM_GRAVITY;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingRequired(String),
    #[error("Invalid parameter '{name}' with value '{value}'")]
    InvalidParameter { name: String, value: String },
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

fn default_draw_vel() -> f64 {
    1.0
}

fn default_draw_ang_vel() -> f64 {
    10.0
}

fn default_draw_acc() -> f64 {
    1.0
}

fn default_gravity() -> f64 {
    FDM_GRAVITY
}

fn default_debug_level() -> u32 {
    1
}

/// Everything the FDM adapter needs to start and run an integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FdmConfig {
    /// Root directory of the JSBSim data tree
    pub jsbsim_root: PathBuf,
    /// Script to load, relative to `<root>/scripts`
    pub script_name: String,
    /// Integration timestep used for the settle run [s]
    pub dt: f64,
    pub roll: PidGains,
    pub pitch: PidGains,
    pub yaw: PidGains,
    /// Scale of the velocity debug line, zero disables it
    #[serde(default = "default_draw_vel")]
    pub draw_vel: f64,
    /// Scale of the angular velocity debug line, zero disables it
    #[serde(default = "default_draw_ang_vel")]
    pub draw_ang_vel: f64,
    /// Scale of the acceleration debug line, zero disables it
    #[serde(default = "default_draw_acc")]
    pub draw_acc: f64,
    /// Gravity added back to the FDM's specific force [m/s^2]
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_debug_level")]
    pub debug_level: u32,
    /// Close the roll/pitch/yaw loops instead of passing commands through
    #[serde(default)]
    pub attitude_hold: bool,
}

impl FdmConfig {
    /// Parse from the string-keyed maps handed over by the simulation driver.
    ///
    /// Keys are looked up in `params` first and then in `info`.
    pub fn from_maps(
        info: &HashMap<String, String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |key: &str| lookup_key(info, params, key);

        let mut builder = FdmConfigBuilder::new();

        if let Some(root) = lookup("JSBSIM_ROOT") {
            builder = builder.jsbsim_root(root);
        }
        if let Some(script) = lookup("script_name") {
            builder = builder.script_name(script);
        }
        if let Some(dt) = lookup("dt") {
            builder = builder.dt(parse_value("dt", dt)?);
        }

        let gains = |axis: &str| -> Result<PidGains, ConfigError> {
            let gain = |suffix: &str| {
                let key = format!("{}_{}", axis, suffix);
                let value = lookup(key.as_str())
                    .ok_or_else(|| ConfigError::MissingRequired(key.clone()))?;
                parse_value::<f64>(&key, value)
            };
            Ok(PidGains::new(gain("kp")?, gain("ki")?, gain("kd")?))
        };
        builder = builder
            .roll(gains("roll")?)
            .pitch(gains("pitch")?)
            .yaw(gains("yaw")?);

        if let Some(v) = lookup("drawVel") {
            builder = builder.draw_vel(parse_value("drawVel", v)?);
        }
        if let Some(v) = lookup("drawAngVel") {
            builder = builder.draw_ang_vel(parse_value("drawAngVel", v)?);
        }
        if let Some(v) = lookup("drawAcc") {
            builder = builder.draw_acc(parse_value("drawAcc", v)?);
        }
        if let Some(v) = lookup("gravity") {
            builder = builder.gravity(parse_value("gravity", v)?);
        }
        if let Some(v) = lookup("debug_level") {
            builder = builder.debug_level(parse_value("debug_level", v)?);
        }
        if let Some(v) = lookup("attitude_hold") {
            builder = builder.attitude_hold(parse_flag("attitude_hold", v)?);
        }

        builder.build()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Relative path of the script inside the JSBSim root.
    pub fn script_path(&self) -> PathBuf {
        Path::new("scripts").join(&self.script_name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jsbsim_root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "JSBSIM_ROOT must not be empty".into(),
            ));
        }
        if self.script_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "script_name must not be empty".into(),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "dt must be a positive number of seconds, got {}",
                self.dt
            )));
        }
        let finite = [
            ("gravity", self.gravity),
            ("drawVel", self.draw_vel),
            ("drawAngVel", self.draw_ang_vel),
            ("drawAcc", self.draw_acc),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        for (axis, gains) in [("roll", self.roll), ("pitch", self.pitch), ("yaw", self.yaw)] {
            if ![gains.kp, gains.ki, gains.kd].iter().all(|g| g.is_finite()) {
                return Err(ConfigError::ValidationError(format!(
                    "{} gains must be finite",
                    axis
                )));
            }
        }
        Ok(())
    }
}

fn lookup_key<'a>(
    info: &'a HashMap<String, String>,
    params: &'a HashMap<String, String>,
    key: &str,
) -> Option<&'a str> {
    params
        .get(key)
        .or_else(|| info.get(key))
        .map(String::as_str)
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct FdmConfigBuilder {
    pub jsbsim_root: Option<PathBuf>,
    pub script_name: Option<String>,
    pub dt: Option<f64>,
    pub roll: Option<PidGains>,
    pub pitch: Option<PidGains>,
    pub yaw: Option<PidGains>,
    pub draw_vel: Option<f64>,
    pub draw_ang_vel: Option<f64>,
    pub draw_acc: Option<f64>,
    pub gravity: Option<f64>,
    pub debug_level: Option<u32>,
    pub attitude_hold: Option<bool>,
}

impl FdmConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jsbsim_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.jsbsim_root = Some(root.into());
        self
    }

    pub fn script_name(mut self, script: impl Into<String>) -> Self {
        self.script_name = Some(script.into());
        self
    }

    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    pub fn roll(mut self, gains: PidGains) -> Self {
        self.roll = Some(gains);
        self
    }

    pub fn pitch(mut self, gains: PidGains) -> Self {
        self.pitch = Some(gains);
        self
    }

    pub fn yaw(mut self, gains: PidGains) -> Self {
        self.yaw = Some(gains);
        self
    }

    pub fn draw_vel(mut self, scale: f64) -> Self {
        self.draw_vel = Some(scale);
        self
    }

    pub fn draw_ang_vel(mut self, scale: f64) -> Self {
        self.draw_ang_vel = Some(scale);
        self
    }

    pub fn draw_acc(mut self, scale: f64) -> Self {
        self.draw_acc = Some(scale);
        self
    }

    pub fn gravity(mut self, gravity: f64) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn debug_level(mut self, level: u32) -> Self {
        self.debug_level = Some(level);
        self
    }

    pub fn attitude_hold(mut self, active: bool) -> Self {
        self.attitude_hold = Some(active);
        self
    }

    pub fn build(self) -> Result<FdmConfig, ConfigError> {
        let missing = |key: &str| ConfigError::MissingRequired(key.to_string());

        let config = FdmConfig {
            jsbsim_root: self.jsbsim_root.ok_or_else(|| missing("JSBSIM_ROOT"))?,
            script_name: self.script_name.ok_or_else(|| missing("script_name"))?,
            dt: self.dt.ok_or_else(|| missing("dt"))?,
            roll: self.roll.ok_or_else(|| missing("roll_kp"))?,
            pitch: self.pitch.ok_or_else(|| missing("pitch_kp"))?,
            yaw: self.yaw.ok_or_else(|| missing("yaw_kp"))?,
            draw_vel: self.draw_vel.unwrap_or_else(default_draw_vel),
            draw_ang_vel: self.draw_ang_vel.unwrap_or_else(default_draw_ang_vel),
            draw_acc: self.draw_acc.unwrap_or_else(default_draw_acc),
            gravity: self.gravity.unwrap_or_else(default_gravity),
            debug_level: self.debug_level.unwrap_or_else(default_debug_level),
            attitude_hold: self.attitude_hold.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Raw string-keyed initialization maps waiting to be consumed by the FDM
/// initialization system.
#[derive(Component, Debug, Clone, Default)]
pub struct FdmParameters {
    pub info: HashMap<String, String>,
    pub params: HashMap<String, String>,
}

impl FdmParameters {
    pub fn new(info: HashMap<String, String>, params: HashMap<String, String>) -> Self {
        Self { info, params }
    }
}
