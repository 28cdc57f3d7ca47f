use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::point::Scalar;
use crate::geometry::sphere::Sphere;

/// Environment variable naming a JSON file with solver settings.
pub const CONFIG_ENV_VAR: &str = "SAFE_FLIGHT_CONFIG";

pub const DEFAULT_PLANET_RADIUS: Scalar = 6370.0;
pub const DEFAULT_EPSILON: Scalar = 1e-9;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Planet and tolerance settings shared by every test case.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    /// Same unit as safety radii and fuel capacities.
    pub planet_radius: Scalar,
    /// Tolerance for positional, angular and interval comparisons.
    pub epsilon: Scalar,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            planet_radius: DEFAULT_PLANET_RADIUS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.planet_radius.is_finite() && self.planet_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "planet_radius must be positive, got {}",
                self.planet_radius
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.planet_radius, self.epsilon)
    }
}
