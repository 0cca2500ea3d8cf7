use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::PcbError;

/// Key spacing in millimetres.
pub const DEFAULT_PITCH: f64 = 19.05;
pub const DEFAULT_PRIMARY_PREFIX: &str = "SW";
pub const DEFAULT_SECONDARY_PREFIX: &str = "D";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementConfig {
    /// Physical distance of one grid unit.
    pub pitch: f64,
    pub primary_prefix: String,
    pub secondary_prefix: String,
    pub secondary: SecondaryConfig,
}

/// Where the paired diode goes relative to its switch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SecondaryConfig {
    /// Offsets are in pitch units.
    pub x_offset: f64,
    pub y_offset: f64,
    /// Fixed orientation in degrees.
    pub angle: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            pitch: DEFAULT_PITCH,
            primary_prefix: DEFAULT_PRIMARY_PREFIX.to_string(),
            secondary_prefix: DEFAULT_SECONDARY_PREFIX.to_string(),
            secondary: SecondaryConfig::default(),
        }
    }
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            x_offset: 0.45,
            y_offset: -0.245,
            angle: 90.0,
        }
    }
}

impl PlacementConfig {
    /// Parse a YAML document. Omitted fields keep their defaults; an empty
    /// document yields the default config.
    pub fn from_yaml_str(s: &str) -> Result<Self, PcbError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, PcbError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PcbError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), PcbError> {
        if !self.pitch.is_finite() || self.pitch <= 0.0 {
            return Err(PcbError::InvalidConfig(format!(
                "pitch must be a positive number, got {}",
                self.pitch
            )));
        }
        let s = &self.secondary;
        for (name, v) in [
            ("secondary.x_offset", s.x_offset),
            ("secondary.y_offset", s.y_offset),
            ("secondary.angle", s.angle),
        ] {
            if !v.is_finite() {
                return Err(PcbError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        for (name, prefix) in [
            ("primary_prefix", &self.primary_prefix),
            ("secondary_prefix", &self.secondary_prefix),
        ] {
            if prefix.is_empty() {
                return Err(PcbError::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}
