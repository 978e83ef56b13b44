//! Growth settings shared by every plant
//!
//! Loaded from JSON; any missing field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::FlowField;

/// Growth tuning applied on top of a plant definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the random source
    pub seed: u64,

    // === Growth ===
    /// Nominal growth per tick (scaled by a plant's growth multiplier)
    pub growth_speed: f32,
    /// Multiplicative jitter range of each growth increment
    pub growth_jitter: (f32, f32),
    /// Multiplicative jitter range of final branch lengths
    pub length_jitter: (f32, f32),
    /// Random branch rotation at full relative depth (degrees)
    pub branch_jitter: f32,
    /// Random branch rotation floor (degrees)
    pub min_branch_jitter: f32,

    // === Appearance ===
    /// Stroke width before the plant's width scale and age taper
    pub branch_width: f32,
    /// Wind sway; `None` keeps branches still
    pub flow_field: Option<FlowField>,

    // === Run ===
    /// Overrides every plant's own iteration count
    pub iterations: Option<u32>,
    /// Animation frames the demo runs after generating
    pub frames: u32,
    /// Milliseconds per animation frame
    pub frame_time: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            growth_speed: GROWTH_SPEED,
            growth_jitter: GROWTH_JITTER,
            length_jitter: LENGTH_JITTER,
            branch_jitter: BRANCH_JITTER,
            min_branch_jitter: MIN_BRANCH_JITTER,

            branch_width: BRANCH_WIDTH,
            flow_field: Some(FlowField::default()),

            iterations: None,
            frames: 600,
            frame_time: 1000.0 / 60.0,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (seed {})", settings.seed);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("growth_speed", self.growth_speed)?;
        check_range("growth_jitter", self.growth_jitter)?;
        check_range("length_jitter", self.length_jitter)?;
        if self.branch_jitter < 0.0 || self.min_branch_jitter < 0.0 {
            return Err(invalid("branch_jitter", "must not be negative"));
        }
        check_positive("branch_width", self.branch_width)?;
        if let Some(flow) = &self.flow_field {
            if !flow.is_valid() {
                let reason = "scales must be non-zero and min_change <= max_change";
                return Err(invalid("flow_field", reason));
            }
        }
        if self.iterations == Some(0) {
            return Err(invalid("iterations", "must be at least 1"));
        }
        check_positive("frame_time", self.frame_time)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidSetting {
        field,
        reason: reason.into(),
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn check_range(field: &'static str, (lo, hi): (f32, f32)) -> Result<(), ConfigError> {
    if lo > 0.0 && lo <= hi {
        Ok(())
    } else {
        Err(invalid(field, format!("expected 0 < lo <= hi, got ({lo}, {hi})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.flow_field.is_some());
        assert_eq!(settings.growth_jitter, (0.8, 1.2));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "seed": 42, "iterations": 3, "flow_field": null }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.iterations, Some(3));
        assert!(settings.flow_field.is_none());
        assert_eq!(settings.growth_speed, GROWTH_SPEED);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            seed: 7,
            branch_width: 1.5,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    fn rejected_field(json: &str) -> Option<&'static str> {
        match Settings::from_json(json) {
            Err(ConfigError::InvalidSetting { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero_speed = r#"{ "growth_speed": 0.0 }"#;
        assert_eq!(rejected_field(zero_speed), Some("growth_speed"));
        let inverted = r#"{ "length_jitter": [1.2, 0.8] }"#;
        assert_eq!(rejected_field(inverted), Some("length_jitter"));
        let negative_frame = r#"{ "frame_time": -1.0 }"#;
        assert_eq!(rejected_field(negative_frame), Some("frame_time"));

        let broken = Settings::from_json("{ nope");
        assert!(matches!(broken, Err(ConfigError::Json(_))));
    }
}
