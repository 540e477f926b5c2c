//! Magnifier configuration

use serde::{Deserialize, Serialize};

use crate::error::{MagnifierError, MagnifierResult};

/// Lowest zoom multiplier; regions show only their base magnification
pub const MIN_ZOOM: f64 = 1.0;

/// Highest zoom multiplier
pub const MAX_ZOOM: f64 = 16.0;

/// Multiplier applied by one zoom-in step
pub const ZOOM_STEP: f64 = 2.0;

/// Default cadence for the host's interval timer
pub const DEFAULT_INTERVAL_MS: u32 = 16;

/// Zoom controller bounds and step
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Lower clamp bound
    pub min: f64,
    /// Upper clamp bound
    pub max: f64,
    /// Factor applied per zoom-in, divided per zoom-out
    pub step: f64,
    /// Level on startup
    pub initial: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
            initial: MIN_ZOOM,
        }
    }
}

impl ZoomConfig {
    /// Check bounds, step and initial level
    pub fn validate(&self) -> MagnifierResult<()> {
        if !(self.min.is_finite() && self.min > 0.0) {
            return Err(MagnifierError::Config(format!(
                "zoom.min must be positive, got {}",
                self.min
            )));
        }
        if !(self.max.is_finite() && self.max >= self.min) {
            return Err(MagnifierError::Config(format!(
                "zoom.max ({}) must be >= zoom.min ({})",
                self.max, self.min
            )));
        }
        if !(self.step.is_finite() && self.step > 1.0) {
            return Err(MagnifierError::Config(format!(
                "zoom.step must be > 1, got {}",
                self.step
            )));
        }
        if !(self.min..=self.max).contains(&self.initial) {
            return Err(MagnifierError::Config(format!(
                "zoom.initial ({}) outside [{}, {}]",
                self.initial, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Configuration for a magnifier engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnifierConfig {
    /// Zoom controller settings
    pub zoom: ZoomConfig,
    /// Cadence the host should drive `run_at_interval` at
    pub interval_ms: u32,
}

impl MagnifierConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> MagnifierResult<Self> {
        let config: MagnifierConfig =
            serde_json::from_str(json).map_err(|e| MagnifierError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check zoom settings and interval
    pub fn validate(&self) -> MagnifierResult<()> {
        self.zoom.validate()?;
        if self.interval_ms == 0 {
            return Err(MagnifierError::Config("interval_ms must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MagnifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.zoom.min, MIN_ZOOM);
        assert_eq!(config.zoom.max, MAX_ZOOM);
        assert_eq!(config.interval_ms, DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn test_from_json_partial() {
        let config = MagnifierConfig::from_json(r#"{"zoom": {"max": 8.0}}"#).unwrap();
        assert_eq!(config.zoom.max, 8.0);
        assert_eq!(config.zoom.step, ZOOM_STEP);
        assert_eq!(config.interval_ms, DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn test_from_json_rejects_bad_step() {
        let err = MagnifierConfig::from_json(r#"{"zoom": {"step": 1.0}}"#).unwrap_err();
        assert!(matches!(err, MagnifierError::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = MagnifierConfig::from_json("{zoom").unwrap_err();
        assert!(matches!(err, MagnifierError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut config = MagnifierConfig::default();
        config.zoom.min = 4.0;
        config.zoom.max = 2.0;
        assert!(config.validate().is_err());

        let mut config = MagnifierConfig::default();
        config.zoom.initial = 100.0;
        assert!(config.validate().is_err());

        let mut config = MagnifierConfig::default();
        config.interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
