//! Zoom controller
//!
//! Holds the global zoom multiplier per axis. Zooming only updates this
//! state; callers re-derive region geometry afterwards (the engine does so
//! on its next `move_regions`).

use tracing::debug;

use crate::config::ZoomConfig;
use crate::error::MagnifierResult;
use crate::types::Factors;

/// Bounded per-axis zoom level
#[derive(Clone, Debug)]
pub struct ZoomController {
    config: ZoomConfig,
    level: Factors,
}

impl ZoomController {
    /// Create a controller at the configured initial level
    ///
    /// Inverted, non-finite or non-positive bounds are a `Config` error.
    pub fn new(config: ZoomConfig) -> MagnifierResult<Self> {
        config.validate()?;
        Ok(Self::at_initial(config))
    }

    fn at_initial(config: ZoomConfig) -> Self {
        Self {
            config,
            level: Factors {
                x: config.initial,
                y: config.initial,
            },
        }
    }

    /// Current level
    pub fn level(&self) -> Factors {
        self.level
    }

    /// Bounds and step in use
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Multiply by the step, clamped to the maximum
    pub fn zoom_in(&mut self) -> Factors {
        let max = self.config.max;
        let step = self.config.step;
        self.apply(|v| (v * step).min(max))
    }

    /// Divide by the step, clamped to the minimum
    pub fn zoom_out(&mut self) -> Factors {
        let min = self.config.min;
        let step = self.config.step;
        self.apply(|v| (v / step).max(min))
    }

    /// Set the level directly, clamped to the bounds
    ///
    /// Non-positive factors are rejected before any state changes.
    pub fn set_level(&mut self, level: Factors) -> MagnifierResult<Factors> {
        level.validate()?;
        let (min, max) = (self.config.min, self.config.max);
        self.level = Factors {
            x: level.x.clamp(min, max),
            y: level.y.clamp(min, max),
        };
        debug!(x = self.level.x, y = self.level.y, "zoom level set");
        Ok(self.level)
    }

    /// True when either axis is above the minimum
    pub fn is_magnifying(&self) -> bool {
        self.level.x > self.config.min || self.level.y > self.config.min
    }

    /// True when both axes sit at the maximum
    pub fn at_max(&self) -> bool {
        self.level.x >= self.config.max && self.level.y >= self.config.max
    }

    /// True when both axes sit at the minimum
    pub fn at_min(&self) -> bool {
        self.level.x <= self.config.min && self.level.y <= self.config.min
    }

    fn apply(&mut self, f: impl Fn(f64) -> f64) -> Factors {
        let before = self.level;
        self.level = Factors {
            x: f(before.x),
            y: f(before.y),
        };
        debug!(
            from_x = before.x,
            from_y = before.y,
            to_x = self.level.x,
            to_y = self.level.y,
            "zoom level changed"
        );
        self.level
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::at_initial(ZoomConfig::default())
    }
}
