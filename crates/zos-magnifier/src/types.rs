//! Core type definitions for the magnifier
//!
//! This module centralizes identifiers and small value types used
//! throughout the crate for consistency and discoverability.

use serde::{Deserialize, Serialize};

use crate::error::{MagnifierError, MagnifierResult};
use crate::math::{Rect, Size, Vec2};

/// Slot of a region in the engine and its registry entry
///
/// Slots are dense: removing a region shifts every later slot down by one.
pub type RegionSlot = usize;

/// Opaque reference to a renderable owned by the rendering collaborator
///
/// The magnifier only stores and hands these back. It never creates or
/// destroys the object behind the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorHandle(pub u64);

/// Per-axis magnification factors
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    pub x: f64,
    pub y: f64,
}

impl Factors {
    /// Unmagnified (1:1)
    pub const IDENTITY: Factors = Factors { x: 1.0, y: 1.0 };

    /// Create factors, rejecting non-positive or non-finite components
    pub fn new(x: f64, y: f64) -> MagnifierResult<Self> {
        let factors = Self { x, y };
        factors.validate()?;
        Ok(factors)
    }

    /// Same factor on both axes
    pub fn uniform(factor: f64) -> MagnifierResult<Self> {
        Self::new(factor, factor)
    }

    /// Reject non-positive or non-finite factors
    pub fn validate(&self) -> MagnifierResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.x) && ok(self.y) {
            Ok(())
        } else {
            Err(MagnifierError::InvalidFactor {
                x: self.x,
                y: self.y,
            })
        }
    }

    /// Component-wise product
    pub fn scaled(&self, by: Factors) -> Factors {
        Factors {
            x: self.x * by.x,
            y: self.y * by.y,
        }
    }

    /// Size of the source area visible through a viewport of `viewport` size
    pub fn source_size(&self, viewport: Size) -> Size {
        Size::new(viewport.width / self.x, viewport.height / self.y)
    }
}

impl Default for Factors {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Keyboard modifiers held when the pointer was sampled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl Modifiers {
    /// True when no modifier is held
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.control || self.alt || self.super_key)
    }
}

/// Pointer sample read from the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    /// Position in screen pixels
    pub position: Vec2,
    /// Modifier keys held at sample time
    pub modifiers: Modifiers,
}

impl PointerState {
    /// Pointer at a position with no modifiers held
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        }
    }
}

/// Bounds of the monitored screen area
///
/// `origin` is the top-left corner of the display area the magnified view
/// must stay inside; `size` its extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub origin: Vec2,
    pub size: Size,
}

impl ScreenGeometry {
    /// Screen anchored at the origin
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            origin: Vec2::ZERO,
            size: Size::new(width, height),
        }
    }

    /// Screen anchored at an arbitrary origin (secondary monitors)
    pub const fn with_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Screen area as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.origin, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_reject_non_positive() {
        assert!(Factors::new(2.0, 2.0).is_ok());
        assert_eq!(
            Factors::new(0.0, 2.0),
            Err(MagnifierError::InvalidFactor { x: 0.0, y: 2.0 })
        );
        assert!(Factors::new(2.0, -1.0).is_err());
        assert!(Factors::new(f64::NAN, 1.0).is_err());
        assert!(Factors::uniform(f64::INFINITY).is_err());
    }

    #[test]
    fn test_factors_source_size() {
        let factors = Factors::new(2.0, 4.0).unwrap();
        let source = factors.source_size(Size::new(960.0, 540.0));
        assert_eq!(source, Size::new(480.0, 135.0));
    }

    #[test]
    fn test_factors_scaled() {
        let base = Factors::new(2.0, 3.0).unwrap();
        let scaled = base.scaled(Factors::new(2.0, 0.5).unwrap());
        assert_eq!(scaled, Factors { x: 4.0, y: 1.5 });
    }

    #[test]
    fn test_modifiers_empty() {
        assert!(Modifiers::default().is_empty());
        let held = Modifiers {
            control: true,
            ..Default::default()
        };
        assert!(!held.is_empty());
    }

    #[test]
    fn test_screen_geometry_bounds() {
        let screen = ScreenGeometry::with_origin(1920.0, 0.0, 1280.0, 1024.0);
        assert_eq!(screen.bounds(), Rect::new(1920.0, 0.0, 1280.0, 1024.0));
    }
}
