//! Zoom regions
//!
//! A region is one magnified viewport: where it sits on screen, how much it
//! magnifies, and which source rectangle it currently shows. Rendering
//! objects are referenced by opaque handles only.

use serde::{Deserialize, Serialize};

use crate::error::{MagnifierError, MagnifierResult};
use crate::math::{Rect, ScreenRect, Vec2};
use crate::types::{ActorHandle, Factors};

/// How a region's on-screen viewport responds to pointer movement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Viewport stays where it was added; only its content pans
    #[default]
    Fixed,
    /// Viewport follows the pointer, kept inside the screen
    Lens,
}

/// Parameters for `MagnifierEngine::mag_add`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionConfig {
    /// On-screen rectangle the magnified content is drawn into
    pub viewport: ScreenRect,
    /// Base magnification, before the global zoom level
    pub factors: Factors,
    /// Renderable showing the magnified content
    pub content: ActorHandle,
    /// Renderable showing the magnified cursor
    pub cursor: ActorHandle,
    /// Viewport placement policy
    pub placement: Placement,
}

impl RegionConfig {
    /// Fixed region with the given viewport, factors and handles
    pub fn new(
        viewport: ScreenRect,
        factors: Factors,
        content: ActorHandle,
        cursor: ActorHandle,
    ) -> Self {
        Self {
            viewport,
            factors,
            content,
            cursor,
            placement: Placement::Fixed,
        }
    }

    /// Same region with a different placement
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Reject degenerate viewports and non-positive factors
    pub fn validate(&self) -> MagnifierResult<()> {
        if !self.viewport.is_valid() {
            return Err(MagnifierError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.factors.validate()
    }
}

/// One magnified viewport
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomRegion {
    /// On-screen rectangle the magnified content is drawn into
    pub viewport: ScreenRect,
    /// Magnification requested at creation
    pub base_factors: Factors,
    /// Magnification in effect (base × zoom level)
    pub factors: Factors,
    /// Source rectangle currently shown
    pub roi: Rect,
    /// Viewport placement policy
    pub placement: Placement,
    /// Non-owning handle to the magnified content
    pub content: ActorHandle,
    /// Non-owning handle to the magnified cursor
    pub cursor: ActorHandle,
}

impl ZoomRegion {
    /// Build a region from a validated config
    ///
    /// The initial ROI is the source area under the viewport itself.
    pub(crate) fn from_config(config: &RegionConfig) -> Self {
        let viewport = config.viewport;
        let roi = Rect::centered_at(
            viewport.to_rect().center(),
            config.factors.source_size(viewport.size()),
        );
        Self {
            viewport,
            base_factors: config.factors,
            factors: config.factors,
            roi,
            placement: config.placement,
            content: config.content,
            cursor: config.cursor,
        }
    }

    /// Center of the shown source rectangle
    pub fn center(&self) -> Vec2 {
        self.roi.center()
    }
}
