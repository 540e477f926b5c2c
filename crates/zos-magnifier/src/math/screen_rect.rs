use serde::{Deserialize, Serialize};

use super::{Rect, Size, Vec2};

/// Integer rectangle in screen pixels
///
/// Used for on-screen viewports and spatial index entries. Edge arithmetic
/// is widened to `i64` so rectangles near `i32::MAX` never overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: `x <= px < x + width`, same for y
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (i64::from(px), i64::from(py));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x
            && px < x + i64::from(self.width)
            && py >= y
            && py < y + i64::from(self.height)
    }

    /// Both dimensions strictly positive
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Top-left corner as a float point
    pub fn origin(&self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Dimensions as a float size
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Same rectangle in float coordinates
    pub fn to_rect(&self) -> Rect {
        Rect::from_pos_size(self.origin(), self.size())
    }

    /// Copy of this rectangle moved to a new top-left corner
    pub fn with_origin(&self, x: i32, y: i32) -> Self {
        Self::new(x, y, self.width, self.height)
    }
}
