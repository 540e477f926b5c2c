//! Core geometry types for the magnifier
//!
//! Floating-point types describe source (unmagnified) space, where regions
//! of interest and magnifier centers live. `ScreenRect` is the integer
//! rectangle used for on-screen viewports and registry entries.

mod rect;
mod screen_rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use screen_rect::ScreenRect;
pub use size::Size;
pub use vec2::Vec2;
