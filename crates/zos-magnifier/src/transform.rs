//! Transform and clip math
//!
//! Pure functions converting between screen space, source (unmagnified)
//! space and viewport-local space. Nothing here holds state; the engine
//! feeds in region geometry and the host's screen bounds.
//!
//! A viewport of `w × h` pixels magnified by `(fx, fy)` shows a source area
//! of `w/fx × h/fy`. The magnifier center is the middle of that source area.

use crate::host::MagnifierHost;
use crate::math::{Rect, ScreenRect, Size, Vec2};
use crate::types::{Factors, ScreenGeometry};

/// Clip a magnifier center against the screen edges
///
/// The center is first moved the minimum distance that keeps `mouse` inside
/// the visible source area, then clamped per axis so the visible area stays
/// within `screen`. When the visible area is larger than the screen on an
/// axis, the center collapses to the screen midpoint on that axis.
///
/// Applying `clip` to its own output with the same inputs is a no-op.
pub fn clip(
    center: Vec2,
    mouse: Vec2,
    factors: Factors,
    viewport: Size,
    screen: &ScreenGeometry,
) -> Vec2 {
    let half = factors.source_size(viewport).as_vec2() * 0.5;
    Vec2::new(
        clip_axis(
            center.x,
            mouse.x,
            half.x,
            screen.origin.x,
            screen.size.width,
        ),
        clip_axis(
            center.y,
            mouse.y,
            half.y,
            screen.origin.y,
            screen.size.height,
        ),
    )
}

fn clip_axis(center: f64, mouse: f64, half: f64, origin: f64, extent: f64) -> f64 {
    let mut center = center;
    if mouse < center - half {
        center = mouse + half;
    } else if mouse > center + half {
        center = mouse - half;
    }

    let min = origin + half;
    let max = origin + extent - half;
    if min <= max {
        center.clamp(min, max)
    } else {
        origin + extent / 2.0
    }
}

/// Source rectangle sampled to fill a viewport
///
/// `offset` is the viewport origin in magnified space; it is translated into
/// source space by dividing by the factors.
pub fn get_roi(factors: Factors, viewport: Size, offset: Vec2) -> Rect {
    Rect::from_pos_size(
        Vec2::new(offset.x / factors.x, offset.y / factors.y),
        factors.source_size(viewport),
    )
}

/// Source rectangle shown when the magnifier is centered on `center`
pub fn roi_around(center: Vec2, factors: Factors, viewport: Size) -> Rect {
    Rect::centered_at(center, factors.source_size(viewport))
}

/// Magnifier center that puts `focus` in the middle of the viewport,
/// clipped to the screen
pub fn mag_center(focus: Vec2, factors: Factors, viewport: Size, screen: &ScreenGeometry) -> Vec2 {
    clip(focus, focus, factors, viewport, screen)
}

/// `mag_center` focused on the live pointer position
pub fn mag_center_mouse<H: MagnifierHost + ?Sized>(
    host: &H,
    factors: Factors,
    viewport: Size,
) -> Vec2 {
    let pointer = host.pointer();
    mag_center(pointer.position, factors, viewport, &host.screen())
}

/// Map a screen point into viewport-local coordinates
///
/// `roi` is the source rectangle currently shown by the viewport. The
/// result is relative to the viewport's top-left corner.
pub fn screen_to_local(point: Vec2, roi: &Rect, factors: Factors) -> Vec2 {
    Vec2::new(
        (point.x - roi.x) * factors.x,
        (point.y - roi.y) * factors.y,
    )
}

/// Inverse of `screen_to_local`
pub fn local_to_screen(local: Vec2, roi: &Rect, factors: Factors) -> Vec2 {
    Vec2::new(roi.x + local.x / factors.x, roi.y + local.y / factors.y)
}

/// Place `viewport` centered on `center`, kept inside `screen`
///
/// The top-left corner is rounded to whole pixels before it is clamped, so
/// the result never overhangs a screen with a fractional origin. Oversized
/// viewports are pinned to the screen's top-left on the offending axis.
pub fn clamp_to_screen(viewport: ScreenRect, center: Vec2, screen: &ScreenGeometry) -> ScreenRect {
    let axis = |c: f64, extent: i32, origin: f64, screen_extent: f64| -> i32 {
        let min = origin.ceil() as i64;
        let max = (origin + screen_extent).floor() as i64 - i64::from(extent);
        let wanted = (c - f64::from(extent) / 2.0).round() as i64;
        let pos = if max < min { min } else { wanted.clamp(min, max) };
        pos.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    };
    viewport.with_origin(
        axis(center.x, viewport.width, screen.origin.x, screen.size.width),
        axis(center.y, viewport.height, screen.origin.y, screen.size.height),
    )
}
