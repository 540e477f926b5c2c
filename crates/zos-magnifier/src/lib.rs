//! Screen Magnifier for Zero OS
//!
//! This crate computes where and how much the desktop zoom feature
//! magnifies, and when it is allowed to recompute:
//! - Region table with point-containment lookup
//! - Viewport/ROI transforms and screen-edge clipping
//! - Bounded zoom level control
//! - Leisure scheduling gated by compositor busy sections
//!
//! It never samples or draws pixels. Renderables are referenced by opaque
//! handles that the rendering layer owns.
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`, `ScreenRect`)
//! - [`registry`]: Fixed-capacity region table and point lookup
//! - [`transform`]: Pure clip/ROI/center math
//! - [`zoom`]: Zoom level controller
//! - [`leisure`]: Deferred work scheduler
//! - [`host`]: Collaborator trait for pointer and screen access
//! - [`persistence`]: State serialization for the host's state store
//!
//! ## Example
//!
//! ```rust
//! use zos_magnifier::{
//!     ActorHandle, Factors, MagnifierEngine, PointerState, ScreenGeometry, ScreenRect,
//!     StaticHost,
//! };
//!
//! let host = StaticHost::new(ScreenGeometry::new(1920.0, 1080.0));
//! let mut engine = MagnifierEngine::with_defaults(host);
//!
//! let slot = engine
//!     .mag_add(
//!         ScreenRect::new(0, 0, 960, 540),
//!         Factors::uniform(2.0).unwrap(),
//!         ActorHandle(1),
//!         ActorHandle(2),
//!     )
//!     .unwrap();
//!
//! engine.host().set_pointer(PointerState::at(1900.0, 1060.0));
//! engine.run_at_interval().unwrap();
//!
//! let roi = engine.region_roi(slot).unwrap();
//! assert!(roi.right() <= 1920.0 && roi.bottom() <= 1080.0);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod leisure;
pub mod math;
pub mod persistence;
pub mod registry;
pub mod transform;
pub mod zoom;

mod engine;
mod region;
mod types;

pub use config::{MagnifierConfig, ZoomConfig, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
pub use engine::{EngineMetrics, IntervalReport, MagnifierEngine};
pub use error::{MagnifierError, MagnifierResult};
pub use host::{MagnifierHost, StaticHost};
pub use leisure::{CleanupFn, LeisureFn, LeisureId, LeisureMetrics, LeisureScheduler, LeisureState};
pub use math::{Rect, ScreenRect, Size, Vec2};
pub use persistence::{RegionSnapshot, Snapshot};
pub use region::{Placement, RegionConfig, ZoomRegion};
pub use registry::{RegionRegistry, RegistryEntry, NOT_FOUND, REGION_CAPACITY};
pub use transform::{clip, get_roi, mag_center, mag_center_mouse};
pub use types::{ActorHandle, Factors, Modifiers, PointerState, RegionSlot, ScreenGeometry};
