//! Magnifier engine
//!
//! The context object tying the region table, zoom controller and leisure
//! scheduler to a host. One engine exists per magnifier feature; it is
//! driven from a single control flow (the host's event loop), so nothing
//! here locks.
//!
//! Per tick the host calls `run_at_interval`, which, when no busy section
//! is open, re-centers every region on the pointer and then drains leisure
//! work.

use tracing::{debug, trace};

use crate::config::MagnifierConfig;
use crate::error::{MagnifierError, MagnifierResult};
use crate::host::MagnifierHost;
use crate::leisure::{CleanupFn, LeisureId, LeisureScheduler};
use crate::math::{Rect, ScreenRect, Vec2};
use crate::region::{Placement, RegionConfig, ZoomRegion};
use crate::registry::{RegionRegistry, REGION_CAPACITY};
use crate::transform;
use crate::types::{ActorHandle, Factors, RegionSlot};
use crate::zoom::ZoomController;

/// Outcome of one `run_at_interval` tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntervalReport {
    /// The tick hit an open busy section and did nothing
    pub deferred: bool,
    /// Regions whose geometry was recomputed
    pub regions_updated: usize,
    /// Leisure callbacks run after the update
    pub leisure_ran: usize,
}

/// Engine counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Interval ticks received
    pub ticks: u64,
    /// Ticks skipped because a busy section was open
    pub deferred_ticks: u64,
    /// Individual region recomputations
    pub region_updates: u64,
}

/// Magnifier state for one host session
pub struct MagnifierEngine<H: MagnifierHost> {
    host: H,
    config: MagnifierConfig,
    registry: RegionRegistry,
    /// Parallel to `registry`; entry `i` is tagged with value `i`
    regions: Vec<ZoomRegion>,
    zoom: ZoomController,
    leisure: LeisureScheduler,
    metrics: EngineMetrics,
}

impl<H: MagnifierHost> MagnifierEngine<H> {
    /// Create an engine with a validated config
    pub fn new(host: H, config: MagnifierConfig) -> MagnifierResult<Self> {
        config.validate()?;
        let zoom = ZoomController::new(config.zoom)?;
        Ok(Self::build(host, config, zoom))
    }

    /// Create an engine with default settings
    pub fn with_defaults(host: H) -> Self {
        Self::build(host, MagnifierConfig::default(), ZoomController::default())
    }

    fn build(host: H, config: MagnifierConfig, zoom: ZoomController) -> Self {
        Self {
            host,
            config,
            registry: RegionRegistry::new(),
            regions: Vec::with_capacity(REGION_CAPACITY),
            zoom,
            leisure: LeisureScheduler::new(),
            metrics: EngineMetrics::default(),
        }
    }

    /// Host collaborator
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Active configuration
    pub fn config(&self) -> &MagnifierConfig {
        &self.config
    }

    /// Counters
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    // ========================================================================
    // Regions
    // ========================================================================

    /// Add a fixed region and return its slot
    pub fn mag_add(
        &mut self,
        viewport: ScreenRect,
        factors: Factors,
        content: ActorHandle,
        cursor: ActorHandle,
    ) -> MagnifierResult<RegionSlot> {
        self.add_region(RegionConfig::new(viewport, factors, content, cursor))
    }

    /// Add a region and return its slot
    ///
    /// Nothing changes on failure: `InvalidViewport`/`InvalidFactor` are
    /// checked first, then capacity.
    pub fn add_region(&mut self, config: RegionConfig) -> MagnifierResult<RegionSlot> {
        config.validate()?;
        let slot = self.regions.len();
        self.registry.insert(config.viewport, slot as i32)?;
        self.regions.push(ZoomRegion::from_config(&config));

        debug!(
            slot,
            x = config.viewport.x,
            y = config.viewport.y,
            width = config.viewport.width,
            height = config.viewport.height,
            fx = config.factors.x,
            fy = config.factors.y,
            placement = ?config.placement,
            "magnifier region added"
        );
        Ok(slot)
    }

    /// Remove a region; later slots shift down by one
    ///
    /// The removed region is returned so the caller can release the
    /// renderables behind its handles.
    pub fn remove_region(&mut self, slot: RegionSlot) -> MagnifierResult<ZoomRegion> {
        if slot >= self.regions.len() {
            return Err(MagnifierError::NotFound);
        }
        self.registry.remove(slot)?;
        let removed = self.regions.remove(slot);
        for i in slot..self.regions.len() {
            self.registry.retag(i, i as i32)?;
        }
        debug!(slot, remaining = self.regions.len(), "magnifier region removed");
        Ok(removed)
    }

    /// Remove every region, returning them in slot order
    pub fn clear_regions(&mut self) -> Vec<ZoomRegion> {
        self.registry.clear();
        let removed: Vec<ZoomRegion> = self.regions.drain(..).collect();
        if !removed.is_empty() {
            debug!(count = removed.len(), "magnifier regions cleared");
        }
        removed
    }

    /// Region at a slot
    pub fn region(&self, slot: RegionSlot) -> Option<&ZoomRegion> {
        self.regions.get(slot)
    }

    /// All regions in slot order
    pub fn regions(&self) -> &[ZoomRegion] {
        &self.regions
    }

    /// Slot of the first region whose viewport contains a screen point
    pub fn region_at(&self, x: i32, y: i32) -> Option<RegionSlot> {
        self.registry
            .find(x, y)
            .and_then(|value| usize::try_from(value).ok())
    }

    /// Spatial index over region viewports
    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Source rectangle a region currently samples
    pub fn region_roi(&self, slot: RegionSlot) -> MagnifierResult<Rect> {
        self.region(slot)
            .map(|region| region.roi)
            .ok_or(MagnifierError::NotFound)
    }

    /// Magnifier center focused on the live pointer
    pub fn mag_center_mouse(&self, factors: Factors, viewport: ScreenRect) -> Vec2 {
        transform::mag_center_mouse(&self.host, factors, viewport.size())
    }

    /// Map a screen point into the viewport-local space of region `index`
    ///
    /// The region's current center is kept; `factors` decide how much source
    /// area surrounds it. An out-of-range index is `NotFound`.
    pub fn screen_to_viewport(
        &self,
        point: Vec2,
        factors: Factors,
        index: RegionSlot,
    ) -> MagnifierResult<Vec2> {
        factors.validate()?;
        let region = self.regions.get(index).ok_or(MagnifierError::NotFound)?;
        let roi = transform::roi_around(region.center(), factors, region.viewport.size());
        Ok(transform::screen_to_local(point, &roi, factors))
    }

    /// Recompute every region from the current pointer
    ///
    /// Each region's factors become `base × zoom level`; its source
    /// rectangle is re-centered on the pointer and clipped to the screen.
    /// Every on-screen viewport is kept inside the screen: Lens viewports
    /// are centered on the pointer, Fixed ones stay put unless the screen
    /// no longer holds them. Every viewport is written back to the spatial
    /// index. Returns the number of regions updated.
    pub fn move_regions(&mut self) -> MagnifierResult<usize> {
        let pointer = self.host.pointer();
        let screen = self.host.screen();
        let level = self.zoom.level();

        for (slot, region) in self.regions.iter_mut().enumerate() {
            let factors = region.base_factors.scaled(level);
            let size = region.viewport.size();
            let center = transform::mag_center(pointer.position, factors, size, &screen);

            region.factors = factors;
            region.roi = transform::roi_around(center, factors, size);

            let anchor = match region.placement {
                Placement::Lens => pointer.position,
                Placement::Fixed => region.viewport.to_rect().center(),
            };
            region.viewport = transform::clamp_to_screen(region.viewport, anchor, &screen);
            self.registry.update_rect(slot, region.viewport)?;
        }

        let updated = self.regions.len();
        self.metrics.region_updates += updated as u64;
        trace!(
            updated,
            px = pointer.position.x,
            py = pointer.position.y,
            "regions moved"
        );
        Ok(updated)
    }

    /// Re-sample the pointer and update regions now, unless busy
    ///
    /// Returns the number of regions updated (0 while a busy section is
    /// open).
    pub fn sync_pointer(&mut self) -> MagnifierResult<usize> {
        if !self.leisure.is_idle() {
            trace!(depth = self.leisure.work_depth(), "sync_pointer deferred");
            return Ok(0);
        }
        self.move_regions()
    }

    // ========================================================================
    // Zoom
    // ========================================================================

    /// Raise the zoom level by one step; regions pick it up on the next move
    pub fn zoom_in(&mut self) -> Factors {
        self.zoom.zoom_in()
    }

    /// Lower the zoom level by one step; regions pick it up on the next move
    pub fn zoom_out(&mut self) -> Factors {
        self.zoom.zoom_out()
    }

    /// Zoom controller
    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    /// Zoom controller, mutable
    pub fn zoom_mut(&mut self) -> &mut ZoomController {
        &mut self.zoom
    }

    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Open a busy section
    pub fn begin_work(&mut self) {
        self.leisure.begin_work();
    }

    /// Close a busy section
    pub fn end_work(&mut self) -> MagnifierResult<()> {
        self.leisure.end_work()
    }

    /// Queue a callback for the next idle tick
    pub fn run_at_leisure<F>(&mut self, callback: F, cleanup: Option<CleanupFn>) -> LeisureId
    where
        F: FnOnce(&mut LeisureScheduler) + 'static,
    {
        self.leisure.run_at_leisure(callback, cleanup)
    }

    /// Leisure scheduler
    pub fn leisure(&self) -> &LeisureScheduler {
        &self.leisure
    }

    /// Leisure scheduler, mutable
    pub fn leisure_mut(&mut self) -> &mut LeisureScheduler {
        &mut self.leisure
    }

    /// Periodic driver, called by the host timer at `config.interval_ms`
    ///
    /// While a busy section is open the tick is deferred: neither regions
    /// nor leisure work are touched. Otherwise regions are moved, then
    /// leisure work drains.
    pub fn run_at_interval(&mut self) -> MagnifierResult<IntervalReport> {
        self.metrics.ticks += 1;
        if !self.leisure.is_idle() {
            self.metrics.deferred_ticks += 1;
            trace!(depth = self.leisure.work_depth(), "interval tick deferred");
            return Ok(IntervalReport {
                deferred: true,
                ..Default::default()
            });
        }

        let regions_updated = self.move_regions()?;
        let leisure_ran = self.leisure.run_pending();
        Ok(IntervalReport {
            deferred: false,
            regions_updated,
            leisure_ran,
        })
    }

    /// Tear down: discard leisure work (running cleanups) and hand back
    /// every region
    pub fn shutdown(&mut self) -> Vec<ZoomRegion> {
        self.leisure.shutdown();
        let regions = self.clear_regions();
        self.host.debug_write("magnifier engine shut down");
        regions
    }
}

impl<H: MagnifierHost> std::fmt::Debug for MagnifierEngine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagnifierEngine")
            .field("regions", &self.regions.len())
            .field("zoom", &self.zoom.level())
            .field("leisure", &self.leisure)
            .field("metrics", &self.metrics)
            .finish()
    }
}
