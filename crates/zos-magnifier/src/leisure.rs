//! Leisure work scheduler
//!
//! Defers callbacks until the compositor is not mid-frame or mid-input
//! dispatch. Busy sections are bracketed with `begin_work`/`end_work`;
//! queued callbacks run in submission order, one at a time, and only while
//! the work depth is zero.
//!
//! ## Task lifecycle
//!
//! ```text
//! run_at_leisure ──→ Pending ──→ Running ──→ Completed
//!                       │
//!                       └── shutdown ──→ Discarded (cleanup still runs)
//! ```
//!
//! Each task runs at most once. Its cleanup runs exactly once: after the
//! callback, or when the task is discarded.

use std::collections::VecDeque;

use tracing::{debug, error, trace, warn};

use crate::error::{MagnifierError, MagnifierResult};

/// Deferred callback; receives the scheduler so it can queue follow-up work
pub type LeisureFn = Box<dyn FnOnce(&mut LeisureScheduler)>;

/// Releases whatever a callback owned; runs whether or not the callback did
pub type CleanupFn = Box<dyn FnOnce()>;

/// Identifier handed out by `run_at_leisure`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeisureId(pub u64);

/// Where a task is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeisureState {
    /// Queued, waiting for the work depth to reach zero
    Pending,
    /// Callback is executing
    Running,
    /// Callback and cleanup have run
    Completed,
    /// Dropped at shutdown without running; cleanup has run
    Discarded,
}

/// Scheduler counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeisureMetrics {
    /// Tasks ever queued
    pub queued: u64,
    /// Tasks whose callback ran
    pub completed: u64,
    /// Tasks dropped at shutdown
    pub discarded: u64,
    /// High water mark (max queue depth seen)
    pub queue_high_water: usize,
}

struct LeisureTask {
    id: LeisureId,
    callback: LeisureFn,
    cleanup: Option<CleanupFn>,
}

/// FIFO of deferred callbacks gated by a work-depth counter
pub struct LeisureScheduler {
    queue: VecDeque<LeisureTask>,
    depth: u32,
    next_id: u64,
    running: Option<LeisureId>,
    dispatching: bool,
    /// First id dropped by `shutdown`; every later id was dropped too
    discarded_from: Option<u64>,
    metrics: LeisureMetrics,
}

impl LeisureScheduler {
    /// Create an idle scheduler with an empty queue
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            depth: 0,
            next_id: 0,
            running: None,
            dispatching: false,
            discarded_from: None,
            metrics: LeisureMetrics::default(),
        }
    }

    // ========================================================================
    // Work markers
    // ========================================================================

    /// Mark the start of a busy section; nests
    pub fn begin_work(&mut self) {
        self.depth += 1;
        trace!(depth = self.depth, "begin_work");
    }

    /// Mark the end of a busy section
    ///
    /// Calling this without a matching `begin_work` is a contract violation:
    /// it panics in debug builds. Release builds log it, keep the depth at
    /// zero and return `UnbalancedWorkMarker`.
    pub fn end_work(&mut self) -> MagnifierResult<()> {
        debug_assert!(self.depth > 0, "end_work called without begin_work");
        if self.depth == 0 {
            error!("end_work called without begin_work; depth clamped at 0");
            return Err(MagnifierError::UnbalancedWorkMarker);
        }
        self.depth -= 1;
        trace!(depth = self.depth, "end_work");
        if self.depth == 0 && !self.queue.is_empty() {
            debug!(pending = self.queue.len(), "leisure work ready");
        }
        Ok(())
    }

    /// Current nesting depth
    pub fn work_depth(&self) -> u32 {
        self.depth
    }

    /// True when no busy section is open
    pub fn is_idle(&self) -> bool {
        self.depth == 0
    }

    // ========================================================================
    // Queue
    // ========================================================================

    /// Queue a callback to run the next time the scheduler is idle and
    /// dispatched. Never runs it inline.
    ///
    /// After `shutdown` the task is discarded immediately: the callback is
    /// dropped and the cleanup runs.
    pub fn run_at_leisure<F>(&mut self, callback: F, cleanup: Option<CleanupFn>) -> LeisureId
    where
        F: FnOnce(&mut LeisureScheduler) + 'static,
    {
        let id = LeisureId(self.next_id);
        self.next_id += 1;

        if self.discarded_from.is_some() {
            warn!(id = id.0, "run_at_leisure after shutdown; discarding");
            self.metrics.discarded += 1;
            if let Some(cleanup) = cleanup {
                cleanup();
            }
            return id;
        }

        self.queue.push_back(LeisureTask {
            id,
            callback: Box::new(callback),
            cleanup,
        });
        self.metrics.queued += 1;
        self.metrics.queue_high_water = self.metrics.queue_high_water.max(self.queue.len());
        trace!(id = id.0, pending = self.queue.len(), "leisure task queued");
        id
    }

    /// Run queued callbacks in FIFO order while the work depth is zero
    ///
    /// Stops as soon as a callback leaves a busy section open. A nested call
    /// from inside a callback returns 0 so callbacks never interleave.
    /// Returns the number of callbacks run.
    pub fn run_pending(&mut self) -> usize {
        if self.dispatching {
            return 0;
        }
        self.dispatching = true;

        let mut ran = 0;
        while self.depth == 0 {
            let Some(task) = self.queue.pop_front() else {
                break;
            };
            self.running = Some(task.id);
            trace!(id = task.id.0, "leisure task running");
            (task.callback)(self);
            self.running = None;
            if let Some(cleanup) = task.cleanup {
                cleanup();
            }
            self.metrics.completed += 1;
            ran += 1;
        }

        self.dispatching = false;
        if ran > 0 {
            debug!(ran, pending = self.queue.len(), "leisure tasks dispatched");
        }
        ran
    }

    /// Lifecycle state of a task, or `None` for an id never handed out
    pub fn state(&self, id: LeisureId) -> Option<LeisureState> {
        if id.0 >= self.next_id {
            return None;
        }
        if self.running == Some(id) {
            return Some(LeisureState::Running);
        }
        if self.queue.iter().any(|task| task.id == id) {
            return Some(LeisureState::Pending);
        }
        match self.discarded_from {
            Some(first) if id.0 >= first => Some(LeisureState::Discarded),
            _ => Some(LeisureState::Completed),
        }
    }

    /// Number of queued callbacks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Counters
    pub fn metrics(&self) -> &LeisureMetrics {
        &self.metrics
    }

    /// Drop every queued callback without running it, running each cleanup
    /// exactly once. Later submissions are discarded on arrival.
    pub fn shutdown(&mut self) {
        if self.discarded_from.is_none() {
            let first = self.queue.front().map_or(self.next_id, |task| task.id.0);
            self.discarded_from = Some(first);
        }
        let dropped = self.queue.len();
        while let Some(task) = self.queue.pop_front() {
            drop(task.callback);
            if let Some(cleanup) = task.cleanup {
                cleanup();
            }
            self.metrics.discarded += 1;
        }
        if dropped > 0 {
            debug!(dropped, "leisure queue discarded at shutdown");
        }
    }

    /// True once `shutdown` has run
    pub fn is_shut_down(&self) -> bool {
        self.discarded_from.is_some()
    }
}

impl Default for LeisureScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LeisureScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for LeisureScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeisureScheduler")
            .field("pending", &self.queue.len())
            .field("depth", &self.depth)
            .field("running", &self.running)
            .field("metrics", &self.metrics)
            .finish()
    }
}
