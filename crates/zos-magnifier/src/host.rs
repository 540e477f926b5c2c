//! Host collaborator interface
//!
//! The magnifier never talks to the compositor directly. Everything it
//! needs from the outside world (pointer position, monitored screen
//! geometry, a debug sink) comes through `MagnifierHost`, the same way the
//! kernel reaches hardware only through its HAL.

use std::cell::Cell;

use crate::types::{PointerState, ScreenGeometry};

/// Services the magnifier consumes from the host session
pub trait MagnifierHost {
    /// Current pointer position and modifier state
    fn pointer(&self) -> PointerState;

    /// Bounds of the monitored screen area
    fn screen(&self) -> ScreenGeometry;

    /// Write a diagnostic line to the host's debug channel
    fn debug_write(&self, _msg: &str) {}
}

impl<H: MagnifierHost + ?Sized> MagnifierHost for &H {
    fn pointer(&self) -> PointerState {
        (**self).pointer()
    }

    fn screen(&self) -> ScreenGeometry {
        (**self).screen()
    }

    fn debug_write(&self, msg: &str) {
        (**self).debug_write(msg)
    }
}

/// Host with caller-controlled pointer and screen
///
/// Used for headless embedding and tests. Values live in `Cell`s so a
/// shared reference can move the pointer between ticks.
#[derive(Debug)]
pub struct StaticHost {
    pointer: Cell<PointerState>,
    screen: Cell<ScreenGeometry>,
}

impl StaticHost {
    /// Create a host for the given screen with the pointer at its origin
    pub fn new(screen: ScreenGeometry) -> Self {
        Self {
            pointer: Cell::new(PointerState {
                position: screen.origin,
                ..Default::default()
            }),
            screen: Cell::new(screen),
        }
    }

    /// Move the pointer
    pub fn set_pointer(&self, pointer: PointerState) {
        self.pointer.set(pointer);
    }

    /// Replace the monitored screen (monitor hotplug, resolution change)
    pub fn set_screen(&self, screen: ScreenGeometry) {
        self.screen.set(screen);
    }
}

impl MagnifierHost for StaticHost {
    fn pointer(&self) -> PointerState {
        self.pointer.get()
    }

    fn screen(&self) -> ScreenGeometry {
        self.screen.get()
    }

    fn debug_write(&self, msg: &str) {
        tracing::debug!(target: "zos_magnifier::host", "{}", msg);
    }
}
