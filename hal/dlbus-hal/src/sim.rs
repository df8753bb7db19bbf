//! Simulated edge-input pin
//!
//! A deterministic [`EdgeInput`] implementation for host tests and
//! development without hardware. The test drives the level directly and
//! observes whether edge events were enabled at each point.

use crate::gpio::{EdgeInput, Level};

/// Scripted input pin for host-side tests
#[derive(Debug, Clone)]
pub struct SimPin {
    level: Level,
    events_enabled: bool,
    is_setup: bool,
}

impl Default for SimPin {
    fn default() -> Self {
        Self::new()
    }
}

impl SimPin {
    /// Create a pin idling high (DL-Bus idles at the high level).
    pub fn new() -> Self {
        Self {
            level: Level::High,
            events_enabled: false,
            is_setup: false,
        }
    }

    /// Drive the simulated bus to a new level.
    ///
    /// Returns `true` if an edge notification would have been delivered,
    /// i.e. the level actually changed while events were enabled.
    pub fn drive(&mut self, level: Level) -> bool {
        let edge = level != self.level;
        self.level = level;
        edge && self.events_enabled
    }

    /// Whether `setup` has been called.
    pub fn is_setup(&self) -> bool {
        self.is_setup
    }
}

impl EdgeInput for SimPin {
    fn setup(&mut self) {
        self.is_setup = true;
    }

    fn read_level(&self) -> Level {
        self.level
    }

    fn enable_edge_events(&mut self) {
        self.events_enabled = true;
    }

    fn disable_edge_events(&mut self) {
        self.events_enabled = false;
    }

    fn edge_events_enabled(&self) -> bool {
        self.events_enabled
    }
}
