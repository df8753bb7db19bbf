//! GPIO edge-input abstraction
//!
//! The DL-Bus signal arrives on a single input pin. The receiver needs
//! to read the instantaneous level and to gate edge notifications on
//! and off around the decode phase; the platform owns the actual
//! interrupt trampoline and calls back into the receiver on each edge.

/// Instantaneous signal level on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level as a bit value (`High` = 1).
    pub fn as_bit(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital input pin that can deliver edge notifications
///
/// Implementations route both-edge interrupts from the hardware to the
/// receiver while events are enabled. Between `disable_edge_events` and
/// `enable_edge_events` no notification may be delivered; the receiver
/// relies on that bracket for exclusive access to its capture buffer.
pub trait EdgeInput {
    /// Configure the pin as a floating/pulled input, ready for capture.
    fn setup(&mut self);

    /// Read the current signal level.
    fn read_level(&self) -> Level;

    /// Start delivering edge notifications to the platform's handler.
    fn enable_edge_events(&mut self);

    /// Stop delivering edge notifications.
    fn disable_edge_events(&mut self);

    /// Whether edge notifications are currently being delivered.
    fn edge_events_enabled(&self) -> bool;
}
