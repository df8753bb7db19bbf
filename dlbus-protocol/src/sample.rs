//! Edge sample data model
//!
//! One sample per electrical transition on the bus. The interval is
//! measured against the previous transition and saturates at the type
//! bound; the level is the signal level *after* the transition.

/// A single captured level transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeSample {
    /// Microseconds since the previous edge, saturating at `u16::MAX`.
    ///
    /// The first sample of a capture has no predecessor; its interval
    /// is unreliable and must not be fed to interval-pair decoding.
    pub interval_us: u16,
    /// Signal level after the transition (`true` = high)
    pub level: bool,
}

impl EdgeSample {
    pub const fn new(interval_us: u16, level: bool) -> Self {
        Self { interval_us, level }
    }
}
