//! Cross-frame noise-floor estimate
//!
//! The shortest Manchester half-bit duration drifts with controller
//! temperature and line loading. The receiver keeps a rolling estimate
//! of it across frames: read when a decode starts (to seed the adaptive
//! thresholds), updated only when a decode succeeds (so garbage frames
//! cannot poison it). This is the only state that outlives a frame.

/// Rolling shortest-interval estimate, in microseconds
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoiseFloor {
    shortest_us: Option<u32>,
}

impl NoiseFloor {
    pub const fn new() -> Self {
        Self { shortest_us: None }
    }

    /// Current estimate, if any frame has decoded yet.
    pub fn seed(&self) -> Option<u32> {
        self.shortest_us
    }

    /// Fold in the short-interval estimate of a successfully decoded
    /// frame.
    ///
    /// Blended rather than taken as a strict minimum so the estimate
    /// can follow upward drift too.
    pub fn observe(&mut self, frame_short_us: u32) {
        self.shortest_us = Some(match self.shortest_us {
            Some(old) => (7 * old + frame_short_us) / 8,
            None => frame_short_us,
        });
    }

    /// Forget the estimate (e.g. after a profile change).
    pub fn reset(&mut self) {
        self.shortest_us = None;
    }
}
