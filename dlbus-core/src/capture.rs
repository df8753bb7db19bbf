//! Edge capture buffer
//!
//! The interrupt-context half of the receiver. On each edge the
//! platform's handler records the time since the previous edge and the
//! level now on the bus; everything else (boundary detection, decoding)
//! happens later in the loop context. The record path is a saturating
//! subtraction, a capacity check, and an append, nothing more.

use heapless::Vec;

use dlbus_protocol::EdgeSample;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capture buffer capacity, in edges.
///
/// A UVR64 telegram is 16 SYNC periods plus at most two edges per data
/// bit: well under 300 edges, so 512 leaves headroom for line noise.
pub const MAX_EDGES: usize = 512;

/// What the capture does when the buffer fills mid-frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Stop recording and force an early frame boundary. Keeps the
    /// interrupt path constant-time; the frame decodes from what was
    /// captured.
    #[default]
    ForceBoundary,
    /// Drop the oldest sample to keep the newest window. Costs a buffer
    /// shift per overflowing edge, so only suitable for slow buses.
    DropOldest,
}

/// Bounded edge sample buffer with a single writer at a time
#[derive(Debug, Clone)]
pub struct CaptureState {
    samples: Vec<EdgeSample, MAX_EDGES>,
    last_edge_us: u32,
    policy: OverflowPolicy,
    overflowed: bool,
}

impl CaptureState {
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            samples: Vec::new(),
            last_edge_us: 0,
            policy,
            overflowed: false,
        }
    }

    /// Record one edge. Interrupt-context path.
    ///
    /// Samples past capacity are silently dropped under
    /// [`OverflowPolicy::ForceBoundary`]; that is backpressure, not a
    /// fault.
    pub fn record_edge(&mut self, now_us: u32, level: bool) {
        let interval = now_us.wrapping_sub(self.last_edge_us).min(u16::MAX as u32) as u16;
        self.last_edge_us = now_us;

        let sample = EdgeSample::new(interval, level);
        if self.samples.push(sample).is_err() {
            self.overflowed = true;
            if self.policy == OverflowPolicy::DropOldest {
                self.samples.remove(0);
                // Cannot fail: a slot was just freed
                let _ = self.samples.push(sample);
            }
        }
    }

    /// Captured samples, oldest first.
    pub fn samples(&self) -> &[EdgeSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether an edge arrived with the buffer already full.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Whether the buffer can take no further sample.
    pub fn is_full(&self) -> bool {
        self.samples.is_full() && self.policy == OverflowPolicy::ForceBoundary
    }

    /// Time of the most recent edge.
    pub fn last_edge_us(&self) -> u32 {
        self.last_edge_us
    }

    /// Reset for the next frame. Loop-context path, only while edge
    /// events are disabled.
    pub fn clear(&mut self, now_us: u32) {
        self.samples.clear();
        self.last_edge_us = now_us;
        self.overflowed = false;
    }
}
