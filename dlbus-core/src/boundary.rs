//! Frame boundary detection
//!
//! The bus marks frame boundaries with silence: once edges stop for
//! longer than any valid inter-bit gap, the capture holds one complete
//! telegram. The detector watches elapsed time from the loop context
//! and flips the receiver between two phases: `Capturing` (interrupt
//! appends edges) and `Draining` (edge events disabled, buffer handed
//! to the decoder).

use crate::capture::CaptureState;

/// Quiet period that ends a frame.
///
/// Must exceed the longest valid inter-bit gap (one SYNC run, ~33 ms at
/// the UVR64 bit rate) and stay below the bus repetition period.
pub const FRAME_TIMEOUT_US: u32 = 50_000;

/// Captures shorter than this are noise, not frames.
///
/// A real telegram yields hundreds of edges; anything below this count
/// is discarded without invoking the decoder.
pub const MIN_FRAME_EDGES: usize = 100;

/// Receiver phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Interrupt context owns the buffer and appends edges
    Capturing,
    /// Loop context owns the buffer; decode in progress
    Draining,
}

/// Outcome of one boundary poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoundaryEvent {
    /// No boundary yet; keep capturing
    Pending,
    /// A frame-sized capture is ready to decode
    FrameReady,
    /// The quiet period elapsed over a capture too short to be a frame
    TooShort,
}

/// Quiet-period frame boundary detector
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    phase: Phase,
    frame_timeout_us: u32,
    min_frame_edges: usize,
}

impl BoundaryDetector {
    pub fn new(frame_timeout_us: u32, min_frame_edges: usize) -> Self {
        Self {
            phase: Phase::Capturing,
            frame_timeout_us,
            min_frame_edges,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check for a frame boundary. Loop-context path.
    ///
    /// Transitions to `Draining` on [`BoundaryEvent::FrameReady`]; the
    /// caller must [`resume`](Self::resume) once the buffer has been
    /// decoded and cleared. A full capture buffer forces the boundary
    /// early to bound latency and memory.
    pub fn poll(&mut self, capture: &CaptureState, now_us: u32) -> BoundaryEvent {
        if self.phase == Phase::Draining {
            return BoundaryEvent::Pending;
        }
        if capture.is_empty() {
            return BoundaryEvent::Pending;
        }

        let quiet = now_us.wrapping_sub(capture.last_edge_us()) > self.frame_timeout_us;
        if !quiet && !capture.is_full() {
            return BoundaryEvent::Pending;
        }

        if capture.len() < self.min_frame_edges {
            return BoundaryEvent::TooShort;
        }

        self.phase = Phase::Draining;
        BoundaryEvent::FrameReady
    }

    /// Return to `Capturing` after the decode phase.
    pub fn resume(&mut self) {
        self.phase = Phase::Capturing;
    }
}
