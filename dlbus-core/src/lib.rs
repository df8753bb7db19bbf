//! Board-agnostic DL-Bus receiver pipeline
//!
//! This crate turns a stream of edge timestamps from a single input pin
//! into published temperature and relay readings:
//!
//! - Edge capture into a bounded sample buffer (interrupt context)
//! - Frame boundary detection via quiet-period timeout (loop context)
//! - Decoding, validation, and payload mapping (`dlbus-protocol`)
//! - Publishing to externally owned sensor sinks
//!
//! The interrupt handler and the loop never contend: edge events are
//! disabled for the whole decode phase, so the capture buffer has one
//! writer at a time and no locking beyond that bracket.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod diag;

pub mod boundary;
pub mod capture;
pub mod noise;
pub mod receiver;
pub mod sink;
pub mod timing;

pub use boundary::{BoundaryDetector, BoundaryEvent, FRAME_TIMEOUT_US, MIN_FRAME_EDGES};
pub use capture::{CaptureState, OverflowPolicy, MAX_EDGES};
pub use noise::NoiseFloor;
pub use receiver::{DlBusReceiver, ReceiverConfig, ReceiverStats};
pub use sink::{RelaySink, SensorSlots, TemperatureSink};
pub use timing::IntervalStats;
