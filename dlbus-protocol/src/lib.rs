//! DL-Bus protocol decoding
//!
//! The DL-Bus is the single-wire data link of Technische Alternative
//! solar/heating controllers (UVR64 and relatives). It is self-clocked:
//! there is no framing byte stream, only voltage transitions, and the
//! receiver must recover bit timing from edge-to-edge intervals alone.
//!
//! # Signal structure
//!
//! ```text
//!            ┌── SYNC ──┐┌───────── Manchester data ─────────┐
//! ██████████████████████  ▌▐▌▐ ▌▐▌▐▌ ▐▌▐ ... quiet period ...
//!  (run of high periods)   one long + one short interval per bit
//! ```
//!
//! A telegram is bounded by a quiet period on the bus; inside it, each
//! data bit occupies one bit cell of two opposite half-levels. Decoded
//! bits are packed MSB-first into bytes and interpreted as a fixed
//! layout of temperature words and relay bytes (see [`telegram`]).
//!
//! This crate is pure logic over edge samples; capturing those samples
//! from a pin is the job of `dlbus-core`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod bits;
pub mod clocked;
pub mod frame;
pub mod manchester;
pub mod profile;
pub mod sample;
pub mod telegram;

pub use frame::{frame_slice, validate, FrameError};
pub use manchester::{decode_intervals, AdaptiveOutcome, DecodeError, VIOLATION_TOLERANCE};
pub use profile::{BusProfile, ByteOrder, ChecksumKind, DecodeStrategy, SyncPattern, MAX_FRAME_BYTES};
pub use sample::EdgeSample;
pub use telegram::{Telegram, RELAY_CHANNELS, TEMP_CHANNELS};
