//! Clock-synchronized Manchester decoding
//!
//! Instead of pairing intervals, this strategy reconstructs a bit clock
//! from the SYNC run. The run is a stretch of constant high level, so it
//! appears in the capture as one interval far longer than any bit cell.
//! The edge that ends it marks the start of the data block: the block
//! opens with a half-cell opposite to the SYNC level (the start bit of
//! the first data byte guarantees this on the bus), so the run cannot
//! silently extend into the data.
//!
//! From that edge, the signal level is sampled once per nominal bit
//! period, in the middle of the second half of each cell: the half
//! whose level *is* the data bit, safely away from both the cell-start
//! and mid-cell transitions.
//!
//! Missing or spurious edges shift interval pairing irrecoverably, but
//! only nudge clocked sampling by a fraction of a cell, so this strategy
//! is preferred on noisy captures, when the profile has a SYNC run to
//! anchor on at all.

use heapless::Vec;

use crate::bits::BitPacker;
use crate::manchester::DecodeError;
use crate::profile::{BusProfile, MAX_FRAME_BYTES};
use crate::sample::EdgeSample;

/// Timestamp bound; matches the largest capture buffer a platform
/// reasonably hands in.
const MAX_TIMESTAMPS: usize = 1024;

/// Decode a capture by SYNC-anchored level sampling.
///
/// Sampling stops at the profile's bit budget (`frame_len * 8` bits) or
/// when the capture's timestamps run out, whichever comes first.
pub fn decode_levels(
    samples: &[EdgeSample],
    profile: &BusProfile,
) -> Result<Vec<u8, MAX_FRAME_BYTES>, DecodeError> {
    if samples.len() < 2 {
        return Err(DecodeError::TooFewEdges);
    }
    let threshold = profile
        .sync_threshold_us()
        .ok_or(DecodeError::SyncNotFound)?;

    // Edge i happens at times[i]; samples[i].level holds until the next
    // edge. The first sample's interval is unreliable, so it anchors
    // t = 0 instead of contributing a duration.
    let mut times: Vec<u32, MAX_TIMESTAMPS> = Vec::new();
    let mut t = 0u32;
    for (i, s) in samples.iter().enumerate() {
        if i > 0 {
            t = t.saturating_add(s.interval_us as u32);
        }
        if times.push(t).is_err() {
            break;
        }
    }

    // The SYNC run ends at the first edge preceded by a long enough
    // edge-free stretch.
    let sync_end = (1..times.len())
        .find(|&i| samples[i].interval_us as u32 >= threshold)
        .ok_or(DecodeError::SyncNotFound)?;

    let bit_period = profile.bit_period_us;
    let data_start = times[sync_end];
    let last_time = times[times.len() - 1];

    let mut packer = BitPacker::new();
    let mut edge = sync_end;
    for cell in 0..profile.max_bits() as u32 {
        // Middle of the second half of the bit cell
        let sample_at = data_start + cell * bit_period + bit_period * 3 / 4;
        if sample_at > last_time {
            break;
        }
        while edge + 1 < times.len() && times[edge + 1] <= sample_at {
            edge += 1;
        }
        if !packer.push(samples[edge].level) {
            break;
        }
    }

    Ok(packer.finish())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::profile::SyncPattern;

    /// Encode bytes as a level-accurate edge stream: a SYNC run of high
    /// bit periods, then one cell per bit with the data level in the
    /// second half, then two quiet periods closed by a terminal edge so
    /// every cell has a timestamp past its sampling point.
    ///
    /// The first encoded bit must be 1 (low first half) so the data
    /// block detaches from the high SYNC run, as the bus start bit does.
    pub fn encode_levels(bytes: &[u8], profile: &BusProfile) -> std::vec::Vec<EdgeSample> {
        assert!(
            bytes.first().map_or(true, |b| b & 0x80 != 0),
            "first bit must break the SYNC run"
        );
        let half = (profile.bit_period_us / 2) as u16;
        let sync_halves = match profile.sync {
            SyncPattern::HighRun { bit_periods } => 2 * bit_periods as usize,
            SyncPattern::DeviceMarker => 0,
        };

        // Half-cell level sequence
        let mut halves = std::vec::Vec::new();
        halves.extend(core::iter::repeat(true).take(sync_halves));
        for &byte in bytes {
            for i in (0..8).rev() {
                let bit = (byte >> i) & 1 != 0;
                halves.push(!bit);
                halves.push(bit);
            }
        }

        // Emit one edge per level run; the opening sample only anchors
        // t = 0 and carries no meaningful interval.
        let mut samples = std::vec::Vec::new();
        samples.push(EdgeSample::new(0, halves[0]));
        let mut run: u32 = 0;
        let mut level = halves[0];
        for &h in &halves[1..] {
            run += half as u32;
            if h != level {
                samples.push(EdgeSample::new(run as u16, h));
                level = h;
                run = 0;
            }
        }
        // Terminal edge after two quiet periods
        let quiet = run + 4 * half as u32;
        samples.push(EdgeSample::new(quiet as u16, !level));
        samples
    }
}
