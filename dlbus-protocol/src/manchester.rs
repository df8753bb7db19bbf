//! Adaptive interval-pair Manchester decoding
//!
//! Each Manchester bit cell produces two edges, so consecutive interval
//! pairs `(t1, t2)` carry one bit: a valid cell has exactly one long and
//! one short interval, and the bit is 1 when the long one comes second.
//!
//! The long/short split is not known up front and drifts with bus
//! temperature, so the decoder tracks two running averages seeded from
//! the observed extremes (and, across frames, from the noise-floor
//! estimate) and classifies each interval by proximity. Pairs where both
//! intervals classify the same way are Manchester violations; a few are
//! tolerated by falling back to the raw `t1 < t2` comparison before the
//! whole frame is abandoned.

use heapless::Vec;

use crate::bits::BitPacker;
use crate::profile::MAX_FRAME_BYTES;
use crate::sample::EdgeSample;

/// Manchester violations tolerated per frame before decoding aborts
pub const VIOLATION_TOLERANCE: u8 = 3;

/// Reasons a capture cannot be turned into bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Fewer than two edges; there is nothing to pair
    TooFewEdges,
    /// No SYNC run found to anchor clock-synchronized sampling on
    SyncNotFound,
    /// More ambiguous interval pairs than the tolerance allows
    TooManyViolations,
}

/// Result of a successful interval-pair decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptiveOutcome {
    /// Decoded bytes, MSB-first, partial trailing bits dropped
    pub bytes: Vec<u8, MAX_FRAME_BYTES>,
    /// Final smoothed short-interval estimate, in microseconds.
    ///
    /// Feeds the cross-frame noise floor.
    pub avg_short_us: u32,
    /// Manchester violations recovered via the `t1 < t2` fallback
    pub violations: u8,
}

/// Decode edge intervals into bytes using adaptive thresholds.
///
/// `samples` must exclude the first captured edge of a frame (its
/// interval is measured against nothing). `seed_short_us` is the
/// noise-floor estimate from previous frames, if any.
pub fn decode_intervals(
    samples: &[EdgeSample],
    seed_short_us: Option<u32>,
) -> Result<AdaptiveOutcome, DecodeError> {
    if samples.len() < 2 {
        return Err(DecodeError::TooFewEdges);
    }

    let mut obs_min = u32::MAX;
    let mut obs_max = 0u32;
    for s in samples {
        let t = s.interval_us as u32;
        obs_min = obs_min.min(t);
        obs_max = obs_max.max(t);
    }

    // Seed the short estimate from the noise floor when one exists;
    // blending with the observed minimum keeps a stale floor from
    // dominating a drifted frame.
    let mut avg_short = match seed_short_us {
        Some(floor) => (floor + obs_min) / 2,
        None => obs_min,
    };
    let mut avg_long = obs_max;

    let mut packer = BitPacker::new();
    let mut violations = 0u8;

    for pair in samples.chunks_exact(2) {
        let t1 = pair[0].interval_us as u32;
        let t2 = pair[1].interval_us as u32;

        let first_long = classify_long(t1, avg_short, avg_long);
        let second_long = classify_long(t2, avg_short, avg_long);

        for (t, long) in [(t1, first_long), (t2, second_long)] {
            if long {
                avg_long = smooth(avg_long, t);
            } else {
                avg_short = smooth(avg_short, t);
            }
        }

        let bit = if first_long != second_long {
            second_long
        } else {
            violations += 1;
            if violations > VIOLATION_TOLERANCE {
                return Err(DecodeError::TooManyViolations);
            }
            // Ambiguous cell: fall back to the raw comparison
            t1 < t2
        };

        if !packer.push(bit) {
            break;
        }
    }

    Ok(AdaptiveOutcome {
        bytes: packer.finish(),
        avg_short_us: avg_short,
        violations,
    })
}

/// Exponential smoothing: new = (7*old + sample) / 8
fn smooth(old: u32, sample: u32) -> u32 {
    (7 * old + sample) / 8
}

/// An interval is long when it lies closer to the long estimate.
/// Equidistant intervals classify as short.
fn classify_long(t: u32, avg_short: u32, avg_long: u32) -> bool {
    avg_long.abs_diff(t) < avg_short.abs_diff(t)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const SHORT_US: u16 = 1024;
    pub const LONG_US: u16 = 2048;

    /// Encode bytes as ideal Manchester interval pairs: short-long = 1,
    /// long-short = 0 (levels alternate but are irrelevant here).
    pub fn encode_intervals(bytes: &[u8]) -> std::vec::Vec<EdgeSample> {
        encode_intervals_scaled(bytes, SHORT_US, LONG_US)
    }

    pub fn encode_intervals_scaled(
        bytes: &[u8],
        short_us: u16,
        long_us: u16,
    ) -> std::vec::Vec<EdgeSample> {
        let mut samples = std::vec::Vec::new();
        let mut level = false;
        for &byte in bytes {
            for i in (0..8).rev() {
                let bit = (byte >> i) & 1 != 0;
                let (first, second) = if bit {
                    (short_us, long_us)
                } else {
                    (long_us, short_us)
                };
                for t in [first, second] {
                    level = !level;
                    samples.push(EdgeSample::new(t, level));
                }
            }
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::test_support::*;
    use super::*;

    #[test]
    fn test_decode_known_bytes() {
        let payload = [0x00, 0xC8, 0xFF, 0xF6, 0x01, 0x02];
        let samples = encode_intervals(&payload);
        let outcome = decode_intervals(&samples, None).unwrap();
        assert_eq!(outcome.bytes.as_slice(), &payload);
        assert_eq!(outcome.violations, 0);
    }

    #[test]
    fn test_too_few_edges() {
        assert_eq!(
            decode_intervals(&[], None),
            Err(DecodeError::TooFewEdges)
        );
        assert_eq!(
            decode_intervals(&[EdgeSample::new(1000, true)], None),
            Err(DecodeError::TooFewEdges)
        );
    }

    #[test]
    fn test_violations_at_tolerance_succeed() {
        let mut samples = encode_intervals(&[0xA5, 0x5A]);
        // Corrupt exactly VIOLATION_TOLERANCE cells into short-short
        // pairs whose raw comparison still yields the original bit.
        for cell in 0..VIOLATION_TOLERANCE as usize {
            let i = cell * 2;
            let bit = samples[i].interval_us < samples[i + 1].interval_us;
            samples[i].interval_us = if bit { SHORT_US } else { SHORT_US + 40 };
            samples[i + 1].interval_us = if bit { SHORT_US + 40 } else { SHORT_US };
        }
        let outcome = decode_intervals(&samples, None).unwrap();
        assert_eq!(outcome.bytes.as_slice(), &[0xA5, 0x5A]);
        assert_eq!(outcome.violations, VIOLATION_TOLERANCE);
    }

    #[test]
    fn test_violations_above_tolerance_fail() {
        let mut samples = encode_intervals(&[0xA5, 0x5A]);
        for cell in 0..VIOLATION_TOLERANCE as usize + 1 {
            let i = cell * 2;
            samples[i].interval_us = SHORT_US;
            samples[i + 1].interval_us = SHORT_US + 40;
        }
        assert_eq!(
            decode_intervals(&samples, None),
            Err(DecodeError::TooManyViolations)
        );
    }

    #[test]
    fn test_noise_floor_seed_tracks_drift() {
        // First frame at nominal timing
        let payload = [0x20, 0x00, 0xC8];
        let samples = encode_intervals(&payload);
        let first = decode_intervals(&samples, None).unwrap();
        assert_eq!(first.bytes.as_slice(), &payload);

        // Second frame 5% slower, seeded with the first frame's estimate
        let samples = encode_intervals_scaled(
            &payload,
            (SHORT_US as u32 * 105 / 100) as u16,
            (LONG_US as u32 * 105 / 100) as u16,
        );
        let second = decode_intervals(&samples, Some(first.avg_short_us)).unwrap();
        assert_eq!(second.bytes.as_slice(), &payload);
        assert!(second.avg_short_us > first.avg_short_us);
    }

    #[test]
    fn test_byte_budget_bounds_output() {
        let payload = [0x55u8; MAX_FRAME_BYTES + 4];
        let samples = encode_intervals(&payload);
        let outcome = decode_intervals(&samples, None).unwrap();
        assert_eq!(outcome.bytes.len(), MAX_FRAME_BYTES);
        assert_eq!(outcome.bytes.as_slice(), &payload[..MAX_FRAME_BYTES]);
    }

    proptest! {
        /// Round-trip: any 16-byte payload encoded as ideal Manchester
        /// interval pairs decodes back to itself.
        #[test]
        fn prop_roundtrip_16_bytes(payload in proptest::array::uniform16(0u8..)) {
            let samples = encode_intervals(&payload);
            let outcome = decode_intervals(&samples, None).unwrap();
            prop_assert_eq!(outcome.bytes.as_slice(), &payload);
        }
    }
}
