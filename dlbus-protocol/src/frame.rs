//! Structural validation of decoded telegrams
//!
//! A decoded byte sequence is only surfaced to sensors if it has the
//! profile's exact length, carries the expected device marker, and its
//! checksum trailer (when the profile has one) matches. Any mismatch
//! drops the whole frame; there is no partial decode.

use crate::profile::{BusProfile, ChecksumKind};

/// Structural reasons a decoded byte sequence is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Sequence length differs from the profile's frame length
    WrongLength { expected: usize, actual: usize },
    /// First byte is not the device marker
    WrongMarker { expected: u8, actual: u8 },
    /// Checksum trailer does not match the payload
    ChecksumMismatch { expected: u8, actual: u8 },
}

/// Align a decoded sequence on the device marker and trim it to frame
/// length.
///
/// A spurious leading bit shifts every byte, so when the first byte is
/// not the marker the sequence is scanned for it; the frame is assumed
/// to start at the first occurrence that still leaves a full frame
/// behind it. Bytes past the frame length (SYNC remnants, quiet-period
/// noise) are trimmed. Profiles without a marker only get the trim.
pub fn frame_slice<'a>(bytes: &'a [u8], profile: &BusProfile) -> &'a [u8] {
    let aligned = match profile.device_marker {
        Some(marker) if bytes.first() != Some(&marker) => bytes
            .iter()
            .position(|&b| b == marker)
            .filter(|&p| bytes.len() - p >= profile.frame_len)
            .map(|p| &bytes[p..])
            .unwrap_or(bytes),
        _ => bytes,
    };
    if aligned.len() > profile.frame_len {
        &aligned[..profile.frame_len]
    } else {
        aligned
    }
}

/// Validate a (marker-aligned) byte sequence against the profile.
pub fn validate(bytes: &[u8], profile: &BusProfile) -> Result<(), FrameError> {
    if bytes.len() != profile.frame_len {
        return Err(FrameError::WrongLength {
            expected: profile.frame_len,
            actual: bytes.len(),
        });
    }

    if let Some(marker) = profile.device_marker {
        let first = bytes[0];
        if first != marker {
            return Err(FrameError::WrongMarker {
                expected: marker,
                actual: first,
            });
        }
    }

    if profile.checksum != ChecksumKind::None {
        let (payload, trailer) = match bytes.split_last() {
            Some((last, rest)) => (rest, *last),
            None => return Ok(()), // zero-length profiles have no trailer
        };
        let expected = checksum(profile.checksum, payload);
        if expected != trailer {
            return Err(FrameError::ChecksumMismatch {
                expected,
                actual: trailer,
            });
        }
    }

    Ok(())
}

/// Checksum over a payload, per trailer style.
pub fn checksum(kind: ChecksumKind, payload: &[u8]) -> u8 {
    match kind {
        ChecksumKind::None => 0,
        ChecksumKind::Xor => payload.iter().fold(0, |acc, &b| acc ^ b),
        ChecksumKind::Sum => payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)),
    }
}
