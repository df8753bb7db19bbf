//! Bus profile definitions
//!
//! Devices on the DL-Bus disagree on frame layout: the UVR64 sends a
//! marker-prefixed 17-byte telegram, older firmware variants send the
//! 16 payload bytes bare, and data loggers re-frame the same payload
//! with start bytes and an additive checksum. Rather than baking one
//! variant in, the active profile is explicit configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound on decoded telegram length across known profiles
pub const MAX_FRAME_BYTES: usize = 32;

/// Checksum trailer style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChecksumKind {
    /// No checksum byte; the frame is validated by length and marker only
    #[default]
    None,
    /// Last byte is the XOR of all preceding bytes
    Xor,
    /// Last byte is the wrapping sum of all preceding bytes
    Sum,
}

/// Byte order of the raw 16-bit temperature words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

/// How a telegram announces itself on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SyncPattern {
    /// A run of consecutive high bit periods preceding the data.
    ///
    /// On the wire this appears as a single long edge-free interval,
    /// which is what clock-synchronized decoding anchors on.
    HighRun { bit_periods: u8 },
    /// No idle run; framing relies on the device marker byte alone.
    ///
    /// Clock-synchronized decoding cannot anchor on such a profile and
    /// reports [`DecodeError::SyncNotFound`](crate::DecodeError).
    DeviceMarker,
}

/// Decoding strategy selection
///
/// Both strategies produce the same byte sequence from a clean capture;
/// they differ in what they tolerate. Interval-pair decoding adapts to
/// timing drift but needs a mostly clean edge stream; clock-synchronized
/// decoding rides out missing edges but needs a SYNC run to anchor on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecodeStrategy {
    /// Adaptive long/short interval-pair decoding
    #[default]
    AdaptiveIntervals,
    /// SYNC-anchored level sampling at the nominal bit period
    ClockSync,
}

/// Frame layout and timing of one bus device model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusProfile {
    /// Expected first byte, if the device sends one
    pub device_marker: Option<u8>,
    /// Exact telegram length in bytes, checksum included
    pub frame_len: usize,
    /// Offset of the first temperature word
    pub temp_offset: usize,
    /// Offset of the first relay byte
    pub relay_offset: usize,
    /// Checksum trailer style
    pub checksum: ChecksumKind,
    /// Byte order of temperature words
    pub temp_order: ByteOrder,
    /// Sync announcement on the wire
    pub sync: SyncPattern,
    /// Nominal duration of one Manchester bit cell in microseconds
    pub bit_period_us: u32,
}

impl BusProfile {
    /// UVR64 telegram: marker byte `0x20` (the UVR64 device code), six
    /// big-endian temperature words, four relay bytes, no checksum.
    pub const fn uvr64() -> Self {
        Self {
            device_marker: Some(0x20),
            frame_len: 17,
            temp_offset: 1,
            relay_offset: 13,
            checksum: ChecksumKind::None,
            temp_order: ByteOrder::BigEndian,
            sync: SyncPattern::HighRun { bit_periods: 16 },
            bit_period_us: 2048,
        }
    }

    /// The bare 16-byte variant some UVR64 firmware revisions emit:
    /// payload only, no marker and no checksum.
    pub const fn uvr64_bare() -> Self {
        Self {
            device_marker: None,
            frame_len: 16,
            temp_offset: 0,
            relay_offset: 12,
            checksum: ChecksumKind::None,
            temp_order: ByteOrder::BigEndian,
            sync: SyncPattern::HighRun { bit_periods: 16 },
            bit_period_us: 2048,
        }
    }

    /// Maximum number of data bits a telegram of this profile can hold.
    pub const fn max_bits(&self) -> usize {
        self.frame_len * 8
    }

    /// Interval duration above which an edge-free stretch counts as the
    /// SYNC run, for profiles that have one.
    ///
    /// Half the nominal run length, so a run shortened by a spurious
    /// edge or a late capture start is still recognized.
    pub fn sync_threshold_us(&self) -> Option<u32> {
        match self.sync {
            SyncPattern::HighRun { bit_periods } => {
                Some(bit_periods as u32 * self.bit_period_us / 2)
            }
            SyncPattern::DeviceMarker => None,
        }
    }
}

impl Default for BusProfile {
    fn default() -> Self {
        Self::uvr64()
    }
}
