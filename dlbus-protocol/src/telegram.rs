//! Telegram payload extraction
//!
//! A validated telegram carries six 16-bit temperature words in 0.1 °C
//! steps and four relay bytes. Channels whose raw value is a sentinel
//! (sensor open/short markers) or outside the physically plausible
//! range are rejected individually; the rest of the telegram is still
//! used.

use crate::profile::{BusProfile, ByteOrder};

/// Temperature channels per telegram
pub const TEMP_CHANNELS: usize = 6;

/// Relay channels per telegram
pub const RELAY_CHANNELS: usize = 4;

/// Plausible raw temperature range, in 0.1 °C steps (-40.0 to 300.0 °C;
/// collector sensors legitimately report well above boiling)
pub const TEMP_RAW_MIN: i16 = -400;
pub const TEMP_RAW_MAX: i16 = 3000;

/// Sensor-fault sentinels seen on the bus
const SENTINEL_OPEN: i16 = 0x7FFF;
const SENTINEL_SHORT: i16 = i16::MIN; // 0x8000

/// Physical readings extracted from one validated telegram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telegram {
    /// Temperatures in 0.1 °C steps; `None` for rejected channels
    pub temperatures_x10: [Option<i16>; TEMP_CHANNELS],
    /// Relay states (`true` = ON)
    pub relays: [bool; RELAY_CHANNELS],
}

impl Telegram {
    /// Extract readings from a validated byte sequence.
    ///
    /// Offsets come from the profile; out-of-bounds channels (possible
    /// only with an inconsistent hand-built profile) read as rejected.
    pub fn parse(bytes: &[u8], profile: &BusProfile) -> Self {
        let mut telegram = Self::default();

        for ch in 0..TEMP_CHANNELS {
            let at = profile.temp_offset + ch * 2;
            let (Some(&a), Some(&b)) = (bytes.get(at), bytes.get(at + 1)) else {
                continue;
            };
            let raw = match profile.temp_order {
                ByteOrder::BigEndian => i16::from_be_bytes([a, b]),
                ByteOrder::LittleEndian => i16::from_le_bytes([a, b]),
            };
            telegram.temperatures_x10[ch] = plausible(raw);
        }

        for ch in 0..RELAY_CHANNELS {
            let at = profile.relay_offset + ch;
            telegram.relays[ch] = bytes.get(at).is_some_and(|&b| b != 0);
        }

        telegram
    }

    /// Temperature of one channel in °C, if it was accepted.
    pub fn temperature_celsius(&self, channel: usize) -> Option<f32> {
        self.temperatures_x10
            .get(channel)
            .copied()
            .flatten()
            .map(|x10| x10 as f32 / 10.0)
    }
}

/// Range/sentinel gate for one raw temperature word.
fn plausible(raw: i16) -> Option<i16> {
    if raw == SENTINEL_OPEN || raw == SENTINEL_SHORT {
        return None;
    }
    if !(TEMP_RAW_MIN..=TEMP_RAW_MAX).contains(&raw) {
        return None;
    }
    Some(raw)
}
