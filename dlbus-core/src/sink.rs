//! Sensor sinks
//!
//! Decoded readings leave the pipeline through observer traits. The
//! slots are assigned once at configuration time and externally owned;
//! the receiver only calls `publish_*`, at most once per channel per
//! validated frame. Unassigned slots are silently skipped.

use dlbus_protocol::{RELAY_CHANNELS, TEMP_CHANNELS};

/// Consumer of temperature readings for one channel
pub trait TemperatureSink {
    fn publish_temperature(&mut self, celsius: f32);
}

/// Consumer of relay states for one channel
pub trait RelaySink {
    fn publish_relay(&mut self, on: bool);
}

/// Fixed observer slots: up to 6 temperature and 4 relay channels
pub struct SensorSlots<'a> {
    temps: [Option<&'a mut dyn TemperatureSink>; TEMP_CHANNELS],
    relays: [Option<&'a mut dyn RelaySink>; RELAY_CHANNELS],
}

impl Default for SensorSlots<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SensorSlots<'a> {
    pub fn new() -> Self {
        Self {
            temps: core::array::from_fn(|_| None),
            relays: core::array::from_fn(|_| None),
        }
    }

    /// Assign a temperature observer. Out-of-range channels are ignored.
    pub fn set_temperature_slot(&mut self, channel: usize, sink: &'a mut dyn TemperatureSink) {
        if let Some(slot) = self.temps.get_mut(channel) {
            *slot = Some(sink);
        }
    }

    /// Assign a relay observer. Out-of-range channels are ignored.
    pub fn set_relay_slot(&mut self, channel: usize, sink: &'a mut dyn RelaySink) {
        if let Some(slot) = self.relays.get_mut(channel) {
            *slot = Some(sink);
        }
    }

    pub fn publish_temperature(&mut self, channel: usize, celsius: f32) {
        if let Some(Some(sink)) = self.temps.get_mut(channel) {
            sink.publish_temperature(celsius);
        }
    }

    pub fn publish_relay(&mut self, channel: usize, on: bool) {
        if let Some(Some(sink)) = self.relays.get_mut(channel) {
            sink.publish_relay(on);
        }
    }
}
