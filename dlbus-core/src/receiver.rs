//! Receiver pipeline orchestration
//!
//! Glues the pipeline together: the platform ISR feeds edges in through
//! [`DlBusReceiver::handle_edge`], the owning component's loop calls
//! [`DlBusReceiver::service`] periodically, and validated telegrams
//! leave through the sensor slots.
//!
//! All failure modes are local: a dropped frame is counted, logged, and
//! superseded by the next one. The receiver always returns to capturing.

use dlbus_hal::EdgeInput;
use dlbus_protocol::frame::{frame_slice, validate, FrameError};
use dlbus_protocol::manchester::{decode_intervals, DecodeError};
use dlbus_protocol::profile::{BusProfile, DecodeStrategy, MAX_FRAME_BYTES};
use dlbus_protocol::{clocked, Telegram, RELAY_CHANNELS, TEMP_CHANNELS};
use heapless::Vec;

use crate::boundary::{BoundaryDetector, BoundaryEvent, FRAME_TIMEOUT_US, MIN_FRAME_EDGES};
use crate::capture::{CaptureState, OverflowPolicy};
use crate::noise::NoiseFloor;
use crate::sink::{RelaySink, SensorSlots, TemperatureSink};
use crate::timing::IntervalStats;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Receiver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReceiverConfig {
    /// Frame layout and timing of the connected device
    pub profile: BusProfile,
    /// Decoding strategy
    pub strategy: DecodeStrategy,
    /// Quiet period that ends a frame, in microseconds
    pub frame_timeout_us: u32,
    /// Minimum edges for a capture to count as a frame
    pub min_frame_edges: usize,
    /// Behavior when the capture buffer fills mid-frame
    pub overflow: OverflowPolicy,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            profile: BusProfile::uvr64(),
            strategy: DecodeStrategy::AdaptiveIntervals,
            frame_timeout_us: FRAME_TIMEOUT_US,
            min_frame_edges: MIN_FRAME_EDGES,
            overflow: OverflowPolicy::ForceBoundary,
        }
    }
}

/// Counters over the receiver's lifetime, one per failure mode plus the
/// success path. All failures are recoverable; these exist so a host
/// component can report bus health.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverStats {
    /// Frames decoded, validated, and published
    pub frames_published: u32,
    /// Captures that hit buffer capacity before the quiet period
    pub overflows: u32,
    /// Captures discarded for having too few edges
    pub truncated_captures: u32,
    /// Frames dropped by the Manchester decoder
    pub decode_failures: u32,
    /// Frames dropped by structural validation
    pub invalid_frames: u32,
    /// Manchester violations recovered via fallback
    pub manchester_violations: u32,
    /// Temperature channels rejected by the range/sentinel gate
    pub rejected_channels: u32,
    /// Most recent decoder failure
    pub last_decode_error: Option<DecodeError>,
    /// Most recent validation failure
    pub last_frame_error: Option<FrameError>,
    /// Interval statistics of the most recent frame-sized capture
    pub last_interval_stats: Option<IntervalStats>,
}

/// DL-Bus receiver bound to one input pin
pub struct DlBusReceiver<'a, P: EdgeInput> {
    pin: P,
    config: ReceiverConfig,
    capture: CaptureState,
    boundary: BoundaryDetector,
    noise: NoiseFloor,
    slots: SensorSlots<'a>,
    stats: ReceiverStats,
}

impl<'a, P: EdgeInput> DlBusReceiver<'a, P> {
    pub fn new(pin: P, config: ReceiverConfig) -> Self {
        Self {
            pin,
            capture: CaptureState::new(config.overflow),
            boundary: BoundaryDetector::new(config.frame_timeout_us, config.min_frame_edges),
            noise: NoiseFloor::new(),
            slots: SensorSlots::new(),
            stats: ReceiverStats::default(),
            config,
        }
    }

    /// Configure the pin and start capturing.
    pub fn setup(&mut self, now_us: u32) {
        self.pin.setup();
        self.capture.clear(now_us);
        self.pin.enable_edge_events();
        diag_debug!("dl-bus receiver capturing");
    }

    /// Assign a temperature observer for one channel (0..6).
    pub fn set_temperature_slot(&mut self, channel: usize, sink: &'a mut dyn TemperatureSink) {
        self.slots.set_temperature_slot(channel, sink);
    }

    /// Assign a relay observer for one channel (0..4).
    pub fn set_relay_slot(&mut self, channel: usize, sink: &'a mut dyn RelaySink) {
        self.slots.set_relay_slot(channel, sink);
    }

    /// Record one edge. Interrupt-context entry point.
    ///
    /// The platform calls this from its edge ISR with the current
    /// monotonic time; the level is read back from the pin. Must not be
    /// called while edge events are disabled (the [`EdgeInput`] contract
    /// guarantees the platform doesn't).
    pub fn handle_edge(&mut self, now_us: u32) {
        let level = self.pin.read_level().as_bit();
        self.capture.record_edge(now_us, level);
    }

    /// Advance the pipeline. Loop-context entry point.
    ///
    /// Call at least every few milliseconds; decoding only ever happens
    /// inside this call, bracketed by disabling edge events.
    pub fn service(&mut self, now_us: u32) {
        match self.boundary.poll(&self.capture, now_us) {
            BoundaryEvent::Pending => {}
            BoundaryEvent::TooShort => {
                // Clearing needs the same exclusive-access bracket as
                // the decode phase
                self.pin.disable_edge_events();
                self.stats.truncated_captures += 1;
                diag_debug!(
                    "capture of {} edges too short, discarded",
                    self.capture.len()
                );
                self.capture.clear(now_us);
                self.pin.enable_edge_events();
            }
            BoundaryEvent::FrameReady => self.drain(now_us),
        }
    }

    /// Receiver health counters.
    pub fn stats(&self) -> &ReceiverStats {
        &self.stats
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// The bound pin; platform integration hook.
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Decode phase: exclusive buffer access between disabling and
    /// re-enabling edge events.
    fn drain(&mut self, now_us: u32) {
        self.pin.disable_edge_events();

        if self.capture.overflowed() {
            self.stats.overflows += 1;
            diag_warn!("capture overflowed, boundary forced at capacity");
        }

        let samples = self.capture.samples();
        let timing = IntervalStats::from_samples(samples.get(1..).unwrap_or(&[]));
        diag_debug!("capture timing: {}", timing);
        diag_debug!("capture dump: {=[?]}", samples);
        self.stats.last_interval_stats = timing;

        self.process_frame();

        self.capture.clear(now_us);
        self.boundary.resume();
        self.pin.enable_edge_events();
    }

    fn process_frame(&mut self) {
        let samples = self.capture.samples();
        diag_debug!("processing frame of {} edges", samples.len());

        // The first sample's interval is measured against nothing and
        // is excluded from interval pairing.
        let decoded: Result<(Vec<u8, MAX_FRAME_BYTES>, Option<u32>), DecodeError> =
            match self.config.strategy {
                DecodeStrategy::AdaptiveIntervals => {
                    let intervals = samples.get(1..).unwrap_or(&[]);
                    decode_intervals(intervals, self.noise.seed()).map(|outcome| {
                        self.stats.manchester_violations += outcome.violations as u32;
                        (outcome.bytes, Some(outcome.avg_short_us))
                    })
                }
                DecodeStrategy::ClockSync => clocked::decode_levels(samples, &self.config.profile)
                    .map(|bytes| (bytes, None)),
            };

        let (bytes, frame_short_us) = match decoded {
            Ok(decoded) => decoded,
            Err(err) => {
                self.stats.decode_failures += 1;
                self.stats.last_decode_error = Some(err);
                diag_warn!("telegram decode failed: {}", err);
                return;
            }
        };

        let frame = frame_slice(&bytes, &self.config.profile);
        if let Err(err) = validate(frame, &self.config.profile) {
            self.stats.invalid_frames += 1;
            self.stats.last_frame_error = Some(err);
            diag_warn!("invalid frame: {}, bytes: {=[u8]:02x}", err, frame);
            return;
        }

        // Only a fully valid frame may touch the noise floor or the
        // sensors.
        if let Some(short_us) = frame_short_us {
            self.noise.observe(short_us);
        }

        let telegram = Telegram::parse(frame, &self.config.profile);
        for channel in 0..TEMP_CHANNELS {
            match telegram.temperature_celsius(channel) {
                Some(celsius) => self.slots.publish_temperature(channel, celsius),
                None => self.stats.rejected_channels += 1,
            }
        }
        for channel in 0..RELAY_CHANNELS {
            self.slots.publish_relay(channel, telegram.relays[channel]);
        }
        self.stats.frames_published += 1;
    }
}
