use super::timing::beat_interval;
use crate::audio::{Pulse, PulseSink};
use log::{trace, warn};
use std::time::Duration;

/// State shared between the public scheduler API and its scheduling loop.
///
/// `next_event_time` is written only by [`CadenceSession::begin`] and
/// [`CadenceSession::fill_window`]. Within a run it only moves forward, and a
/// new run never starts before a pulse already handed to the device.
/// Nothing is scheduled while `running` is false.
pub struct CadenceSession {
    pub(crate) bpm: u32,
    pub(crate) running: bool,
    pub(crate) next_event_time: Duration,
    pub(crate) last_pulse_at: Option<Duration>,
    pub(crate) beat: u64,
    pub(crate) pulses_scheduled: u64,
    pub(crate) sink: Option<Box<dyn PulseSink>>,
}

impl CadenceSession {
    pub(crate) fn new(bpm: u32) -> Self {
        Self {
            bpm,
            running: false,
            next_event_time: Duration::ZERO,
            last_pulse_at: None,
            beat: 0,
            pulses_scheduled: 0,
            sink: None,
        }
    }

    /// Marks the session running with its first pulse `margin` from now.
    ///
    /// The first pulse is never less than one beat after the last pulse of
    /// the previous run, which may still be pending on the device.
    pub(crate) fn begin(&mut self, bpm: u32, margin: Duration) {
        let now = self.sink.as_ref().map(|s| s.now()).unwrap_or_default();
        let mut first = now + margin;
        if let Some(last) = self.last_pulse_at {
            first = first.max(last + beat_interval(bpm));
        }
        self.bpm = bpm;
        self.next_event_time = first;
        self.beat = 0;
        self.running = true;
    }

    /// One scheduling pass: places every pulse due before `now + window`.
    ///
    /// Returns the number of pulses placed.
    pub(crate) fn fill_window(&mut self, window: Duration) -> usize {
        if !self.running {
            return 0;
        }
        let Some(sink) = self.sink.as_mut() else {
            return 0;
        };

        let interval = beat_interval(self.bpm);
        let now = sink.now();
        if self.next_event_time + interval < now {
            warn!(
                "Scheduler fell {:?} behind the device clock, resyncing",
                now - self.next_event_time
            );
            self.next_event_time = now;
        }

        let horizon = now + window;
        let mut placed = 0;
        while self.next_event_time < horizon {
            let pulse = Pulse {
                beat: self.beat,
                at: self.next_event_time,
            };
            trace!("Placing pulse {} at {:?}", pulse.beat, pulse.at);
            if let Err(e) = sink.schedule(pulse) {
                warn!("Output rejected pulse {}: {}", pulse.beat, e);
            }

            self.last_pulse_at = Some(pulse.at);
            // Tempo is read per pulse so a new bpm applies from the next one placed
            self.next_event_time += beat_interval(self.bpm);
            self.beat += 1;
            self.pulses_scheduled += 1;
            placed += 1;
        }
        placed
    }
}
