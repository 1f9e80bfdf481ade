//! Test doubles for the output seam

use super::{AudioDevice, DeviceClock, ManualClock, MonotonicClock, Pulse, PulseSink};
use crate::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Recorded {
    pulses: Mutex<Vec<Pulse>>,
    opens: AtomicUsize,
    releases: AtomicUsize,
}

/// Device that records every scheduled pulse instead of sounding it.
///
/// Clones share the same recording, so a test can keep one clone and hand
/// the other to a scheduler.
#[derive(Clone)]
pub struct RecordingDevice {
    clock: Arc<dyn DeviceClock>,
    recorded: Arc<Recorded>,
}

impl RecordingDevice {
    /// Recording device running on a real monotonic clock
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }

    /// Recording device driven by a hand-advanced clock
    pub fn manual(clock: ManualClock) -> Self {
        Self::with_clock(clock)
    }

    pub fn with_clock<C: DeviceClock + 'static>(clock: C) -> Self {
        Self {
            clock: Arc::new(clock),
            recorded: Arc::new(Recorded::default()),
        }
    }

    pub fn pulses(&self) -> Vec<Pulse> {
        self.recorded
            .pulses
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn pulse_count(&self) -> usize {
        self.recorded.pulses.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Number of times the device has been acquired
    pub fn opens(&self) -> usize {
        self.recorded.opens.load(Ordering::SeqCst)
    }

    /// Number of times an acquired handle has been released
    pub fn releases(&self) -> usize {
        self.recorded.releases.load(Ordering::SeqCst)
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDevice for RecordingDevice {
    fn open(&mut self) -> Result<Box<dyn PulseSink>> {
        self.recorded.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSink {
            clock: self.clock.clone(),
            recorded: self.recorded.clone(),
        }))
    }

    fn name(&self) -> String {
        "recording device".to_string()
    }
}

struct RecordingSink {
    clock: Arc<dyn DeviceClock>,
    recorded: Arc<Recorded>,
}

impl PulseSink for RecordingSink {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn schedule(&mut self, pulse: Pulse) -> Result<()> {
        self.recorded
            .pulses
            .lock()
            .map_err(|_| Error::Schedule("recording poisoned".to_string()))?
            .push(pulse);
        Ok(())
    }
}

impl Drop for RecordingSink {
    fn drop(&mut self) {
        self.recorded.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Device whose acquisition always fails
#[derive(Debug, Default, Clone)]
pub struct UnavailableDevice {
    attempts: Arc<AtomicUsize>,
}

impl UnavailableDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl AudioDevice for UnavailableDevice {
    fn open(&mut self) -> Result<Box<dyn PulseSink>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::DeviceUnavailable("device is busy".to_string()))
    }

    fn name(&self) -> String {
        "unavailable device".to_string()
    }
}
