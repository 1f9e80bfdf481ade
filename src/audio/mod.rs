//! Pulse output devices
//!
//! The metronome never emits sound itself. It hands each [`Pulse`] to a
//! [`PulseSink`] together with the instant, on the sink's own clock, at
//! which the pulse must sound. Sinks are acquired through an
//! [`AudioDevice`] and released when dropped.
//!
//! Provided devices:
//! - [`TerminalBell`] rings the terminal bell
//! - [`MidiClick`] sends a short MIDI note (feature `midi`)
//! - [`RecordingDevice`] and [`UnavailableDevice`] for tests

mod bell;
mod clock;
mod dispatch;
#[cfg(feature = "midi")]
mod midi_click;
pub mod mock;

use crate::Result;
use std::time::Duration;

pub use bell::TerminalBell;
pub use clock::{DeviceClock, ManualClock, MonotonicClock};
pub use dispatch::Dispatcher;
#[cfg(feature = "midi")]
pub use midi_click::{list_output_ports, MidiClick, MidiClickSettings};
pub use mock::{RecordingDevice, UnavailableDevice};

/// A single metronome pulse placed on the device clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Zero-based pulse number within the current run
    pub beat: u64,
    /// Device-clock instant at which the pulse sounds
    pub at: Duration,
}

/// An acquired output handle. Dropping it releases the device.
pub trait PulseSink: Send {
    /// Current time on the device clock
    fn now(&self) -> Duration;

    /// Schedules a pulse at `pulse.at`. Returns immediately.
    fn schedule(&mut self, pulse: Pulse) -> Result<()>;
}

/// Something that can be opened into a [`PulseSink`]
pub trait AudioDevice: Send {
    fn open(&mut self) -> Result<Box<dyn PulseSink>>;

    /// Human readable device name for logs
    fn name(&self) -> String;
}

impl<D: AudioDevice + ?Sized> AudioDevice for Box<D> {
    fn open(&mut self) -> Result<Box<dyn PulseSink>> {
        (**self).open()
    }

    fn name(&self) -> String {
        (**self).name()
    }
}
