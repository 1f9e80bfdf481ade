//! Running cadence metronome and training calculators.
//!
//! - [`metronome`]: look-ahead pulse scheduler with a start/stop state machine
//! - [`performance`]: pace, race prediction, heart-rate zones, BMI, hydration
//! - [`audio`]: the output devices pulses are scheduled on

pub mod audio;
pub mod cli;
pub mod config;
mod error;
pub mod logging;
pub mod metronome;
pub mod performance;
pub mod ui;

pub use error::{Error, Result};
pub use metronome::{LookAhead, MetronomeScheduler};
