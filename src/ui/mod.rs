//! Terminal display for the metronome command
//!
//! A spinner shows the running tempo and how many pulses have been placed.
//! Built on indicatif; draws to stderr so results on stdout stay clean.

mod progress;

pub use progress::{cadence_message, create_cadence_spinner, create_session_progress};
