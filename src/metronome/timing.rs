use crate::{Error, Result};
use std::time::Duration;

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(100);
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(25);
pub const DEFAULT_START_MARGIN: Duration = Duration::from_millis(50);

const NANOS_PER_MINUTE: u64 = 60_000_000_000;

/// Look-ahead scheduling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAhead {
    /// How far ahead of the device clock pulses are placed
    window: Duration,
    /// How often the scheduling pass runs
    period: Duration,
    /// Delay before the first pulse of a run
    start_margin: Duration,
}

impl LookAhead {
    /// `period` must be non-zero and strictly shorter than `window`,
    /// otherwise a late pass could leave a gap no pulse is placed in.
    pub fn new(window: Duration, period: Duration, start_margin: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::InvalidTiming("period must be non-zero".to_string()));
        }
        if period >= window {
            return Err(Error::InvalidTiming(format!(
                "period {:?} must be shorter than window {:?}",
                period, window
            )));
        }
        Ok(Self {
            window,
            period,
            start_margin,
        })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start_margin(&self) -> Duration {
        self.start_margin
    }
}

impl Default for LookAhead {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            period: DEFAULT_PERIOD,
            start_margin: DEFAULT_START_MARGIN,
        }
    }
}

/// Seconds per beat at `bpm`, as a device-clock duration
pub fn beat_interval(bpm: u32) -> Duration {
    Duration::from_nanos(NANOS_PER_MINUTE / u64::from(bpm.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = LookAhead::default();
        assert_eq!(timing.window(), Duration::from_millis(100));
        assert_eq!(timing.period(), Duration::from_millis(25));
        assert_eq!(timing.start_margin(), Duration::from_millis(50));
    }

    #[test]
    fn test_period_must_be_shorter_than_window() {
        let result = LookAhead::new(
            Duration::from_millis(25),
            Duration::from_millis(25),
            Duration::ZERO,
        );
        assert!(matches!(result, Err(Error::InvalidTiming(_))));
    }

    #[test]
    fn test_zero_period_rejected() {
        let result = LookAhead::new(Duration::from_millis(100), Duration::ZERO, Duration::ZERO);
        assert!(matches!(result, Err(Error::InvalidTiming(_))));
    }

    #[test]
    fn test_beat_interval() {
        assert_eq!(beat_interval(120), Duration::from_millis(500));
        assert_eq!(beat_interval(180).as_nanos(), 333_333_333);
        assert_eq!(beat_interval(200), Duration::from_millis(300));
    }
}
