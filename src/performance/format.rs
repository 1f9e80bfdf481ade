/// True for a finite, strictly positive input
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Largest second count the formatters can represent
const MAX_CLOCK_SECONDS: f64 = u64::MAX as f64;

/// `Some(value)` unless the arithmetic overflowed to infinity
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `Some(minutes)` when it is a duration the formatters can show
pub(crate) fn clock_minutes(minutes: f64) -> Option<f64> {
    (minutes.is_finite() && minutes >= 0.0 && minutes * 60.0 < MAX_CLOCK_SECONDS).then_some(minutes)
}

/// Splits fractional minutes into whole minutes and rounded seconds.
///
/// A fraction that rounds up to 60 seconds carries into the next minute.
pub fn split_minutes(value: f64) -> (u64, u64) {
    let minutes = value.floor();
    let seconds = ((value - minutes) * 60.0).round();
    let (minutes, seconds) = (minutes as u64, seconds as u64);
    if seconds >= 60 {
        (minutes + 1, 0)
    } else {
        (minutes, seconds)
    }
}

/// Formats fractional minutes as `M'SS"`
pub fn format_min_sec(value: f64) -> String {
    let (minutes, seconds) = split_minutes(value);
    format!("{}'{:02}\"", minutes, seconds)
}

/// Formats a duration in fractional minutes as `H:MM:SS`, or `MM:SS` under
/// one hour. Rounds to whole seconds before splitting.
pub fn format_clock(minutes: f64) -> String {
    let total = (minutes * 60.0).round() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours == 0 {
        format!("{:02}:{:02}", minutes, seconds)
    } else {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    }
}
