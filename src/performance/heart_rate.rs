use super::format::is_positive;
use std::fmt;

/// Zone boundaries as fractions of maximum heart rate
const ZONE_BOUNDARIES: [f64; 6] = [0.50, 0.60, 0.70, 0.80, 0.90, 1.00];
const ZONE_LABELS: [&str; 5] = ["Recovery", "Aerobic", "Tempo", "Threshold", "VO2 Max"];

/// One training zone, in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartRateZone {
    /// 1-based zone number
    pub zone: u8,
    pub label: &'static str,
    pub lower_bpm: u32,
    pub upper_bpm: u32,
}

impl fmt::Display for HeartRateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z{} {}: {}-{} bpm",
            self.zone, self.label, self.lower_bpm, self.upper_bpm
        )
    }
}

/// Age-predicted maximum heart rate, `220 - age`
pub fn max_heart_rate(age: f64) -> Option<f64> {
    if !is_positive(age) {
        return None;
    }
    let max_hr = 220.0 - age;
    (max_hr > 0.0).then_some(max_hr)
}

/// The five training zones for `age`. Adjacent zones share a boundary.
pub fn heart_rate_zones(age: f64) -> Option<[HeartRateZone; 5]> {
    let max_hr = max_heart_rate(age)?;
    let bound = |i: usize| (ZONE_BOUNDARIES[i] * max_hr).round() as u32;

    Some(std::array::from_fn(|i| HeartRateZone {
        zone: i as u8 + 1,
        label: ZONE_LABELS[i],
        lower_bpm: bound(i),
        upper_bpm: bound(i + 1),
    }))
}
