use super::format::{clock_minutes, format_clock, is_positive};

/// Fatigue exponent of the Riegel model
pub const RIEGEL_EXPONENT: f64 = 1.06;

/// Distances predicted by [`predict_race_times`]
pub const RACE_DISTANCES: [(&str, f64); 3] = [
    ("10K", 10.0),
    ("Half Marathon", 21.097),
    ("Marathon", 42.195),
];

/// A predicted finish time for one target distance
#[derive(Debug, Clone, PartialEq)]
pub struct RacePrediction {
    pub label: &'static str,
    pub distance_km: f64,
    pub minutes: f64,
    /// `H:MM:SS`, or `MM:SS` under one hour
    pub formatted: String,
}

/// Riegel prediction in minutes: `T2 = T1 * (D2 / D1)^1.06`
pub fn riegel_minutes(base_distance_km: f64, base_time_min: f64, target_distance_km: f64) -> Option<f64> {
    if !is_positive(base_distance_km) || !is_positive(base_time_min) || !is_positive(target_distance_km) {
        return None;
    }
    clock_minutes(base_time_min * (target_distance_km / base_distance_km).powf(RIEGEL_EXPONENT))
}

/// Predicted finish time at `target_distance_km`, formatted
pub fn predict_race_time(base_distance_km: f64, base_time_min: f64, target_distance_km: f64) -> Option<String> {
    riegel_minutes(base_distance_km, base_time_min, target_distance_km).map(format_clock)
}

/// Predictions for 10K, half marathon and marathon from one recent result
pub fn predict_race_times(base_distance_km: f64, base_time_min: f64) -> Option<Vec<RacePrediction>> {
    RACE_DISTANCES
        .iter()
        .map(|&(label, distance_km)| {
            riegel_minutes(base_distance_km, base_time_min, distance_km).map(|minutes| RacePrediction {
                label,
                distance_km,
                minutes,
                formatted: format_clock(minutes),
            })
        })
        .collect()
}
