use super::format::{clock_minutes, finite, format_min_sec, is_positive};

/// Minutes per kilometre for a run of `distance_km` in `time_min`
pub fn pace_minutes_per_km(distance_km: f64, time_min: f64) -> Option<f64> {
    if !is_positive(distance_km) || !is_positive(time_min) {
        return None;
    }
    clock_minutes(time_min / distance_km)
}

/// Average pace formatted as `M'SS"/km`
pub fn pace_from_distance_time(distance_km: f64, time_min: f64) -> Option<String> {
    pace_minutes_per_km(distance_km, time_min).map(|pace| format!("{}/km", format_min_sec(pace)))
}

/// Converts a speed in km/h to a pace formatted as `M'SS"`
pub fn speed_to_pace(speed_kmh: f64) -> Option<String> {
    if !is_positive(speed_kmh) {
        return None;
    }
    clock_minutes(60.0 / speed_kmh).map(format_min_sec)
}

/// Converts a pace in minutes per kilometre to km/h, rounded to 1 decimal
pub fn pace_to_speed(pace_min_per_km: f64) -> Option<f64> {
    if !is_positive(pace_min_per_km) {
        return None;
    }
    finite((60.0 / pace_min_per_km * 10.0).round() / 10.0)
}
