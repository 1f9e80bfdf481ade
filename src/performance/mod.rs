//! Training calculators
//!
//! Pure functions, safe to call from any thread. Every function returns
//! `None` instead of failing when a required input is zero, negative, NaN
//! or infinite, or when the result overflows what can be shown.

mod body;
mod format;
mod heart_rate;
mod pace;
mod race;

pub use body::{bmi, hydration_need, Bmi, BmiCategory, Hydration};
pub use format::{format_clock, format_min_sec, split_minutes};
pub use heart_rate::{heart_rate_zones, max_heart_rate, HeartRateZone};
pub use pace::{pace_from_distance_time, pace_minutes_per_km, pace_to_speed, speed_to_pace};
pub use race::{
    predict_race_time, predict_race_times, riegel_minutes, RacePrediction, RACE_DISTANCES,
    RIEGEL_EXPONENT,
};
