use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cadence metronome and running calculators", long_about = None)]
pub struct Args {
    /// Settings file (defaults to ./pacekeeper.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Run the cadence metronome
    Metronome {
        /// Steps per minute, 120-220 (default from settings)
        #[arg(short, long)]
        bpm: Option<u32>,

        /// Stop after this many seconds; runs until interrupted otherwise
        #[arg(short, long)]
        seconds: Option<u64>,

        /// MIDI output device name (substring match)
        #[arg(long)]
        device: Option<String>,

        /// Pick the MIDI output device interactively
        #[arg(long)]
        choose_device: bool,

        /// Use the terminal bell instead of MIDI
        #[arg(long)]
        bell: bool,
    },
    /// List MIDI output devices
    Devices,
    /// Average pace from distance and time
    Pace {
        #[arg(long)]
        distance_km: f64,
        #[arg(long)]
        time_min: f64,
    },
    /// Riegel race-time prediction from a recent result
    Predict {
        #[arg(long)]
        distance_km: f64,
        #[arg(long)]
        time_min: f64,
        /// Single target distance; predicts 10K, half and full marathon otherwise
        #[arg(long)]
        target_km: Option<f64>,
    },
    /// Heart-rate training zones for an age
    Zones {
        #[arg(long)]
        age: f64,
    },
    /// Body-mass index
    Bmi {
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        height_cm: f64,
    },
    /// Fluid need for a training day, in litres
    Hydration {
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        duration_min: f64,
    },
    /// Convert a speed in km/h to pace per km
    Speed {
        #[arg(long)]
        kmh: f64,
    },
}

/// Runs a calculator subcommand and returns its printable lines,
/// or `None` when the inputs were invalid.
pub fn run_calculator(command: &Command) -> Option<Vec<String>> {
    use crate::performance::*;

    match *command {
        Command::Pace {
            distance_km,
            time_min,
        } => pace_from_distance_time(distance_km, time_min).map(|p| vec![p]),
        Command::Predict {
            distance_km,
            time_min,
            target_km: Some(target_km),
        } => predict_race_time(distance_km, time_min, target_km).map(|t| vec![t]),
        Command::Predict {
            distance_km,
            time_min,
            target_km: None,
        } => predict_race_times(distance_km, time_min).map(|predictions| {
            predictions
                .iter()
                .map(|p| format!("{}: {}", p.label, p.formatted))
                .collect()
        }),
        Command::Zones { age } => {
            heart_rate_zones(age).map(|zones| zones.iter().map(|z| z.to_string()).collect())
        }
        Command::Bmi {
            weight_kg,
            height_cm,
        } => bmi(weight_kg, height_cm).map(|b| vec![b.to_string()]),
        Command::Hydration {
            weight_kg,
            duration_min,
        } => hydration_need(weight_kg, duration_min).map(|h| vec![format!("{} L", h)]),
        Command::Speed { kmh } => speed_to_pace(kmh).map(|p| vec![format!("{}/km", p)]),
        Command::Metronome { .. } | Command::Devices => None,
    }
}

/// True once a metronome session should end: interrupted, or past its
/// `--seconds` limit when one was given
pub fn session_finished(elapsed: Duration, limit: Option<u64>, interrupted: &AtomicBool) -> bool {
    if interrupted.load(Ordering::SeqCst) {
        return true;
    }
    limit.is_some_and(|limit| elapsed.as_secs() >= limit)
}

pub fn validate_device(device_name: &str, devices: &[String]) -> Result<(), String> {
    if !devices.iter().any(|d| d.contains(device_name)) {
        let mut error_msg = format!(
            "Error: Device '{}' not found in available devices:\n",
            device_name
        );
        for device in devices {
            error_msg.push_str(&format!("  - {}\n", device));
        }
        return Err(error_msg);
    }
    Ok(())
}
