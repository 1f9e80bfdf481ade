// config.rs

use crate::metronome::LookAhead;
use crate::Result;
use ::config::{Config, Environment, File};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Settings file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "pacekeeper.toml";
/// Environment overrides look like `PACEKEEPER__METRONOME__DEFAULT_BPM=176`
pub const ENV_PREFIX: &str = "PACEKEEPER";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub metronome: MetronomeSettings,
    pub midi: MidiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetronomeSettings {
    pub default_bpm: u32,
    pub window_ms: u64,
    pub period_ms: u64,
    pub start_margin_ms: u64,
}

impl Default for MetronomeSettings {
    fn default() -> Self {
        Self {
            default_bpm: 180,
            window_ms: 100,
            period_ms: 25,
            start_margin_ms: 50,
        }
    }
}

impl MetronomeSettings {
    pub fn look_ahead(&self) -> Result<LookAhead> {
        LookAhead::new(
            Duration::from_millis(self.window_ms),
            Duration::from_millis(self.period_ms),
            Duration::from_millis(self.start_margin_ms),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MidiSettings {
    pub device: Option<String>,
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
    pub gate_ms: u64,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            device: None,
            channel: 9,
            note: 76,
            velocity: 100,
            gate_ms: 30,
        }
    }
}

#[cfg(feature = "midi")]
impl MidiSettings {
    pub fn click_settings(&self) -> crate::audio::MidiClickSettings {
        crate::audio::MidiClickSettings {
            device: self.device.clone(),
            channel: self.channel,
            note: self.note,
            velocity: self.velocity,
            gate: Duration::from_millis(self.gate_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Level for terminal output; the log file always records debug
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LogSettings {
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Warn)
    }
}

impl Settings {
    /// Layers built-in defaults, the settings file and the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                info!("Loading settings from {}", path.display());
                File::from(path).required(true)
            }
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }
}
