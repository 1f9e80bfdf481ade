/// Result type for pacekeeper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the metronome, its output devices and configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output device could not be acquired
    #[error("output device unavailable: {0}")]
    DeviceUnavailable(String),
    /// Tempo outside the supported cadence range
    #[error("bpm {0} is outside the supported range {min}-{max}", min = crate::metronome::MIN_BPM, max = crate::metronome::MAX_BPM)]
    InvalidBpm(u32),
    /// Look-ahead timing that cannot cover every pulse
    #[error("invalid look-ahead timing: {0}")]
    InvalidTiming(String),
    /// A pulse could not be handed to the output device
    #[error("failed to schedule pulse: {0}")]
    Schedule(String),
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "midi")]
impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::DeviceUnavailable(e.to_string())
    }
}

#[cfg(feature = "midi")]
impl<T> From<midir::ConnectError<T>> for Error {
    fn from(e: midir::ConnectError<T>) -> Self {
        Error::DeviceUnavailable(e.kind().to_string())
    }
}

#[cfg(feature = "midi")]
impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::Schedule(e.to_string())
    }
}
