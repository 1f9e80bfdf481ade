use simplelog::*;
use std::fs::{self, OpenOptions};
use std::io::{Error, ErrorKind};
use std::path::PathBuf;

/// Directory holding `app.log`: `~/.local/share/pacekeeper/logs`
pub fn log_dir() -> Result<PathBuf, Error> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))?;

    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("pacekeeper")
        .join("logs"))
}

/// Installs the global logger: debug and above to the log file, `term_level`
/// and above to stderr. Fails if a logger is already installed.
pub fn init_logger(term_level: LevelFilter) -> Result<(), Error> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("app.log"))?;

    let config = Config::default();

    CombinedLogger::init(vec![
        WriteLogger::new(LevelFilter::Debug, config.clone(), log_file),
        TermLogger::new(
            term_level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    ])
    .map_err(|e| Error::new(ErrorKind::Other, format!("Logger initialization failed: {}", e)))
}
