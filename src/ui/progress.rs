use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub fn create_cadence_spinner() -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix("Cadence");
    pb
}

/// Bar counting down a timed session, one step per second
pub fn create_session_progress(seconds: u64) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(seconds), ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:40.cyan}] {pos}/{len}s")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("⣀⣤⣦⣶⣷⣿ "),
    );
    pb.set_prefix("Session");
    pb
}

pub fn cadence_message(bpm: u32, pulses: u64) -> String {
    format!("{} spm, {} pulses", bpm, pulses)
}
