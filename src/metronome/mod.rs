//! Cadence metronome driven by look-ahead scheduling
//!
//! A worker thread wakes every [`LookAhead::period`] and places every pulse
//! that falls inside the next [`LookAhead::window`] onto the output device's
//! own clock. The thread's wake-up jitter only decides *when* pulses are
//! placed; the instant each pulse sounds is owned by the device.

mod session;
mod timing;

pub use session::CadenceSession;
pub use timing::{beat_interval, LookAhead, DEFAULT_PERIOD, DEFAULT_START_MARGIN, DEFAULT_WINDOW};

use crate::audio::AudioDevice;
use crate::{Error, Result};
use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

pub const MIN_BPM: u32 = 120;
pub const MAX_BPM: u32 = 220;

/// Handle to the pending re-invocation of the scheduling loop
struct Worker {
    cancel: Sender<()>,
    handle: JoinHandle<()>,
}

/// Running/stopped metronome that owns its output device.
///
/// All methods take `&self` and may be called from any thread; the scheduler
/// can be shared behind an `Arc`. The device is acquired on the first
/// successful [`start`](Self::start) and released by
/// [`teardown`](Self::teardown) or when the scheduler is dropped.
pub struct MetronomeScheduler {
    device: Mutex<Box<dyn AudioDevice>>,
    session: Arc<Mutex<CadenceSession>>,
    worker: Mutex<Option<Worker>>,
    timing: LookAhead,
}

impl MetronomeScheduler {
    pub fn new<D: AudioDevice + 'static>(device: D) -> Self {
        Self::with_timing(device, LookAhead::default())
    }

    pub fn with_timing<D: AudioDevice + 'static>(device: D, timing: LookAhead) -> Self {
        info!(
            "Creating metronome on {} (window {:?}, period {:?})",
            device.name(),
            timing.window(),
            timing.period()
        );
        Self {
            device: Mutex::new(Box::new(device)),
            session: Arc::new(Mutex::new(CadenceSession::new(MIN_BPM))),
            worker: Mutex::new(None),
            timing,
        }
    }

    /// Starts emitting pulses at `bpm`.
    ///
    /// A no-op while already running. Fails with
    /// [`Error::DeviceUnavailable`] if the device cannot be acquired, in which
    /// case the scheduler stays stopped.
    pub fn start(&self, bpm: u32) -> Result<()> {
        self.start_with(bpm, spawn_scheduling_loop)
    }

    // Nothing in the session changes unless the loop was spawned. The loop
    // blocks on the session lock until `begin` has run.
    fn start_with<S>(&self, bpm: u32, spawn: S) -> Result<()>
    where
        S: FnOnce(Arc<Mutex<CadenceSession>>, LookAhead, Receiver<()>) -> io::Result<JoinHandle<()>>,
    {
        validate_bpm(bpm)?;
        let mut worker = lock(&self.worker);
        let mut session = lock(&self.session);
        if session.running {
            debug!("Start ignored, metronome already running");
            return Ok(());
        }

        if session.sink.is_none() {
            let mut device = lock(&self.device);
            match device.open() {
                Ok(sink) => {
                    info!("Acquired {}", device.name());
                    session.sink = Some(sink);
                }
                Err(e) => {
                    error!("Could not acquire {}: {}", device.name(), e);
                    return Err(match e {
                        Error::DeviceUnavailable(_) => e,
                        other => Error::DeviceUnavailable(other.to_string()),
                    });
                }
            }
        }

        let (cancel, cancelled) = bounded(1);
        let handle = spawn(Arc::clone(&self.session), self.timing, cancelled).map_err(|e| {
            error!("Could not spawn scheduling loop: {}", e);
            Error::from(e)
        })?;

        session.begin(bpm, self.timing.start_margin());
        *worker = Some(Worker { cancel, handle });
        info!("Metronome started at {} BPM", bpm);
        Ok(())
    }

    /// Stops the metronome. The device stays acquired for the next start.
    ///
    /// Once this returns no further pulse is handed to the device.
    pub fn stop(&self) {
        let mut worker = lock(&self.worker);
        let was_running = std::mem::replace(&mut lock(&self.session).running, false);

        if let Some(Worker { cancel, handle }) = worker.take() {
            let _ = cancel.send(());
            if handle.join().is_err() {
                error!("Scheduling loop panicked");
            }
        }

        if was_running {
            info!("Metronome stopped");
        }
    }

    /// Changes the tempo of pulses not yet placed. Ignored while stopped.
    pub fn set_bpm(&self, bpm: u32) -> Result<()> {
        validate_bpm(bpm)?;
        let mut session = lock(&self.session);
        if !session.running {
            debug!("set_bpm({}) ignored while stopped", bpm);
            return Ok(());
        }
        session.bpm = bpm;
        info!("Metronome tempo set to {} BPM", bpm);
        Ok(())
    }

    /// Stops and releases the output device. Safe to call repeatedly.
    pub fn teardown(&self) {
        self.stop();
        if lock(&self.session).sink.take().is_some() {
            info!("Released output device");
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.session).running
    }

    /// Tempo of the current or most recent run
    pub fn bpm(&self) -> u32 {
        lock(&self.session).bpm
    }

    /// Total pulses handed to the device since this scheduler was created
    pub fn pulses_scheduled(&self) -> u64 {
        lock(&self.session).pulses_scheduled
    }

    pub fn timing(&self) -> LookAhead {
        self.timing
    }
}

impl Drop for MetronomeScheduler {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn validate_bpm(bpm: u32) -> Result<()> {
    if (MIN_BPM..=MAX_BPM).contains(&bpm) {
        Ok(())
    } else {
        Err(Error::InvalidBpm(bpm))
    }
}

// A panicking pass must not wedge stop/teardown, so poisoning is ignored.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn spawn_scheduling_loop(
    session: Arc<Mutex<CadenceSession>>,
    timing: LookAhead,
    cancelled: Receiver<()>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("pacekeeper-scheduler".to_string())
        .spawn(move || run_scheduling_loop(session, timing, cancelled))
}

fn run_scheduling_loop(
    session: Arc<Mutex<CadenceSession>>,
    timing: LookAhead,
    cancelled: Receiver<()>,
) {
    debug!("Scheduling loop started");
    loop {
        {
            let mut session = lock(&session);
            if !session.running {
                break;
            }
            let placed = session.fill_window(timing.window());
            if placed > 0 {
                debug!(
                    "Placed {} pulse(s), next at {:?}",
                    placed, session.next_event_time
                );
            }
        }

        match cancelled.recv_timeout(timing.period()) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("Scheduling loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{ManualClock, RecordingDevice, UnavailableDevice};
    use std::time::Duration;

    #[test]
    fn test_initially_stopped() {
        let scheduler = MetronomeScheduler::new(RecordingDevice::new());
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.pulses_scheduled(), 0);
    }

    #[test]
    fn test_start_rejects_out_of_range_bpm() {
        let device = RecordingDevice::new();
        let scheduler = MetronomeScheduler::new(device.clone());

        assert!(matches!(scheduler.start(119), Err(Error::InvalidBpm(119))));
        assert!(matches!(scheduler.start(221), Err(Error::InvalidBpm(221))));
        assert!(!scheduler.is_running());
        assert_eq!(device.opens(), 0);
    }

    #[test]
    fn test_bpm_range_is_inclusive() {
        let scheduler = MetronomeScheduler::new(RecordingDevice::new());
        assert!(scheduler.start(MIN_BPM).is_ok());
        assert!(scheduler.set_bpm(MAX_BPM).is_ok());
        assert_eq!(scheduler.bpm(), MAX_BPM);
        scheduler.stop();
    }

    #[test]
    fn test_start_is_idempotent() {
        let clock = ManualClock::new();
        let device = RecordingDevice::manual(clock.clone());
        let scheduler = MetronomeScheduler::new(device.clone());

        scheduler.start(180).unwrap();
        // Let the first pass place the pulse at 50 ms; the frozen clock keeps
        // every later pass idle
        thread::sleep(Duration::from_millis(30));
        let cursor = lock(&scheduler.session).next_event_time;

        scheduler.start(180).unwrap();
        thread::sleep(Duration::from_millis(30));

        assert_eq!(lock(&scheduler.session).next_event_time, cursor);
        assert_eq!(device.opens(), 1);
        assert_eq!(device.pulse_count(), 1);
        scheduler.stop();
    }

    #[test]
    fn test_unavailable_device_leaves_scheduler_stopped() {
        let device = UnavailableDevice::new();
        let scheduler = MetronomeScheduler::new(device.clone());

        let result = scheduler.start(180);
        assert!(matches!(result, Err(Error::DeviceUnavailable(_))));
        assert!(!scheduler.is_running());
        assert!(lock(&scheduler.worker).is_none());

        // Each attempt is independent
        assert!(scheduler.start(180).is_err());
        assert_eq!(device.attempts(), 2);
    }

    #[test]
    fn test_failed_spawn_leaves_session_untouched() {
        let clock = ManualClock::new();
        let device = RecordingDevice::manual(clock.clone());
        let scheduler = MetronomeScheduler::new(device.clone());

        scheduler.start(180).unwrap();
        thread::sleep(Duration::from_millis(30));
        scheduler.stop();
        let (bpm, cursor, beat) = {
            let session = lock(&scheduler.session);
            (session.bpm, session.next_event_time, session.beat)
        };

        clock.advance(Duration::from_secs(1));
        let result = scheduler.start_with(200, |_, _, _| {
            Err(io::Error::new(io::ErrorKind::Other, "no threads left"))
        });

        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!scheduler.is_running());
        assert!(lock(&scheduler.worker).is_none());
        let session = lock(&scheduler.session);
        assert_eq!(session.bpm, bpm);
        assert_eq!(session.next_event_time, cursor);
        assert_eq!(session.beat, beat);
    }

    #[test]
    fn test_set_bpm_ignored_while_stopped() {
        let scheduler = MetronomeScheduler::new(RecordingDevice::new());
        scheduler.set_bpm(200).unwrap();
        assert_eq!(scheduler.bpm(), MIN_BPM);
    }

    #[test]
    fn test_stop_keeps_device_and_teardown_releases_it() {
        let device = RecordingDevice::new();
        let scheduler = MetronomeScheduler::new(device.clone());

        scheduler.start(180).unwrap();
        scheduler.stop();
        assert_eq!(device.releases(), 0);

        scheduler.start(190).unwrap();
        assert_eq!(device.opens(), 1);

        scheduler.teardown();
        assert!(!scheduler.is_running());
        assert_eq!(device.releases(), 1);
    }

    #[test]
    fn test_teardown_without_start() {
        let device = RecordingDevice::new();
        let scheduler = MetronomeScheduler::new(device.clone());
        scheduler.teardown();
        scheduler.teardown();
        assert_eq!(device.opens(), 0);
        assert_eq!(device.releases(), 0);
    }

    #[test]
    fn test_drop_releases_device() {
        let device = RecordingDevice::new();
        {
            let scheduler = MetronomeScheduler::new(device.clone());
            scheduler.start(180).unwrap();
        }
        assert_eq!(device.releases(), 1);
    }
}
