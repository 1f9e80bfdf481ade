use super::{AudioDevice, Dispatcher, MonotonicClock, Pulse, PulseSink};
use super::clock::DeviceClock;
use crate::Result;
use log::{debug, info};
use std::io::{self, Write};
use std::time::Duration;

const BELL: &[u8] = b"\x07";

/// Output device that rings the terminal bell for every pulse
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    pub fn new() -> Self {
        TerminalBell
    }
}

impl AudioDevice for TerminalBell {
    fn open(&mut self) -> Result<Box<dyn PulseSink>> {
        // Fails early when there is no usable stdout
        io::stdout().flush()?;

        let dispatcher = Dispatcher::spawn("pacekeeper-bell", MonotonicClock::new(), |_: Pulse| {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(BELL);
            let _ = stdout.flush();
        })?;
        info!("Terminal bell output opened");

        Ok(Box::new(BellSink { dispatcher }))
    }

    fn name(&self) -> String {
        "terminal bell".to_string()
    }
}

struct BellSink {
    dispatcher: Dispatcher<Pulse>,
}

impl PulseSink for BellSink {
    fn now(&self) -> Duration {
        self.dispatcher.clock().now()
    }

    fn schedule(&mut self, pulse: Pulse) -> Result<()> {
        self.dispatcher.submit(pulse.at, pulse)
    }
}

impl Drop for BellSink {
    fn drop(&mut self) {
        debug!("Terminal bell output released");
    }
}
