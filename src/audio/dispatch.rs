use super::clock::{DeviceClock, MonotonicClock};
use crate::{Error, Result};
use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, trace};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::thread::{self, JoinHandle};
use std::time::Duration;

enum Command<E> {
    Fire(Duration, E),
    Shutdown,
}

struct Entry<E> {
    at: Duration,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.at, self.seq).cmp(&(other.at, other.seq))
    }
}

/// Background thread that fires events at deadlines on a [`MonotonicClock`].
///
/// This is the "schedule a tone at time T" primitive the sinks are built on.
/// Submitting never blocks; the thread sleeps until the earliest deadline
/// and wakes early when a new event arrives. Events with equal deadlines fire
/// in submission order. Dropping the dispatcher stops the thread and discards
/// anything still pending.
pub struct Dispatcher<E: Send + 'static> {
    tx: Sender<Command<E>>,
    handle: Option<JoinHandle<()>>,
    clock: MonotonicClock,
}

impl<E: Send + 'static> Dispatcher<E> {
    pub fn spawn<F>(name: &str, clock: MonotonicClock, fire: F) -> Result<Self>
    where
        F: FnMut(E) + Send + 'static,
    {
        let (tx, rx) = unbounded();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || run_dispatch(rx, clock, fire))?;
        debug!("Dispatcher thread '{}' started", name);

        Ok(Self {
            tx,
            handle: Some(handle),
            clock,
        })
    }

    /// Queues `event` to fire when the clock reaches `at`
    pub fn submit(&self, at: Duration, event: E) -> Result<()> {
        self.tx
            .send(Command::Fire(at, event))
            .map_err(|_| Error::Schedule("dispatcher thread has stopped".to_string()))
    }

    pub fn clock(&self) -> MonotonicClock {
        self.clock
    }
}

impl<E: Send + 'static> Drop for Dispatcher<E> {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_dispatch<E, F>(rx: Receiver<Command<E>>, clock: MonotonicClock, mut fire: F)
where
    F: FnMut(E),
{
    let mut queue: BinaryHeap<Reverse<Entry<E>>> = BinaryHeap::new();
    let mut seq = 0u64;

    loop {
        let now = clock.now();
        while queue.peek().is_some_and(|next| next.0.at <= now) {
            if let Some(Reverse(entry)) = queue.pop() {
                trace!("Dispatching event due at {:?} (now {:?})", entry.at, now);
                fire(entry.event);
            }
        }

        let received = match queue.peek() {
            Some(next) => rx.recv_deadline(clock.instant_at(next.0.at)),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Command::Fire(at, event)) => {
                queue.push(Reverse(Entry { at, seq, event }));
                seq += 1;
            }
            Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => continue,
        }
    }

    debug!("Dispatcher thread stopping with {} pending events", queue.len());
}
