//! Trailing-edge debounce.
//!
//! # Responsibility
//! - Coalesce bursts of triggers into one action call after a quiet period.
//! - Keep the timing rules testable without sleeping (`Debouncer`).
//! - Drive real timers on a dedicated worker thread (`DebouncedTask`).
//!
//! # Invariants
//! - At most one invocation is outstanding at any time.
//! - Every trigger resets the deadline to `trigger time + delay`.
//! - The value passed to the action is the one from the latest trigger.

use log::{debug, warn};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Clock-injected debounce state machine.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    fire_at: Instant,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and restarts the quiet period at `now`.
    pub fn trigger_at(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            fire_at: now + self.delay,
            value,
        });
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.fire_at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        if self.next_deadline().is_some_and(|fire_at| fire_at <= now) {
            self.take_pending()
        } else {
            None
        }
    }

    /// Takes the pending value regardless of its deadline.
    pub fn take_pending(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Drops the pending value. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

enum Command<T> {
    Trigger(T),
    Cancel,
    Flush,
}

/// Debounced action running on its own worker thread.
///
/// Construct once and reuse. Dropping the task runs a still-pending action
/// immediately, then joins the worker.
pub struct DebouncedTask<T: Send + 'static> {
    commands: Option<Sender<Command<T>>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> DebouncedTask<T> {
    /// Spawns the worker thread.
    ///
    /// # Errors
    /// - Returns an error when the OS refuses to spawn a thread.
    pub fn spawn<F>(delay: Duration, action: F) -> std::io::Result<Self>
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Command<T>>();
        let worker = std::thread::Builder::new()
            .name("sitebuilder-debounce".to_string())
            .spawn(move || run_worker(delay, rx, action))?;

        Ok(Self {
            commands: Some(tx),
            worker: Some(worker),
        })
    }

    /// Schedules `action(value)` after the quiet period, replacing any pending value.
    pub fn trigger(&self, value: T) {
        self.send(Command::Trigger(value));
    }

    /// Drops a pending invocation, if any.
    pub fn cancel(&self) {
        self.send(Command::Cancel);
    }

    /// Runs a pending invocation now instead of waiting for the deadline.
    pub fn flush(&self) {
        self.send(Command::Flush);
    }

    fn send(&self, command: Command<T>) {
        let delivered = self
            .commands
            .as_ref()
            .is_some_and(|tx| tx.send(command).is_ok());
        if !delivered {
            warn!("event=debounce_send module=scheduler status=error error_code=worker_gone");
        }
    }
}

impl<T: Send + 'static> Drop for DebouncedTask<T> {
    fn drop(&mut self) {
        drop(self.commands.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("event=debounce_join module=scheduler status=error error_code=worker_panicked");
            }
        }
    }
}

fn run_worker<T, F>(delay: Duration, rx: mpsc::Receiver<Command<T>>, mut action: F)
where
    F: FnMut(T),
{
    let mut debouncer = Debouncer::new(delay);
    loop {
        let command = match debouncer.next_deadline() {
            Some(deadline) => {
                match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(command) => Some(command),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match rx.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            },
        };

        match command {
            Some(Command::Trigger(value)) => debouncer.trigger_at(value, Instant::now()),
            Some(Command::Cancel) => {
                debouncer.cancel();
            }
            Some(Command::Flush) => {
                if let Some(value) = debouncer.take_pending() {
                    action(value);
                }
            }
            None => {
                if let Some(value) = debouncer.take_due(Instant::now()) {
                    action(value);
                }
            }
        }
    }

    if let Some(value) = debouncer.take_pending() {
        debug!("event=debounce_flush module=scheduler status=ok reason=shutdown");
        action(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn burst_of_triggers_fires_once_with_last_value() {
        let base = Instant::now();
        let mut debouncer = Debouncer::new(ms(200));

        debouncer.trigger_at("t0", base);
        debouncer.trigger_at("t100", base + ms(100));
        debouncer.trigger_at("t150", base + ms(150));

        assert_eq!(debouncer.next_deadline(), Some(base + ms(350)));
        assert_eq!(debouncer.take_due(base + ms(200)), None);
        assert_eq!(debouncer.take_due(base + ms(349)), None);
        assert_eq!(debouncer.take_due(base + ms(350)), Some("t150"));
        assert_eq!(debouncer.take_due(base + ms(1_000)), None);
    }

    #[test]
    fn spaced_triggers_fire_separately() {
        let base = Instant::now();
        let mut debouncer = Debouncer::new(ms(200));

        debouncer.trigger_at(1, base);
        assert_eq!(debouncer.take_due(base + ms(200)), Some(1));

        debouncer.trigger_at(2, base + ms(500));
        assert_eq!(debouncer.take_due(base + ms(700)), Some(2));
    }

    #[test]
    fn cancel_drops_pending_value() {
        let base = Instant::now();
        let mut debouncer = Debouncer::new(ms(10));
        debouncer.trigger_at(1, base);

        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert_eq!(debouncer.take_due(base + ms(100)), None);
    }

    #[test]
    fn worker_coalesces_rapid_triggers() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let task = DebouncedTask::spawn(ms(50), move |value: u32| {
            sink.lock().unwrap().push(value);
        })
        .unwrap();

        task.trigger(1);
        task.trigger(2);
        task.trigger(3);
        std::thread::sleep(ms(400));

        assert_eq!(*calls.lock().unwrap(), vec![3]);
        drop(task);
        assert_eq!(*calls.lock().unwrap(), vec![3]);
    }

    #[test]
    fn drop_flushes_pending_and_cancel_discards() {
        let calls = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&calls);
        let task = DebouncedTask::spawn(Duration::from_secs(60), move |value: u32| {
            sink.lock().unwrap().push(value);
        })
        .unwrap();
        task.trigger(7);
        drop(task);
        assert_eq!(*calls.lock().unwrap(), vec![7]);

        let sink = Arc::clone(&calls);
        let task = DebouncedTask::spawn(Duration::from_secs(60), move |value: u32| {
            sink.lock().unwrap().push(value);
        })
        .unwrap();
        task.trigger(8);
        task.cancel();
        drop(task);
        assert_eq!(*calls.lock().unwrap(), vec![7]);
    }
}
