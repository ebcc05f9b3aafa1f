//! Background expiration sweeper
//!
//! Runs on its own thread, waking every `interval` to purge expired entries.
//! A [`Sweeper`] handle stops and joins the thread; dropping it does the same.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use std::sync::Arc;
use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

/// Stop flag shared with the sweeper thread
#[derive(Default)]
struct Signal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// Handle to a running sweeper thread
pub(crate) struct Sweeper {
    signal: Arc<Signal>,
    handle: Mutex<Option<JoinHandle<()>>>,
    interval: Duration,
}

impl Sweeper {
    /// Spawn a thread calling `tick` once per `interval` until stopped
    pub(crate) fn spawn<F>(interval: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let signal = Arc::new(Signal::default());
        let thread_signal = Arc::clone(&signal);

        let handle = thread::Builder::new()
            .name("freqcache-sweeper".to_string())
            .spawn(move || {
                let Signal { stopped, wake } = &*thread_signal;
                let mut deadline = Instant::now().checked_add(interval);
                let mut guard = stopped.lock();

                while !*guard {
                    // An interval past Instant's range never fires; only stop() wakes us.
                    let Some(at) = deadline else {
                        wake.wait(&mut guard);
                        continue;
                    };

                    if wake.wait_until(&mut guard, at).timed_out() {
                        if *guard {
                            break;
                        }
                        // Release the flag while sweeping so stop() never waits on the store lock.
                        parking_lot::MutexGuard::unlocked(&mut guard, &mut tick);
                        deadline = Instant::now().checked_add(interval);
                    }
                }

                debug!("sweeper stopped");
            })?;

        debug!(interval_ms = interval.as_millis() as u64, "sweeper started");

        Ok(Self {
            signal,
            handle: Mutex::new(Some(handle)),
            interval,
        })
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) fn is_running(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Signal the thread and wait for it to exit; later calls are no-ops
    pub(crate) fn stop(&self) {
        let Some(handle) = self.handle.lock().take() else {
            return;
        };

        *self.signal.stopped.lock() = true;
        self.signal.wake.notify_all();

        if handle.join().is_err() {
            warn!("sweeper thread panicked");
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}
