//! Background resize watcher built on the SIGWINCH bridge.

use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use termwinch_signal::{register, unregister, WindowSize};

use crate::error::ListenerError;
use crate::probe::{SizeProbe, TtyProbe};

/// Handler invoked off the signal path with the previous and new window size.
pub type ResizeHandler = Box<dyn Fn(WindowSize, WindowSize) + Send + 'static>;

/// Listener tuning knobs.
#[derive(Clone, Debug)]
pub struct ListenerConfig {
    /// How often the worker checks for a pending resize delivery.
    pub poll_interval: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
        }
    }
}

/// State shared between the signal callback, the worker, and the handle.
struct Shared {
    /// Set by the signal callback, consumed by the worker. Deliveries that
    /// land while a probe is still in flight collapse into one redispatch.
    pending: AtomicBool,
    /// Set by the worker after a dispatched resize, cleared by `was_resized`.
    resized: AtomicBool,
    /// Worker keeps polling while true.
    running: AtomicBool,
    /// Last observed dimensions. Pixel sizes are not tracked.
    cols: AtomicU16,
    rows: AtomicU16,
}

impl Shared {
    fn cached_size(&self) -> WindowSize {
        WindowSize::new(self.cols.load(Ordering::SeqCst), self.rows.load(Ordering::SeqCst))
    }

    fn store_size(&self, size: WindowSize) {
        self.cols.store(size.cols, Ordering::SeqCst);
        self.rows.store(size.rows, Ordering::SeqCst);
    }
}

/// Watches for terminal resizes and keeps the current dimensions cached.
///
/// The underlying SIGWINCH registration is process-wide: starting a second
/// listener displaces the first one's deliveries, and stopping either
/// releases the registration for both. Run one listener per process.
///
/// Dropping the listener stops it.
pub struct ResizeListener {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl ResizeListener {
    /// Starts listening, probing the terminal on stdout for dimensions.
    pub fn start(
        config: ListenerConfig,
        handler: Option<ResizeHandler>,
    ) -> Result<Self, ListenerError> {
        Self::start_with_probe(config, handler, TtyProbe)
    }

    /// Starts listening with a caller-supplied size source.
    pub fn start_with_probe<P: SizeProbe>(
        config: ListenerConfig,
        handler: Option<ResizeHandler>,
        probe: P,
    ) -> Result<Self, ListenerError> {
        let shared = Arc::new(Shared {
            pending: AtomicBool::new(false),
            resized: AtomicBool::new(false),
            running: AtomicBool::new(true),
            cols: AtomicU16::new(0),
            rows: AtomicU16::new(0),
        });

        // Seed the cache. Without a tty to ask, fall back to the 80x24
        // baseline instead of failing startup.
        let initial = probe.probe().unwrap_or_default();
        shared.store_size(initial);

        let flag = Arc::clone(&shared);
        // Safety: the callback only performs an atomic store, which is
        // async-signal-safe.
        unsafe {
            register(move |_signum| flag.pending.store(true, Ordering::SeqCst))?;
        }

        let worker_shared = Arc::clone(&shared);
        let poll_interval = config.poll_interval;
        let worker = thread::Builder::new()
            .name("resize-listener".to_string())
            .spawn(move || worker_loop(worker_shared, handler, probe, poll_interval));
        let worker = match worker {
            Ok(worker) => worker,
            Err(err) => {
                // Don't leave the signal registered with nobody draining it.
                let _ = unregister();
                return Err(ListenerError::Spawn(err));
            }
        };

        tracing::debug!(size = %initial, "resize listener started");

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Whether a resize was dispatched since the last call. Reading the flag
    /// clears it.
    pub fn was_resized(&self) -> bool {
        self.shared.resized.swap(false, Ordering::SeqCst)
    }

    /// The last observed dimensions: seeded at start, updated after every
    /// dispatched resize.
    pub fn current_size(&self) -> WindowSize {
        self.shared.cached_size()
    }

    /// Whether the worker is still polling for deliveries.
    pub fn is_listening(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Stops the worker, joins it, and restores the default SIGWINCH
    /// disposition. Idempotent; returns `Ok` only once the registration is
    /// released. After a failed release the listener stays stoppable and a
    /// later call retries.
    pub fn stop(&mut self) -> Result<(), ListenerError> {
        if !self.shared.running.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        if let Err(err) = unregister() {
            // Still registered; re-arm so a later stop can retry.
            self.shared.running.store(true, Ordering::SeqCst);
            return Err(ListenerError::Signal(err));
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        tracing::debug!("resize listener stopped");
        Ok(())
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn worker_loop<P: SizeProbe>(
    shared: Arc<Shared>,
    handler: Option<ResizeHandler>,
    probe: P,
    poll_interval: Duration,
) {
    while shared.running.load(Ordering::SeqCst) {
        if shared.pending.swap(false, Ordering::SeqCst) {
            match probe.probe() {
                Ok(size) => {
                    let old = shared.cached_size();
                    let new = WindowSize::new(size.cols, size.rows);
                    shared.store_size(new);
                    shared.resized.store(true, Ordering::SeqCst);
                    tracing::debug!(%old, %new, "terminal resized");
                    if let Some(handler) = &handler {
                        handler(old, new);
                    }
                }
                Err(err) => {
                    // No size to report; drop the event rather than guess.
                    tracing::debug!(error = %err, "size probe failed after resize delivery");
                }
            }
        }
        thread::sleep(poll_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_poll_interval_is_50ms() {
        assert_eq!(ListenerConfig::default().poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn shared_size_round_trips() {
        let shared = Shared {
            pending: AtomicBool::new(false),
            resized: AtomicBool::new(false),
            running: AtomicBool::new(false),
            cols: AtomicU16::new(0),
            rows: AtomicU16::new(0),
        };
        shared.store_size(WindowSize::new(132, 43));
        assert_eq!(shared.cached_size(), WindowSize::new(132, 43));
    }
}
