//! SIGWINCH handling for termwinch.
//!
//! This crate owns the process's terminal-resize signal plumbing for Unix
//! systems: a single-slot bridge that forwards SIGWINCH deliveries to a
//! registered callback, and the TIOCGWINSZ probe for reading the current
//! window size.
//!
//! The bridge is process-wide by nature — there is one SIGWINCH disposition
//! per process — so registration is last-write-wins and replaces any handler
//! installed earlier, including by unrelated code.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use termwinch_signal::{probe_stdout, register, unregister};
//!
//! static RESIZED: AtomicBool = AtomicBool::new(false);
//!
//! // Safety: the callback only performs an atomic store.
//! unsafe {
//!     register(|_signum| RESIZED.store(true, Ordering::SeqCst)).unwrap();
//! }
//!
//! // ... the event loop polls RESIZED and re-reads the size ...
//! if RESIZED.swap(false, Ordering::SeqCst) {
//!     let size = probe_stdout().unwrap();
//!     println!("terminal is now {}", size);
//! }
//!
//! unregister().unwrap();
//! ```

mod bridge;
mod error;
mod size;
mod types;

// Re-export public API
pub use bridge::{is_registered, register, unregister, ResizeCallback};
pub use error::SignalError;
pub use size::{probe, probe_stdout};
pub use types::WindowSize;
