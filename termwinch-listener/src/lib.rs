//! Background terminal resize watcher.
//!
//! Builds on [`termwinch_signal`]: the signal callback only sets an atomic
//! flag, and a named worker thread turns flagged deliveries into size probes
//! and handler calls. Rapid deliveries between polls collapse into a single
//! dispatch.
//!
//! ```no_run
//! use termwinch_listener::{ListenerConfig, ResizeListener};
//!
//! # fn main() -> Result<(), termwinch_listener::ListenerError> {
//! let mut listener = ResizeListener::start(
//!     ListenerConfig::default(),
//!     Some(Box::new(|old, new| println!("resized: {old} -> {new}"))),
//! )?;
//!
//! // ... run the application ...
//!
//! if listener.was_resized() {
//!     println!("now {}", listener.current_size());
//! }
//! listener.stop()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod listener;
mod probe;

pub use error::ListenerError;
pub use listener::{ListenerConfig, ResizeHandler, ResizeListener};
pub use probe::{SizeProbe, TtyProbe};
pub use termwinch_signal::WindowSize;
