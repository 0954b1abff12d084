//! Listener error types.

use std::io;

use termwinch_signal::SignalError;

/// Errors that can occur while starting or stopping the resize listener.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The SIGWINCH bridge rejected the registration or the reset.
    #[error("resize signal bridge failed: {0}")]
    Signal(#[from] SignalError),

    /// The worker thread could not be spawned.
    #[error("listener worker spawn failed: {0}")]
    Spawn(#[source] io::Error),
}
