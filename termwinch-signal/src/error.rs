//! Signal bridge error types.

use std::io;

/// Errors that can occur while driving the resize signal machinery.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// sigaction() returned -1 while installing the SIGWINCH action.
    #[error("signal registration failed: {0}")]
    Register(#[source] io::Error),

    /// sigaction() returned -1 while restoring the default disposition.
    #[error("signal reset failed: {0}")]
    Unregister(#[source] io::Error),

    /// TIOCGWINSZ ioctl failed.
    #[error("window size probe failed: {0}")]
    SizeProbe(#[source] io::Error),
}
