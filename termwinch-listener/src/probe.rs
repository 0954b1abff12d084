//! Window size sources.

use termwinch_signal::{probe_stdout, SignalError, WindowSize};

/// Source of the current terminal dimensions.
///
/// The listener consults its probe once at startup and again after every
/// resize delivery. Implementations other than [`TtyProbe`] exist for
/// embedders whose size authority is not the local terminal, and for tests.
pub trait SizeProbe: Send + Sync + 'static {
    /// Read the current window size.
    fn probe(&self) -> Result<WindowSize, SignalError>;
}

/// Probes the controlling terminal through standard output.
#[derive(Debug, Default)]
pub struct TtyProbe;

impl SizeProbe for TtyProbe {
    fn probe(&self) -> Result<WindowSize, SignalError> {
        probe_stdout()
    }
}
