//! Terminal window size probing.

use std::io;
use std::mem;
use std::os::fd::RawFd;

use crate::error::SignalError;
use crate::types::WindowSize;

/// Query the window size of the terminal behind `fd` using TIOCGWINSZ.
pub fn probe(fd: RawFd) -> Result<WindowSize, SignalError> {
    let mut ws: libc::winsize = unsafe { mem::zeroed() };
    let ret = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    if ret != 0 {
        return Err(SignalError::SizeProbe(io::Error::last_os_error()));
    }
    Ok(WindowSize::from_libc(ws))
}

/// Query the window size of the terminal on standard output.
///
/// This is the fd the controlling terminal is usually reachable through; it
/// fails with ENOTTY when stdout is redirected.
pub fn probe_stdout() -> Result<WindowSize, SignalError> {
    probe(libc::STDOUT_FILENO)
}
