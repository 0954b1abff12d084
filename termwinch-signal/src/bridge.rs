//! Process-wide SIGWINCH bridge.
//!
//! Installs the one SIGWINCH action this process gets and forwards every
//! delivery to a single registered callback. The slot is process-wide static
//! state: registering replaces whatever callback (and whatever OS action,
//! including one installed by unrelated code) was there before.

use std::io;
use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crate::error::SignalError;

/// Callback invoked with the delivered signal number.
pub type ResizeCallback = Box<dyn Fn(libc::c_int) + Send + Sync + 'static>;

/// Extended-form signal action, as installed with SA_SIGINFO.
type WinchAction = extern "C" fn(libc::c_int, *mut libc::siginfo_t, *mut libc::c_void);

/// The one callback slot, read by the signal handler on every delivery.
/// Null means nothing is registered and deliveries are dropped.
static CALLBACK: AtomicPtr<ResizeCallback> = AtomicPtr::new(ptr::null_mut());

/// The OS-invoked handler. Runs on whatever thread the kernel interrupted.
extern "C" fn on_sigwinch(
    signum: libc::c_int,
    _info: *mut libc::siginfo_t,
    _context: *mut libc::c_void,
) {
    // Guard against a stale registration delivering some other signal here.
    // The OS never does this for a correctly installed action.
    if signum != libc::SIGWINCH {
        return;
    }

    let callback = CALLBACK.load(Ordering::SeqCst);
    if callback.is_null() {
        return;
    }

    // Safety: non-null slot values come only from Box::into_raw in
    // `register` and are never freed (replaced callbacks leak), so the
    // pointer stays valid for the life of the process.
    let callback = unsafe { &*callback };
    callback(signum);
}

/// Register `callback` for terminal resize notifications.
///
/// The callback is stored in the process-wide slot first, then the SIGWINCH
/// action is installed with `sigaction` (SA_SIGINFO, empty additional mask).
/// Calling this again replaces the previous callback; the last registration
/// wins. A replaced callback is leaked rather than dropped, since the handler
/// on another thread may still be executing it.
///
/// Returns `Err` exactly when the underlying `sigaction` call fails, with the
/// OS error captured; no retry happens and no state is rolled back.
///
/// # Safety
/// The callback runs on the signal-delivery context, interrupting an
/// arbitrary point of execution. It must be async-signal-safe: no allocation,
/// no locking, no non-reentrant calls. The bridge does not verify this.
pub unsafe fn register<F>(callback: F) -> Result<(), SignalError>
where
    F: Fn(libc::c_int) + Send + Sync + 'static,
{
    let callback: ResizeCallback = Box::new(callback);
    let raw = Box::into_raw(Box::new(callback));

    // Fill the slot before enabling delivery so the handler never observes
    // the action without a callback.
    let _replaced = CALLBACK.swap(raw, Ordering::SeqCst);

    install_action(libc::SIGWINCH).map_err(SignalError::Register)
}

/// Stop resize notifications: restore the default SIGWINCH disposition and
/// clear the callback slot.
///
/// The disposition is reset first so no new delivery can race the slot being
/// cleared. The displaced callback leaks, as in [`register`].
pub fn unregister() -> Result<(), SignalError> {
    reset_action(libc::SIGWINCH).map_err(SignalError::Unregister)?;
    let _replaced = CALLBACK.swap(ptr::null_mut(), Ordering::SeqCst);
    Ok(())
}

/// Whether a callback is currently registered.
pub fn is_registered() -> bool {
    !CALLBACK.load(Ordering::SeqCst).is_null()
}

/// Install the extended-form action for `signum`.
///
/// Kept generic over the signal number so a forced failure (invalid number)
/// is testable; every caller in this crate passes SIGWINCH.
fn install_action(signum: libc::c_int) -> io::Result<()> {
    // Safety: configures the process-wide action for `signum`. The struct is
    // zero-initialized and the mask emptied with sigemptyset before install.
    let ret = unsafe {
        let mut sa: libc::sigaction = mem::zeroed();
        let action: WinchAction = on_sigwinch;
        sa.sa_sigaction = action as libc::sighandler_t;
        sa.sa_flags = libc::SA_SIGINFO;
        libc::sigemptyset(&mut sa.sa_mask);
        libc::sigaction(signum, &sa, ptr::null_mut())
    };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Restore the default disposition for `signum`.
fn reset_action(signum: libc::c_int) -> io::Result<()> {
    // Safety: same contract as install_action, with SIG_DFL as the action.
    let ret = unsafe {
        let mut sa: libc::sigaction = mem::zeroed();
        sa.sa_sigaction = libc::SIG_DFL;
        libc::sigemptyset(&mut sa.sa_mask);
        libc::sigaction(signum, &sa, ptr::null_mut())
    };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::{AtomicI32, AtomicUsize};

    static HITS: AtomicUsize = AtomicUsize::new(0);
    static LAST_SIGNUM: AtomicI32 = AtomicI32::new(0);

    fn reset_counters() {
        HITS.store(0, Ordering::SeqCst);
        LAST_SIGNUM.store(0, Ordering::SeqCst);
    }

    fn counting_callback(signum: libc::c_int) {
        HITS.fetch_add(1, Ordering::SeqCst);
        LAST_SIGNUM.store(signum, Ordering::SeqCst);
    }

    #[test]
    #[serial]
    fn handler_ignores_foreign_signal_numbers() {
        reset_counters();
        unsafe { register(counting_callback) }.unwrap();

        on_sigwinch(libc::SIGHUP, ptr::null_mut(), ptr::null_mut());
        on_sigwinch(libc::SIGUSR1, ptr::null_mut(), ptr::null_mut());

        assert_eq!(HITS.load(Ordering::SeqCst), 0);
        unregister().unwrap();
    }

    #[test]
    #[serial]
    fn handler_with_empty_slot_does_nothing() {
        reset_counters();
        unregister().unwrap();

        on_sigwinch(libc::SIGWINCH, ptr::null_mut(), ptr::null_mut());

        assert_eq!(HITS.load(Ordering::SeqCst), 0);
    }

    #[test]
    #[serial]
    fn handler_forwards_signal_number_unchanged() {
        reset_counters();
        unsafe { register(counting_callback) }.unwrap();

        on_sigwinch(libc::SIGWINCH, ptr::null_mut(), ptr::null_mut());

        assert_eq!(HITS.load(Ordering::SeqCst), 1);
        assert_eq!(LAST_SIGNUM.load(Ordering::SeqCst), libc::SIGWINCH);
        unregister().unwrap();
    }

    #[test]
    #[serial]
    fn install_rejects_invalid_signal_number() {
        let err = install_action(-1).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EINVAL));
    }

    #[test]
    #[serial]
    fn register_error_carries_os_source() {
        // Exercise the same mapping register() applies to a failed install.
        let err = SignalError::Register(install_action(-1).unwrap_err());
        assert!(err.to_string().contains("signal registration failed"));
    }
}
