//! Signal handling.
//!
//! Handlers do exactly two async-signal-safe things: set a process-wide
//! flag and write one byte to the wake pipe so the external event loop's
//! poll returns. All interpretation happens later, on the event-loop
//! thread, inside the UI's key fetch and resize paths.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::{SIGHUP, SIGTSTP, SIGWINCH};
use signal_hook::low_level;
use signal_hook::SigId;

static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);
static SIGHUP_RAISED: AtomicBool = AtomicBool::new(false);
static SIGTSTP_RAISED: AtomicBool = AtomicBool::new(false);

/// Consume the pending-resize flag.
pub fn take_resize_pending() -> bool {
    RESIZE_PENDING.swap(false, Ordering::Relaxed)
}

/// Consume the hangup flag.
pub fn take_sighup() -> bool {
    SIGHUP_RAISED.swap(false, Ordering::Relaxed)
}

/// Consume the stop-request flag (SIGTSTP received from outside).
pub fn take_sigtstp() -> bool {
    SIGTSTP_RAISED.swap(false, Ordering::Relaxed)
}

/// Installed handlers plus the wake pipe. Dropping (or [`uninstall`])
/// removes the handlers and closes the pipe.
///
/// [`uninstall`]: SignalGuard::uninstall
pub struct SignalGuard {
    ids: Vec<SigId>,
    wake_read: libc::c_int,
    wake_write: libc::c_int,
}

impl SignalGuard {
    /// Create the wake pipe and register handlers for SIGWINCH, SIGHUP and
    /// SIGTSTP.
    pub fn install() -> io::Result<Self> {
        let (wake_read, wake_write) = new_wake_pipe()?;

        let mut ids = Vec::with_capacity(6);
        // Safety: storing to a static AtomicBool is async-signal-safe.
        unsafe {
            ids.push(low_level::register(SIGWINCH, || {
                RESIZE_PENDING.store(true, Ordering::Relaxed);
            })?);
            ids.push(low_level::register(SIGHUP, || {
                SIGHUP_RAISED.store(true, Ordering::Relaxed);
            })?);
            ids.push(low_level::register(SIGTSTP, || {
                SIGTSTP_RAISED.store(true, Ordering::Relaxed);
            })?);
        }
        for signal in [SIGWINCH, SIGHUP, SIGTSTP] {
            ids.push(low_level::pipe::register_raw(signal, wake_write)?);
        }

        Ok(Self { ids, wake_read, wake_write })
    }

    /// The read end of the wake pipe, for the event loop to poll alongside
    /// stdin. Becomes readable whenever a handled signal arrives or the UI
    /// requests a wakeup.
    pub fn wake_fd(&self) -> libc::c_int {
        self.wake_read
    }

    /// Request a wakeup of the event loop, as a signal handler would.
    pub fn notify(&self) {
        let byte = 0u8;
        unsafe {
            libc::write(self.wake_write, &byte as *const u8 as *const libc::c_void, 1);
        }
    }

    /// Remove all handlers, reverting the signals to their previous
    /// dispositions. SIGCONT gets an explicit reset to default even though
    /// no handler is ever installed for it: resume after a suspend
    /// continues inline, but teardown still leaves the signal in a known
    /// state.
    pub fn uninstall(&mut self) {
        for id in self.ids.drain(..) {
            low_level::unregister(id);
        }
        unsafe {
            libc::signal(libc::SIGCONT, libc::SIG_DFL);
        }
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.uninstall();
        unsafe {
            libc::close(self.wake_read);
            libc::close(self.wake_write);
        }
    }
}

/// A non-blocking, close-on-exec pipe.
fn new_wake_pipe() -> io::Result<(libc::c_int, libc::c_int)> {
    let mut fds = [0 as libc::c_int; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    for fd in fds {
        unsafe {
            let flags = libc::fcntl(fd, libc::F_GETFL);
            libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK);
            libc::fcntl(fd, libc::F_SETFD, libc::FD_CLOEXEC);
        }
    }
    Ok((fds[0], fds[1]))
}

/// Run the default SIGTSTP behavior: temporarily restore the default
/// disposition, unblock and raise the signal (the process stops here), and
/// re-arm our handler on resume.
pub fn suspend_process() {
    let _ = low_level::emulate_default_handler(SIGTSTP);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_consumed_on_take() {
        RESIZE_PENDING.store(true, Ordering::Relaxed);
        assert!(take_resize_pending());
        assert!(!take_resize_pending());
    }

    #[test]
    fn wake_pipe_is_readable_after_notify() {
        let guard = SignalGuard::install().unwrap();
        guard.notify();
        let mut byte = 0u8;
        let n = unsafe {
            libc::read(guard.wake_fd(), &mut byte as *mut u8 as *mut libc::c_void, 1)
        };
        assert_eq!(n, 1);
    }
}
