//! Terminal acquisition: termios raw mode and window size.
//!
//! The terminal is an exclusive resource. The original termios captured at
//! startup is the recovery point for every exit path (drop, suspend,
//! hangup).

pub mod signals;

use std::io;
use std::mem::MaybeUninit;

use crate::types::{ColumnCount, LineCount};

/// Whether the fd refers to a terminal.
pub fn is_tty(fd: libc::c_int) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Capture the current termios of stdin.
pub fn save_termios() -> io::Result<libc::termios> {
    let mut termios = MaybeUninit::<libc::termios>::uninit();
    if unsafe { libc::tcgetattr(libc::STDIN_FILENO, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(unsafe { termios.assume_init() })
}

/// Apply a termios with TCSAFLUSH (pending input is discarded).
pub fn apply_termios(termios: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Put the terminal in raw mode, starting from the saved original settings.
///
/// Input translation, echo, canonical mode, signal generation and flow
/// control all go away; reads become non-blocking (`VMIN = VTIME = 0`) and
/// queue flushes on signals are suppressed (`NOFLSH`).
pub fn set_raw_mode(original: &libc::termios) -> io::Result<()> {
    let mut attr = *original;
    attr.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON);
    attr.c_oflag &= !libc::OPOST;
    attr.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    attr.c_lflag |= libc::NOFLSH;
    attr.c_cflag &= !(libc::CSIZE | libc::PARENB);
    attr.c_cflag |= libc::CS8;
    attr.c_cc[libc::VMIN] = 0;
    attr.c_cc[libc::VTIME] = 0;
    apply_termios(&attr)
}

/// Query the terminal size through `/dev/tty`.
///
/// Returns `None` when the tty cannot be opened or the ioctl fails; callers
/// skip the resize cycle and keep their previous dimensions.
pub fn tty_size() -> Option<(LineCount, ColumnCount)> {
    let path = std::ffi::CString::new("/dev/tty").ok()?;
    let fd = unsafe { libc::open(path.as_ptr(), libc::O_RDWR) };
    if fd < 0 {
        return None;
    }

    let mut ws = MaybeUninit::<libc::winsize>::uninit();
    let rc = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, ws.as_mut_ptr()) };
    unsafe { libc::close(fd) };
    if rc != 0 {
        return None;
    }

    let ws = unsafe { ws.assume_init() };
    Some((ws.ws_row as LineCount, ws.ws_col as ColumnCount))
}
