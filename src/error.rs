//! Construction-time errors.
//!
//! The UI refuses to start when stdout is not a terminal; everything else
//! that can go wrong at runtime is absorbed and reflected only in what is
//! drawn (or not drawn).

use std::io;

/// Errors surfaced by [`TerminalUi::new`](crate::ui::TerminalUi::new).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// stdout is not a tty; the UI cannot own a terminal it does not have.
    #[error("stdout is not a tty")]
    NotATty,

    /// A syscall failed while acquiring the terminal (tcgetattr, pipe, ...).
    #[error(transparent)]
    Io(#[from] io::Error),
}
