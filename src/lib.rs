//! quill-term - the terminal UI backend of the quill modal editor.
//!
//! Owns the controlling terminal and drives it with raw byte I/O:
//! ANSI/xterm escape sequences out, a decoded stream of keyboard, mouse,
//! resize and focus events in.
//!
//! # Architecture
//!
//! ```text
//! stdin bytes → input::Decoder → Key → on_key callback → editor core
//!                                                            │
//!                            draw / menu_show / info_show    │
//!                                      ▼                     │
//!                     window::Window grids (main/menu/info) ◄╯
//!                                      ▼ refresh
//!                  renderer::ansi + OutputBuffer → stdout
//! ```
//!
//! Signals (SIGWINCH, SIGHUP, SIGTSTP) set process-wide flags and wake the
//! external event loop through a pipe; the UI interprets them on the
//! event-loop thread during key fetch. The event loop itself is not part of
//! this crate: it polls stdin plus [`TerminalUi::wake_fd`] and calls
//! [`TerminalUi::on_stdin_readable`].

pub mod display;
pub mod error;
pub mod face;
pub mod info;
pub mod input;
pub mod layout;
pub mod menu;
pub mod options;
pub mod renderer;
pub mod term;
pub mod text;
pub mod types;
pub mod ui;
pub mod window;

pub use display::{DisplayAtom, DisplayBuffer, DisplayLine};
pub use error::Error;
pub use face::{merge_faces, Attr, Color, Face};
pub use info::InfoStyle;
pub use input::{Key, KeyCode, Modifiers};
pub use menu::MenuStyle;
pub use types::{ColumnCount, DisplayCoord, LineCount, Rect};
pub use ui::{CursorMode, TerminalUi};
