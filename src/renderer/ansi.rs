//! ANSI escape sequences for terminal control.
//!
//! The full vocabulary this UI speaks on stdout:
//! - Cursor positioning (CUP) and visibility
//! - SGR face preludes (attributes + colors, 16-color and 24-bit)
//! - DEC private modes: alternate screen, focus reporting, mouse reporting
//! - OSC 2 window title
//!
//! Everything is generic over [`Write`] so sequences can be asserted
//! byte-for-byte in tests against a `Vec<u8>`.

use std::io::Write;

use crate::face::Face;
use crate::types::DisplayCoord;

/// Move the cursor to an absolute position (sequences are 1-based).
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, coord: DisplayCoord) -> std::io::Result<()> {
    write!(w, "\x1b[{};{}H", coord.line + 1, coord.column + 1)
}

/// Hide the cursor.
#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

/// Show the cursor.
#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

/// Enter the alternate screen buffer.
#[inline]
pub fn enter_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049h")
}

/// Exit the alternate screen buffer.
#[inline]
pub fn exit_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049l")
}

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[m")
}

/// Enable mouse reporting: SGR encoding, focus events, press/release and
/// motion tracking, in that order.
#[inline]
pub fn enable_mouse<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1006h\x1b[?1004h\x1b[?1000h\x1b[?1002h")
}

/// Disable mouse reporting, unwinding [`enable_mouse`] in reverse order.
#[inline]
pub fn disable_mouse<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1002l\x1b[?1000l\x1b[?1004l\x1b[?1006l")
}

/// Emit the SGR prelude for a face: an implicit reset followed by the
/// face's attributes and colors, e.g. `ESC [ ;4;39;49 m`.
pub fn face_prelude<W: Write>(w: &mut W, face: &Face) -> std::io::Result<()> {
    write!(w, "\x1b[")?;
    for code in face.attrs.sgr_codes() {
        write!(w, ";{}", code)?;
    }
    color_param(w, true, face.fg)?;
    color_param(w, false, face.bg)?;
    write!(w, "m")
}

fn color_param<W: Write>(w: &mut W, fg: bool, color: crate::face::Color) -> std::io::Result<()> {
    use crate::face::Color;
    match color {
        Color::Rgb { r, g, b } => write!(w, ";{};2;{};{};{}", if fg { 38 } else { 48 }, r, g, b),
        _ => {
            let code = if fg { color.fg_code() } else { color.bg_code() };
            // Non-Rgb colors always carry a palette code.
            write!(w, ";{}", code.unwrap_or(if fg { 39 } else { 49 }))
        }
    }
}

/// Maximum OSC 2 payload length in bytes, including any fixed suffix.
pub const TITLE_MAX_LEN: usize = 511;

/// Set the terminal window title. The payload is reduced to printable
/// ASCII (anything else becomes `?`) and capped at [`TITLE_MAX_LEN`] bytes.
pub fn set_title<W: Write>(w: &mut W, title: &str, suffix: &str) -> std::io::Result<()> {
    let budget = TITLE_MAX_LEN - suffix.len();
    let mut payload = String::with_capacity(budget + suffix.len());
    for c in title.chars().take(budget) {
        payload.push(if (' '..='~').contains(&c) { c } else { '?' });
    }
    payload.push_str(suffix);
    write!(w, "\x1b]2;{}\x07", payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{Attr, Color};

    fn to_string<F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_cursor_to() {
        assert_eq!(to_string(|w| cursor_to(w, DisplayCoord::new(0, 0))), "\x1b[1;1H");
        assert_eq!(to_string(|w| cursor_to(w, DisplayCoord::new(10, 5))), "\x1b[11;6H");
    }

    #[test]
    fn test_cursor_visibility() {
        assert_eq!(to_string(cursor_hide), "\x1b[?25l");
        assert_eq!(to_string(cursor_show), "\x1b[?25h");
    }

    #[test]
    fn test_alt_screen() {
        assert_eq!(to_string(enter_alt_screen), "\x1b[?1049h");
        assert_eq!(to_string(exit_alt_screen), "\x1b[?1049l");
    }

    #[test]
    fn test_mouse_modes() {
        assert_eq!(to_string(enable_mouse), "\x1b[?1006h\x1b[?1004h\x1b[?1000h\x1b[?1002h");
        assert_eq!(to_string(disable_mouse), "\x1b[?1002l\x1b[?1000l\x1b[?1004l\x1b[?1006l");
    }

    #[test]
    fn test_face_prelude_default() {
        let face = Face::default();
        assert_eq!(to_string(|w| face_prelude(w, &face)), "\x1b[;39;49m");
    }

    #[test]
    fn test_face_prelude_palette() {
        let face = Face::new(Color::Red, Color::BrightBlue, Attr::empty());
        assert_eq!(to_string(|w| face_prelude(w, &face)), "\x1b[;31;104m");
    }

    #[test]
    fn test_face_prelude_attrs_and_rgb() {
        let face = Face::new(
            Color::Rgb { r: 255, g: 128, b: 0 },
            Color::Default,
            Attr::UNDERLINE | Attr::BOLD,
        );
        assert_eq!(
            to_string(|w| face_prelude(w, &face)),
            "\x1b[;4;1;38;2;255;128;0;49m"
        );
    }

    #[test]
    fn test_title_sanitized() {
        assert_eq!(
            to_string(|w| set_title(w, "hi\nthere\u{2713}", "")),
            "\x1b]2;hi?there?\x07"
        );
    }

    #[test]
    fn test_title_suffix_and_cap() {
        let long = "x".repeat(600);
        let out = to_string(|w| set_title(w, &long, " - quill"));
        let payload = out
            .strip_prefix("\x1b]2;")
            .and_then(|s| s.strip_suffix('\x07'))
            .unwrap();
        assert!(payload.len() <= TITLE_MAX_LEN);
        assert!(payload.ends_with(" - quill"));
    }
}
