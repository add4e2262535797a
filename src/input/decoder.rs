//! Escape sequence decoder for terminal input.
//!
//! Pulls single bytes from a [`ByteSource`] and produces at most one [`Key`]
//! per call, covering:
//! - Control characters and UTF-8 codepoints
//! - ESC-prefixed Alt sequences
//! - CSI sequences (cursor/function/modifier keys, the keyboard `u` form)
//! - SS3 sequences
//! - SGR and legacy X10 mouse reports
//!
//! The decoder keeps no cross-call byte buffer: a sequence interrupted by
//! the stream running dry is dropped, and decoding resynchronises at the
//! next ESC or plain byte. A complete sequence, once fully readable, always
//! decodes to the same key.

use crate::input::key::{Key, KeyCode, Modifiers};
use crate::types::{DisplayCoord, LineCount};

// =============================================================================
// Byte sources
// =============================================================================

/// Where the decoder pulls its bytes from.
///
/// `None` means "nothing more right now" - mid-sequence it aborts the
/// sequence, at the top level it ends the current drain.
pub trait ByteSource {
    fn next_byte(&mut self) -> Option<u8>;
}

/// Non-blocking stdin: a zero-timeout poll followed by a one-byte read.
/// The terminal is in raw mode with `VMIN = VTIME = 0`.
pub struct StdinSource;

impl ByteSource for StdinSource {
    fn next_byte(&mut self) -> Option<u8> {
        let mut pfd = libc::pollfd { fd: libc::STDIN_FILENO, events: libc::POLLIN, revents: 0 };
        let ready = unsafe { libc::poll(&mut pfd, 1, 0) };
        if ready <= 0 {
            return None;
        }
        let mut byte: u8 = 0;
        let n = unsafe {
            libc::read(libc::STDIN_FILENO, &mut byte as *mut u8 as *mut libc::c_void, 1)
        };
        (n == 1).then_some(byte)
    }
}

/// A byte slice as a source, for tests and replay.
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }
}

// =============================================================================
// Decoder
// =============================================================================

/// Settings the decoder needs per call; owned by the UI facade.
#[derive(Debug, Clone)]
pub struct DecoderContext {
    /// Rows occupied above the content area (1 when the status bar is on
    /// top); subtracted from mouse rows to yield window coordinates.
    pub line_offset: LineCount,
    pub wheel_up_button: i32,
    pub wheel_down_button: i32,
    pub wheel_scroll_amount: i32,
}

impl Default for DecoderContext {
    fn default() -> Self {
        Self {
            line_offset: 0,
            wheel_up_button: 4,
            wheel_down_button: 5,
            wheel_scroll_amount: 3,
        }
    }
}

/// One decoded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Key(Key),
    /// Ctrl-Z was typed: the caller suspends the process group.
    Suspend,
}

/// The input state machine. The only state carried across calls is which
/// mouse buttons are currently held.
#[derive(Debug, Default)]
pub struct Decoder {
    mouse_state: u8,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode at most one event from `src`. Returns `None` when the stream
    /// has no byte to start from, or when a sequence was malformed (its
    /// bytes are consumed either way).
    pub fn decode(&mut self, src: &mut dyn ByteSource, ctx: &DecoderContext) -> Option<Decoded> {
        let c = src.next_byte()?;
        if c == 0x1b {
            self.parse_escape(src, ctx)
        } else {
            Some(self.parse_key(c, src))
        }
    }

    fn parse_escape(&mut self, src: &mut dyn ByteSource, ctx: &DecoderContext) -> Option<Decoded> {
        match src.next_byte() {
            None => Some(Decoded::Key(Key::plain(KeyCode::Escape))),
            Some(b'[') => Some(Decoded::Key(
                self.parse_csi(src, ctx)
                    .unwrap_or_else(|| Key::plain(KeyCode::Char('[')).with_alt()),
            )),
            Some(b'O') => Some(Decoded::Key(
                parse_ss3(src).unwrap_or_else(|| Key::plain(KeyCode::Char('O')).with_alt()),
            )),
            // ESC ESC: the inner sequence decodes on its own, with Alt added.
            Some(0x1b) => match self.parse_escape(src, ctx) {
                Some(Decoded::Key(key)) => Some(Decoded::Key(key.with_alt())),
                other => other,
            },
            Some(c) => match self.parse_key(c, src) {
                Decoded::Key(key) => Some(Decoded::Key(key.with_alt())),
                other => Some(other),
            },
        }
    }

    fn parse_key(&self, c: u8, src: &mut dyn ByteSource) -> Decoded {
        match c {
            0x0d | 0x0a => Decoded::Key(Key::plain(KeyCode::Return)),
            0x09 => Decoded::Key(Key::plain(KeyCode::Tab)),
            0x08 | 0x7f => Decoded::Key(Key::plain(KeyCode::Backspace)),
            0x1a => Decoded::Suspend,
            c if c < 27 => Decoded::Key(Key::ctrl((b'a' - 1 + c) as char)),
            c => Decoded::Key(Key::plain(KeyCode::Char(read_utf8(c, src)))),
        }
    }

    fn parse_csi(&mut self, src: &mut dyn ByteSource, ctx: &DecoderContext) -> Option<Key> {
        let mut params = [0i32; 16];
        let mut c = next_or_invalid(src);
        let mut private_mode = 0u8;
        if matches!(c, b'?' | b'<' | b'=' | b'>') {
            private_mode = c;
            c = next_or_invalid(src);
        }
        let mut count = 0;
        while count < 16 && (0x30..=0x3f).contains(&c) {
            if c.is_ascii_digit() {
                params[count] = params[count] * 10 + (c - b'0') as i32;
            } else if c == b';' {
                count += 1;
            } else {
                return None;
            }
            c = next_or_invalid(src);
        }
        if !(0x40..=0x7e).contains(&c) {
            return None;
        }

        let mods = parse_mask((params[1] - 1).max(0));
        let masked = |code: KeyCode| Some(Key::new(mods, code));

        match c {
            b'A' => masked(KeyCode::Up),
            b'B' => masked(KeyCode::Down),
            b'C' => masked(KeyCode::Right),
            b'D' => masked(KeyCode::Left),
            b'F' => masked(KeyCode::End),
            b'H' => masked(KeyCode::Home),
            b'P' => masked(KeyCode::F(1)),
            b'Q' => masked(KeyCode::F(2)),
            b'R' => masked(KeyCode::F(3)),
            b'S' => masked(KeyCode::F(4)),
            b'~' => match params[0] {
                2 => masked(KeyCode::Insert),
                3 => masked(KeyCode::Delete),
                5 => masked(KeyCode::PageUp),
                6 => masked(KeyCode::PageDown),
                7 => masked(KeyCode::Home),
                8 => masked(KeyCode::End),
                11..=15 => masked(KeyCode::F((params[0] - 10) as u8)),
                17..=21 => masked(KeyCode::F((params[0] - 11) as u8)),
                23 | 24 => masked(KeyCode::F((params[0] - 12) as u8)),
                _ => None,
            },
            b'u' => masked(codepoint_key(params[0])),
            b'Z' => Some(Key::shift(KeyCode::Tab)),
            b'I' => Some(Key::plain(KeyCode::FocusIn)),
            b'O' => Some(Key::plain(KeyCode::FocusOut)),
            b'M' | b'm' => self.parse_mouse(c, private_mode, &params, src, ctx),
            _ => None,
        }
    }

    fn parse_mouse(
        &mut self,
        final_byte: u8,
        private_mode: u8,
        params: &[i32; 16],
        src: &mut dyn ByteSource,
        ctx: &DecoderContext,
    ) -> Option<Key> {
        let sgr = private_mode == b'<';
        if !sgr && final_byte != b'M' {
            return None;
        }

        let b = if sgr { params[0] } else { next_or_invalid(src) as i32 - 32 };
        let x = (if sgr { params[1] } else { next_or_invalid(src) as i32 - 32 }) - 1;
        let y = (if sgr { params[2] } else { next_or_invalid(src) as i32 - 32 }) - 1;
        let coord = DisplayCoord::new(y - ctx.line_offset, x);
        let mods = parse_mask((b >> 2) & 0x7);
        let release = final_byte == b'm';

        let code = b & 0x43;
        if code == 64 + ctx.wheel_up_button - 4 {
            let amount = -ctx.wheel_scroll_amount;
            return Some(Key::new(mods | Modifiers::SCROLL, KeyCode::Scroll(amount)));
        }
        if code == 64 + ctx.wheel_down_button - 4 {
            let amount = ctx.wheel_scroll_amount;
            return Some(Key::new(mods | Modifiers::SCROLL, KeyCode::Scroll(amount)));
        }

        match code {
            0 => Some(self.mouse_button(mods, coord, true, release)),
            2 => Some(self.mouse_button(mods, coord, false, release)),
            // X10 release: the button comes from the tracked press state.
            3 if sgr => None,
            3 if self.mouse_state & 0x1 != 0 => Some(self.mouse_button(mods, coord, true, true)),
            3 if self.mouse_state & 0x2 != 0 => Some(self.mouse_button(mods, coord, false, true)),
            _ => Some(Key::new(Modifiers::MOUSE_POS, KeyCode::Mouse(coord))),
        }
    }

    fn mouse_button(
        &mut self,
        mods: Modifiers,
        coord: DisplayCoord,
        left: bool,
        release: bool,
    ) -> Key {
        let mask = if left { 0x1 } else { 0x2 };
        let mods = if release {
            self.mouse_state &= !mask;
            mods | if left { Modifiers::MOUSE_RELEASE_LEFT } else { Modifiers::MOUSE_RELEASE_RIGHT }
        } else {
            // A press while already tracked is a drag.
            let gesture = if self.mouse_state & mask != 0 {
                Modifiers::MOUSE_POS
            } else if left {
                Modifiers::MOUSE_PRESS_LEFT
            } else {
                Modifiers::MOUSE_PRESS_RIGHT
            };
            self.mouse_state |= mask;
            mods | gesture
        };
        Key::new(mods, KeyCode::Mouse(coord))
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Mid-sequence reads substitute an impossible byte for "stream dry", which
/// fails the range checks and aborts the sequence.
fn next_or_invalid(src: &mut dyn ByteSource) -> u8 {
    src.next_byte().unwrap_or(0xff)
}

fn parse_ss3(src: &mut dyn ByteSource) -> Option<Key> {
    let code = match next_or_invalid(src) {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'F' => KeyCode::End,
        b'H' => KeyCode::Home,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return None,
    };
    Some(Key::plain(code))
}

fn parse_mask(mask: i32) -> Modifiers {
    let mut mods = Modifiers::empty();
    if mask & 1 != 0 {
        mods |= Modifiers::SHIFT;
    }
    if mask & 2 != 0 {
        mods |= Modifiers::ALT;
    }
    if mask & 4 != 0 {
        mods |= Modifiers::CONTROL;
    }
    mods
}

fn codepoint_key(param: i32) -> KeyCode {
    match param {
        9 => KeyCode::Tab,
        13 => KeyCode::Return,
        27 => KeyCode::Escape,
        127 => KeyCode::Backspace,
        cp => KeyCode::Char(
            u32::try_from(cp)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        ),
    }
}

/// Assemble a codepoint from a UTF-8 lead byte, pulling continuation bytes
/// from the source. Missing or invalid continuations degrade to U+FFFD.
fn read_utf8(lead: u8, src: &mut dyn ByteSource) -> char {
    let (mut cp, extra) = match lead {
        0x00..=0x7f => (lead as u32, 0),
        0xc0..=0xdf => ((lead & 0x1f) as u32, 1),
        0xe0..=0xef => ((lead & 0x0f) as u32, 2),
        0xf0..=0xf7 => ((lead & 0x07) as u32, 3),
        _ => return char::REPLACEMENT_CHARACTER,
    };
    for _ in 0..extra {
        let b = src.next_byte().unwrap_or(0);
        cp = (cp << 6) | (b & 0x3f) as u32;
    }
    char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Decoded> {
        decode_all_ctx(bytes, &DecoderContext::default())
    }

    fn decode_all_ctx(bytes: &[u8], ctx: &DecoderContext) -> Vec<Decoded> {
        let mut decoder = Decoder::new();
        let mut src = SliceSource::new(bytes);
        let mut events = Vec::new();
        while !src.is_exhausted() {
            if let Some(ev) = decoder.decode(&mut src, ctx) {
                events.push(ev);
            }
        }
        events
    }

    fn keys(bytes: &[u8]) -> Vec<Key> {
        decode_all(bytes)
            .into_iter()
            .map(|ev| match ev {
                Decoded::Key(k) => k,
                Decoded::Suspend => panic!("unexpected suspend"),
            })
            .collect()
    }

    fn one_key(bytes: &[u8]) -> Key {
        let all = keys(bytes);
        assert_eq!(all.len(), 1, "expected one key from {:?}, got {:?}", bytes, all);
        all[0]
    }

    // ── plain bytes ──

    #[test]
    fn ascii_chars() {
        assert_eq!(one_key(b"a"), Key::plain(KeyCode::Char('a')));
        assert_eq!(keys(b"abc").len(), 3);
    }

    #[test]
    fn control_chars() {
        assert_eq!(one_key(b"\r"), Key::plain(KeyCode::Return));
        assert_eq!(one_key(b"\n"), Key::plain(KeyCode::Return));
        assert_eq!(one_key(b"\t"), Key::plain(KeyCode::Tab));
        assert_eq!(one_key(b"\x08"), Key::plain(KeyCode::Backspace));
        assert_eq!(one_key(b"\x7f"), Key::plain(KeyCode::Backspace));
        assert_eq!(one_key(b"\x03"), Key::ctrl('c'));
        assert_eq!(one_key(b"\x01"), Key::ctrl('a'));
    }

    #[test]
    fn ctrl_z_requests_suspend() {
        assert_eq!(decode_all(b"\x1a"), vec![Decoded::Suspend]);
    }

    #[test]
    fn utf8_codepoint() {
        // U+2713 CHECK MARK.
        assert_eq!(one_key(&[0xe2, 0x9c, 0x93]), Key::plain(KeyCode::Char('\u{2713}')));
        assert_eq!(one_key("é".as_bytes()), Key::plain(KeyCode::Char('é')));
        assert_eq!(one_key("🚀".as_bytes()), Key::plain(KeyCode::Char('🚀')));
    }

    #[test]
    fn lone_escape() {
        assert_eq!(one_key(b"\x1b"), Key::plain(KeyCode::Escape));
    }

    // ── CSI ──

    #[test]
    fn arrow_keys() {
        assert_eq!(one_key(b"\x1b[A"), Key::plain(KeyCode::Up));
        assert_eq!(one_key(b"\x1b[B"), Key::plain(KeyCode::Down));
        assert_eq!(one_key(b"\x1b[C"), Key::plain(KeyCode::Right));
        assert_eq!(one_key(b"\x1b[D"), Key::plain(KeyCode::Left));
    }

    #[test]
    fn home_end_and_tilde_forms() {
        assert_eq!(one_key(b"\x1b[H"), Key::plain(KeyCode::Home));
        assert_eq!(one_key(b"\x1b[F"), Key::plain(KeyCode::End));
        assert_eq!(one_key(b"\x1b[7~"), Key::plain(KeyCode::Home));
        assert_eq!(one_key(b"\x1b[8~"), Key::plain(KeyCode::End));
        assert_eq!(one_key(b"\x1b[2~"), Key::plain(KeyCode::Insert));
        assert_eq!(one_key(b"\x1b[3~"), Key::plain(KeyCode::Delete));
        assert_eq!(one_key(b"\x1b[5~"), Key::plain(KeyCode::PageUp));
        assert_eq!(one_key(b"\x1b[6~"), Key::plain(KeyCode::PageDown));
    }

    #[test]
    fn function_keys() {
        assert_eq!(one_key(b"\x1b[P"), Key::plain(KeyCode::F(1)));
        assert_eq!(one_key(b"\x1b[S"), Key::plain(KeyCode::F(4)));
        assert_eq!(one_key(b"\x1b[11~"), Key::plain(KeyCode::F(1)));
        assert_eq!(one_key(b"\x1b[15~"), Key::plain(KeyCode::F(5)));
        assert_eq!(one_key(b"\x1b[17~"), Key::plain(KeyCode::F(6)));
        assert_eq!(one_key(b"\x1b[21~"), Key::plain(KeyCode::F(10)));
        assert_eq!(one_key(b"\x1b[23~"), Key::plain(KeyCode::F(11)));
        assert_eq!(one_key(b"\x1b[24~"), Key::plain(KeyCode::F(12)));
    }

    #[test]
    fn unknown_tilde_params_abort_like_malformed_csi() {
        // Params the dispatch table does not know (25 = xterm F13) produce
        // no function key; the sequence falls back to Alt+[.
        let alt_bracket = Decoded::Key(Key::plain(KeyCode::Char('[')).with_alt());
        assert_eq!(decode_all(b"\x1b[25~"), vec![alt_bracket]);
        assert_eq!(decode_all(b"\x1b[99~"), vec![alt_bracket]);
    }

    #[test]
    fn modifier_decoding_sweep() {
        for mask in 0..=7 {
            let seq = format!("\x1b[1;{}A", mask + 1);
            let key = one_key(seq.as_bytes());
            assert_eq!(key.code, KeyCode::Up);
            assert_eq!(key.mods.contains(Modifiers::SHIFT), mask & 1 != 0, "mask {}", mask);
            assert_eq!(key.mods.contains(Modifiers::ALT), mask & 2 != 0, "mask {}", mask);
            assert_eq!(key.mods.contains(Modifiers::CONTROL), mask & 4 != 0, "mask {}", mask);
        }
    }

    #[test]
    fn control_up() {
        assert_eq!(one_key(b"\x1b[1;5A"), Key::new(Modifiers::CONTROL, KeyCode::Up));
    }

    #[test]
    fn shift_tab() {
        assert_eq!(one_key(b"\x1b[Z"), Key::shift(KeyCode::Tab));
    }

    #[test]
    fn focus_events() {
        assert_eq!(one_key(b"\x1b[I"), Key::plain(KeyCode::FocusIn));
        assert_eq!(one_key(b"\x1b[O"), Key::plain(KeyCode::FocusOut));
    }

    #[test]
    fn keyboard_u_form() {
        assert_eq!(one_key(b"\x1b[97u"), Key::plain(KeyCode::Char('a')));
        assert_eq!(one_key(b"\x1b[97;5u"), Key::ctrl('a'));
        assert_eq!(one_key(b"\x1b[13u"), Key::plain(KeyCode::Return));
    }

    // ── SS3 ──

    #[test]
    fn ss3_keys() {
        assert_eq!(one_key(b"\x1bOA"), Key::plain(KeyCode::Up));
        assert_eq!(one_key(b"\x1bOH"), Key::plain(KeyCode::Home));
        assert_eq!(one_key(b"\x1bOP"), Key::plain(KeyCode::F(1)));
    }

    #[test]
    fn ss3_malformed_yields_alt_o() {
        let events = decode_all(b"\x1bOx");
        assert_eq!(events[0], Decoded::Key(Key::plain(KeyCode::Char('O')).with_alt()));
    }

    // ── Alt ──

    #[test]
    fn alt_char() {
        assert_eq!(one_key(b"\x1bx"), Key::plain(KeyCode::Char('x')).with_alt());
    }

    #[test]
    fn alt_applies_to_inner_sequence() {
        // ESC ESC [ A: the outer ESC adds Alt to the decoded Up.
        assert_eq!(one_key(b"\x1b\x1b[A"), Key::plain(KeyCode::Up).with_alt());
    }

    #[test]
    fn malformed_csi_yields_alt_bracket() {
        // 0x2f is outside both the parameter and final-byte ranges.
        let events = decode_all(&[0x1b, b'[', 0x2f]);
        assert_eq!(events, vec![Decoded::Key(Key::plain(KeyCode::Char('[')).with_alt())]);
    }

    // ── resync ──

    #[test]
    fn resync_after_garbage_prefix() {
        let mut bytes = vec![b'q', 0x1b, b'[', 0x2f];
        bytes.extend_from_slice(b"\x1b[1;2A");
        let all = keys(&bytes);
        let ups: Vec<&Key> = all.iter().filter(|k| k.code == KeyCode::Up).collect();
        assert_eq!(ups.len(), 1);
        assert_eq!(ups[0].mods, Modifiers::SHIFT);
        // No earlier event contains an A.
        assert!(!all.iter().any(|k| k.code == KeyCode::Char('A')));
    }

    #[test]
    fn interrupted_sequence_is_dropped() {
        // The stream runs dry mid-CSI: the sequence aborts to Alt+[ and no
        // partial state survives into the next call.
        let events = decode_all(b"\x1b[1;");
        assert_eq!(events, vec![Decoded::Key(Key::plain(KeyCode::Char('[')).with_alt())]);
        // The next complete sequence still decodes.
        assert_eq!(one_key(b"\x1b[A"), Key::plain(KeyCode::Up));
    }

    // ── mouse ──

    fn mouse_coord(key: Key) -> DisplayCoord {
        match key.code {
            KeyCode::Mouse(coord) => coord,
            other => panic!("expected mouse key, got {:?}", other),
        }
    }

    #[test]
    fn sgr_mouse_press_release_roundtrip() {
        let mut decoder = Decoder::new();
        let ctx = DecoderContext::default();

        let press = match decoder.decode(&mut SliceSource::new(b"\x1b[<0;11;5M"), &ctx) {
            Some(Decoded::Key(k)) => k,
            other => panic!("{:?}", other),
        };
        assert!(press.mods.contains(Modifiers::MOUSE_PRESS_LEFT));
        assert_eq!(mouse_coord(press), DisplayCoord::new(4, 10));

        // Same button again while held: a drag.
        let drag = match decoder.decode(&mut SliceSource::new(b"\x1b[<0;12;5M"), &ctx) {
            Some(Decoded::Key(k)) => k,
            other => panic!("{:?}", other),
        };
        assert!(drag.mods.contains(Modifiers::MOUSE_POS));

        let release = match decoder.decode(&mut SliceSource::new(b"\x1b[<0;11;5m"), &ctx) {
            Some(Decoded::Key(k)) => k,
            other => panic!("{:?}", other),
        };
        assert!(release.mods.contains(Modifiers::MOUSE_RELEASE_LEFT));
        assert_eq!(mouse_coord(release), DisplayCoord::new(4, 10));
    }

    #[test]
    fn sgr_mouse_row_offset() {
        let ctx = DecoderContext { line_offset: 1, ..DecoderContext::default() };
        let events = decode_all_ctx(b"\x1b[<0;11;5M", &ctx);
        let Decoded::Key(key) = events[0] else { panic!() };
        assert_eq!(mouse_coord(key), DisplayCoord::new(3, 10));
    }

    #[test]
    fn sgr_right_button() {
        let key = one_key(b"\x1b[<2;1;1M");
        assert!(key.mods.contains(Modifiers::MOUSE_PRESS_RIGHT));
    }

    #[test]
    fn sgr_mouse_modifiers() {
        // Shift is bit 2 of the button code.
        let key = one_key(b"\x1b[<4;1;1M");
        assert!(key.mods.contains(Modifiers::SHIFT));
        assert!(key.mods.contains(Modifiers::MOUSE_PRESS_LEFT));
    }

    #[test]
    fn sgr_wheel() {
        let up = one_key(b"\x1b[<64;1;1M");
        assert!(up.mods.contains(Modifiers::SCROLL));
        assert_eq!(up.code, KeyCode::Scroll(-3));

        let down = one_key(b"\x1b[<65;1;1M");
        assert_eq!(down.code, KeyCode::Scroll(3));
    }

    #[test]
    fn wheel_respects_configured_buttons_and_amount() {
        let ctx = DecoderContext {
            wheel_up_button: 6,
            wheel_down_button: 7,
            wheel_scroll_amount: 5,
            ..DecoderContext::default()
        };
        let events = decode_all_ctx(b"\x1b[<66;1;1M\x1b[<67;1;1M", &ctx);
        assert_eq!(
            events,
            vec![
                Decoded::Key(Key::new(Modifiers::SCROLL, KeyCode::Scroll(-5))),
                Decoded::Key(Key::new(Modifiers::SCROLL, KeyCode::Scroll(5))),
            ]
        );
    }

    #[test]
    fn x10_mouse_press_and_release() {
        let mut decoder = Decoder::new();
        let ctx = DecoderContext::default();

        // X10 press: CSI M, then button/x/y bytes offset by 32.
        let press = match decoder.decode(&mut SliceSource::new(&[0x1b, b'[', b'M', 32, 43, 37]), &ctx) {
            Some(Decoded::Key(k)) => k,
            other => panic!("{:?}", other),
        };
        assert!(press.mods.contains(Modifiers::MOUSE_PRESS_LEFT));
        assert_eq!(mouse_coord(press), DisplayCoord::new(4, 10));

        // X10 release (code 3) resolves the button from tracked state.
        let release = match decoder.decode(&mut SliceSource::new(&[0x1b, b'[', b'M', 35, 43, 37]), &ctx) {
            Some(Decoded::Key(k)) => k,
            other => panic!("{:?}", other),
        };
        assert!(release.mods.contains(Modifiers::MOUSE_RELEASE_LEFT));
    }

    #[test]
    fn x10_release_without_tracked_state_is_motion() {
        let events = decode_all(&[0x1b, b'[', b'M', 35, 43, 37]);
        let Decoded::Key(key) = events[0] else { panic!() };
        assert_eq!(key.mods, Modifiers::MOUSE_POS);
    }

    #[test]
    fn sgr_ambiguous_release_code_aborts_sequence() {
        // Code 3 with SGR encoding carries no button: the sequence is
        // abandoned and falls back to Alt+[ like any malformed CSI.
        let events = decode_all(b"\x1b[<3;1;1M");
        assert_eq!(events, vec![Decoded::Key(Key::plain(KeyCode::Char('[')).with_alt())]);
    }

    // ── spec end-to-end scenarios ──

    #[test]
    fn end_to_end_scenarios() {
        assert_eq!(one_key(&[0x1b, 0x5b, 0x41]), Key::plain(KeyCode::Up));
        assert_eq!(
            one_key(&[0x1b, 0x5b, 0x31, 0x3b, 0x35, 0x41]),
            Key::new(Modifiers::CONTROL, KeyCode::Up)
        );
        assert_eq!(one_key(&[0x09]), Key::plain(KeyCode::Tab));
        assert_eq!(one_key(&[0x1b, 0x5b, 0x5a]), Key::shift(KeyCode::Tab));
        assert_eq!(
            one_key(&[0x1b, 0x1b, 0x5b, 0x41]),
            Key::plain(KeyCode::Up).with_alt()
        );
        assert_eq!(one_key(&[0xe2, 0x9c, 0x93]), Key::plain(KeyCode::Char('\u{2713}')));

        let key = one_key(&[0x1b, 0x5b, 0x3c, 0x30, 0x3b, 0x31, 0x31, 0x3b, 0x35, 0x4d]);
        assert!(key.mods.contains(Modifiers::MOUSE_PRESS_LEFT));
        assert_eq!(mouse_coord(key), DisplayCoord::new(4, 10));
    }
}
