//! Colors, attributes, and faces.
//!
//! A face is the visual style of a run of text: foreground, background and
//! a set of attributes. Faces compose with [`merge_faces`]: the overlay's
//! non-default fields win, attributes union.

use bitflags::bitflags;

/// A terminal color: the terminal's default, one of the 16 palette entries,
/// or a 24-bit value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// SGR parameter for this color as a foreground. `Rgb` has no single
    /// code; callers emit the `38;2;r;g;b` form instead.
    pub fn fg_code(&self) -> Option<u16> {
        Some(match self {
            Color::Default => 39,
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 37,
            Color::BrightBlack => 90,
            Color::BrightRed => 91,
            Color::BrightGreen => 92,
            Color::BrightYellow => 93,
            Color::BrightBlue => 94,
            Color::BrightMagenta => 95,
            Color::BrightCyan => 96,
            Color::BrightWhite => 97,
            Color::Rgb { .. } => return None,
        })
    }

    /// SGR parameter for this color as a background (`48;2;r;g;b` for `Rgb`).
    pub fn bg_code(&self) -> Option<u16> {
        self.fg_code().map(|code| code + 10)
    }
}

bitflags! {
    /// Text attributes, in SGR order of emission.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Attr: u8 {
        const UNDERLINE = 1 << 0;
        const REVERSE   = 1 << 1;
        const BLINK     = 1 << 2;
        const BOLD      = 1 << 3;
        const DIM       = 1 << 4;
        const ITALIC    = 1 << 5;
    }
}

impl Attr {
    /// SGR codes for the set attributes, in declaration order.
    pub fn sgr_codes(&self) -> impl Iterator<Item = u16> + '_ {
        static TABLE: [(Attr, u16); 6] = [
            (Attr::UNDERLINE, 4),
            (Attr::REVERSE, 7),
            (Attr::BLINK, 5),
            (Attr::BOLD, 1),
            (Attr::DIM, 2),
            (Attr::ITALIC, 3),
        ];
        TABLE
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, code)| *code)
    }
}

/// The visual style of a text atom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Face {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl Face {
    pub const fn new(fg: Color, bg: Color, attrs: Attr) -> Self {
        Self { fg, bg, attrs }
    }
}

/// Compose two faces: `over`'s explicit colors take precedence, default
/// colors fall through to `base`, attributes union.
pub fn merge_faces(base: Face, over: Face) -> Face {
    Face {
        fg: if over.fg == Color::Default { base.fg } else { over.fg },
        bg: if over.bg == Color::Default { base.bg } else { over.bg },
        attrs: base.attrs | over.attrs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_over_wins() {
        let base = Face::new(Color::Red, Color::Black, Attr::BOLD);
        let over = Face::new(Color::Green, Color::Default, Attr::UNDERLINE);
        let merged = merge_faces(base, over);
        assert_eq!(merged.fg, Color::Green);
        assert_eq!(merged.bg, Color::Black);
        assert_eq!(merged.attrs, Attr::BOLD | Attr::UNDERLINE);
    }

    #[test]
    fn merge_identity_on_defaults() {
        let face = Face::new(Color::Cyan, Color::Rgb { r: 1, g: 2, b: 3 }, Attr::ITALIC);
        assert_eq!(merge_faces(face, Face::default()), face);
    }

    #[test]
    fn sgr_codes_order() {
        let attrs = Attr::BOLD | Attr::UNDERLINE | Attr::ITALIC;
        let codes: Vec<u16> = attrs.sgr_codes().collect();
        assert_eq!(codes, vec![4, 1, 3]);
    }

    #[test]
    fn color_codes() {
        assert_eq!(Color::Default.fg_code(), Some(39));
        assert_eq!(Color::Default.bg_code(), Some(49));
        assert_eq!(Color::Black.fg_code(), Some(30));
        assert_eq!(Color::BrightWhite.fg_code(), Some(97));
        assert_eq!(Color::BrightWhite.bg_code(), Some(107));
        assert_eq!(Color::Rgb { r: 0, g: 0, b: 0 }.fg_code(), None);
    }
}
