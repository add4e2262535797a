//! Overlay windows.
//!
//! A window is a rectangular grid of styled lines at a screen position: the
//! main view, the menu and the info box are all windows. Drawing happens
//! into the grid; [`Window::refresh`] emits the grid through the shared
//! output buffer.

use crate::display::DisplayAtom;
use crate::face::{merge_faces, Face};
use crate::renderer::ansi;
use crate::renderer::OutputBuffer;
use crate::text::{byte_index_at_column, column_length};
use crate::types::{ColumnCount, DisplayCoord};

/// One row of the grid: a run of atoms whose widths sum to the window
/// width once drawn.
pub type Line = Vec<DisplayAtom>;

/// A rectangular grid of styled text at a screen position.
#[derive(Debug, Default)]
pub struct Window {
    pub pos: DisplayCoord,
    pub size: DisplayCoord,
    pub cursor: DisplayCoord,
    lines: Vec<Line>,
}

impl Window {
    /// Materialise `size.line` empty lines at `pos`.
    pub fn create(&mut self, pos: DisplayCoord, size: DisplayCoord) {
        self.pos = pos;
        self.size = size;
        self.lines.clear();
        self.lines.resize(size.line.max(0) as usize, Line::new());
    }

    /// Release all lines; the window becomes absent.
    pub fn destroy(&mut self) {
        self.pos = DisplayCoord::default();
        self.size = DisplayCoord::default();
        self.cursor = DisplayCoord::default();
        self.lines.clear();
    }

    /// A window is present once created with a non-zero size.
    pub fn is_present(&self) -> bool {
        self.size.line != 0 && self.size.column != 0
    }

    pub fn move_cursor(&mut self, coord: DisplayCoord) {
        self.cursor = coord;
    }

    pub fn move_cursor_to_line(&mut self, line: i32) {
        self.cursor = DisplayCoord::new(line, 0);
    }

    /// Truncate the current line to `cursor.column` columns, splitting the
    /// last atom on a column boundary if it straddles the cut.
    pub fn clear_line(&mut self) {
        let target = self.cursor.column;
        let Some(line) = self.lines.get_mut(self.cursor.line.max(0) as usize) else {
            return;
        };

        let mut column: ColumnCount = 0;
        let mut keep = 0;
        for atom in line.iter() {
            if column >= target {
                break;
            }
            column += atom.length();
            keep += 1;
        }
        line.truncate(keep);

        if column > target {
            if let Some(atom) = line.last_mut() {
                let new_length = atom.length() - (column - target);
                let idx = byte_index_at_column(&atom.text, new_length);
                atom.text.truncate(idx);
            }
        }
    }

    /// Clear from the cursor column, then append `atoms` with their faces
    /// merged over `default_face`. Atoms ending in a newline become the
    /// text plus a one-space padding atom under the same face. The line is
    /// right-padded to the window width with `default_face`.
    pub fn draw(&mut self, atoms: &[DisplayAtom], default_face: Face) {
        self.clear_line();

        let line_index = self.cursor.line.max(0) as usize;
        for atom in atoms {
            if atom.text.is_empty() {
                continue;
            }

            let face = merge_faces(default_face, atom.face);
            let Some(line) = self.lines.get_mut(line_index) else { return };
            if let Some(content) = atom.text.strip_suffix('\n') {
                line.push(DisplayAtom::with_face(content, face));
                line.push(DisplayAtom::with_face(" ", face));
                self.cursor.column += column_length(content) + 1;
            } else {
                line.push(DisplayAtom::with_face(atom.text.clone(), face));
                self.cursor.column += atom.length();
            }
        }

        if self.cursor.column < self.size.column {
            let padding = " ".repeat((self.size.column - self.cursor.column) as usize);
            if let Some(line) = self.lines.get_mut(line_index) {
                line.push(DisplayAtom::with_face(padding, default_face));
            }
        }
    }

    /// Emit every non-empty line: position the cursor, then per atom an SGR
    /// face prelude followed by the atom's text. `force` is accepted but
    /// implies no extra invalidation.
    pub fn refresh(&self, out: &mut OutputBuffer, _force: bool) {
        if self.lines.is_empty() {
            return;
        }

        let mut cursor_pos = self.pos;
        for line in &self.lines {
            if !line.is_empty() {
                let _ = ansi::cursor_to(out, cursor_pos);
                for atom in line {
                    let _ = ansi::face_prelude(out, &atom.face);
                    out.write_str(&atom.text);
                }
            }
            cursor_pos.line += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn line_text(&self, index: usize) -> String {
        self.lines[index].iter().map(|a| a.text.as_str()).collect()
    }

    #[cfg(test)]
    pub(crate) fn line_atoms(&self, index: usize) -> &[DisplayAtom] {
        &self.lines[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{Attr, Color};

    fn window(lines: i32, columns: i32) -> Window {
        let mut win = Window::default();
        win.create(DisplayCoord::new(0, 0), DisplayCoord::new(lines, columns));
        win
    }

    fn line_width(win: &Window, index: usize) -> ColumnCount {
        win.line_atoms(index).iter().map(DisplayAtom::length).sum()
    }

    #[test]
    fn create_materialises_lines() {
        let win = window(3, 10);
        assert!(win.is_present());
        assert_eq!(win.line_text(0), "");
        assert_eq!(win.line_text(2), "");
    }

    #[test]
    fn destroy_makes_absent() {
        let mut win = window(3, 10);
        win.destroy();
        assert!(!win.is_present());
    }

    #[test]
    fn draw_pads_to_window_width() {
        let mut win = window(2, 10);
        win.draw(&[DisplayAtom::new("abc")], Face::default());
        assert_eq!(line_width(&win, 0), 10);
        assert_eq!(win.line_text(0), "abc       ");
    }

    #[test]
    fn draw_line_width_invariant() {
        let mut win = window(1, 8);
        for text in ["x", "hello", "12345678", "你好"] {
            win.move_cursor(DisplayCoord::new(0, 0));
            win.draw(&[DisplayAtom::new(text)], Face::default());
            assert_eq!(line_width(&win, 0), 8, "after drawing {:?}", text);
        }
    }

    #[test]
    fn draw_splits_trailing_newline() {
        let mut win = window(1, 10);
        win.draw(&[DisplayAtom::new("ab\n")], Face::default());
        let atoms = win.line_atoms(0);
        assert_eq!(atoms[0].text, "ab");
        assert_eq!(atoms[1].text, " ");
        assert_eq!(atoms[0].face, atoms[1].face);
        assert_eq!(line_width(&win, 0), 10);
    }

    #[test]
    fn draw_merges_faces() {
        let mut win = window(1, 5);
        let default_face = Face::new(Color::White, Color::Blue, Attr::empty());
        let atom = DisplayAtom::with_face("x", Face::new(Color::Red, Color::Default, Attr::BOLD));
        win.draw(&[atom], default_face);
        let drawn = &win.line_atoms(0)[0];
        assert_eq!(drawn.face.fg, Color::Red);
        assert_eq!(drawn.face.bg, Color::Blue);
        assert_eq!(drawn.face.attrs, Attr::BOLD);
    }

    #[test]
    fn clear_line_splits_on_column_boundary() {
        let mut win = window(1, 10);
        win.draw(&[DisplayAtom::new("abcdef")], Face::default());
        win.move_cursor(DisplayCoord::new(0, 4));
        win.clear_line();
        assert_eq!(win.line_text(0), "abcd");
    }

    #[test]
    fn clear_line_wide_chars() {
        let mut win = window(1, 10);
        win.draw(&[DisplayAtom::new("你好")], Face::default());
        // Column 3 falls inside the second wide char: keep only the first.
        win.move_cursor(DisplayCoord::new(0, 3));
        win.clear_line();
        assert_eq!(win.line_text(0), "你");
    }

    #[test]
    fn clear_line_at_zero_empties() {
        let mut win = window(1, 10);
        win.draw(&[DisplayAtom::new("abc")], Face::default());
        win.move_cursor(DisplayCoord::new(0, 0));
        win.clear_line();
        assert_eq!(win.line_text(0), "");
    }

    #[test]
    fn sequential_draws_append() {
        let mut win = window(1, 10);
        win.draw(&[DisplayAtom::new("ab")], Face::default());
        // Cursor sits after "ab" plus padding was added; redrawing from
        // column 2 truncates the padding and appends.
        win.move_cursor(DisplayCoord::new(0, 2));
        win.draw(&[DisplayAtom::new("cd")], Face::default());
        assert_eq!(win.line_text(0), "abcd      ");
    }

    #[test]
    fn refresh_emits_positioned_styled_lines() {
        let mut win = Window::default();
        win.create(DisplayCoord::new(2, 1), DisplayCoord::new(1, 4));
        win.draw(&[DisplayAtom::new("hi")], Face::default());
        let mut out = OutputBuffer::new();
        win.refresh(&mut out, false);
        let s = out.as_str().into_owned();
        assert!(s.starts_with("\x1b[3;2H"), "positions at window origin: {:?}", s);
        assert!(s.contains("hi"));
        assert!(s.contains("\x1b[;39;49m"));
    }

    #[test]
    fn refresh_skips_absent_window() {
        let win = Window::default();
        let mut out = OutputBuffer::new();
        win.refresh(&mut out, true);
        assert!(out.is_empty());
    }
}
