//! Display primitives: styled atoms, lines and buffers.
//!
//! These are the units the editor core hands to the UI. An atom is a
//! contiguous run of text under one face; a display line is an ordered
//! sequence of atoms; a display buffer is the lines of one frame of the
//! main view.

use crate::face::Face;
use crate::text::{byte_index_at_column, column_length};
use crate::types::ColumnCount;

/// A run of text sharing one face.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayAtom {
    pub text: String,
    pub face: Face,
}

impl DisplayAtom {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), face: Face::default() }
    }

    pub fn with_face(text: impl Into<String>, face: Face) -> Self {
        Self { text: text.into(), face }
    }

    /// Display width in columns.
    pub fn length(&self) -> ColumnCount {
        column_length(&self.text)
    }
}

/// An ordered sequence of atoms forming one screen line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLine {
    atoms: Vec<DisplayAtom>,
}

impl DisplayLine {
    pub fn new(atoms: Vec<DisplayAtom>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[DisplayAtom] {
        &self.atoms
    }

    /// Total column width of the line.
    pub fn length(&self) -> ColumnCount {
        self.atoms.iter().map(DisplayAtom::length).sum()
    }

    pub fn push(&mut self, atom: DisplayAtom) {
        self.atoms.push(atom);
    }

    pub fn insert_front(&mut self, atom: DisplayAtom) {
        self.atoms.insert(0, atom);
    }

    /// Keep the columns `[first_col, first_col + num_cols)`, splitting atoms
    /// on column boundaries as needed.
    pub fn trim(&mut self, first_col: ColumnCount, num_cols: ColumnCount) {
        let mut to_drop = first_col.max(0);
        while to_drop > 0 {
            let Some(first) = self.atoms.first_mut() else { break };
            let width = first.length();
            if width <= to_drop {
                self.atoms.remove(0);
                to_drop -= width;
            } else {
                let idx = byte_index_at_column(&first.text, to_drop);
                first.text = first.text[idx..].to_string();
                to_drop = 0;
            }
        }

        let mut budget = num_cols.max(0);
        let mut keep = 0;
        for atom in &mut self.atoms {
            let width = atom.length();
            if width <= budget {
                budget -= width;
                keep += 1;
            } else {
                if budget > 0 {
                    let idx = byte_index_at_column(&atom.text, budget);
                    atom.text.truncate(idx);
                    keep += 1;
                }
                break;
            }
        }
        self.atoms.truncate(keep);
    }
}

impl From<DisplayAtom> for DisplayLine {
    fn from(atom: DisplayAtom) -> Self {
        Self { atoms: vec![atom] }
    }
}

impl From<&str> for DisplayLine {
    fn from(text: &str) -> Self {
        DisplayAtom::new(text).into()
    }
}

/// The lines of one frame of the main view, produced by the editor core.
#[derive(Debug, Clone, Default)]
pub struct DisplayBuffer {
    lines: Vec<DisplayLine>,
}

impl DisplayBuffer {
    pub fn new(lines: Vec<DisplayLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(parts: &[&str]) -> DisplayLine {
        DisplayLine::new(parts.iter().map(|p| DisplayAtom::new(*p)).collect())
    }

    fn text_of(line: &DisplayLine) -> String {
        line.atoms().iter().map(|a| a.text.as_str()).collect()
    }

    #[test]
    fn length_sums_atoms() {
        assert_eq!(line(&["abc", "de"]).length(), 5);
        assert_eq!(line(&[]).length(), 0);
    }

    #[test]
    fn trim_keeps_window() {
        let mut l = line(&["abc", "defg", "hi"]);
        l.trim(2, 4);
        assert_eq!(text_of(&l), "cdef");
    }

    #[test]
    fn trim_splits_atoms() {
        let mut l = line(&["abcdef"]);
        l.trim(1, 3);
        assert_eq!(text_of(&l), "bcd");
    }

    #[test]
    fn trim_wide_chars() {
        // Each CJK char is two columns; trimming 2 columns drops one char.
        let mut l = line(&["你好世"]);
        l.trim(2, 4);
        assert_eq!(text_of(&l), "好世");
    }

    #[test]
    fn trim_to_zero() {
        let mut l = line(&["abc"]);
        l.trim(0, 0);
        assert_eq!(l.length(), 0);
        assert!(l.atoms().is_empty());
    }
}
