//! Column measurement and wrapping.
//!
//! Display width is measured in terminal cells, not bytes or codepoints.
//! Uses Unicode East Asian Width for character widths and grapheme cluster
//! analysis for emoji sequences.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::types::ColumnCount;

/// Display width of a single codepoint in terminal cells.
///
/// - `0` for control characters, combining marks, zero-width characters
/// - `1` for normal-width characters
/// - `2` for wide characters (CJK ideographs, fullwidth forms, emoji)
#[inline]
pub fn char_width(c: char) -> usize {
    // Terminal renderers usually treat these emoji ranges as wide even
    // where East Asian Width says otherwise.
    match c as u32 {
        0x2600..=0x27BF => 2,
        0x1F300..=0x1F5FF => 2,
        0x1F600..=0x1F64F => 2,
        0x1F680..=0x1F6FF => 2,
        0x1F900..=0x1F9FF => 2,
        0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Display width of a grapheme cluster in terminal cells.
///
/// A grapheme cluster is a user-perceived character that may span several
/// codepoints: `é` (e + combining acute) is width 1, a family ZWJ sequence
/// or a flag pair is width 2.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return 0,
    };

    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    // Regional indicator pair (flag emoji).
    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }

    // Trailing ZWJ, VS16, skin tone or keycap marks an emoji sequence.
    for c in grapheme.chars().skip(1) {
        match c as u32 {
            0x200D => return 2,
            0xFE0F => return 2,
            0x1F3FB..=0x1F3FF => return 2,
            0x20E3 => return 2,
            _ => {}
        }
    }

    // Base character + combining marks.
    first.width().unwrap_or(0)
}

/// Display width of a string in terminal cells.
pub fn column_length(s: &str) -> ColumnCount {
    if s.is_empty() {
        return 0;
    }

    // Fast path: pure ASCII, count printable bytes directly.
    if s.is_ascii() {
        return s.bytes().filter(|&b| b >= 0x20).count() as ColumnCount;
    }

    s.graphemes(true).map(grapheme_width).sum::<usize>() as ColumnCount
}

/// Byte index of the grapheme boundary closest to `col` columns into `s`
/// without exceeding it. Used to re-slice atoms on a column boundary.
pub fn byte_index_at_column(s: &str, col: ColumnCount) -> usize {
    if col <= 0 {
        return 0;
    }
    let mut width: ColumnCount = 0;
    for (idx, grapheme) in s.grapheme_indices(true) {
        let gw = grapheme_width(grapheme) as ColumnCount;
        if width + gw > col {
            return idx;
        }
        width += gw;
    }
    s.len()
}

/// Wrap text to `max_width` columns at word boundaries.
///
/// Explicit newlines are hard breaks. Words wider than the line are
/// force-broken at grapheme boundaries. Leading whitespace is dropped
/// after a wrap break.
pub fn wrap_lines(text: &str, max_width: ColumnCount) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    if max_width <= 0 {
        return vec![text.to_string()];
    }
    let max_width = max_width as usize;

    let mut lines: Vec<String> = Vec::new();
    for raw_line in text.split('\n') {
        wrap_line_word(raw_line, max_width, &mut lines);
    }
    lines
}

fn wrap_line_word(line: &str, max_width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width: usize = 0;

    for segment in line.split_word_bounds() {
        let seg_width: usize = segment.graphemes(true).map(grapheme_width).sum();

        if current_width + seg_width > max_width {
            if current_width > 0 {
                lines.push(current.trim_end().to_string());
                current = String::new();
                current_width = 0;
            }

            // Segment wider than the line: force-break by grapheme.
            if seg_width > max_width {
                force_break_graphemes(segment, max_width, lines, &mut current, &mut current_width);
                continue;
            }

            // Skip leading whitespace on a new wrapped line.
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
        }

        current.push_str(segment);
        current_width += seg_width;
    }

    lines.push(current);
}

fn force_break_graphemes(
    segment: &str,
    max_width: usize,
    lines: &mut Vec<String>,
    current: &mut String,
    current_width: &mut usize,
) {
    for grapheme in segment.graphemes(true) {
        let gw = grapheme_width(grapheme);

        if *current_width + gw > max_width && !current.is_empty() {
            lines.push(std::mem::take(current));
            *current_width = 0;
        }

        current.push_str(grapheme);
        *current_width += gw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── column_length ──

    #[test]
    fn width_ascii() {
        assert_eq!(column_length("hello"), 5);
        assert_eq!(column_length(""), 0);
        assert_eq!(column_length("a b c"), 5);
    }

    #[test]
    fn width_control_chars() {
        assert_eq!(column_length("\t"), 0);
        assert_eq!(column_length("a\tb"), 2);
    }

    #[test]
    fn width_cjk() {
        assert_eq!(column_length("你好"), 4);
        assert_eq!(column_length("hello你好"), 9);
    }

    #[test]
    fn width_combining() {
        assert_eq!(column_length("cafe\u{0301}"), 4);
    }

    #[test]
    fn width_emoji_sequence() {
        assert_eq!(column_length("👨\u{200D}👩\u{200D}👧\u{200D}👦"), 2);
        assert_eq!(column_length("🇺🇸"), 2);
    }

    // ── byte_index_at_column ──

    #[test]
    fn byte_index_ascii() {
        assert_eq!(byte_index_at_column("abcdef", 0), 0);
        assert_eq!(byte_index_at_column("abcdef", 3), 3);
        assert_eq!(byte_index_at_column("abcdef", 10), 6);
    }

    #[test]
    fn byte_index_wide_chars() {
        // "你" is 3 bytes, 2 columns.
        assert_eq!(byte_index_at_column("你好", 2), 3);
        // Column 1 falls inside the first wide char: stay before it.
        assert_eq!(byte_index_at_column("你好", 1), 0);
        assert_eq!(byte_index_at_column("a你b", 3), 4);
    }

    // ── wrap_lines ──

    #[test]
    fn wrap_empty() {
        assert!(wrap_lines("", 10).is_empty());
    }

    #[test]
    fn wrap_fits() {
        assert_eq!(wrap_lines("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn wrap_word_boundaries() {
        assert_eq!(wrap_lines("hello world", 8), vec!["hello", "world"]);
        assert_eq!(wrap_lines("one two three four", 9), vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_long_word_force_break() {
        assert_eq!(wrap_lines("abcdefghij", 5), vec!["abcde", "fghij"]);
    }

    #[test]
    fn wrap_hard_newlines() {
        assert_eq!(wrap_lines("a\nb\nc", 10), vec!["a", "b", "c"]);
        assert_eq!(wrap_lines("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn wrap_cjk() {
        assert_eq!(wrap_lines("你好世界", 5), vec!["你好", "世界"]);
    }
}
