//! Info boxes.
//!
//! Builds the text of an info box: a speech bubble with unicode borders and
//! an optional title tab, optionally decorated with an assistant drawn to
//! its left, or a plain borderless block for inline documentation.

use crate::face::Face;
use crate::text::{column_length, wrap_lines};
use crate::types::{ColumnCount, DisplayCoord, LineCount};
use crate::window::Window;

/// Placement styles for [`info_show`](crate::ui::TerminalUi::info_show).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoStyle {
    /// Bubble with assistant, anchored near the status row.
    Prompt,
    /// Borderless block attached to an anchor in the content area.
    Inline,
    /// Like `Inline`, preferring the line above the anchor.
    InlineAbove,
    /// Like `Inline`, preferring the line below the anchor.
    InlineBelow,
    /// Borderless block docked beside the active menu.
    MenuDoc,
    /// Bordered box centred in the content area.
    Modal,
}

/// The info window plus the parameters it was shown with, kept so the box
/// can be rebuilt on resize or when the menu's footprint changes.
#[derive(Debug, Default)]
pub struct Info {
    pub win: Window,
    pub title: String,
    pub content: String,
    pub anchor: DisplayCoord,
    pub face: Face,
    pub style: Option<InfoStyle>,
}

/// A rendered box: its outer size and one string per line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InfoBox {
    pub size: DisplayCoord,
    pub contents: Vec<String>,
}

pub const ASSISTANT_CLIPPY: &[&str] = &[
    " ╭──╮   ",
    " │  │   ",
    " @  @  ╭",
    " ││ ││ │",
    " ││ ││ ╯",
    " │╰─╯│  ",
    " ╰───╯  ",
    "        ",
];

pub const ASSISTANT_CAT: &[&str] = &[
    r"  ___            ",
    r" (__ \           ",
    r"   / /          ╭",
    r"  .' '·.        │",
    r" '      ”       │",
    r" ╰       /\_/|  │",
    r"  | .         \ │",
    r"  ╰_J`    | | | ╯",
    r"      ' \__- _/  ",
    r"      \_\   \_\  ",
    r"                 ",
];

pub const ASSISTANT_DILBERT: &[&str] = &[
    r"  დოოოოოდ   ",
    r"  |     |   ",
    r"  |     |  ╭",
    r"  |-ᱛ ᱛ-|  │",
    r" Ͼ   ∪   Ͽ │",
    r"  |     |  ╯",
    r" ˏ`-.ŏ.-´ˎ  ",
    r"     @      ",
    r"      @     ",
    r"            ",
];

/// Build a bordered bubble, optionally with an assistant on the left.
///
/// Returns an empty box when fewer than four columns remain for content;
/// the caller hides the info box in that case.
pub fn make_info_box(
    title: &str,
    message: &str,
    max_width: ColumnCount,
    assistant: &[&str],
) -> InfoBox {
    let assistant_size = if assistant.is_empty() {
        DisplayCoord::default()
    } else {
        DisplayCoord::new(assistant.len() as LineCount, column_length(assistant[0]))
    };

    let max_bubble_width = max_width - assistant_size.column - 6;
    if max_bubble_width < 4 {
        return InfoBox::default();
    }

    let lines = wrap_lines(message, max_bubble_width);

    let mut bubble_width = column_length(title) + 2;
    for line in &lines {
        bubble_width = bubble_width.max(column_length(line));
    }

    let line_count = (assistant_size.line - 1).max(lines.len() as LineCount + 2);
    let mut result = InfoBox {
        size: DisplayCoord::new(line_count, bubble_width + assistant_size.column + 4),
        contents: Vec::with_capacity(line_count.max(0) as usize),
    };

    // The assistant is vertically centred on the bubble; rows above its top
    // margin repeat the idle frame (the last assistant row).
    let assistant_top_margin = (line_count - assistant_size.line + 1) / 2;
    let dashes = |n: ColumnCount| "─".repeat(n.max(0) as usize);

    for i in 0..line_count {
        let mut line = String::new();
        if !assistant.is_empty() {
            let row = if i >= assistant_top_margin {
                (i - assistant_top_margin).min(assistant_size.line - 1)
            } else {
                assistant_size.line - 1
            };
            line.push_str(assistant[row as usize]);
        }
        if i == 0 {
            if title.is_empty() {
                line.push_str(&format!("╭─{}─╮", dashes(bubble_width)));
            } else {
                let dash_count = bubble_width - column_length(title) - 2;
                let left = dashes(dash_count / 2);
                let right = dashes(dash_count - dash_count / 2);
                line.push_str(&format!("╭─{}┤{}├{}─╮", left, title, right));
            }
        } else if (i as usize) < lines.len() + 1 {
            let info_line = &lines[i as usize - 1];
            let padding = " ".repeat((bubble_width - column_length(info_line)).max(0) as usize);
            line.push_str(&format!("│ {}{} │", info_line, padding));
        } else if i as usize == lines.len() + 1 {
            line.push_str(&format!("╰─{}─╯", dashes(bubble_width)));
        }
        result.contents.push(line);
    }
    result
}

/// Build a borderless box: the wrapped lines verbatim.
pub fn make_simple_info_box(contents: &str, max_width: ColumnCount) -> InfoBox {
    let mut info_box = InfoBox::default();
    for line in wrap_lines(contents, max_width) {
        info_box.size.line += 1;
        info_box.size.column = info_box.size.column.max(column_length(&line));
        info_box.contents.push(line);
    }
    info_box
}
