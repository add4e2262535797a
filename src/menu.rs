//! Menu engine.
//!
//! A menu is either a horizontal carousel (search-style, `columns == 0`)
//! with `<`/`>`/`…` overflow markers, or a column-major grid with a
//! proportional scrollbar in its right-most column. The mode is fixed when
//! the menu is shown.

use crate::display::{DisplayAtom, DisplayLine};
use crate::face::Face;
use crate::types::{ColumnCount, DisplayCoord, LineCount};
use crate::window::Window;

/// Menu placement styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuStyle {
    /// Anchored completion menu in the content area.
    #[default]
    Inline,
    /// Full-width menu on the row opposite the status bar.
    Prompt,
    /// One-line carousel sharing the status row.
    Search,
}

/// Height cap per style.
pub fn height_limit(style: MenuStyle) -> LineCount {
    match style {
        MenuStyle::Inline => 10,
        MenuStyle::Prompt => 10,
        MenuStyle::Search => 3,
    }
}

/// Integer ceiling division matching the layout arithmetic throughout this
/// module; note `div_round_up(0, n) == 1`.
pub fn div_round_up(a: i32, b: i32) -> i32 {
    (a - 1) / b + 1
}

/// The menu window plus its items and selection state.
#[derive(Debug, Default)]
pub struct Menu {
    pub win: Window,
    pub items: Vec<DisplayLine>,
    pub fg: Face,
    pub bg: Face,
    pub style: MenuStyle,
    pub anchor: DisplayCoord,
    /// `0` means horizontal carousel; otherwise the grid column count.
    pub columns: i32,
    pub first_item: i32,
    pub selected_item: i32,
}

impl Menu {
    pub fn is_present(&self) -> bool {
        self.win.is_present()
    }

    /// Repaint all items into the menu window.
    ///
    /// Tolerates an absent window: showing the menu may have refused to
    /// create one that did not fit.
    pub fn draw_items(&mut self) {
        if !self.is_present() {
            return;
        }

        let item_count = self.items.len() as i32;
        if self.columns == 0 {
            self.draw_horizontal(item_count);
        } else {
            self.draw_grid(item_count);
        }
    }

    fn draw_horizontal(&mut self, item_count: i32) {
        let win_width = self.win.size.column - 4;
        let mut pos: ColumnCount = 0;

        self.win.move_cursor(DisplayCoord::new(0, 0));
        let lead = if self.first_item > 0 { "< " } else { "  " };
        self.win.draw(&[DisplayAtom::new(lead)], self.bg);

        let mut i = self.first_item;
        while i < item_count && pos < win_width {
            let item = &self.items[i as usize];
            let item_width = item.length();
            let face = if i == self.selected_item { self.fg } else { self.bg };
            self.win.draw(item.atoms(), face);
            if pos + item_width < win_width {
                self.win.draw(&[DisplayAtom::new(" ")], self.bg);
            } else {
                self.win.move_cursor(DisplayCoord::new(0, win_width + 2));
                self.win.draw(&[DisplayAtom::new("…")], self.bg);
            }
            pos += item_width + 1;
            i += 1;
        }

        self.win.move_cursor(DisplayCoord::new(0, win_width + 3));
        let more = if i == item_count { " " } else { ">" };
        self.win.draw(&[DisplayAtom::new(more)], self.bg);
    }

    fn draw_grid(&mut self, item_count: i32) {
        let menu_lines = div_round_up(item_count, self.columns);
        let win_height = self.win.size.line;
        debug_assert!(win_height <= menu_lines);

        let column_width = (self.win.size.column - 1) / self.columns;

        let mark_height = div_round_up(win_height * win_height, menu_lines).min(win_height);
        let menu_cols = div_round_up(item_count, win_height);
        let first_col = self.first_item / win_height;
        let mark_line = (win_height - mark_height) * first_col / (menu_cols - self.columns).max(1);

        for line in 0..win_height {
            for col in 0..self.columns {
                self.win.move_cursor(DisplayCoord::new(line, col * column_width));
                let item_idx = (first_col + col) * win_height + line;
                let selected = item_idx < item_count && item_idx == self.selected_item;
                let face = if selected { self.fg } else { self.bg };
                if item_idx < item_count {
                    self.win.draw(self.items[item_idx as usize].atoms(), face);
                } else {
                    self.win.draw(&[], face);
                }
            }
            let is_mark = line >= mark_line && line < mark_line + mark_height;
            self.win.move_cursor(DisplayCoord::new(line, self.win.size.column - 1));
            let mark = if is_mark { "█" } else { "░" };
            self.win.draw(&[DisplayAtom::new(mark)], self.bg);
        }
    }

    /// Change the selection and scroll it into view.
    ///
    /// Out-of-range indices deselect and rewind the scroll.
    pub fn select(&mut self, selected: i32) {
        let item_count = self.items.len() as i32;
        if selected < 0 || selected >= item_count {
            self.selected_item = -1;
            self.first_item = 0;
        } else if self.columns == 0 {
            self.selected_item = selected;
            let width = self.win.size.column - 3;
            let mut first = 0;
            let mut item_col: ColumnCount = 0;
            for i in 0..=selected {
                let item_width = self.items[i as usize].length() + 1;
                if item_col + item_width > width {
                    first = i;
                    item_col = item_width;
                } else {
                    item_col += item_width;
                }
            }
            self.first_item = first;
        } else {
            self.selected_item = selected;
            let rows = self.win.size.line;
            let menu_cols = div_round_up(item_count, rows);
            let first_col = self.first_item / rows;
            let selected_col = self.selected_item / rows;
            if selected_col < first_col {
                self.first_item = selected_col * rows;
            }
            if selected_col >= first_col + self.columns {
                self.first_item = selected_col.min(menu_cols - self.columns) * rows;
            }
        }
        self.draw_items();
    }
}
