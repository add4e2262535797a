//! The terminal UI facade.
//!
//! Owns the controlling terminal for its lifetime: raw mode, the alternate
//! screen, mouse and focus reporting. Maintains the three overlay windows
//! (main view, menu, info box), decodes stdin into [`Key`]s, and tracks a
//! dirty bit so [`refresh`](TerminalUi::refresh) only repaints when
//! something changed.
//!
//! The event loop is an external collaborator: it polls stdin plus
//! [`wake_fd`](TerminalUi::wake_fd) and calls
//! [`on_stdin_readable`](TerminalUi::on_stdin_readable) when either fires.

use std::collections::HashMap;

use crate::display::{DisplayAtom, DisplayBuffer, DisplayLine};
use crate::error::Error;
use crate::face::{merge_faces, Face};
use crate::info::{make_info_box, make_simple_info_box, Info, InfoStyle};
use crate::input::decoder::{Decoded, Decoder, DecoderContext, StdinSource};
use crate::input::key::{Key, KeyCode};
use crate::layout::compute_pos;
use crate::menu::{div_round_up, height_limit, Menu, MenuStyle};
use crate::options::UiOptions;
use crate::renderer::{ansi, OutputBuffer};
use crate::term;
use crate::term::signals::{self, SignalGuard};
use crate::types::{ColumnCount, DisplayCoord, LineCount, Rect};
use crate::window::Window;

/// Appended to every terminal title.
const TITLE_SUFFIX: &str = " - quill";

/// Where the cursor is drawn on refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// In the content area, offset by the status row when it is on top.
    Buffer,
    /// Forced onto the status row.
    Prompt,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    mode: CursorMode,
    coord: DisplayCoord,
}

/// Callback invoked for every decoded key while draining stdin.
pub type OnKeyCallback = Box<dyn FnMut(Key)>;

/// The terminal-facing UI backend.
pub struct TerminalUi {
    out: OutputBuffer,
    window: Window,
    menu: Menu,
    info: Info,
    cursor: Cursor,
    dimensions: DisplayCoord,
    status_len: ColumnCount,
    dirty: bool,
    resize_pending: bool,
    stdin_watching: bool,
    mouse_enabled: bool,
    original_termios: libc::termios,
    signals: SignalGuard,
    decoder: Decoder,
    on_key: Option<OnKeyCallback>,
    options: UiOptions,
}

impl TerminalUi {
    /// Acquire the terminal: save the termios, switch to the alternate
    /// screen in raw mode, enable mouse reporting and install the signal
    /// handlers. Fails only when stdout is not a tty.
    pub fn new() -> Result<Self, Error> {
        if !term::is_tty(libc::STDOUT_FILENO) {
            return Err(Error::NotATty);
        }

        let original_termios = term::save_termios()?;
        let signals = SignalGuard::install()?;

        let mut ui = Self {
            out: OutputBuffer::new(),
            window: Window::default(),
            menu: Menu::default(),
            info: Info::default(),
            cursor: Cursor { mode: CursorMode::Buffer, coord: DisplayCoord::default() },
            dimensions: DisplayCoord::default(),
            status_len: 0,
            dirty: false,
            resize_pending: false,
            stdin_watching: true,
            mouse_enabled: false,
            original_termios,
            signals,
            decoder: Decoder::new(),
            on_key: None,
            options: UiOptions::default(),
        };

        ui.setup_terminal();
        term::set_raw_mode(&ui.original_termios)?;
        ui.enable_mouse(true);

        ui.check_resize(true);
        ui.redraw(false);
        tracing::debug!(
            lines = ui.dimensions.line,
            columns = ui.dimensions.column,
            "terminal acquired"
        );
        Ok(ui)
    }

    /// Content dimensions: the full terminal minus the status row.
    pub fn dimensions(&self) -> DisplayCoord {
        self.dimensions
    }

    /// Read end of the wake pipe, for the event loop to poll alongside
    /// stdin.
    pub fn wake_fd(&self) -> libc::c_int {
        self.signals.wake_fd()
    }

    fn content_line_offset(&self) -> LineCount {
        if self.options.status_on_top {
            1
        } else {
            0
        }
    }

    fn status_row(&self) -> LineCount {
        if self.options.status_on_top {
            0
        } else {
            self.dimensions.line
        }
    }

    // =========================================================================
    // Terminal modes
    // =========================================================================

    fn setup_terminal(&mut self) {
        let _ = ansi::enter_alt_screen(&mut self.out);
        let _ = ansi::cursor_hide(&mut self.out);
        let _ = self.out.flush_stdout();
    }

    fn restore_terminal(&mut self) {
        let _ = ansi::exit_alt_screen(&mut self.out);
        let _ = ansi::cursor_show(&mut self.out);
        let _ = ansi::reset(&mut self.out);
        let _ = self.out.flush_stdout();
    }

    fn enable_mouse(&mut self, enabled: bool) {
        if enabled == self.mouse_enabled {
            return;
        }
        self.mouse_enabled = enabled;
        if enabled {
            let _ = ansi::enable_mouse(&mut self.out);
        } else {
            let _ = ansi::disable_mouse(&mut self.out);
        }
        let _ = self.out.flush_stdout();
    }

    // =========================================================================
    // Resize, suspend, hangup
    // =========================================================================

    /// Re-query the terminal size if a SIGWINCH is pending (or `force`).
    /// Rebuilds the three windows at the new geometry and arms a synthetic
    /// `Resize` key for the next fetch.
    pub fn check_resize(&mut self, force: bool) {
        let pending = signals::take_resize_pending();
        if !force && !pending {
            return;
        }

        let Some((rows, cols)) = term::tty_size() else {
            tracing::debug!("resize skipped: tty size unavailable");
            return;
        };

        let info = self.info.win.is_present();
        let menu = self.menu.is_present();
        if self.window.is_present() {
            self.window.destroy();
        }
        if info {
            self.info.win.destroy();
        }
        if menu {
            self.menu.win.destroy();
        }

        self.window.create(DisplayCoord::new(0, 0), DisplayCoord::new(rows, cols));
        self.dimensions = DisplayCoord::new(rows - 1, cols);
        tracing::debug!(rows, cols, "terminal resized");

        if menu {
            let items = std::mem::take(&mut self.menu.items);
            self.menu_show(items, self.menu.anchor, self.menu.fg, self.menu.bg, self.menu.style);
        }
        if info {
            self.redraw_info();
        }

        self.set_resize_pending();
    }

    fn set_resize_pending(&mut self) {
        self.resize_pending = true;
        self.signals.notify();
    }

    /// Release the terminal, stop until SIGCONT, then reacquire it.
    fn suspend(&mut self) {
        let mouse_was_enabled = self.mouse_enabled;
        self.enable_mouse(false);
        self.restore_terminal();
        let _ = term::apply_termios(&self.original_termios);

        tracing::debug!("suspending until SIGCONT");
        signals::suspend_process();

        let _ = term::apply_termios(&self.original_termios);
        self.setup_terminal();
        self.check_resize(true);
        let _ = term::set_raw_mode(&self.original_termios);
        self.enable_mouse(mouse_was_enabled);

        self.refresh(true);
    }

    // =========================================================================
    // Key fetch
    // =========================================================================

    /// Fetch the next available key without blocking.
    ///
    /// Synthetic `Resize` keys are delivered before real input. After a
    /// hangup the terminal is released and this always returns `None`.
    pub fn get_next_key(&mut self) -> Option<Key> {
        if signals::take_sighup() {
            tracing::debug!("hangup: releasing terminal");
            self.signals.uninstall();
            if self.window.is_present() {
                self.window.destroy();
            }
            self.stdin_watching = false;
            return None;
        }
        if !self.stdin_watching {
            return None;
        }

        if signals::take_sigtstp() {
            self.suspend();
        }

        self.check_resize(false);

        if self.resize_pending {
            self.resize_pending = false;
            return Some(Key::plain(KeyCode::Resize(self.dimensions)));
        }

        let ctx = self.decoder_context();
        match self.decoder.decode(&mut StdinSource, &ctx)? {
            Decoded::Key(key) => Some(key),
            Decoded::Suspend => {
                // Ctrl-Z with ISIG cleared: stop the process group ourselves.
                unsafe {
                    libc::kill(0, libc::SIGTSTP);
                }
                signals::take_sigtstp();
                self.suspend();
                None
            }
        }
    }

    fn decoder_context(&self) -> DecoderContext {
        DecoderContext {
            line_offset: self.content_line_offset(),
            wheel_up_button: self.options.wheel_up_button,
            wheel_down_button: self.options.wheel_down_button,
            wheel_scroll_amount: self.options.wheel_scroll_amount,
        }
    }

    /// Register the key callback. The event loop's stdin watcher calls
    /// [`on_stdin_readable`](Self::on_stdin_readable); each decoded key is
    /// handed to the callback in arrival order.
    pub fn set_on_key(&mut self, callback: OnKeyCallback) {
        self.on_key = Some(callback);
        self.signals.notify();
    }

    /// Drain all currently available keys into the registered callback.
    pub fn on_stdin_readable(&mut self) {
        let Some(mut callback) = self.on_key.take() else {
            return;
        };
        while let Some(key) = self.get_next_key() {
            callback(key);
        }
        if self.on_key.is_none() {
            self.on_key = Some(callback);
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Paint the main view from `buffer`, padding the rows below it with
    /// `~` lines.
    pub fn draw(&mut self, buffer: &DisplayBuffer, default_face: Face, padding_face: Face) {
        self.check_resize(false);

        let dim = self.dimensions;
        let line_offset = self.content_line_offset();
        let mut line_index = line_offset;
        for line in buffer.lines() {
            self.window.move_cursor_to_line(line_index);
            self.window.draw(line.atoms(), default_face);
            line_index += 1;
        }

        let face = merge_faces(default_face, padding_face);
        while line_index < dim.line + line_offset {
            self.window.move_cursor_to_line(line_index);
            self.window.draw(&[DisplayAtom::new("~")], face);
            line_index += 1;
        }

        self.dirty = true;
    }

    /// Paint the status row: the status line at the left, the mode line
    /// right-aligned, trimmed with a leading `…` when it does not fit.
    pub fn draw_status(
        &mut self,
        status_line: &DisplayLine,
        mode_line: &DisplayLine,
        default_face: Face,
    ) {
        let status_line_pos = self.status_row();
        self.window.move_cursor_to_line(status_line_pos);
        self.window.draw(status_line.atoms(), default_face);

        let mode_len = mode_line.length();
        self.status_len = status_line.length();
        let remaining = self.dimensions.column - self.status_len;
        if mode_len < remaining {
            let col = self.dimensions.column - mode_len;
            self.window.move_cursor(DisplayCoord::new(status_line_pos, col));
            self.window.draw(mode_line.atoms(), default_face);
        } else if remaining > 2 {
            let mut trimmed = mode_line.clone();
            trimmed.trim(mode_len + 2 - remaining, remaining - 2);
            trimmed.insert_front(DisplayAtom::new("…"));
            debug_assert_eq!(trimmed.length(), remaining - 1);

            let col = self.dimensions.column - remaining + 1;
            self.window.move_cursor(DisplayCoord::new(status_line_pos, col));
            self.window.draw(trimmed.atoms(), default_face);
        }

        if self.options.set_title {
            let title: String = mode_line.atoms().iter().map(|a| a.text.as_str()).collect();
            let _ = ansi::set_title(&mut self.out, &title, TITLE_SUFFIX);
            let _ = self.out.flush_stdout();
        }

        self.dirty = true;
    }

    /// Record where the cursor goes; applied on the next refresh.
    pub fn set_cursor(&mut self, mode: CursorMode, coord: DisplayCoord) {
        self.cursor = Cursor { mode, coord };
    }

    /// Repaint everything if anything changed since the last refresh.
    pub fn refresh(&mut self, force: bool) {
        if self.dirty || force {
            self.redraw(force);
        }
        self.dirty = false;
    }

    fn redraw(&mut self, force: bool) {
        self.window.refresh(&mut self.out, force);

        // A horizontal menu shares the status row; skip it while it would
        // overwrite the status text.
        if self.menu.columns != 0 || self.menu.win.pos.column > self.status_len {
            self.menu.win.refresh(&mut self.out, false);
        }

        self.info.win.refresh(&mut self.out, false);

        let cursor_pos = match self.cursor.mode {
            CursorMode::Prompt => DisplayCoord::new(self.status_row(), self.cursor.coord.column),
            CursorMode::Buffer => {
                self.cursor.coord + DisplayCoord::new(self.content_line_offset(), 0)
            }
        };
        let _ = ansi::cursor_to(&mut self.out, cursor_pos);
        let _ = self.out.flush_stdout();
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Open (or reopen) the menu with the given items.
    ///
    /// Geometry follows the style: `Search` is a one-line carousel on the
    /// status row, `Inline` a single column near the anchor, `Prompt` a
    /// full-width grid on the row opposite the status bar. Refuses to open
    /// on terminals two columns wide or narrower.
    pub fn menu_show(
        &mut self,
        items: Vec<DisplayLine>,
        mut anchor: DisplayCoord,
        fg: Face,
        bg: Face,
        style: MenuStyle,
    ) {
        if self.menu.is_present() {
            self.menu.win.destroy();
            self.dirty = true;
        }

        self.menu.fg = fg;
        self.menu.bg = bg;
        self.menu.style = style;
        self.menu.anchor = anchor;
        self.menu.items.clear();

        if self.dimensions.column <= 2 {
            return;
        }

        let item_count = items.len() as i32;
        let longest = items.iter().map(DisplayLine::length).max().unwrap_or(0).max(1);

        let max_width = self.dimensions.column - 1;
        let is_inline = style == MenuStyle::Inline;
        let is_search = style == MenuStyle::Search;
        self.menu.columns = if is_search {
            0
        } else if is_inline {
            1
        } else {
            (max_width / (longest + 1)).max(1)
        };

        let max_height = height_limit(style)
            .min(anchor.line.max(self.dimensions.line - anchor.line - 1));
        let height = if is_search {
            1
        } else {
            max_height.min(div_round_up(item_count, self.menu.columns))
        };

        let maxlen = if self.menu.columns > 1 && item_count > 1 {
            max_width / self.menu.columns - 1
        } else {
            max_width
        };

        self.menu.items = items;
        for item in &mut self.menu.items {
            item.trim(0, maxlen);
            debug_assert!(item.length() <= maxlen);
        }

        if is_inline {
            anchor.line += self.content_line_offset();
        }

        let mut line = anchor.line + 1;
        let mut column = anchor.column.min(self.dimensions.column - longest - 1).max(0);
        if is_search {
            line = self.status_row();
            column = self.dimensions.column / 2;
        } else if !is_inline {
            line = if self.options.status_on_top { 1 } else { self.dimensions.line - height };
        } else if line + height > self.dimensions.line {
            line = anchor.line - height;
        }

        let width = if is_search {
            self.dimensions.column - self.dimensions.column / 2
        } else if is_inline {
            (longest + 1).min(self.dimensions.column)
        } else {
            self.dimensions.column
        };
        self.menu.win.create(DisplayCoord::new(line, column), DisplayCoord::new(height, width));
        self.menu.selected_item = item_count;
        self.menu.first_item = 0;

        self.menu.draw_items();
        self.dirty = true;

        // The info box avoids the menu, so its placement just changed.
        if self.info.win.is_present() {
            self.redraw_info();
        }
    }

    /// Move the selection, scrolling it into view. Out-of-range indices
    /// deselect.
    pub fn menu_select(&mut self, selected: i32) {
        self.menu.select(selected);
        self.dirty = true;
    }

    /// Close the menu and release its items.
    pub fn menu_hide(&mut self) {
        if !self.menu.is_present() {
            return;
        }

        self.menu.items.clear();
        self.menu.win.destroy();
        self.dirty = true;

        // Recompute the info box: it no longer needs to avoid the menu.
        if self.info.win.is_present() {
            self.redraw_info();
        }
    }

    // =========================================================================
    // Info box
    // =========================================================================

    /// Show an info box. Boxes that cannot fit (terminal too narrow, or the
    /// computed position leaves the content area) are silently not shown.
    pub fn info_show(
        &mut self,
        title: &str,
        content: &str,
        mut anchor: DisplayCoord,
        face: Face,
        style: InfoStyle,
    ) {
        self.info_hide();

        self.info.title = title.to_string();
        self.info.content = content.to_string();
        self.info.anchor = anchor;
        self.info.face = face;
        self.info.style = Some(style);

        let rect = Rect::new(DisplayCoord::new(self.content_line_offset(), 0), self.dimensions);
        let menu_rect = Rect::new(self.menu.win.pos, self.menu.win.size);

        let info_box = match style {
            InfoStyle::Prompt => {
                let info_box =
                    make_info_box(title, content, self.dimensions.column, self.options.assistant);
                anchor = DisplayCoord::new(self.status_row(), self.dimensions.column - 1);
                anchor = compute_pos(anchor, info_box.size, rect, menu_rect, false);
                info_box
            }
            InfoStyle::Modal => {
                let info_box = make_info_box(title, content, self.dimensions.column, &[]);
                let half = |c: DisplayCoord| DisplayCoord::new(c.line / 2, c.column / 2);
                anchor = rect.pos + half(rect.size) - half(info_box.size);
                info_box
            }
            InfoStyle::MenuDoc => {
                if !self.menu.is_present() {
                    return;
                }

                let menu_end = self.menu.win.pos.column + self.menu.win.size.column;
                let right_max_width = self.dimensions.column - menu_end;
                let left_max_width = self.menu.win.pos.column;
                let max_width = right_max_width.max(left_max_width);
                if max_width < 4 {
                    return;
                }

                let info_box = make_simple_info_box(content, max_width);
                anchor.line = self.menu.win.pos.line;
                anchor.column = if info_box.size.column <= right_max_width
                    || right_max_width >= left_max_width
                {
                    menu_end
                } else {
                    self.menu.win.pos.column - info_box.size.column
                };
                info_box
            }
            InfoStyle::Inline | InfoStyle::InlineAbove | InfoStyle::InlineBelow => {
                let max_width = self.dimensions.column - anchor.column;
                if max_width < 4 {
                    return;
                }

                let info_box = make_simple_info_box(content, max_width);
                anchor = compute_pos(
                    anchor,
                    info_box.size,
                    rect,
                    menu_rect,
                    style == InfoStyle::InlineAbove,
                );
                anchor.line += self.content_line_offset();
                info_box
            }
        };

        // The info box does not fit.
        let end = anchor + info_box.size;
        let rect_end = rect.end();
        if anchor.line < rect.pos.line
            || anchor.column < rect.pos.column
            || end.line > rect_end.line
            || end.column > rect_end.column
        {
            return;
        }

        self.info.win.create(anchor, info_box.size);
        for (i, line) in info_box.contents.iter().enumerate() {
            self.info.win.move_cursor_to_line(i as LineCount);
            self.info.win.draw(&[DisplayAtom::new(line.as_str())], face);
        }
        self.dirty = true;
    }

    /// Hide the info box.
    pub fn info_hide(&mut self) {
        if !self.info.win.is_present() {
            return;
        }
        self.info.win.destroy();
        self.dirty = true;
    }

    fn redraw_info(&mut self) {
        if let Some(style) = self.info.style {
            let title = std::mem::take(&mut self.info.title);
            let content = std::mem::take(&mut self.info.content);
            self.info_show(&title, &content, self.info.anchor, self.info.face, style);
        }
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Apply a flat name→string option map (see [`UiOptions`]).
    pub fn set_ui_options(&mut self, options: &HashMap<String, String>) {
        let parsed = UiOptions::from_map(options);
        let enable_mouse = parsed.enable_mouse;
        self.options = parsed;
        self.enable_mouse(enable_mouse);
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        self.enable_mouse(false);
        self.restore_terminal();
        let _ = term::apply_termios(&self.original_termios);
        self.signals.uninstall();
    }
}
