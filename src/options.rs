//! UI options.
//!
//! Options arrive as a flat name→string map; unknown names are ignored and
//! unparsable values fall back to their defaults.

use std::collections::HashMap;

use crate::info::{ASSISTANT_CAT, ASSISTANT_CLIPPY, ASSISTANT_DILBERT};

pub const DEFAULT_SHIFT_FUNCTION_KEY: i32 = 12;
pub const DEFAULT_WHEEL_UP_BUTTON: i32 = 4;
pub const DEFAULT_WHEEL_DOWN_BUTTON: i32 = 5;
pub const DEFAULT_WHEEL_SCROLL_AMOUNT: i32 = 3;

/// Parsed UI options.
#[derive(Debug, Clone)]
pub struct UiOptions {
    pub assistant: &'static [&'static str],
    pub status_on_top: bool,
    pub set_title: bool,
    pub shift_function_key: i32,
    pub enable_mouse: bool,
    pub wheel_up_button: i32,
    pub wheel_down_button: i32,
    pub wheel_scroll_amount: i32,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            assistant: ASSISTANT_CLIPPY,
            status_on_top: false,
            set_title: true,
            shift_function_key: DEFAULT_SHIFT_FUNCTION_KEY,
            enable_mouse: true,
            wheel_up_button: DEFAULT_WHEEL_UP_BUTTON,
            wheel_down_button: DEFAULT_WHEEL_DOWN_BUTTON,
            wheel_scroll_amount: DEFAULT_WHEEL_SCROLL_AMOUNT,
        }
    }
}

impl UiOptions {
    /// Parse a full option map. Every option is optional; missing or
    /// malformed entries take their defaults.
    pub fn from_map(options: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let assistant = match options.get("assistant").map(String::as_str) {
            Some("cat") => ASSISTANT_CAT,
            Some("dilbert") => ASSISTANT_DILBERT,
            Some("none") | Some("off") => &[],
            _ => ASSISTANT_CLIPPY,
        };

        Self {
            assistant,
            status_on_top: options.get("status_on_top").is_some_and(|v| is_yes(v)),
            set_title: options.get("set_title").map_or(true, |v| is_yes(v)),
            shift_function_key: int_or(options, "shift_function_key", defaults.shift_function_key),
            enable_mouse: options.get("enable_mouse").map_or(true, |v| is_yes(v)),
            wheel_up_button: int_or(options, "wheel_up_button", defaults.wheel_up_button),
            wheel_down_button: int_or(options, "wheel_down_button", defaults.wheel_down_button),
            wheel_scroll_amount: int_or(options, "wheel_scroll_amount", defaults.wheel_scroll_amount),
        }
    }
}

fn is_yes(value: &str) -> bool {
    value == "yes" || value == "true"
}

fn int_or(options: &HashMap<String, String>, name: &str, default: i32) -> i32 {
    options
        .get(name)
        .and_then(|v| v.parse::<i32>().ok())
        .unwrap_or(default)
}
