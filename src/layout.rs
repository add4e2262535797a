//! Floating-box placement.
//!
//! Positions a box of a given size relative to an anchor, keeping it inside
//! a bounding rect and out of the way of another box (typically the menu).

use crate::types::{DisplayCoord, Rect};

/// Compute where to place a box of `size` anchored at `anchor`.
///
/// The box prefers the line below the anchor (or above when `prefer_above`
/// holds and there is room), is clamped into `rect` horizontally, and is
/// pushed off `to_avoid` vertically when the two would overlap.
///
/// The returned position may still fall outside `rect`; callers reject
/// those placements rather than draw a clipped box.
pub fn compute_pos(
    anchor: DisplayCoord,
    size: DisplayCoord,
    rect: Rect,
    to_avoid: Rect,
    mut prefer_above: bool,
) -> DisplayCoord {
    let mut pos = DisplayCoord::default();
    if prefer_above {
        pos = anchor - DisplayCoord::new(size.line, 0);
        if pos.line < 0 {
            prefer_above = false;
        }
    }
    let rect_end = rect.end();
    if !prefer_above {
        pos = anchor + DisplayCoord::new(1, 0);
        if pos.line + size.line > rect_end.line {
            pos.line = rect.pos.line.max(anchor.line - size.line);
        }
    }
    if pos.column + size.column > rect_end.column {
        pos.column = rect.pos.column.max(rect_end.column - size.column);
    }

    if !to_avoid.is_empty() {
        let to_avoid_end = to_avoid.end();
        let end = pos + size;

        // Inclusive-bound intersection: touching edges count as overlap.
        if !(end.line < to_avoid.pos.line
            || end.column < to_avoid.pos.column
            || pos.line > to_avoid_end.line
            || pos.column > to_avoid_end.column)
        {
            pos.line = to_avoid.pos.line.min(anchor.line) - size.line;
            // If above does not work, try below.
            if pos.line < 0 {
                pos.line = to_avoid_end.line.max(anchor.line);
            }
        }
    }

    pos
}
