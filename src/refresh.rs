//! In-place repaint of the prompt and the line being edited.
//!
//! Both strategies batch everything into an [`OutBuf`] and flush once per
//! keystroke, so the terminal never shows a half-painted line.

use std::io::Write;

use crate::outbuf::OutBuf;
use crate::state::EditState;

/// Single-line repaint with horizontal scrolling.
///
/// Slides a window over the buffer so the prompt plus the visible slice
/// always fits one row and the cursor stays on screen, wipes the row, and
/// repaints it. The buffer itself is never modified.
pub(crate) fn refresh_single_line(state: &EditState, prompt: &str, out: &mut impl Write) {
    let plen = prompt.chars().count();
    let mut start = 0;
    let mut len = state.len();
    let mut pos = state.pos;

    // Slide the window right until the cursor column fits the row.
    while plen + pos >= state.cols {
        start += 1;
        len -= 1;
        pos -= 1;
    }
    // Clip the tail so prompt + window fits the row.
    while plen + len > state.cols {
        len -= 1;
    }

    let mut ab = OutBuf::new();
    let _ = write!(ab, "\x1b[2K\r{prompt}");
    let _ = ab.write_all(&state.buf[start..start + len]);
    // Park the cursor at its column.
    let _ = write!(ab, "\r\x1b[{}C", pos + plen);
    ab.flush_to(out);
}

/// Multi-line repaint.
///
/// Clears every row the previous paint used (tracked by the `max_rows`
/// high-water mark), repaints prompt + buffer across as many rows as they
/// now need, and parks the cursor by row and column. Updates `old_pos` and
/// `max_rows`.
pub(crate) fn refresh_multi_line(state: &mut EditState, prompt: &str, out: &mut impl Write) {
    let plen = prompt.chars().count();
    let cols = state.cols;
    // Rows the current content occupies, and the row the cursor was on at
    // the previous paint (1-based).
    let mut rows = (plen + state.len() + cols - 1) / cols;
    let rpos = (plen + state.old_pos + cols) / cols;
    let old_rows = state.max_rows;

    if rows > state.max_rows {
        state.max_rows = rows;
    }

    let mut ab = OutBuf::new();
    // Drop to the last row of the previous paint, then clear each row on
    // the way back up.
    if old_rows > rpos {
        let _ = write!(ab, "\x1b[{}B", old_rows - rpos);
    }
    for _ in 1..old_rows {
        let _ = ab.write_all(b"\r\x1b[0K\x1b[1A");
    }
    // Clear the top row and repaint everything.
    let _ = write!(ab, "\r\x1b[0K{prompt}");
    let _ = ab.write_all(&state.buf);

    // Cursor at end of line landing exactly on a row boundary: force a new
    // row so the cursor has somewhere visible to sit.
    if state.pos > 0 && state.pos == state.len() && (state.pos + plen) % cols == 0 {
        let _ = ab.write_all(b"\n\r");
        rows += 1;
        if rows > state.max_rows {
            state.max_rows = rows;
        }
    }

    // Park the cursor: row first, then column.
    let rpos2 = (plen + state.pos + cols) / cols;
    if rows > rpos2 {
        let _ = write!(ab, "\x1b[{}A", rows - rpos2);
    }
    let col = (plen + state.pos) % cols;
    if col > 0 {
        let _ = write!(ab, "\r\x1b[{col}C");
    } else {
        let _ = ab.write_all(b"\r");
    }

    state.old_pos = state.pos;
    ab.flush_to(out);
}
