use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::terminal;
use crossterm::tty::IsTty;

use crate::DEFAULT_COLS;

/// Set while a session owns the terminal in raw mode.
///
/// Hosts that install their own SIGINT handler can consult this to tell
/// whether the editor is currently drawing; the demo shell skips its
/// newline echo while the flag is set, since inside a session Ctrl-C is a
/// plain input byte.
pub static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Scoped raw mode: acquiring it switches the terminal over and dropping
/// it switches back, so an early return or panic mid-session cannot strand
/// the user in raw mode.
pub(crate) struct RawMode;

impl RawMode {
    pub(crate) fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        SESSION_ACTIVE.store(true, Ordering::Relaxed);
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        SESSION_ACTIVE.store(false, Ordering::Relaxed);
        let _ = terminal::disable_raw_mode();
    }
}

/// Terminal width in columns, or the fixed fallback when the query fails
/// (serial consoles, odd TERM values).
pub(crate) fn terminal_cols() -> usize {
    terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(DEFAULT_COLS)
}

/// Whether interactive editing is possible at all. Raw keystrokes have to
/// come from a keyboard, so the decision rests on stdin; stdout being a
/// terminal proves nothing when input arrives through a pipe.
pub(crate) fn stdin_is_tty() -> bool {
    io::stdin().is_tty()
}
