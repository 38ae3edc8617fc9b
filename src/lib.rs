//! A small line editor for raw-mode, byte-oriented terminals.
//!
//! The editor reads keystrokes one byte at a time, keeps the line being
//! edited in memory together with a cursor, repaints the line in place with
//! a fixed ANSI escape dialect, and hands completed lines back to the
//! caller. A bounded in-memory history ring and callback-driven Tab
//! completion round out the feature set.
//!
//! Deliberately out of scope: window-resize awareness, UTF-8 and wide
//! characters (one byte is one column), kill-ring/yank, incremental search,
//! and terminfo. This keeps the editor usable over serial consoles, pipes
//! and other places where only `read one byte` / `write some bytes` exist.
//!
//! ```no_run
//! use miniline::Editor;
//!
//! let mut editor = Editor::new();
//! let line = editor.read_line("> ")?;
//! editor.history_add(&line);
//! println!("got: {line}");
//! # Ok::<(), miniline::EditorError>(())
//! ```

mod completion;
mod editor;
mod history;
mod keys;
mod outbuf;
mod refresh;
mod state;
mod terminal;

pub use completion::{CompletionCallback, Completions};
pub use editor::{Editor, print_key_codes, print_key_codes_stdio};
pub use history::History;
pub use terminal::SESSION_ACTIVE;

use thiserror::Error;

/// Size in bytes of the buffer backing one editing session. One byte is
/// reserved, so a line can hold at most `MAX_LINE - 1` bytes of content;
/// further insertions are dropped.
pub const MAX_LINE: usize = 61;

/// Default bound on the history ring.
pub const DEFAULT_HISTORY_MAX_LEN: usize = 10;

/// Terminal width assumed when the terminal cannot be queried.
pub const DEFAULT_COLS: usize = 80;

/// Why an editing session ended without producing a line.
///
/// Closed input is *not* an error: the session returns whatever content had
/// been typed, exactly like a terminal hang-up would.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The user aborted the line with Ctrl-C.
    #[error("interrupted")]
    Interrupted,

    /// Ctrl-D on an empty line: end of input.
    #[error("end of input")]
    Eof,

    /// Session setup failed (entering raw mode, non-terminal fallback I/O).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
