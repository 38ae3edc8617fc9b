use std::io::{self, BufRead, Read, Write};

use crate::completion::{CompletionCallback, Completions};
use crate::history::History;
use crate::keys::{self, EscKey};
use crate::refresh::{refresh_multi_line, refresh_single_line};
use crate::state::{EditState, Insert};
use crate::terminal::{self, RawMode};
use crate::{DEFAULT_COLS, EditorError, MAX_LINE, Result};

/// Homes the cursor and wipes the display.
const CLEAR_SCREEN: &[u8] = b"\x1b[H\x1b[2J";

/// A line editor with Emacs keybindings, bounded history, and Tab
/// completion, driven one input byte at a time.
///
/// One `Editor` holds the state that outlives a single line: the history
/// ring, the completion callback, and the display mode. Each call to
/// [`read_line`](Editor::read_line) or [`edit`](Editor::edit) runs one
/// editing session against it.
pub struct Editor {
    multiline: bool,
    cols: usize,
    history: History,
    completion: Option<Box<CompletionCallback>>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Editor {
            multiline: false,
            cols: DEFAULT_COLS,
            history: History::new(),
            completion: None,
        }
    }

    /// Select the repaint strategy: multi-line wraps long lines onto extra
    /// rows, single-line (the default) scrolls horizontally.
    pub fn set_multiline(&mut self, on: bool) {
        self.multiline = on;
    }

    /// Override the terminal width assumed by [`edit`](Editor::edit).
    /// Interactive sessions via [`read_line`](Editor::read_line) query the
    /// real width instead.
    pub fn set_cols(&mut self, cols: usize) {
        self.cols = cols;
    }

    /// Register the Tab-completion callback. Without one, Tab inserts a
    /// literal tab byte.
    pub fn set_completion_callback(
        &mut self,
        callback: impl Fn(&str, &mut Completions) + 'static,
    ) {
        self.completion = Some(Box::new(callback));
    }

    /// Append a line to the history ring; adjacent duplicates are rejected.
    pub fn history_add(&mut self, line: &str) -> bool {
        self.history.add(line)
    }

    /// Bound the history ring; `0` is rejected.
    pub fn history_set_max_len(&mut self, max_len: usize) -> bool {
        self.history.set_max_len(max_len)
    }

    /// Read access to the history ring (oldest first).
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Home the cursor and wipe the display (what Ctrl-L does mid-session).
    pub fn clear_screen(&self) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(CLEAR_SCREEN);
        let _ = stdout.flush();
    }

    /// Read one line interactively from stdin/stdout.
    ///
    /// On a terminal this enters raw mode for the duration of the session
    /// and repaints after every keystroke. When stdin is not a terminal
    /// (pipes, scripts) it degrades to a plain buffered read so callers
    /// work unmodified.
    ///
    /// Returns the submitted line (possibly empty), `Err(Interrupted)` on
    /// Ctrl-C, or `Err(Eof)` on Ctrl-D with an empty line.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        if !terminal::stdin_is_tty() {
            return self.read_line_fallback(prompt);
        }

        let _raw = RawMode::acquire()?;
        let cols = terminal::terminal_cols();
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.edit_session(&mut stdin.lock(), &mut stdout.lock(), prompt, cols)
    }

    /// Run one editing session over arbitrary byte streams. The input is
    /// assumed to deliver raw, unbuffered keystrokes; the caller owns any
    /// terminal mode switching. This is also the hook tests drive with
    /// in-memory streams.
    pub fn edit<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        prompt: &str,
    ) -> Result<String> {
        let cols = self.cols;
        self.edit_session(input, output, prompt, cols)
    }

    /// Non-terminal path: show the prompt and read a plain line.
    fn read_line_fallback(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{prompt}");
        let _ = stdout.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Err(EditorError::Eof),
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                Ok(line)
            }
            Err(e) => Err(EditorError::Io(e)),
        }
    }

    fn edit_session<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        prompt: &str,
        cols: usize,
    ) -> Result<String> {
        log::debug!("session start: multiline={}, cols={cols}", self.multiline);
        let mut session = Session {
            input,
            output,
            prompt,
            plen: prompt.chars().count(),
            state: EditState::new(MAX_LINE - 1, cols),
            multiline: self.multiline,
            history: &mut self.history,
            completion: self.completion.as_deref(),
        };
        session.run()
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Which neighbor the history navigation moves to.
enum HistoryDir {
    Prev,
    Next,
}

/// What the completion sub-loop resolved to.
enum Completed {
    /// Nothing committed; read the next byte as usual.
    Next,
    /// Dispatch this byte as if it had just been read.
    Key(u8),
    /// Input closed mid-cycle; the session ends.
    Closed,
}

/// One editing session: the per-line state plus borrows of everything the
/// dispatch loop needs.
struct Session<'a, R: Read, W: Write> {
    input: &'a mut R,
    output: &'a mut W,
    prompt: &'a str,
    plen: usize,
    state: EditState,
    multiline: bool,
    history: &'a mut History,
    completion: Option<&'a CompletionCallback>,
}

impl<R: Read, W: Write> Session<'_, R, W> {
    fn run(&mut self) -> Result<String> {
        // The newest history entry is the line under construction, starting
        // empty; history navigation keeps it updated so scrolling away and
        // back preserves the edit.
        self.history.add("");
        let _ = self.output.write_all(self.prompt.as_bytes());
        let _ = self.output.flush();

        loop {
            let Some(mut c) = keys::read_byte(self.input) else {
                // Input closed: hand back whatever was typed.
                return Ok(self.state.to_string_lossy());
            };

            // Tab enters the completion cycle when a callback is
            // registered; the cycle may hand back a byte to dispatch in its
            // place. Without a callback, Tab falls through to the default
            // arm and is inserted literally.
            if c == keys::TAB {
                if let Some(callback) = self.completion {
                    match self.complete_line(callback) {
                        Completed::Next | Completed::Key(0) => continue,
                        Completed::Key(next) => c = next,
                        Completed::Closed => return Ok(self.state.to_string_lossy()),
                    }
                }
            }

            match c {
                keys::ENTER => {
                    self.history.pop_newest();
                    if self.multiline && self.state.move_end() {
                        self.refresh();
                    }
                    return Ok(self.state.to_string_lossy());
                }
                keys::CTRL_C => return Err(EditorError::Interrupted),
                keys::BACKSPACE | keys::CTRL_H => {
                    if self.state.backspace() {
                        self.refresh();
                    }
                }
                keys::CTRL_D => {
                    // Delete under the cursor, or end of input when the
                    // line is empty.
                    if self.state.len() > 0 {
                        if self.state.delete() {
                            self.refresh();
                        }
                    } else {
                        self.history.pop_newest();
                        return Err(EditorError::Eof);
                    }
                }
                keys::CTRL_T => {
                    if self.state.swap_chars() {
                        self.refresh();
                    }
                }
                keys::CTRL_B => {
                    if self.state.move_left() {
                        self.refresh();
                    }
                }
                keys::CTRL_F => {
                    if self.state.move_right() {
                        self.refresh();
                    }
                }
                keys::CTRL_P => self.history_move(HistoryDir::Prev),
                keys::CTRL_N => self.history_move(HistoryDir::Next),
                keys::ESC => match keys::decode_escape(self.input) {
                    EscKey::Up => self.history_move(HistoryDir::Prev),
                    EscKey::Down => self.history_move(HistoryDir::Next),
                    EscKey::Right => {
                        if self.state.move_right() {
                            self.refresh();
                        }
                    }
                    EscKey::Left => {
                        if self.state.move_left() {
                            self.refresh();
                        }
                    }
                    EscKey::Home => {
                        if self.state.move_home() {
                            self.refresh();
                        }
                    }
                    EscKey::End => {
                        if self.state.move_end() {
                            self.refresh();
                        }
                    }
                    EscKey::Delete => {
                        if self.state.delete() {
                            self.refresh();
                        }
                    }
                    EscKey::Unknown => {}
                },
                keys::CTRL_U => {
                    self.state.kill_line();
                    self.refresh();
                }
                keys::CTRL_K => {
                    self.state.kill_to_end();
                    self.refresh();
                }
                keys::CTRL_A => {
                    if self.state.move_home() {
                        self.refresh();
                    }
                }
                keys::CTRL_E => {
                    if self.state.move_end() {
                        self.refresh();
                    }
                }
                keys::CTRL_L => {
                    let _ = self.output.write_all(CLEAR_SCREEN);
                    self.refresh();
                }
                keys::CTRL_W => {
                    self.state.delete_prev_word();
                    self.refresh();
                }
                _ => self.insert(c),
            }
        }
    }

    fn insert(&mut self, c: u8) {
        match self.state.insert(c) {
            Insert::Appended => {
                // Appending to a line that still fits one row needs no
                // repaint, just the byte itself.
                if !self.multiline && self.plen + self.state.len() < self.state.cols {
                    let _ = self.output.write_all(&[c]);
                    let _ = self.output.flush();
                } else {
                    self.refresh();
                }
            }
            Insert::Inserted => self.refresh(),
            Insert::Full => {}
        }
    }

    fn refresh(&mut self) {
        if self.multiline {
            refresh_multi_line(&mut self.state, self.prompt, self.output);
        } else {
            refresh_single_line(&self.state, self.prompt, self.output);
        }
    }

    fn beep(&mut self) {
        let _ = self.output.write_all(b"\x07");
        let _ = self.output.flush();
    }

    /// Swap the edited line for an adjacent history entry.
    ///
    /// The in-progress edit is written back into its slot first, so
    /// scrolling away and back preserves it. Stepping past either end is a
    /// no-op with no repaint.
    fn history_move(&mut self, dir: HistoryDir) {
        // Fewer than two entries means only the placeholder exists.
        if self.history.len() <= 1 {
            return;
        }
        let current = self.state.to_string_lossy();
        self.history
            .replace_from_newest(self.state.history_index, &current);

        let index = match dir {
            HistoryDir::Prev => self.state.history_index + 1,
            HistoryDir::Next => match self.state.history_index.checked_sub(1) {
                Some(i) => i,
                None => return, // already on the line being edited
            },
        };
        if index > self.history.len() - 1 {
            return; // already on the oldest entry
        }

        self.state.history_index = index;
        if let Some(line) = self.history.from_newest(index) {
            let bytes = line.as_bytes().to_vec();
            self.state.set_line(&bytes);
        }
        self.refresh();
    }

    /// Tab cycling through the callback's candidates.
    ///
    /// Each candidate is painted as a ghost over the real line; the edit
    /// state is committed only when a key other than Tab or Escape lands on
    /// a candidate, and that key is handed back for normal dispatch.
    fn complete_line(&mut self, callback: &CompletionCallback) -> Completed {
        let mut candidates = Completions::new();
        callback(&self.state.to_string_lossy(), &mut candidates);
        log::debug!("completion produced {} candidate(s)", candidates.len());

        if candidates.is_empty() {
            self.beep();
            return Completed::Next;
        }

        let mut i = 0;
        loop {
            // Index == len shows the original line again.
            if let Some(candidate) = candidates.get(i) {
                self.ghost_refresh(candidate);
            } else {
                self.refresh();
            }

            let Some(c) = keys::read_byte(self.input) else {
                return Completed::Closed;
            };

            match c {
                keys::TAB => {
                    i = (i + 1) % (candidates.len() + 1);
                    if i == candidates.len() {
                        self.beep();
                    }
                }
                keys::ESC => {
                    // Put the original line back and resume the key loop.
                    if i < candidates.len() {
                        self.refresh();
                    }
                    return Completed::Next;
                }
                _ => {
                    if let Some(candidate) = candidates.get(i) {
                        self.state.set_line(candidate.as_bytes());
                    }
                    return Completed::Key(c);
                }
            }
        }
    }

    /// Repaint with `candidate` in place of the buffer, leaving the real
    /// edit state untouched.
    fn ghost_refresh(&mut self, candidate: &str) {
        let saved_buf = std::mem::replace(&mut self.state.buf, candidate.as_bytes().to_vec());
        let saved_pos = self.state.pos;
        self.state.pos = candidate.len();
        self.refresh();
        self.state.buf = saved_buf;
        self.state.pos = saved_pos;
    }
}

// ── Debug helpers ─────────────────────────────────────────────────────────────

/// Echo each input byte (printable form, hex, decimal) until the last four
/// bytes spell `quit`, or the input closes.
///
/// Meant for working out what sequences a terminal actually sends; run it
/// with the terminal in raw mode so keys arrive unbuffered.
pub fn print_key_codes<R: Read, W: Write>(input: &mut R, output: &mut W) {
    let mut window = [b' '; 4];
    while let Some(c) = keys::read_byte(input) {
        let shown = if c.is_ascii_graphic() { c as char } else { '?' };
        let _ = write!(output, "'{shown}' {c:02x} ({c})\r\n");
        let _ = output.flush();

        window.rotate_left(1);
        window[3] = c;
        if &window == b"quit" {
            break;
        }
    }
}

/// Interactive wrapper for [`print_key_codes`]: takes the terminal raw for
/// the duration and echoes stdin key codes to stdout.
pub fn print_key_codes_stdio() -> Result<()> {
    let _raw = RawMode::acquire()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    print_key_codes(&mut stdin.lock(), &mut stdout.lock());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn edit_bytes(editor: &mut Editor, input: &[u8]) -> (Result<String>, Vec<u8>) {
        let mut input = Cursor::new(input.to_vec());
        let mut output = Vec::new();
        let result = editor.edit(&mut input, &mut output, "> ");
        (result, output)
    }

    #[test]
    fn append_fast_path_writes_bytes_without_repaint() {
        let mut editor = Editor::new();
        let (result, output) = edit_bytes(&mut editor, b"hi\r");
        assert_eq!(result.unwrap(), "hi");
        // Prompt, then the two appended bytes verbatim: no escape
        // sequences at all.
        assert_eq!(output, b"> hi");
    }

    #[test]
    fn ctrl_c_aborts_and_leaves_the_placeholder() {
        let mut editor = Editor::new();
        let (result, _) = edit_bytes(&mut editor, b"ab\x03");
        assert!(matches!(result, Err(EditorError::Interrupted)));
        // Abort does not pop the in-progress entry; the next session
        // reuses it as its placeholder and pops it on submit.
        assert_eq!(editor.history().len(), 1);

        let (result, _) = edit_bytes(&mut editor, b"ok\r");
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(editor.history().len(), 0);
    }

    #[test]
    fn ctrl_d_on_empty_line_is_eof_and_pops_the_placeholder() {
        let mut editor = Editor::new();
        let (result, _) = edit_bytes(&mut editor, b"\x04");
        assert!(matches!(result, Err(EditorError::Eof)));
        assert!(editor.history().is_empty());
    }

    #[test]
    fn closed_input_returns_the_content_so_far() {
        let mut editor = Editor::new();
        let (result, _) = edit_bytes(&mut editor, b"abc");
        assert_eq!(result.unwrap(), "abc");
    }

    #[test]
    fn enter_pops_the_placeholder() {
        let mut editor = Editor::new();
        editor.history_add("earlier");
        let (result, _) = edit_bytes(&mut editor, b"hi\r");
        assert_eq!(result.unwrap(), "hi");
        assert_eq!(editor.history().iter().collect::<Vec<_>>(), ["earlier"]);
    }

    #[test]
    fn print_key_codes_stops_on_quit() {
        let mut input = Cursor::new(b"abquitXX".to_vec());
        let mut output = Vec::new();
        print_key_codes(&mut input, &mut output);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("'a' 61 (97)"), "echo was: {text}");
        assert!(text.contains("'t' 74 (116)"), "echo was: {text}");
        // Stopped at "quit": the trailing bytes were never echoed.
        assert!(!text.contains("'X'"), "echo was: {text}");
    }

    #[test]
    fn print_key_codes_stops_on_closed_input() {
        let mut input = Cursor::new(b"ab".to_vec());
        let mut output = Vec::new();
        print_key_codes(&mut input, &mut output);
        assert!(!output.is_empty());
    }
}
