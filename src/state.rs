/// Per-session editing state: the line under construction, the cursor, and
/// the bookkeeping both repaint strategies need.
///
/// Content is raw bytes and one byte is one screen column; the editor makes
/// no attempt at UTF-8 or wide-character handling.
pub(crate) struct EditState {
    /// Line content.
    pub(crate) buf: Vec<u8>,
    /// Hard cap on content length; insertions beyond it are dropped.
    pub(crate) max_len: usize,
    /// Cursor index, between 0 and `buf.len()`.
    pub(crate) pos: usize,
    /// Cursor index at the previous refresh (multi-line repaint only).
    pub(crate) old_pos: usize,
    /// Terminal width in columns.
    pub(crate) cols: usize,
    /// Most rows this session has ever occupied (multi-line repaint only).
    /// Never decreases while the session lives; the repaint uses it to know
    /// how many rows to wipe.
    pub(crate) max_rows: usize,
    /// Offset from the newest history entry; 0 is the line being edited.
    pub(crate) history_index: usize,
}

/// How an insertion landed, so the caller can pick between the append fast
/// path and a full repaint.
pub(crate) enum Insert {
    /// Appended at the end of the line.
    Appended,
    /// Inserted mid-line; the suffix shifted right.
    Inserted,
    /// Line is at capacity; the byte was dropped.
    Full,
}

impl EditState {
    pub(crate) fn new(max_len: usize, cols: usize) -> Self {
        EditState {
            buf: Vec::new(),
            max_len,
            pos: 0,
            old_pos: 0,
            cols,
            max_rows: 0,
            history_index: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Insert `c` at the cursor and advance it.
    pub(crate) fn insert(&mut self, c: u8) -> Insert {
        if self.buf.len() >= self.max_len {
            return Insert::Full;
        }
        if self.pos == self.buf.len() {
            self.buf.push(c);
            self.pos += 1;
            Insert::Appended
        } else {
            self.buf.insert(self.pos, c);
            self.pos += 1;
            Insert::Inserted
        }
    }

    // The movement and deletion operations report whether anything changed;
    // callers repaint only on true.

    pub(crate) fn move_left(&mut self) -> bool {
        if self.pos > 0 {
            self.pos -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn move_right(&mut self) -> bool {
        if self.pos < self.buf.len() {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn move_home(&mut self) -> bool {
        if self.pos != 0 {
            self.pos = 0;
            true
        } else {
            false
        }
    }

    pub(crate) fn move_end(&mut self) -> bool {
        if self.pos != self.buf.len() {
            self.pos = self.buf.len();
            true
        } else {
            false
        }
    }

    /// Remove the byte under the cursor (the Delete key).
    pub(crate) fn delete(&mut self) -> bool {
        if !self.buf.is_empty() && self.pos < self.buf.len() {
            self.buf.remove(self.pos);
            true
        } else {
            false
        }
    }

    /// Remove the byte before the cursor and pull the cursor back.
    pub(crate) fn backspace(&mut self) -> bool {
        if self.pos > 0 && !self.buf.is_empty() {
            self.pos -= 1;
            self.buf.remove(self.pos);
            true
        } else {
            false
        }
    }

    /// Drop everything from the cursor to the end of the line.
    pub(crate) fn kill_to_end(&mut self) {
        self.buf.truncate(self.pos);
    }

    /// Drop the whole line.
    pub(crate) fn kill_line(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    /// Erase the word before the cursor: trailing spaces first, then the
    /// word itself. The cursor lands where the word began.
    pub(crate) fn delete_prev_word(&mut self) {
        let end = self.pos;
        while self.pos > 0 && self.buf[self.pos - 1] == b' ' {
            self.pos -= 1;
        }
        while self.pos > 0 && self.buf[self.pos - 1] != b' ' {
            self.pos -= 1;
        }
        self.buf.drain(self.pos..end);
    }

    /// Swap the byte before the cursor with the byte under it, advancing
    /// the cursor unless it already sits on the last byte.
    pub(crate) fn swap_chars(&mut self) -> bool {
        if self.pos > 0 && self.pos < self.buf.len() {
            self.buf.swap(self.pos - 1, self.pos);
            if self.pos != self.buf.len() - 1 {
                self.pos += 1;
            }
            true
        } else {
            false
        }
    }

    /// Replace the whole line, truncating to capacity; cursor to the end.
    pub(crate) fn set_line(&mut self, bytes: &[u8]) {
        let take = bytes.len().min(self.max_len);
        self.buf.clear();
        self.buf.extend_from_slice(&bytes[..take]);
        self.pos = self.buf.len();
    }

    pub(crate) fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}
