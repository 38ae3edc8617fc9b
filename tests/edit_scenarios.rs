/// End-to-end editing scenarios driven through `Editor::edit` with
/// in-memory byte streams: the terminal is a `Cursor` on the input side and
/// a `Vec<u8>` on the output side, so every keystroke sequence a raw-mode
/// terminal would deliver can be replayed byte for byte.
use std::io::Cursor;

use miniline::{Editor, EditorError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Run one session with prompt `"> "` over the given input bytes.
fn edit(editor: &mut Editor, input: &[u8]) -> Result<String, EditorError> {
    let (result, _) = edit_capture(editor, input);
    result
}

/// Like `edit`, but also hand back everything the session wrote.
fn edit_capture(editor: &mut Editor, input: &[u8]) -> (Result<String, EditorError>, Vec<u8>) {
    let mut input = Cursor::new(input.to_vec());
    let mut output = Vec::new();
    let result = editor.edit(&mut input, &mut output, "> ");
    (result, output)
}

const UP: &[u8] = b"\x1b[A";
const DOWN: &[u8] = b"\x1b[B";
const DELETE: &[u8] = b"\x1b[3~";

// ── Plain editing ─────────────────────────────────────────────────────────────

#[test]
fn typed_line_is_returned_verbatim() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"hi\r").unwrap();
    assert_eq!(line, "hi");

    // The host adds submitted lines, as the demo shell does.
    editor.history_add(&line);
    assert_eq!(editor.history().iter().collect::<Vec<_>>(), ["hi"]);
}

#[test]
fn ctrl_a_moves_home_before_insert() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"abc\x01x\r").unwrap();
    assert_eq!(line, "xabc");
}

#[test]
fn ctrl_t_swaps_the_two_bytes_around_the_cursor() {
    let mut editor = Editor::new();
    // "abc", cursor back one, swap: b and c exchange and the cursor is
    // already on the last byte, so it stays put.
    let line = edit(&mut editor, b"abc\x02\x14\r").unwrap();
    assert_eq!(line, "acb");
}

#[test]
fn ctrl_w_deletes_the_word_before_the_cursor() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"hello\x17\r").unwrap();
    assert_eq!(line, "");
}

#[test]
fn ctrl_u_kills_the_whole_line() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"abc\x15xy\r").unwrap();
    assert_eq!(line, "xy");
}

#[test]
fn ctrl_k_kills_to_end_of_line() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"abcd\x02\x02\x0b\r").unwrap();
    assert_eq!(line, "ab");
}

#[test]
fn delete_key_removes_under_the_cursor() {
    let mut editor = Editor::new();
    let input = [b"ax".as_slice(), b"\x02", DELETE, b"b\r"].concat();
    let line = edit(&mut editor, &input).unwrap();
    assert_eq!(line, "ab");
}

#[test]
fn delete_at_end_of_line_is_a_noop() {
    let mut editor = Editor::new();
    let input = [b"ab".as_slice(), DELETE, b"\r"].concat();
    let line = edit(&mut editor, &input).unwrap();
    assert_eq!(line, "ab");
}

#[test]
fn backspace_on_empty_line_is_a_noop() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"\x7f\r").unwrap();
    assert_eq!(line, "");
}

#[test]
fn ctrl_d_mid_line_deletes_instead_of_eof() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"ab\x01\x04\r").unwrap();
    assert_eq!(line, "b");
}

#[test]
fn insert_beyond_capacity_is_dropped() {
    let mut editor = Editor::new();
    let mut input = vec![b'a'; 70];
    input.push(b'\r');
    let line = edit(&mut editor, &input).unwrap();
    // One byte of the session buffer is reserved; the rest is content.
    assert_eq!(line.len(), miniline::MAX_LINE - 1);
}

// ── Session termination ───────────────────────────────────────────────────────

#[test]
fn ctrl_c_aborts_the_line() {
    let mut editor = Editor::new();
    let result = edit(&mut editor, b"ab\x03");
    assert!(matches!(result, Err(EditorError::Interrupted)));
}

#[test]
fn ctrl_d_on_empty_line_is_eof() {
    let mut editor = Editor::new();
    let result = edit(&mut editor, b"\x04");
    assert!(matches!(result, Err(EditorError::Eof)));
}

#[test]
fn closed_input_returns_the_partial_line() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"abc").unwrap();
    assert_eq!(line, "abc");
}

#[test]
fn esc_then_closed_input_leaves_the_line_unchanged() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"ab\x1b").unwrap();
    assert_eq!(line, "ab");

    let line = edit(&mut editor, b"ab\x1b[").unwrap();
    assert_eq!(line, "ab");
}

// ── History navigation ────────────────────────────────────────────────────────

#[test]
fn up_up_recalls_the_oldest_of_two_entries() {
    let mut editor = Editor::new();
    editor.history_add("foo");
    editor.history_add("bar");

    let input = [UP, UP, b"\r"].concat();
    let line = edit(&mut editor, &input).unwrap();
    assert_eq!(line, "foo");
    // Structurally unchanged: the placeholder came and went.
    assert_eq!(editor.history().iter().collect::<Vec<_>>(), ["foo", "bar"]);
}

#[test]
fn up_at_the_oldest_entry_is_a_noop() {
    let mut editor = Editor::new();
    editor.history_add("only");

    let input = [UP, UP, UP, b"\r"].concat();
    let line = edit(&mut editor, &input).unwrap();
    assert_eq!(line, "only");
}

#[test]
fn down_at_the_newest_entry_is_a_noop() {
    let mut editor = Editor::new();
    editor.history_add("foo");

    let input = [DOWN, b"hi\r".as_slice()].concat();
    let line = edit(&mut editor, &input).unwrap();
    assert_eq!(line, "hi");
}

#[test]
fn up_with_empty_history_is_a_noop() {
    let mut editor = Editor::new();
    let input = [UP, b"\r".as_slice()].concat();
    let line = edit(&mut editor, &input).unwrap();
    assert_eq!(line, "");
}

#[test]
fn up_then_down_restores_the_edit_in_progress() {
    let mut editor = Editor::new();
    editor.history_add("older");

    let input = [b"draft".as_slice(), UP, DOWN, b"\r"].concat();
    let line = edit(&mut editor, &input).unwrap();
    assert_eq!(line, "draft");
}

#[test]
fn ctrl_p_and_ctrl_n_mirror_the_arrows() {
    let mut editor = Editor::new();
    editor.history_add("foo");
    editor.history_add("bar");

    // Two back, one forward: lands on "bar".
    let line = edit(&mut editor, b"\x10\x10\x0e\r").unwrap();
    assert_eq!(line, "bar");
}

// ── Completion ────────────────────────────────────────────────────────────────

fn help_host_editor() -> Editor {
    let mut editor = Editor::new();
    editor.set_completion_callback(|line, out| {
        for candidate in ["help", "host"] {
            if candidate.starts_with(line) {
                out.add(candidate);
            }
        }
    });
    editor
}

#[test]
fn second_tab_commits_the_second_candidate() {
    let mut editor = help_host_editor();
    // First Tab shows "help", second shows "host", Enter commits it.
    let line = edit(&mut editor, b"h\t\t\r").unwrap();
    assert_eq!(line, "host");
}

#[test]
fn committing_key_applies_candidate_then_dispatches() {
    let mut editor = help_host_editor();
    // Tab shows "help"; "x" commits it and is then inserted.
    let line = edit(&mut editor, b"h\tx\r").unwrap();
    assert_eq!(line, "helpx");
}

#[test]
fn escape_cancels_the_completion_cycle() {
    let mut editor = help_host_editor();
    let line = edit(&mut editor, b"h\t\x1b\r").unwrap();
    assert_eq!(line, "h");
}

#[test]
fn tab_cycling_past_the_end_shows_the_original_line() {
    let mut editor = help_host_editor();
    // Three Tabs wrap past both candidates back to the original buffer;
    // Enter then submits the uncompleted line.
    let line = edit(&mut editor, b"h\t\t\t\r").unwrap();
    assert_eq!(line, "h");
}

#[test]
fn empty_completion_set_beeps_and_consumes_only_the_tab() {
    let mut editor = Editor::new();
    editor.set_completion_callback(|_, _| {});

    let (result, output) = edit_capture(&mut editor, b"h\tx\r");
    assert_eq!(result.unwrap(), "hx");
    assert!(output.contains(&0x07), "no beep in output");
}

#[test]
fn tab_without_callback_inserts_a_literal_tab() {
    let mut editor = Editor::new();
    let line = edit(&mut editor, b"a\tb\r").unwrap();
    assert_eq!(line, "a\tb");
}

// ── Multi-line mode ───────────────────────────────────────────────────────────

#[test]
fn multiline_session_returns_a_wrapped_line() {
    let mut editor = Editor::new();
    editor.set_multiline(true);
    editor.set_cols(10);

    let mut input = vec![b'a'; 25];
    input.push(b'\r');
    let line = edit(&mut editor, &input).unwrap();
    assert_eq!(line, "a".repeat(25));
}

#[test]
fn multiline_forces_a_fresh_row_at_the_column_boundary() {
    let mut editor = Editor::new();
    editor.set_multiline(true);
    editor.set_cols(10);

    // Prompt (2) + 8 bytes fills the row exactly; the paint must emit a
    // newline so the cursor has a visible cell.
    let (result, output) = edit_capture(&mut editor, b"abcdefgh\r");
    assert_eq!(result.unwrap(), "abcdefgh");
    let needle = b"\n\r";
    assert!(
        output.windows(needle.len()).any(|w| w == needle),
        "no forced row break in output"
    );
}

#[test]
fn multiline_repaints_instead_of_fast_path() {
    let mut editor = Editor::new();
    editor.set_multiline(true);

    let (result, output) = edit_capture(&mut editor, b"hi\r");
    assert_eq!(result.unwrap(), "hi");
    // Every keystroke repaints: erase-to-end sequences appear.
    let needle = b"\x1b[0K";
    assert!(
        output.windows(needle.len()).any(|w| w == needle),
        "multi-line paint missing"
    );
}
