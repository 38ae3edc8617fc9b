//! Control-key codes and the escape-sequence decoder.

use std::io::{ErrorKind, Read};

// Control bytes dispatched by the editor. Ctrl-R (0x12) is reserved for
// reverse search; like any other unlisted byte it currently falls through
// to plain insertion.
pub(crate) const CTRL_A: u8 = 1; // home
pub(crate) const CTRL_B: u8 = 2; // left
pub(crate) const CTRL_C: u8 = 3; // abort
pub(crate) const CTRL_D: u8 = 4; // delete, or EOF on an empty line
pub(crate) const CTRL_E: u8 = 5; // end
pub(crate) const CTRL_F: u8 = 6; // right
pub(crate) const CTRL_H: u8 = 8; // backspace
pub(crate) const TAB: u8 = 9;
pub(crate) const CTRL_K: u8 = 11; // kill to end of line
pub(crate) const CTRL_L: u8 = 12; // clear screen
pub(crate) const ENTER: u8 = 13; // carriage return
pub(crate) const CTRL_N: u8 = 14; // history next
pub(crate) const CTRL_P: u8 = 16; // history previous
pub(crate) const CTRL_T: u8 = 20; // swap chars
pub(crate) const CTRL_U: u8 = 21; // kill line
pub(crate) const CTRL_W: u8 = 23; // delete previous word
pub(crate) const ESC: u8 = 27;
pub(crate) const BACKSPACE: u8 = 127;

/// Read one byte, retrying interrupted reads.
///
/// `None` means the input is closed or broken; the caller ends the session
/// with whatever content it has.
pub(crate) fn read_byte(input: &mut impl Read) -> Option<u8> {
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte) {
            Ok(0) => return None,
            Ok(_) => return Some(byte[0]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                log::debug!("input read failed: {e}");
                return None;
            }
        }
    }
}

/// Logical key decoded from the bytes following an ESC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscKey {
    Up,
    Down,
    Right,
    Left,
    Home,
    End,
    Delete,
    /// Anything unrecognized, including a sequence cut short by closed
    /// input. Treated as a no-op by the dispatcher.
    Unknown,
}

/// Decode an `ESC [ …` or `ESC O …` sequence.
///
/// Two follow-up reads cover the letter forms (`ESC [ A`, `ESC O H`); a
/// digit after the bracket means an extended form terminated by `~`, which
/// costs one more read (`ESC [ 3 ~` is Delete; the remaining digit forms
/// are reserved and ignored).
pub(crate) fn decode_escape(input: &mut impl Read) -> EscKey {
    let Some(b0) = read_byte(input) else {
        return EscKey::Unknown;
    };
    let Some(b1) = read_byte(input) else {
        return EscKey::Unknown;
    };
    match (b0, b1) {
        (b'[', b'0'..=b'9') => match read_byte(input) {
            Some(b'~') if b1 == b'3' => EscKey::Delete,
            _ => EscKey::Unknown,
        },
        (b'[', b'A') => EscKey::Up,
        (b'[', b'B') => EscKey::Down,
        (b'[', b'C') => EscKey::Right,
        (b'[', b'D') => EscKey::Left,
        (b'[', b'H') => EscKey::Home,
        (b'[', b'F') => EscKey::End,
        (b'O', b'H') => EscKey::Home,
        (b'O', b'F') => EscKey::End,
        _ => EscKey::Unknown,
    }
}
