//! 4×4 matrix keypad: scanning and debounce.
//!
//! ```text
//!   KeyMatrix::scan()  ──▶  KeypadFsm::update()  ──▶  Option<char> (released key)
//!   (raw, per tick)         (debounce + hold)          (one per physical press)
//! ```
//!
//! The scanner reports whatever key is down *right now*; the FSM turns that
//! into exactly one release event per press.

pub mod fsm;
pub mod matrix;

pub use fsm::{KeypadFsm, KeypadState};
pub use matrix::PinMatrix;

pub const KEYPAD_ROWS: usize = 4;
pub const KEYPAD_COLS: usize = 4;

/// Number of characters in a disarm code.
pub const CODE_LEN: usize = 4;

/// Key submitting the typed code for comparison.
pub const SUBMIT_KEY: char = '#';

/// Character printed on each key, indexed `[row][col]`.
pub const KEYMAP: [[char; KEYPAD_COLS]; KEYPAD_ROWS] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// Raw key scanner. Returns the first pressed key in row-major order, or
/// `None` when nothing is pressed.
pub trait KeyMatrix {
    fn scan(&mut self) -> Option<char>;
}

/// Row and column of `key` on the keypad, if it exists.
pub fn position_of(key: char) -> Option<(usize, usize)> {
    KEYMAP.iter().enumerate().find_map(|(row, keys)| {
        keys.iter().position(|&k| k == key).map(|col| (row, col))
    })
}
