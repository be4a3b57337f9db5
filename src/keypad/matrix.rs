//! Row/column matrix scanner over `embedded-hal` pins.
//!
//! Rows are outputs, columns are pulled-up inputs. To scan row `r`, every
//! row is driven high and row `r` is pulled low; a pressed key on that row
//! shorts its column low. The first low column in row-major order wins, so
//! with several keys held only one is reported.
//!
//! Pin errors count as "not pressed". A misread is simply corrected by the
//! next tick's scan.

use embedded_hal::digital::{InputPin, OutputPin};

use super::{KEYMAP, KEYPAD_COLS, KEYPAD_ROWS, KeyMatrix};

pub struct PinMatrix<R, C> {
    rows: [R; KEYPAD_ROWS],
    cols: [C; KEYPAD_COLS],
}

impl<R: OutputPin, C: InputPin> PinMatrix<R, C> {
    pub fn new(rows: [R; KEYPAD_ROWS], cols: [C; KEYPAD_COLS]) -> Self {
        Self { rows, cols }
    }

    fn select_row(&mut self, row: usize) {
        for pin in &mut self.rows {
            let _ = pin.set_high();
        }
        let _ = self.rows[row].set_low();
    }
}

impl<R: OutputPin, C: InputPin> KeyMatrix for PinMatrix<R, C> {
    fn scan(&mut self) -> Option<char> {
        for row in 0..KEYPAD_ROWS {
            self.select_row(row);
            for col in 0..KEYPAD_COLS {
                if self.cols[col].is_low().unwrap_or(false) {
                    return Some(KEYMAP[row][col]);
                }
            }
        }
        None
    }
}
