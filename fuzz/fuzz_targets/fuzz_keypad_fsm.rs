//! Fuzz target: `KeypadFsm::update`
//!
//! Each input byte is one tick's scan result (bytes outside the keymap
//! read as "no key"). Asserts that every release was preceded by a held
//! key of the same character and that no key is released twice for one
//! press.
//!
//! cargo fuzz run fuzz_keypad_fsm

#![no_main]

use gasalarm::config::SystemConfig;
use gasalarm::keypad::{KeypadFsm, position_of};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut fsm = KeypadFsm::new(&SystemConfig::default());
    let mut previous_scan = None;
    let mut released_since_press = false;

    for &byte in data {
        let key = char::from(byte);
        let scan = position_of(key).map(|_| key);
        if scan.is_some() && scan != previous_scan {
            released_since_press = false;
        }

        if let Some(released) = fsm.update(|| scan) {
            assert_eq!(scan, None, "release only on an empty scan");
            assert_eq!(previous_scan, Some(released), "release follows its own key");
            assert!(!released_since_press, "one release per press");
            released_since_press = true;
        }
        previous_scan = scan;
    }
});
