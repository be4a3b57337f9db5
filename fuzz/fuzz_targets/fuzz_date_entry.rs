//! Fuzz target: `DateTimeEntry::parse` → `to_epoch` → `format_ctime`
//!
//! Arbitrary console bytes must either be rejected or produce an epoch
//! that formats and re-parses to the same instant.
//!
//! cargo fuzz run fuzz_date_entry

#![no_main]

use gasalarm::console::datetime::{DateTimeEntry, format_ctime};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(entry) = DateTimeEntry::parse(data) else {
        return;
    };
    assert_eq!(data.len(), 14, "only full entries parse");

    if let Ok(epoch) = entry.to_epoch() {
        let text = format_ctime(epoch);
        assert!(!text.is_empty(), "valid epoch must format");
        assert!(text.ends_with(format!("{:04}", entry.year).as_str()));
    }
});
