//! Fuzz target: cpuinfo serial parsing
//!
//! Feeds arbitrary text to `parse_serial` and verifies:
//! - No panics under arbitrary input
//! - An accepted serial is exactly 16 lowercase hex digits and not all zero
//!
//! cargo fuzz run fuzz_cpuinfo_serial

#![no_main]

use greenhouse::adapters::device_id::parse_serial;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(serial) = parse_serial(text) {
        assert_eq!(serial.len(), 16);
        assert!(serial.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        assert!(serial.bytes().any(|b| b != b'0'));
    }
});
