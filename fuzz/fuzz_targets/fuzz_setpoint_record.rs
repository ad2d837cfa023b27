//! Fuzz target: setpoint record decoding
//!
//! Feeds arbitrary bytes to `decode_record` and verifies:
//! - No panics under arbitrary input
//! - Anything accepted is finite
//! - Anything accepted re-encodes to a record that decodes to the same value
//!
//! cargo fuzz run fuzz_setpoint_record

#![no_main]

use greenhouse::adapters::setpoint_file::{RECORD_LEN, decode_record, encode_record};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(setpoints) = decode_record(data) else {
        return;
    };
    assert!(setpoints.is_finite(), "decoded non-finite setpoints");

    let bytes = encode_record(&setpoints).expect("finite setpoints must encode");
    assert_eq!(bytes.len(), RECORD_LEN);
    assert_eq!(decode_record(&bytes), Ok(setpoints));
});
