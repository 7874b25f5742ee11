//! Fuzz target for detection JSON parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the detections reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zonecount::ir::io_json::from_detections_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_detections_slice(data);
});
