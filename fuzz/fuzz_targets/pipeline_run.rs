//! Fuzz target for the full pipeline.
//!
//! Any detections that parse must run to completion or return an error:
//! NaN scores, inverted boxes and junk class ids must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zonecount::ir::io_json::from_detections_slice;
use zonecount::ir::ClassRegistry;
use zonecount::pipeline::{run, PipelineConfig};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(raw) = from_detections_slice(data) else {
        return;
    };
    let config = PipelineConfig::new(ClassRegistry::new(["garbage bin", "crate"]), 640, 480);
    let _ = run(&raw, &config);
});
