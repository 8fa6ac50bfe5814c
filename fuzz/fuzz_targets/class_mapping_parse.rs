//! Fuzz target for class mapping parsing and dense-id validation.

#![no_main]

use brahmi_prep::vocab::fuzz_parse_class_mapping;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_parse_class_mapping(data);
});
