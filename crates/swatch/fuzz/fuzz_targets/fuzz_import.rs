//! Fuzz target for the import pipeline.
//!
//! Checks that parsing an import file never panics on arbitrary text and
//! that the summary always accounts for every candidate.

#![no_main]

use libfuzzer_sys::fuzz_target;
use swatch::parse_import;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let text = String::from_utf8_lossy(data);
    let result = parse_import(&text);

    assert_eq!(result.is_valid, !result.entries.is_empty());
    assert_eq!(
        result.summary.total,
        result.summary.valid + result.summary.invalid + result.summary.skipped
    );
});
