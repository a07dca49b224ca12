//! Fuzz target for the normalizer.
//!
//! Checks that normalization:
//! 1. Never panics on any JSON document
//! 2. Only rejects non-objects
//! 3. Is idempotent on what it produces

#![no_main]

use libfuzzer_sys::fuzz_target;
use swatch::normalize;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    match normalize(&value) {
        Some(entry) => {
            assert!(value.is_object());
            assert!(!entry.id.is_empty());
            assert!(!entry.name.is_empty());
            assert_eq!(normalize(&entry.to_value()), Some(entry));
        }
        None => assert!(!value.is_object()),
    }
});
