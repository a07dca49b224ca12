//! Untrusted input handling.
//!
//! Every JSON read in the engine goes through [`safe_parse`], and every
//! "where is the entry array in this document" decision goes through the
//! tagged [`Extraction`] list. Keeping both in one place means the
//! error-swallowing and the shape guessing can each be audited once.

mod document;

pub use document::{
    extract_entries, safe_parse, Extraction, IMPORT_EXTRACTIONS, REMOTE_EXTRACTIONS,
};
