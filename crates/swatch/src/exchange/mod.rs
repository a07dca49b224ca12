//! Import/export pipeline.
//!
//! Imports go through the validator rather than the silent normalizer, so
//! the caller can show exactly which candidates were rejected and why.
//! Exports renormalize and de-duplicate before serializing, so an export
//! always re-imports cleanly.
//!
//! ```
//! use swatch::exchange::{build_export, parse_import, ExportOptions};
//! use swatch::loader::builtin_entries;
//!
//! let options = ExportOptions::new().with_builtins(true);
//! let text = build_export(&builtin_entries(), &options).to_json().unwrap();
//!
//! let preview = parse_import(&text);
//! assert!(preview.is_valid);
//! assert_eq!(preview.entries, builtin_entries());
//! ```

mod export;
mod import;

pub use export::{
    build_export, build_export_at, export_file_name, ExportDocument, ExportMetadata, ExportOptions,
    DEFAULT_BUILTIN_PREFIX, EXPORT_FORMAT_VERSION,
};
pub use import::{parse_import, ImportResult, ImportSummary};
