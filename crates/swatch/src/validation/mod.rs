//! Validation of candidate entries for user-facing reports.

mod lint;
mod result;
mod validators;

pub use lint::lint;
pub use result::ValidationResult;
pub use validators::{
    validate, ArrayValidator, EnumValidator, OptionalTextValidator, RequiredTextValidator,
    ValidationEngine, Validator, VersionValidator,
};
