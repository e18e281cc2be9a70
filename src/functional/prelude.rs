//! Prelude for the validation building blocks
//!
//! Re-exports the rule trait, the primitives and combinators, and the
//! validator factory so callers can build their own forms with one import.

pub use crate::functional::validation_engine::{
    create_validator, BatchReport, FormValidator, ValidationReport,
};
pub use crate::functional::validation_rules::{
    all, field, some, Contains, Custom, Length, OneOf, Pattern, Range, Required, Rule,
    StartsWith, ValidationRule,
};
