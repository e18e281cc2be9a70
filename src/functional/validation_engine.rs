//! Validator Factory
//!
//! Binds record-level rules to field keys and error messages, and turns a
//! record into a [`ValidationReport`]. The validator is built once and is
//! immutable afterwards; it holds no per-call state, so a single instance can
//! serve any number of callers (and threads) concurrently.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use itertools::Itertools;
use serde_derive::Serialize;

#[cfg(feature = "functional")]
use rayon::prelude::*;

use crate::error::{FormError, FormResult};
use crate::functional::validation_rules::{all, Rule, ValidationRule};

/// Outcome of validating one record.
///
/// `errors` holds one message per failed field, ordered by field key.
/// Fields that passed, and fields without a rule, never appear in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport<K: Ord> {
    valid: bool,
    errors: BTreeMap<K, String>,
}

impl<K: Ord> ValidationReport<K> {
    /// A report with no failures.
    pub fn passed() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
        }
    }

    /// Records a failed field, marking the report invalid.
    pub fn add_error(mut self, field: K, message: impl Into<String>) -> Self {
        self.push_error(field, message.into());
        self
    }

    /// Merges the failures of `other` into this report.
    pub fn combine(mut self, other: ValidationReport<K>) -> Self {
        for (field, message) in other.errors {
            self.push_error(field, message);
        }
        self
    }

    fn push_error(&mut self, field: K, message: String) {
        self.errors.insert(field, message);
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &BTreeMap<K, String> {
        &self.errors
    }

    pub fn error_for(&self, field: &K) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn failed_fields(&self) -> impl Iterator<Item = &K> {
        self.errors.keys()
    }

    pub fn into_errors(self) -> BTreeMap<K, String> {
        self.errors
    }
}

impl<K: Ord> Default for ValidationReport<K> {
    fn default() -> Self {
        Self::passed()
    }
}

struct FieldCheck<K, T: ?Sized> {
    field: K,
    rule: Rule<T>,
    message: String,
}

/// Ordered set of `(field, rule, message)` triples.
///
/// Every ruled field carries a message by construction, so a failing rule can
/// never produce a blank error entry.
pub struct FormValidator<K, T: ?Sized> {
    checks: Vec<FieldCheck<K, T>>,
}

impl<K, T> FormValidator<K, T>
where
    K: Ord + Clone + Display,
    T: ?Sized,
{
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Registers `rule` for `key`. Registering a key twice replaces the
    /// earlier rule and message but keeps the original position.
    pub fn field<R>(mut self, key: K, rule: R, message: impl Into<String>) -> Self
    where
        R: ValidationRule<T> + Send + Sync + 'static,
    {
        let check = FieldCheck {
            field: key,
            rule: Rule::new(rule),
            message: message.into(),
        };

        match self.checks.iter_mut().find(|existing| existing.field == check.field) {
            Some(existing) => {
                log::warn!("replacing validation rule for field {}", check.field);
                *existing = check;
            }
            None => self.checks.push(check),
        }
        self
    }

    /// Evaluates every registered rule exactly once, in registration order.
    ///
    /// A rule that panics aborts the whole call; no partial report is returned.
    pub fn validate(&self, record: &T) -> ValidationReport<K> {
        let report = self
            .checks
            .iter()
            .filter(|check| !check.rule.check(record))
            .fold(ValidationReport::passed(), |report, check| {
                report.add_error(check.field.clone(), check.message.clone())
            });

        if report.is_valid() {
            log::trace!("record passed {} field rules", self.checks.len());
        } else {
            log::debug!(
                "record failed validation on fields: {}",
                report.failed_fields().join(", ")
            );
        }

        report
    }

    /// Pass/fail without messages. Stops at the first failing field.
    pub fn is_valid(&self, record: &T) -> bool {
        self.checks.iter().all(|check| check.rule.check(record))
    }

    pub fn fields(&self) -> impl Iterator<Item = &K> {
        self.checks.iter().map(|check| &check.field)
    }

    pub fn message_for(&self, key: &K) -> Option<&str> {
        self.checks
            .iter()
            .find(|check| &check.field == key)
            .map(|check| check.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Collapses the per-field rules into a single whole-record rule.
    pub fn into_rule(self) -> Rule<T>
    where
        T: 'static,
    {
        let rules: Vec<Rule<T>> = self.checks.into_iter().map(|check| check.rule).collect();
        Rule::new(all(rules))
    }
}

impl<K, T> FormValidator<K, T>
where
    K: Ord + Clone + Display + Send + Sync,
    T: Sync,
{
    /// Validates many records, in parallel when the `functional` feature is on.
    /// Reports come back in input order.
    pub fn validate_batch(&self, records: &[T]) -> BatchReport<K> {
        #[cfg(feature = "functional")]
        let reports: Vec<_> = records.par_iter().map(|record| self.validate(record)).collect();

        #[cfg(not(feature = "functional"))]
        let reports: Vec<_> = records.iter().map(|record| self.validate(record)).collect();

        BatchReport::new(reports)
    }
}

impl<K, T> Default for FormValidator<K, T>
where
    K: Ord + Clone + Display,
    T: ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a validator from a rule set and a message set.
///
/// Rule entries of `None` are skipped: no rule means no constraint. Messages
/// for fields without a rule are ignored.
///
/// # Errors
///
/// - [`FormError::MissingMessage`] when a ruled field has no message.
/// - [`FormError::DuplicateField`] when the rule set names a field twice.
pub fn create_validator<K, T, I>(
    rules: I,
    mut messages: HashMap<K, String>,
) -> FormResult<FormValidator<K, T>>
where
    K: Ord + Clone + Display + Hash,
    T: ?Sized,
    I: IntoIterator<Item = (K, Option<Rule<T>>)>,
{
    let mut checks: Vec<FieldCheck<K, T>> = Vec::new();
    let mut seen: HashSet<K> = HashSet::new();

    for (field, rule) in rules {
        if !seen.insert(field.clone()) {
            return Err(FormError::DuplicateField {
                field: field.to_string(),
            });
        }

        let Some(rule) = rule else {
            log::debug!("field {} has no rule, skipping", field);
            continue;
        };

        let message = messages
            .remove(&field)
            .ok_or_else(|| FormError::MissingMessage {
                field: field.to_string(),
            })?;

        checks.push(FieldCheck {
            field,
            rule,
            message,
        });
    }

    Ok(FormValidator { checks })
}

/// Summary of a batch validation run.
#[derive(Debug, Clone)]
pub struct BatchReport<K: Ord> {
    /// One report per input record, in input order.
    pub reports: Vec<ValidationReport<K>>,
    pub total_processed: usize,
    pub total_invalid: usize,
}

impl<K: Ord> BatchReport<K> {
    fn new(reports: Vec<ValidationReport<K>>) -> Self {
        let total_invalid = reports.iter().filter(|report| !report.is_valid()).count();
        Self {
            total_processed: reports.len(),
            total_invalid,
            reports,
        }
    }

    pub fn is_all_valid(&self) -> bool {
        self.total_invalid == 0
    }

    /// Percentage of valid records; 0.0 for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            let valid = self.total_processed - self.total_invalid;
            (valid as f64 / self.total_processed as f64) * 100.0
        }
    }

    /// How many records failed each field.
    pub fn failures_by_field(&self) -> HashMap<K, usize>
    where
        K: Clone + Hash,
    {
        self.reports
            .iter()
            .flat_map(|report| report.failed_fields())
            .cloned()
            .counts()
    }
}
