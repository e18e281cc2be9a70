//! Composable Validation Rules
//!
//! This module provides pure, composable predicates that can be combined
//! using functional programming patterns. A rule answers a single yes/no
//! question about a value; messages are attached one level up, by the
//! validator that owns the rule (see `validation_engine`).
//!
//! Value-level primitives (`Required`, `Length`, `Pattern`, ...) work on a
//! single field. `field` lifts them onto a whole record, and `all` / `some`
//! combine record-level rules into new rules of the same shape.

use regex::Regex;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Core validation rule trait for composable validation
pub trait ValidationRule<T: ?Sized> {
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, R: ValidationRule<T> + ?Sized> ValidationRule<T> for Box<R> {
    fn check(&self, value: &T) -> bool {
        (**self).check(value)
    }
}

/// Type-erased, shareable rule.
///
/// Cloning is cheap (the underlying predicate lives behind an `Arc`), and the
/// rule is `Send + Sync`, so one instance can back any number of concurrent
/// validations.
pub struct Rule<T: ?Sized> {
    inner: Arc<dyn ValidationRule<T> + Send + Sync>,
}

impl<T: ?Sized> Rule<T> {
    /// Erases a concrete rule.
    ///
    /// # Examples
    ///
    /// ```
    /// let rule: Rule<str> = Rule::new(Required);
    /// assert!(rule.check("Ada"));
    /// ```
    pub fn new<R>(rule: R) -> Self
    where
        R: ValidationRule<T> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(rule),
        }
    }

    /// Wraps a plain predicate closure.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(Custom::new(predicate))
    }

    pub fn check(&self, value: &T) -> bool {
        self.inner.check(value)
    }
}

impl<T: ?Sized> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}

impl<T: ?Sized> ValidationRule<T> for Rule<T> {
    fn check(&self, value: &T) -> bool {
        self.inner.check(value)
    }
}

/// Required field validation - the value must be non-empty.
///
/// Whitespace counts as content: `" "` passes.
pub struct Required;

impl ValidationRule<str> for Required {
    fn check(&self, value: &str) -> bool {
        !value.is_empty()
    }
}

/// String length validation, counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Length {
    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

impl ValidationRule<str> for Length {
    /// Validates that a string's character count falls within the optional bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// let rule = Length { min: Some(2), max: Some(4) };
    /// assert!(rule.check("hi"));
    /// assert!(!rule.check("h"));
    /// assert!(!rule.check("hello"));
    /// ```
    fn check(&self, value: &str) -> bool {
        let len = value.chars().count();

        if let Some(min) = self.min {
            if len < min {
                return false;
            }
        }

        if let Some(max) = self.max {
            if len > max {
                return false;
            }
        }

        true
    }
}

/// Substring presence.
#[derive(Debug, Clone)]
pub struct Contains {
    needle: String,
}

impl Contains {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl ValidationRule<str> for Contains {
    fn check(&self, value: &str) -> bool {
        value.contains(self.needle.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct StartsWith {
    prefix: String,
}

impl StartsWith {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ValidationRule<str> for StartsWith {
    fn check(&self, value: &str) -> bool {
        value.starts_with(self.prefix.as_str())
    }
}

/// Regex search. The pattern matches anywhere in the value unless it is
/// anchored with `^...$`.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }
}

impl ValidationRule<str> for Pattern {
    fn check(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Membership in a fixed set of allowed values.
#[derive(Debug, Clone)]
pub struct OneOf<A> {
    allowed_values: Vec<A>,
}

impl<A: AsRef<str>> OneOf<A> {
    /// Creates a OneOf validator that accepts only the provided allowed values.
    ///
    /// # Examples
    ///
    /// ```
    /// let rule = OneOf::new(vec!["red", "green"]);
    /// assert!(rule.check("red"));
    /// assert!(!rule.check("blue"));
    /// ```
    pub fn new(allowed_values: Vec<A>) -> Self {
        Self { allowed_values }
    }
}

impl<A: AsRef<str>> ValidationRule<str> for OneOf<A> {
    fn check(&self, value: &str) -> bool {
        self.allowed_values.iter().any(|allowed| allowed.as_ref() == value)
    }
}

/// Inclusive range validation for any ordered value.
#[derive(Debug, Clone, Copy)]
pub struct Range<N> {
    pub min: Option<N>,
    pub max: Option<N>,
}

impl<N> Range<N> {
    pub fn new(min: Option<N>, max: Option<N>) -> Self {
        Self { min, max }
    }
}

impl<N: PartialOrd> ValidationRule<N> for Range<N> {
    /// `NaN` and other incomparable values never fall inside a bound.
    fn check(&self, value: &N) -> bool {
        let above_min = self.min.as_ref().map_or(true, |min| value >= min);
        let below_max = self.max.as_ref().map_or(true, |max| value <= max);
        above_min && below_max
    }
}

/// Custom predicate validation
pub struct Custom<F> {
    predicate: F,
}

impl<F> Custom<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F, T> ValidationRule<T> for Custom<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool,
{
    fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

/// Applies a value-level rule to one field of a record.
pub struct FieldRule<T: ?Sized, U: ?Sized, F, R> {
    accessor: F,
    rule: R,
    _phantom: PhantomData<fn(&T) -> &U>,
}

impl<T, U, F, R> ValidationRule<T> for FieldRule<T, U, F, R>
where
    T: ?Sized,
    U: ?Sized,
    F: Fn(&T) -> &U,
    R: ValidationRule<U>,
{
    fn check(&self, value: &T) -> bool {
        self.rule.check((self.accessor)(value))
    }
}

/// Lifts `rule` onto a record by projecting one of its fields.
///
/// # Examples
///
/// ```
/// struct Login { user: String }
/// let rule = field(|login: &Login| login.user.as_str(), Required);
/// assert!(rule.check(&Login { user: "ada".into() }));
/// ```
pub fn field<T, U, F, R>(accessor: F, rule: R) -> FieldRule<T, U, F, R>
where
    T: ?Sized,
    U: ?Sized,
    F: Fn(&T) -> &U,
    R: ValidationRule<U>,
{
    FieldRule {
        accessor,
        rule,
        _phantom: PhantomData,
    }
}

/// Logical AND over a sequence of rules.
pub struct AllValidator<T: ?Sized, R> {
    rules: Vec<R>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T: ?Sized, R: ValidationRule<T>> ValidationRule<T> for AllValidator<T, R> {
    fn check(&self, value: &T) -> bool {
        self.rules.iter().all(|rule| rule.check(value))
    }
}

/// Builds a rule that passes iff every rule in `rules` passes.
///
/// An empty sequence passes vacuously. Evaluation stops at the first failure.
pub fn all<T, R, I>(rules: I) -> AllValidator<T, R>
where
    T: ?Sized,
    R: ValidationRule<T>,
    I: IntoIterator<Item = R>,
{
    AllValidator {
        rules: rules.into_iter().collect(),
        _phantom: PhantomData,
    }
}

/// Logical OR over a sequence of rules.
pub struct AnyValidator<T: ?Sized, R> {
    rules: Vec<R>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T: ?Sized, R: ValidationRule<T>> ValidationRule<T> for AnyValidator<T, R> {
    fn check(&self, value: &T) -> bool {
        self.rules.iter().any(|rule| rule.check(value))
    }
}

/// Builds a rule that passes iff at least one rule in `rules` passes.
///
/// An empty sequence never passes. Evaluation stops at the first success.
pub fn some<T, R, I>(rules: I) -> AnyValidator<T, R>
where
    T: ?Sized,
    R: ValidationRule<T>,
    I: IntoIterator<Item = R>,
{
    AnyValidator {
        rules: rules.into_iter().collect(),
        _phantom: PhantomData,
    }
}
