use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;

use crate::{
    config::policy::FormPolicy,
    functional::{
        validation_engine::{FormValidator, ValidationReport},
        validation_rules::{
            all, field, some, Contains, Length, OneOf, Pattern, Range, Required, Rule,
            StartsWith, ValidationRule,
        },
    },
    models::applicant::{ApplicationField, ApplicationForm},
    utils::dates::{parse_date, years_between, Clock, SystemClock},
};

pub type ApplicationRule = Rule<ApplicationForm>;
pub type ApplicationValidator = FormValidator<ApplicationField, ApplicationForm>;

static SAFE_PHONE_CHARACTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s()+\-]*$").unwrap());
static CAPITAL_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

fn name(form: &ApplicationForm) -> &str {
    &form.name
}

fn email(form: &ApplicationForm) -> &str {
    &form.email
}

fn phone(form: &ApplicationForm) -> &str {
    &form.phone
}

fn specialty(form: &ApplicationForm) -> &str {
    &form.specialty
}

fn custom_specialty(form: &ApplicationForm) -> &str {
    &form.custom_specialty
}

fn password(form: &ApplicationForm) -> &str {
    &form.password
}

pub fn name_rule() -> ApplicationRule {
    Rule::new(field(name, Required))
}

/// Presence of `@` and `.`, not a full address check.
pub fn email_rule() -> ApplicationRule {
    Rule::new(all(vec![
        Rule::new(field(email, Contains::new("@"))),
        Rule::new(field(email, Contains::new("."))),
    ]))
}

/// International format only: a leading `+`, then digits, whitespace, `-`, `(`, `)` or `+`.
pub fn phone_rule() -> ApplicationRule {
    Rule::new(all(vec![
        Rule::new(field(phone, StartsWith::new("+"))),
        Rule::new(field(phone, Pattern::from_regex(Regex::clone(&SAFE_PHONE_CHARACTERS)))),
    ]))
}

/// The birth date must parse and the applicant's age, by calendar-year
/// subtraction against `clock`, must fall inside the policy's age range.
pub fn birth_date_rule(policy: &FormPolicy, clock: Arc<dyn Clock>) -> ApplicationRule {
    let valid_date = Rule::from_fn(|form: &ApplicationForm| parse_date(&form.birth_date).is_some());

    let allowed_age = Range::new(Some(policy.min_age_years), Some(policy.max_age_years));
    let within_age = Rule::from_fn(move |form: &ApplicationForm| {
        parse_date(&form.birth_date)
            .map(|birth| years_between(birth, clock.today()))
            .map_or(false, |age| allowed_age.check(&age))
    });

    Rule::new(all(vec![valid_date, within_age]))
}

/// A known specialty, or a non-empty custom one within the length limit.
pub fn specialty_rule(policy: &FormPolicy) -> ApplicationRule {
    let known = field(specialty, OneOf::new(policy.known_specialties.clone()));
    let custom = field(
        custom_specialty,
        all(vec![
            Rule::<str>::new(Required),
            Rule::new(Length::at_most(policy.max_specialty_length)),
        ]),
    );

    Rule::new(some(vec![Rule::new(known), Rule::new(custom)]))
}

pub fn experience_rule(policy: &FormPolicy) -> ApplicationRule {
    let number_like =
        Rule::from_fn(|form: &ApplicationForm| experience_years(&form.experience).is_finite());

    let enough = Range::new(Some(policy.min_experience_years), None);
    let experienced = Rule::from_fn(move |form: &ApplicationForm| {
        enough.check(&experience_years(&form.experience))
    });

    Rule::new(all(vec![number_like, experienced]))
}

pub fn password_rule(policy: &FormPolicy) -> ApplicationRule {
    Rule::new(all(vec![
        Rule::new(field(password, Length::at_least(policy.min_password_length))),
        Rule::new(field(password, Pattern::from_regex(Regex::clone(&CAPITAL_LETTER)))),
        Rule::new(field(password, Pattern::from_regex(Regex::clone(&DIGIT)))),
    ]))
}

/// Numeric reading of the experience input: blank means zero, `0x`/`0o`/`0b`
/// prefixes are honoured, anything else unparsable is `NaN`.
fn experience_years(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }

    let radix = match raw.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_literal(&raw[2..], radix).unwrap_or(f64::NAN);
    }

    raw.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned digits only; accumulates in `f64` so long literals stay finite.
fn radix_literal(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

/// Error copy shown next to each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub specialty: String,
    pub experience: String,
    pub password: String,
}

impl ErrorMessages {
    pub fn new(policy: &FormPolicy) -> Self {
        Self {
            name: "Your name is required for this mission.".to_string(),
            email: "The correct email format is user@example.com.".to_string(),
            phone: "Please, use only +, -, (, ), and whitespace.".to_string(),
            birth_date: format!(
                "We require applicants to be between {} and {} years.",
                policy.min_age_years, policy.max_age_years
            ),
            specialty: format!(
                "Please, use up to {} characters to describe your specialty.",
                policy.max_specialty_length
            ),
            experience: format!(
                "For this mission, we search for experience of {}+ years.",
                policy.min_experience_years
            ),
            password: format!(
                "Your password should be longer than {} characters, include a capital letter and a digit.",
                policy.min_password_length
            ),
        }
    }
}

/// Build a validator for `ApplicationForm` with one rule and one message per
/// constrained field. `photo` and `customSpecialty` carry no rule of their own.
pub fn application_validator(policy: &FormPolicy, clock: Arc<dyn Clock>) -> ApplicationValidator {
    let messages = ErrorMessages::new(policy);

    FormValidator::new()
        .field(ApplicationField::Name, name_rule(), messages.name)
        .field(ApplicationField::Email, email_rule(), messages.email)
        .field(ApplicationField::Phone, phone_rule(), messages.phone)
        .field(
            ApplicationField::BirthDate,
            birth_date_rule(policy, clock),
            messages.birth_date,
        )
        .field(ApplicationField::Specialty, specialty_rule(policy), messages.specialty)
        .field(ApplicationField::Experience, experience_rule(policy), messages.experience)
        .field(ApplicationField::Password, password_rule(policy), messages.password)
}

/// Whole-form rule for callers that only need pass/fail.
pub fn form_rule(policy: &FormPolicy, clock: Arc<dyn Clock>) -> ApplicationRule {
    Rule::new(all(vec![
        name_rule(),
        email_rule(),
        phone_rule(),
        birth_date_rule(policy, clock),
        specialty_rule(policy),
        experience_rule(policy),
        password_rule(policy),
    ]))
}

/// Validate an `ApplicationForm` against the default policy and the system clock.
pub fn validate_application(form: &ApplicationForm) -> ValidationReport<ApplicationField> {
    static APPLICATION_VALIDATOR: OnceCell<ApplicationValidator> = OnceCell::new();
    APPLICATION_VALIDATOR
        .get_or_init(|| application_validator(&FormPolicy::default(), Arc::new(SystemClock)))
        .validate(form)
}

/// Pass/fail check of an `ApplicationForm` without messages.
pub fn is_application_valid(form: &ApplicationForm) -> bool {
    static FORM_RULE: OnceCell<ApplicationRule> = OnceCell::new();
    FORM_RULE
        .get_or_init(|| form_rule(&FormPolicy::default(), Arc::new(SystemClock)))
        .check(form)
}
