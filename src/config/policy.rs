//! Business limits for the application form.
//!
//! Defaults reproduce the product rules; every limit can be overridden from
//! the process environment or a `.env` file.

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::error::{FormError, FormResult};
use crate::models::applicant::KnownSpecialty;

pub const MIN_ALLOWED_AGE_YEARS: i32 = 20;
pub const MAX_ALLOWED_AGE_YEARS: i32 = 50;
pub const MAX_SPECIALTY_LENGTH: usize = 50;
pub const MIN_EXPERIENCE_YEARS: f64 = 3.0;
pub const MIN_PASSWORD_SIZE: usize = 10;

pub const ENV_MIN_AGE: &str = "APPLICANT_MIN_AGE";
pub const ENV_MAX_AGE: &str = "APPLICANT_MAX_AGE";
pub const ENV_MAX_SPECIALTY_LENGTH: &str = "APPLICANT_MAX_SPECIALTY_LENGTH";
pub const ENV_MIN_EXPERIENCE_YEARS: &str = "APPLICANT_MIN_EXPERIENCE_YEARS";
pub const ENV_MIN_PASSWORD_LENGTH: &str = "APPLICANT_MIN_PASSWORD_LENGTH";
pub const ENV_KNOWN_SPECIALTIES: &str = "APPLICANT_KNOWN_SPECIALTIES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPolicy {
    pub min_age_years: i32,
    pub max_age_years: i32,
    pub max_specialty_length: usize,
    pub known_specialties: Vec<String>,
    pub min_experience_years: f64,
    pub min_password_length: usize,
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self {
            min_age_years: MIN_ALLOWED_AGE_YEARS,
            max_age_years: MAX_ALLOWED_AGE_YEARS,
            max_specialty_length: MAX_SPECIALTY_LENGTH,
            known_specialties: KnownSpecialty::ALL
                .iter()
                .map(|specialty| specialty.as_str().to_string())
                .collect(),
            min_experience_years: MIN_EXPERIENCE_YEARS,
            min_password_length: MIN_PASSWORD_SIZE,
        }
    }
}

impl FormPolicy {
    /// Loads `.env` (if present) and applies any overrides found in the
    /// process environment.
    pub fn from_env() -> FormResult<Self> {
        super::load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads overrides from a dotenv-formatted file without touching the
    /// process environment.
    pub fn from_env_file(path: &Path) -> FormResult<Self> {
        let entries = dotenv::from_path_iter(path)
            .map_err(|e| FormError::invalid_config(&path.display().to_string(), e.to_string()))?
            .collect::<Result<HashMap<String, String>, _>>()
            .map_err(|e| FormError::invalid_config(&path.display().to_string(), e.to_string()))?;

        Self::from_lookup(|key| entries.get(key).cloned())
    }

    /// Builds a policy from an arbitrary key lookup; missing keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> FormResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let policy = Self {
            min_age_years: parse_or(&lookup, ENV_MIN_AGE, defaults.min_age_years)?,
            max_age_years: parse_or(&lookup, ENV_MAX_AGE, defaults.max_age_years)?,
            max_specialty_length: parse_or(
                &lookup,
                ENV_MAX_SPECIALTY_LENGTH,
                defaults.max_specialty_length,
            )?,
            known_specialties: lookup(ENV_KNOWN_SPECIALTIES)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|specialty| !specialty.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.known_specialties),
            min_experience_years: parse_or(
                &lookup,
                ENV_MIN_EXPERIENCE_YEARS,
                defaults.min_experience_years,
            )?,
            min_password_length: parse_or(
                &lookup,
                ENV_MIN_PASSWORD_LENGTH,
                defaults.min_password_length,
            )?,
        };

        policy.validate()?;
        Ok(policy)
    }

    /// Rejects limits that would make every application fail.
    pub fn validate(&self) -> FormResult<()> {
        if self.min_age_years > self.max_age_years {
            return Err(FormError::invalid_config(
                ENV_MIN_AGE,
                format!(
                    "minimum age {} exceeds maximum age {}",
                    self.min_age_years, self.max_age_years
                ),
            ));
        }
        if !self.min_experience_years.is_finite() {
            return Err(FormError::invalid_config(
                ENV_MIN_EXPERIENCE_YEARS,
                "must be a finite number",
            ));
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> FormResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| FormError::invalid_config(key, format!("{:?}: {}", raw, e))),
        None => Ok(default),
    }
}
