//! Validation core for the mission application form.
//!
//! `functional` holds the generic rule combinators and the validator factory,
//! `models::applicant` the concrete record and business rules, and
//! `services::submission_service` the seam a front end plugs into.

pub mod config;
pub mod error;
pub mod functional;
pub mod models;
pub mod services;
pub mod utils;
