//! # Validation Benchmarks
//!
//! Measures the cost of the rule-composition layer:
//! - Per-field report building vs the whole-form pass/fail rule
//! - Sequential vs batch (rayon) validation of many applications

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use applicant_form::config::FormPolicy;
use applicant_form::models::applicant::validators::{application_validator, form_rule};
use applicant_form::models::applicant::ApplicationForm;
use applicant_form::utils::dates::SystemClock;

/// Deterministic mix of valid and invalid applications.
pub fn generate_test_data(size: usize) -> Vec<ApplicationForm> {
    (0..size)
        .map(|i| ApplicationForm {
            name: format!("Applicant {}", i),
            phone: if i % 7 == 0 {
                format!("555-{:04}", i)
            } else {
                format!("+1 (555) {:04}", i)
            },
            email: format!("applicant{}@example.com", i),
            birth_date: format!("{}-05-20", 1975 + (i % 30)),
            photo: None,
            specialty: if i % 3 == 0 { "other" } else { "engineer" }.to_string(),
            custom_specialty: if i % 2 == 0 { "geologist".to_string() } else { String::new() },
            experience: (i % 10).to_string(),
            password: format!("Password{}", i),
        })
        .collect()
}

pub fn benchmark_single_record(c: &mut Criterion) {
    let policy = FormPolicy::default();
    let validator = application_validator(&policy, Arc::new(SystemClock));
    let rule = form_rule(&policy, Arc::new(SystemClock));
    let form = generate_test_data(1).remove(0);

    let mut group = c.benchmark_group("single_record");
    group.bench_function("report", |b| b.iter(|| black_box(validator.validate(&form))));
    group.bench_function("whole_form_rule", |b| b.iter(|| black_box(rule.check(&form))));
    group.finish();
}

pub fn benchmark_batch_validation(c: &mut Criterion) {
    let validator = application_validator(&FormPolicy::default(), Arc::new(SystemClock));
    let mut group = c.benchmark_group("batch_validation");

    for size in [100, 1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &data, |b, data| {
            b.iter(|| {
                let reports: Vec<_> = data.iter().map(|form| validator.validate(form)).collect();
                black_box(reports)
            })
        });

        group.bench_with_input(BenchmarkId::new("batch", size), &data, |b, data| {
            b.iter(|| black_box(validator.validate_batch(data)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_record, benchmark_batch_validation);
criterion_main!(benches);
