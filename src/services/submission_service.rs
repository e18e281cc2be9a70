//! Submit handling for the application form.
//!
//! Business rules stay in `models::applicant::validators`; this module only
//! decides what the UI does with a validation report. Any front end (web
//! page, terminal, test double) plugs in through [`FormView`].

use crate::{
    functional::validation_engine::ValidationReport,
    models::applicant::{
        validators::ApplicationValidator, ApplicationField, ApplicationForm, OTHER_SPECIALTY,
    },
};

/// Rendering side of the form.
pub trait FormView {
    /// Removes every error shown by a previous submit.
    fn clear_errors(&mut self);
    fn show_error(&mut self, field: ApplicationField, message: &str);
    /// Called once the form passed validation and is being sent.
    fn submitted(&mut self, form: &ApplicationForm);
}

/// Clears old errors, validates `form`, then either shows every error next
/// to its field or hands the form off as submitted.
pub fn handle_submit<V>(
    validator: &ApplicationValidator,
    form: &ApplicationForm,
    view: &mut V,
) -> ValidationReport<ApplicationField>
where
    V: FormView + ?Sized,
{
    view.clear_errors();

    let report = validator.validate(form);
    if report.is_valid() {
        tracing::info!(checked_fields = validator.len(), "application accepted");
        view.submitted(form);
    } else {
        tracing::info!(failed_fields = report.errors().len(), "application rejected");
        for (field, message) in report.errors() {
            view.show_error(*field, message);
        }
    }

    report
}

/// Whether the free-text specialty input should be visible for the current
/// select value.
pub fn custom_specialty_visible(selected: &str) -> bool {
    selected == OTHER_SPECIALTY
}

/// View that only writes to the log; used by the command-line front end.
#[derive(Debug, Default)]
pub struct LogView {
    pub shown_errors: usize,
    pub sent: bool,
}

impl FormView for LogView {
    fn clear_errors(&mut self) {
        self.shown_errors = 0;
        self.sent = false;
    }

    fn show_error(&mut self, field: ApplicationField, message: &str) {
        self.shown_errors += 1;
        log::warn!("{}: {}", field, message);
    }

    fn submitted(&mut self, _form: &ApplicationForm) {
        self.sent = true;
        log::info!("Application sent!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::policy::FormPolicy;
    use crate::models::applicant::validators::application_validator;
    use crate::utils::dates::FixedClock;
    use chrono::NaiveDate;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn submit_capturing_log(form: &ApplicationForm) -> (ValidationReport<ApplicationField>, String) {
        let captured = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();

        let report = tracing::subscriber::with_default(subscriber, || {
            handle_submit(&validator(), form, &mut RecordingView::default())
        });
        (report, captured.contents())
    }

    #[derive(Default)]
    struct RecordingView {
        events: Vec<String>,
    }

    impl FormView for RecordingView {
        fn clear_errors(&mut self) {
            self.events.push("clear".to_string());
        }

        fn show_error(&mut self, field: ApplicationField, message: &str) {
            self.events.push(format!("error {}: {}", field, message));
        }

        fn submitted(&mut self, form: &ApplicationForm) {
            self.events.push(format!("sent {}", form.name));
        }
    }

    fn validator() -> ApplicationValidator {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        application_validator(&FormPolicy::default(), Arc::new(FixedClock(today)))
    }

    fn form() -> ApplicationForm {
        ApplicationForm::from_entries([
            ("name", "Yuri"),
            ("phone", "+7 495 000-00-00"),
            ("email", "yuri@example.com"),
            ("birthDate", "1990-04-12"),
            ("specialty", "psychologist"),
            ("experience", "4"),
            ("password", "Gagarin1961"),
        ])
    }

    #[test]
    fn valid_form_is_submitted_after_clearing() {
        let mut view = RecordingView::default();
        let report = handle_submit(&validator(), &form(), &mut view);

        assert!(report.is_valid());
        assert_eq!(view.events, vec!["clear", "sent Yuri"]);
    }

    #[test]
    fn invalid_form_renders_each_error_in_form_order() {
        let mut invalid = form();
        invalid.password = "weak".to_string();
        invalid.phone = "8 495 000".to_string();

        let mut view = RecordingView::default();
        let report = handle_submit(&validator(), &invalid, &mut view);

        assert!(!report.is_valid());
        assert_eq!(
            view.events,
            vec![
                "clear".to_string(),
                "error phone: Please, use only +, -, (, ), and whitespace.".to_string(),
                "error password: Your password should be longer than 10 characters, include a capital letter and a digit.".to_string(),
            ]
        );
    }

    #[test]
    fn log_view_tracks_outcome() {
        let mut view = LogView::default();
        handle_submit(&validator(), &form(), &mut view);
        assert!(view.sent);
        assert_eq!(view.shown_errors, 0);

        let mut invalid = form();
        invalid.name.clear();
        handle_submit(&validator(), &invalid, &mut view);
        assert!(!view.sent);
        assert_eq!(view.shown_errors, 1);
    }

    #[test]
    fn submit_log_carries_counts_not_applicant_data() {
        let (report, output) = submit_capturing_log(&form());
        assert!(report.is_valid());
        assert!(output.contains("application accepted"));
        assert!(output.contains("checked_fields=7"));
        assert!(!output.contains("yuri@example.com"));

        let mut invalid = form();
        invalid.password = "weak".to_string();
        let (report, output) = submit_capturing_log(&invalid);
        assert!(!report.is_valid());
        assert!(output.contains("application rejected"));
        assert!(output.contains("failed_fields=1"));
        assert!(!output.contains("yuri@example.com"));
        assert!(!output.contains("weak"));
    }

    #[test]
    fn custom_specialty_only_for_other() {
        assert!(custom_specialty_visible("other"));
        assert!(!custom_specialty_visible("engineer"));
        assert!(!custom_specialty_visible(""));
    }
}
