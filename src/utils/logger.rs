use std::env;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FORMAT_KEY: &str = "APP_LOG_FORMAT";

/// Log output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text format with timestamp, level, target, and message
    Text,
    /// JSON format with structured fields: timestamp, level, target, message
    Json,
}

impl LogFormat {
    /// Parses `APP_LOG_FORMAT` or returns the default Text format
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(LOG_FORMAT_KEY)
            .and_then(|s| Self::parse(&s))
            .unwrap_or(LogFormat::Text)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "text" => Some(LogFormat::Text),
            _ => None,
        }
    }
}

/// Initializes the global tracing subscriber with an env filter and console output.
///
/// Sets up:
/// - Environment filter for log level control (`RUST_LOG`, default `info`)
/// - `fmt` layer writing to stderr, text or JSON depending on `format`
/// - Log-to-tracing bridge so the `log` macros used across the crate are captured
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init_logging(format: LogFormat) {
    use tracing_log::LogTracer;
    use tracing_subscriber::fmt;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Bridge first; an existing logger is fine.
    let _ = LogTracer::init();

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(e) = result {
        log::debug!("tracing subscriber already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats_case_insensitively() {
        assert_eq!(LogFormat::parse("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" JSON "), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("Text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn format_is_read_from_a_dotenv_file() {
        use std::collections::HashMap;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "RUST_LOG=debug").unwrap();
        writeln!(file, "APP_LOG_FORMAT=json").unwrap();

        let entries: HashMap<String, String> = dotenv::from_path_iter(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(LogFormat::from_lookup(|key| entries.get(key).cloned()), LogFormat::Json);
        assert_eq!(LogFormat::from_lookup(|_| None), LogFormat::Text);
        assert_eq!(LogFormat::from_lookup(|_| Some("yaml".to_string())), LogFormat::Text);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LogFormat::Text);
        init_logging(LogFormat::Json);
        log::info!("logging initialized twice without panicking");
    }
}
