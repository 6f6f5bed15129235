use crate::config::LoggingConfig;
use crate::error::{CoachError, ErrorKind};

/// Initialize structured logging with tracing.
/// Call once at process startup; a second call returns a config error.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CoachError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output on stdout stays machine-readable
    let result = if config.format.eq_ignore_ascii_case("pretty") {
        tracing::subscriber::set_global_default(
            registry.with(fmt::layer().with_target(false).with_writer(std::io::stderr)),
        )
    } else {
        tracing::subscriber::set_global_default(
            registry.with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .json(),
            ),
        )
    };

    result.map_err(|e| {
        CoachError::new(
            ErrorKind::Config,
            format!("Failed to set global tracing subscriber: {}", e),
            "logging",
        )
    })?;

    tracing::debug!(format = %config.format, "Structured logging initialized");
    Ok(())
}
