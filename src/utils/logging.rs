// src/utils/logging.rs
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that overrides every other log level source.
pub const LOGGING_ENV_VAR: &str = "RST_EXTRACT_LOGGING";

/// Sets up the logging framework using tracing_subscriber.
///
/// Level precedence: `RST_EXTRACT_LOGGING`, then `RUST_LOG`, then the `-v`
/// count from the command line. Output goes to stderr so stdout only ever
/// carries extracted code.
pub fn setup_logging(verbose: u8) {
    let filter = match std::env::var(LOGGING_ENV_VAR) {
        Ok(value) => {
            let level = level_from_env_value(&value);
            EnvFilter::new(directive(level.unwrap_or(Level::WARN)))
        }
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive(level_from_verbosity(verbose)))),
    };

    // Ignore the error: a subscriber may already be installed by an embedding program.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Ok(value) = std::env::var(LOGGING_ENV_VAR) {
        if level_from_env_value(&value).is_none() {
            tracing::warn!(
                "Invalid value for environment variable {}: {}. Defaulting to WARNING.",
                LOGGING_ENV_VAR,
                value
            );
        }
    }

    tracing::debug!("Logging setup complete.");
}

fn directive(level: Level) -> String {
    level.to_string().to_lowercase()
}

/// Maps `-v` occurrences onto a level: none is WARN, one is INFO, more is DEBUG.
pub fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Parses the `RST_EXTRACT_LOGGING` value. Accepts names or the numeric aliases 0-3.
pub fn level_from_env_value(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "debug" | "3" => Some(Level::DEBUG),
        "info" | "2" => Some(Level::INFO),
        "warning" | "warn" | "1" => Some(Level::WARN),
        "error" | "0" => Some(Level::ERROR),
        _ => None,
    }
}
