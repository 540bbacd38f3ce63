//! Diagnostic logging on stderr via `tracing`.
//!
//! Filter precedence: `ORCHESTRA_LOG`, `RUST_LOG`, `-v` count, configured level.

use crate::config::appsettings::LoggingSettings;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "ORCHESTRA_LOG";

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Level after applying `verbosity` steps on top of the configured one.
pub fn effective_level(settings: &LoggingSettings, verbosity: u8) -> String {
    let configured = settings.level.trim().to_lowercase();
    if verbosity == 0 {
        return configured;
    }
    let base = LEVELS
        .iter()
        .position(|l| *l == configured)
        .unwrap_or(1);
    let idx = (base + verbosity as usize).min(LEVELS.len() - 1);
    LEVELS[idx].to_string()
}

fn env_directive() -> Option<String> {
    [LOG_ENV, "RUST_LOG"]
        .iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.trim().is_empty())
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(settings: &LoggingSettings, verbosity: u8) {
    let directive = env_directive().unwrap_or_else(|| effective_level(settings, verbosity));
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(l: &str) -> LoggingSettings {
        LoggingSettings { level: l.into() }
    }

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(effective_level(&level("warn"), 0), "warn");
        assert_eq!(effective_level(&level("warn"), 1), "info");
        assert_eq!(effective_level(&level("warn"), 2), "debug");
        assert_eq!(effective_level(&level("warn"), 9), "trace");
    }

    #[test]
    fn unknown_level_steps_from_warn() {
        assert_eq!(effective_level(&level("off"), 0), "off");
        assert_eq!(effective_level(&level("off"), 1), "info");
        assert_eq!(effective_level(&level("ERROR"), 1), "warn");
    }
}
