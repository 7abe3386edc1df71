//! Logging setup.
//!
//! Compact timestamped output with per-module levels from the config file.
//! `RUST_LOG` takes precedence when set:
//!
//! ```bash
//! RUST_LOG=fincalc::calculator=debug fincalc keys "2+3="
//! ```

use std::fs::OpenOptions;
use std::sync::{Mutex, Once};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Build the filter directive string from config, e.g. `warn,fincalc::emi=debug`.
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut filter = config.default.clone();
    for (module, level) in &config.modules {
        filter.push_str(&format!(",{module}={level}"));
    }
    filter
}

/// Initialize logging once; later calls are ignored.
///
/// Logs go to `config.file` when set (the TUI owns the terminal), stderr otherwise.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config))
        };

        let file = config.file.as_ref().and_then(|path| {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(f) => Some(f),
                Err(e) => {
                    eprintln!("Cannot open log file {path:?}: {e}");
                    None
                }
            }
        });

        match file {
            Some(f) => {
                let layer = tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_timer(CompactTime)
                    .with_ansi(false)
                    .with_writer(Mutex::new(f))
                    .with_filter(filter);
                tracing_subscriber::registry().with(layer).init();
            }
            None => {
                let layer = tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_timer(CompactTime)
                    .with_writer(std::io::stderr)
                    .with_filter(filter);
                tracing_subscriber::registry().with(layer).init();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        let mut config = LoggingConfig::default();
        assert_eq!(filter_directives(&config), "warn");

        config.default = "info".to_string();
        config
            .modules
            .insert("fincalc::calculator".to_string(), "debug".to_string());
        config
            .modules
            .insert("fincalc::emi".to_string(), "trace".to_string());

        assert_eq!(
            filter_directives(&config),
            "info,fincalc::calculator=debug,fincalc::emi=trace"
        );
    }
}
