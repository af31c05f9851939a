//! Subscriber setup for the binaries.
//!
//! The library only emits `tracing` events. `APP_ENV=production|prod`
//! selects JSON lines on stdout; anything else gets coloured text on stderr
//! so that stdout stays free for the signal output of the one-shot binary.

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Directive used when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn for_environment(env: &str) -> Self {
        if is_production(env) {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

pub fn is_production(env: &str) -> bool {
    matches!(env, "production" | "prod")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn format_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(std::io::stdout)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .boxed(),
    }
}

/// Install the global subscriber for `format`.
///
/// Returns false when a subscriber was already installed.
pub fn init_logging_with(format: LogFormat) -> bool {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(format_layer(format))
        .try_init()
        .is_ok()
}

/// Install the subscriber selected by `APP_ENV`
pub fn init_logging() {
    let format = LogFormat::for_environment(&get_environment());
    if !init_logging_with(format) {
        tracing::warn!("logging already initialized");
    }
}
