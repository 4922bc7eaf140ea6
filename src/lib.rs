pub mod config;
pub mod errors;
pub mod models;
pub mod search;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use errors::{WikiError, WikiResult};
pub use models::*;
pub use search::SearchEngine;
pub use services::*;

/// Installs the global tracing subscriber. Log lines go to stderr so they
/// never interleave with the NDJSON event stream on stdout; with
/// `console = false` only the filter is installed and nothing is printed.
pub fn init_logging(config: &config::LoggingConfig) -> Result<(), WikiError> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if !config.console {
        registry.try_init()
    } else {
        let fmt = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_span_events(FmtSpan::NONE);

        match config.format {
            config::LogFormat::Json => registry.with(fmt.json()).try_init(),
            config::LogFormat::Pretty => registry.with(fmt.pretty()).try_init(),
            config::LogFormat::Compact => registry.with(fmt.compact()).try_init(),
        }
    };

    result.map_err(|e| WikiError::config(format!("Failed to initialize logging: {e}")))
}
