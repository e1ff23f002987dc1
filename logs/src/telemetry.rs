use std::path::PathBuf;

use tracing::{subscriber::set_global_default, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

const LOG_FILE_PREFIX: &str = "zkl2.log";

/// Builds a bunyan-formatted subscriber.
///
/// `RUST_LOG` takes precedence over `env_filter`. With `log_directory` set, records go to an
/// hourly rolling file in that directory, otherwise to stdout. The returned guard flushes the
/// non-blocking writer on drop and must be kept alive for as long as logs are produced.
pub fn get_subscriber(
    name: String,
    env_filter: String,
    log_directory: Option<PathBuf>,
) -> (impl Subscriber + Send + Sync, WorkerGuard) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let (non_blocking, guard) = match log_directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::hourly(directory, LOG_FILE_PREFIX);
            tracing_appender::non_blocking(file_appender)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };
    let formatting_layer = BunyanFormattingLayer::new(name, non_blocking);
    let res = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    (res, guard)
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), String> {
    // Redirect all `log`'s events to our subscriber
    LogTracer::init().map_err(|err| format!("Failed to set logger: {err}"))?;
    set_global_default(subscriber).map_err(|err| format!("Failed to set subscriber: {err}"))
}
