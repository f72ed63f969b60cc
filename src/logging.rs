use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::error::WxError;

const APP_NAME: &str = "pi-wx";

/// Installs the global bunyan JSON subscriber, writing to stdout or to a daily
/// rotated file in `log_dir`. Keep the returned guard alive until exit or
/// buffered lines are lost.
pub fn init(log_dir: Option<&Path>) -> Result<WorkerGuard, WxError> {
    let (writer, guard) = match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(APP_NAME)
                .filename_suffix("log")
                .build(dir)
                .map_err(|e| WxError::Logging(format!("{}: {e}", dir.display())))?;
            tracing_appender::non_blocking(appender)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(APP_NAME.into(), writer));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| WxError::Logging(e.to_string()))?;
    Ok(guard)
}
