use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum WxError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to check store health: {0}")]
    StoreUnreachable(#[source] StoreError),
    #[error("Store did not pass health check: status {status}; message '{message}'")]
    Unhealthy { status: String, message: String },
    #[error("Sensor read failed: {0}")]
    Sensor(#[from] SensorError),
    #[error("Logging setup error: {0}")]
    Logging(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unparseable value '{value}' in {path}")]
    Parse { path: PathBuf, value: String },
    /// Bus or driver fault reported by a `Sensor` without file-backed channels.
    #[error("Sensor fault: {0}")]
    Fault(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Store API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Deadline of {0:?} exceeded")]
    Timeout(Duration),
    #[error("Point encoding error: {0}")]
    Encode(String),
}
