use std::future::Future;

use serde::Deserialize;

use crate::error::StoreError;

pub use influx::InfluxClient;
pub use point::{FieldValue, Point};

mod influx;
mod point;

pub const PASS_STATUS: &str = "pass";

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Health {
    pub fn is_pass(&self) -> bool {
        self.status == PASS_STATUS
    }
}

/// The time-series store as seen by the sampling pipeline.
///
/// Implementations do not impose deadlines themselves; callers wrap each call
/// in their own timeout.
pub trait PointStore {
    fn health(&self) -> impl Future<Output = Result<Health, StoreError>> + Send;

    fn write_point(&self, point: &Point) -> impl Future<Output = Result<(), StoreError>> + Send;
}
