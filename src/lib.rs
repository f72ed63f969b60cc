use std::convert::Infallible;

use config::Config;
use error::WxError;
use scheduler::Scheduler;
use sensor::Sensor;
use store::PointStore;

pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod publisher;
pub mod sample;
pub mod scheduler;
pub mod sensor;
pub mod store;
pub mod units;

/// Gates on store health, then samples until the sensor fails.
///
/// Returns only with the error that should end the process.
pub async fn run<R, S>(config: &Config, sensor: R, store: &S) -> Result<Infallible, WxError>
where
    R: Sensor,
    S: PointStore,
{
    gate::check_ready(store, config.health_timeout).await?;
    Scheduler::new(config, sensor, store).run().await
}
