use std::future::Future;

use crate::error::SensorError;
use crate::sample::RawReading;

pub use iio::IioSensor;

mod iio;

/// The environmental sensor. A failed read is not retried by the caller.
pub trait Sensor {
    fn read(&mut self) -> impl Future<Output = Result<RawReading, SensorError>> + Send;
}
