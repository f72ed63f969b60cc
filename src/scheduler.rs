use std::convert::Infallible;

use chrono::Utc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{error, info};

use crate::config::Config;
use crate::error::WxError;
use crate::publisher::{PublishOutcome, Publisher};
use crate::sample::DerivedSample;
use crate::sensor::Sensor;
use crate::store::PointStore;

/// Drives read, derive and publish once per sample interval.
pub struct Scheduler<'a, R, S> {
    config: &'a Config,
    sensor: R,
    publisher: Publisher<'a, S>,
}

impl<'a, R, S> Scheduler<'a, R, S>
where
    R: Sensor,
    S: PointStore,
{
    pub fn new(config: &'a Config, sensor: R, store: &'a S) -> Self {
        Self {
            config,
            sensor,
            publisher: Publisher::new(store, &config.retry),
        }
    }

    /// Ticks until the sensor fails. Publish failures never end the loop.
    pub async fn run(mut self) -> Result<Infallible, WxError> {
        let period = self.config.sample_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = period.as_secs_f64(), "Sampling started");

        loop {
            ticker.tick().await;
            self.tick().await?;
        }
    }

    pub async fn tick(&mut self) -> Result<PublishOutcome, WxError> {
        let raw = self.sensor.read().await.inspect_err(|e| {
            error!(error = %e, "Failed to read sensor");
        })?;

        let station = &self.config.station;
        let sample = DerivedSample::derive(raw, station.elevation_meters, Utc::now());
        if self.config.log_readings {
            sample.log(&station.sensor_name);
        }

        Ok(self.publisher.publish(&sample.to_point(station)).await)
    }
}
