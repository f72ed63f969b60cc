//! BME280 exposed by the Linux kernel `bme280` IIO driver.
//!
//! The driver publishes one sysfs attribute per channel:
//!
//! - `in_temp_input`: milli-degrees Celsius
//! - `in_humidityrelative_input`: milli-percent relative humidity
//! - `in_pressure_input`: kilopascals

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SensorError;
use crate::sample::RawReading;

use super::Sensor;

const TEMPERATURE: &str = "in_temp_input";
const HUMIDITY: &str = "in_humidityrelative_input";
const PRESSURE: &str = "in_pressure_input";

#[derive(Debug, Clone)]
pub struct IioSensor {
    device: PathBuf,
}

impl IioSensor {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
        }
    }

    async fn channel(&self, attribute: &str) -> Result<f64, SensorError> {
        let path = self.device.join(attribute);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SensorError::Io {
                path: path.clone(),
                source,
            })?;
        parse_channel(&path, &raw)
    }
}

impl Sensor for IioSensor {
    async fn read(&mut self) -> Result<RawReading, SensorError> {
        let reading = RawReading {
            temperature_c: self.channel(TEMPERATURE).await? / 1000.0,
            humidity_pct: self.channel(HUMIDITY).await? / 1000.0,
            raw_pressure_pa: self.channel(PRESSURE).await? * 1000.0,
        };
        debug!(device = %self.device.display(), ?reading, "Read sensor");
        Ok(reading)
    }
}

fn parse_channel(path: &Path, raw: &str) -> Result<f64, SensorError> {
    let value = raw.trim();
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SensorError::Parse {
            path: path.to_path_buf(),
            value: value.to_string(),
        })
}
