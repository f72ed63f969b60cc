use chrono::{DateTime, Utc};

use crate::config::StationConfig;
use crate::store::Point;
use crate::units;

pub const SENSOR_NAME_TAG: &str = "sensor_name";

/// One raw sensor reading, consumed immediately to build a [`DerivedSample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub raw_pressure_pa: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSample {
    pub temperature_f: f64,
    pub dew_point_f: f64,
    pub recommended_max_indoor_humidity_pct: u8,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub raw_pressure_pa: f64,
    pub pressure_pa: f64,
    pub pressure_mb: f64,
    pub pressure_in_hg: f64,
    pub timestamp: DateTime<Utc>,
}

impl DerivedSample {
    pub fn derive(raw: RawReading, elevation_meters: f64, timestamp: DateTime<Utc>) -> Self {
        let temperature_f = units::to_fahrenheit(raw.temperature_c);
        let pressure_pa = units::sea_level_pressure(raw.raw_pressure_pa, elevation_meters);

        Self {
            temperature_f,
            dew_point_f: units::dew_point_approx(temperature_f, raw.humidity_pct),
            recommended_max_indoor_humidity_pct: units::recommended_max_indoor_humidity(
                temperature_f,
            ),
            temperature_c: raw.temperature_c,
            humidity_pct: raw.humidity_pct,
            raw_pressure_pa: raw.raw_pressure_pa,
            pressure_pa,
            pressure_mb: units::to_millibar(pressure_pa),
            pressure_in_hg: units::to_inches_hg(pressure_pa),
            timestamp,
        }
    }

    pub fn to_point(&self, station: &StationConfig) -> Point {
        Point::new(station.measurement.as_str(), self.timestamp)
            .tag(SENSOR_NAME_TAG, station.sensor_name.as_str())
            .field("temperature_f", self.temperature_f)
            .field("dew_point_f", self.dew_point_f)
            .field(
                "recommended_max_indoor_humidity",
                self.recommended_max_indoor_humidity_pct,
            )
            .field("temperature_c", self.temperature_c)
            .field("humidity", self.humidity_pct)
            .field("raw_pressure_pa", self.raw_pressure_pa)
            .field("pressure_pa", self.pressure_pa)
            .field("pressure_mb", self.pressure_mb)
            .field("pressure_inHg", self.pressure_in_hg)
    }

    pub fn log(&self, sensor_name: &str) {
        tracing::info!(
            sensor_name,
            temperature_f = format_args!("{:.1}", self.temperature_f),
            humidity_pct = format_args!("{:.1}", self.humidity_pct),
            dew_point_f = format_args!("{:.1}", self.dew_point_f),
            pressure_mb = format_args!("{:.1}", self.pressure_mb),
            pressure_in_hg = format_args!("{:.2}", self.pressure_in_hg),
            recommended_max_indoor_humidity_pct = self.recommended_max_indoor_humidity_pct,
            "Reading: {self}"
        );
    }
}

impl std::fmt::Display for DerivedSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] temp: {:.1} degF, humidity: {:.1}%, dew point: {:.1} degF, \
             pressure (MSLP): {:.1} mB ({:.2} inHg), max. recommended indoor humidity: {}%",
            self.timestamp.to_rfc3339(),
            self.temperature_f,
            self.humidity_pct,
            self.dew_point_f,
            self.pressure_mb,
            self.pressure_in_hg,
            self.recommended_max_indoor_humidity_pct
        )
    }
}
