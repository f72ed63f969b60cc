#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pi_wx::config::{Config, StationConfig, StoreConfig};
use pi_wx::error::{SensorError, StoreError};
use pi_wx::publisher::RetryPolicy;
use pi_wx::sample::RawReading;
use pi_wx::sensor::Sensor;
use pi_wx::store::{Health, Point, PointStore};
use reqwest::Url;

pub const INTERVAL: Duration = Duration::from_secs(60);

pub fn config() -> Config {
    Config {
        store: StoreConfig {
            server: Url::parse("http://localhost:8086").unwrap(),
            bucket: "weather".to_string(),
            org: String::new(),
            username: None,
            password: None,
        },
        station: StationConfig {
            sensor_name: "porch".to_string(),
            measurement: "pi_wx".to_string(),
            elevation_meters: 259.08,
        },
        sample_interval: INTERVAL,
        log_readings: true,
        retry: RetryPolicy::default(),
        health_timeout: Duration::from_secs(5),
        iio_device: PathBuf::from("/nonexistent"),
        log_dir: None,
    }
}

pub fn reading() -> RawReading {
    RawReading {
        temperature_c: 4.5,
        humidity_pct: 81.0,
        raw_pressure_pa: 98_870.0,
    }
}

pub enum HealthMode {
    Status(&'static str),
    Unreachable,
    Hang,
}

pub enum WriteMode {
    FailFirst(usize),
    AlwaysFail,
    Hang,
}

pub struct StubStore {
    health: HealthMode,
    write: WriteMode,
    health_checks: AtomicUsize,
    writes: AtomicUsize,
    points: Mutex<Vec<Point>>,
}

impl StubStore {
    pub fn new(health: HealthMode, write: WriteMode) -> Self {
        Self {
            health,
            write,
            health_checks: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            points: Mutex::new(Vec::new()),
        }
    }

    pub fn healthy() -> Self {
        Self::new(HealthMode::Status("pass"), WriteMode::FailFirst(0))
    }

    pub fn failing_writes(write: WriteMode) -> Self {
        Self::new(HealthMode::Status("pass"), write)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn health_checks(&self) -> usize {
        self.health_checks.load(Ordering::SeqCst)
    }

    pub fn points(&self) -> Vec<Point> {
        self.points.lock().unwrap().clone()
    }
}

impl PointStore for StubStore {
    async fn health(&self) -> Result<Health, StoreError> {
        self.health_checks.fetch_add(1, Ordering::SeqCst);
        match self.health {
            HealthMode::Status(status) => Ok(Health {
                status: status.to_string(),
                message: Some(format!("stub says {status}")),
                version: None,
            }),
            HealthMode::Unreachable => Err(StoreError::Api {
                status: 502,
                body: "bad gateway".to_string(),
            }),
            HealthMode::Hang => std::future::pending().await,
        }
    }

    async fn write_point(&self, point: &Point) -> Result<(), StoreError> {
        let attempt = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        match self.write {
            WriteMode::Hang => std::future::pending().await,
            WriteMode::AlwaysFail => Err(unavailable()),
            WriteMode::FailFirst(n) if attempt <= n => Err(unavailable()),
            WriteMode::FailFirst(_) => {
                self.points.lock().unwrap().push(point.clone());
                Ok(())
            }
        }
    }
}

fn unavailable() -> StoreError {
    StoreError::Api {
        status: 503,
        body: "unavailable".to_string(),
    }
}

/// Yields the queued readings in order, then fails every read.
pub struct StubSensor {
    readings: VecDeque<RawReading>,
    reads: Arc<AtomicUsize>,
}

impl StubSensor {
    pub fn new(readings: impl IntoIterator<Item = RawReading>) -> (Self, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let sensor = Self {
            readings: readings.into_iter().collect(),
            reads: reads.clone(),
        };
        (sensor, reads)
    }
}

impl Sensor for StubSensor {
    async fn read(&mut self) -> Result<RawReading, SensorError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.readings
            .pop_front()
            .ok_or_else(|| SensorError::Fault("i2c bus error".to_string()))
    }
}
