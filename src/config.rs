use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::error::WxError;
use crate::publisher::RetryPolicy;
use crate::units::BAROMETRIC_LIMIT_METERS;

pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(60);
pub const DEBUG_SAMPLE_INTERVAL: Duration = Duration::from_secs(10);
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Samples a BME280 and writes derived weather data to InfluxDB
#[derive(Parser, Debug)]
#[command(name = "pi-wx")]
#[command(version)]
pub struct Args {
    /// InfluxDB server, including protocol and port, eg. 'http://192.168.1.1:8086'
    #[arg(long, env = "PI_WX_INFLUX_SERVER")]
    pub influx_server: String,

    /// InfluxDB bucket; 'database/retention-policy', or just a database name for the default policy
    #[arg(long, env = "PI_WX_INFLUX_BUCKET")]
    pub influx_bucket: String,

    /// InfluxDB organization
    #[arg(long, env = "PI_WX_INFLUX_ORG", default_value = "")]
    pub influx_org: String,

    /// InfluxDB username
    #[arg(long, env = "PI_WX_INFLUX_USERNAME")]
    pub influx_username: Option<String>,

    /// InfluxDB password
    #[arg(long, env = "PI_WX_INFLUX_PASSWORD", hide_env_values = true)]
    pub influx_password: Option<String>,

    /// Value for the sensor_name tag
    #[arg(long, env = "PI_WX_SENSOR_NAME")]
    pub sensor_name: String,

    /// Measurement name
    #[arg(long, env = "PI_WX_MEASUREMENT_NAME", default_value = "pi_wx")]
    pub measurement_name: String,

    /// Log every derived sample
    #[arg(long, env = "PI_WX_LOG_READINGS")]
    pub log_readings: bool,

    /// Station elevation in meters, used for mean sea level pressure
    #[arg(
        long,
        env = "PI_WX_ELEVATION_METERS",
        default_value_t = 259.08,
        allow_negative_numbers = true
    )]
    pub elevation_meters: f64,

    /// Sample every 10 seconds instead of every minute
    #[arg(long, env = "PI_WX_DEBUG_INTERVAL")]
    pub debug_interval: bool,

    /// Sample interval in seconds; overrides --debug-interval
    #[arg(long, env = "PI_WX_SAMPLE_INTERVAL_SECS")]
    pub sample_interval_secs: Option<u64>,

    /// IIO device directory of the BME280
    #[arg(
        long,
        env = "PI_WX_IIO_DEVICE",
        default_value = "/sys/bus/iio/devices/iio:device0"
    )]
    pub iio_device: PathBuf,

    /// Write logs to a daily rotated file in this directory instead of stdout
    #[arg(long, env = "PI_WX_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub server: Url,
    pub bucket: String,
    pub org: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl StoreConfig {
    /// `user:pass` when any credential was given.
    pub fn auth_token(&self) -> Option<String> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (None, None) => None,
            (user, pass) => Some(format!(
                "{}:{}",
                user.unwrap_or_default(),
                pass.unwrap_or_default()
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StationConfig {
    pub sensor_name: String,
    pub measurement: String,
    pub elevation_meters: f64,
}

/// Settings fixed at startup and shared read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub station: StationConfig,
    pub sample_interval: Duration,
    pub log_readings: bool,
    pub retry: RetryPolicy,
    pub health_timeout: Duration,
    pub iio_device: PathBuf,
    pub log_dir: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = WxError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let influx_server = required("--influx-server", args.influx_server)?;
        let bucket = required("--influx-bucket", args.influx_bucket)?;
        let sensor_name = required("--sensor-name", args.sensor_name)?;
        let measurement = required("--measurement-name", args.measurement_name)?;

        let server = Url::parse(&influx_server)
            .map_err(|e| WxError::Config(format!("invalid --influx-server '{influx_server}': {e}")))?;
        if !matches!(server.scheme(), "http" | "https") {
            return Err(WxError::Config(format!(
                "--influx-server must be an http(s) URL, got '{influx_server}'"
            )));
        }

        let elevation_meters = args.elevation_meters;
        if !elevation_meters.is_finite() || elevation_meters >= BAROMETRIC_LIMIT_METERS {
            return Err(WxError::Config(format!(
                "--elevation-meters must be finite and below {BAROMETRIC_LIMIT_METERS}, got {elevation_meters}"
            )));
        }

        let sample_interval = match args.sample_interval_secs {
            Some(0) => {
                return Err(WxError::Config(
                    "--sample-interval-secs must be greater than zero".to_string(),
                ));
            }
            Some(secs) => Duration::from_secs(secs),
            None if args.debug_interval => DEBUG_SAMPLE_INTERVAL,
            None => DEFAULT_SAMPLE_INTERVAL,
        };

        Ok(Self {
            store: StoreConfig {
                server,
                bucket,
                org: args.influx_org,
                username: args.influx_username.filter(|s| !s.is_empty()),
                password: args.influx_password.filter(|s| !s.is_empty()),
            },
            station: StationConfig {
                sensor_name,
                measurement,
                elevation_meters,
            },
            sample_interval,
            log_readings: args.log_readings,
            retry: RetryPolicy::default(),
            health_timeout: STORE_TIMEOUT,
            iio_device: args.iio_device,
            log_dir: args.log_dir,
        })
    }
}

fn required(flag: &str, value: String) -> Result<String, WxError> {
    if value.trim().is_empty() {
        Err(WxError::Config(format!("{flag} must be supplied")))
    } else if value.chars().any(char::is_control) {
        Err(WxError::Config(format!(
            "{flag} must not contain control characters"
        )))
    } else {
        Ok(value)
    }
}
