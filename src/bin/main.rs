use std::process::ExitCode;

use clap::Parser;
use pi_wx::config::{Args, Config};
use pi_wx::error::WxError;
use pi_wx::sensor::IioSensor;
use pi_wx::store::InfluxClient;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match Config::try_from(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match pi_wx::logging::init(config.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match start(&config).await {
        Ok(never) => match never {},
        Err(e) => {
            tracing::error!(error = %e, "Weather station stopped");
            ExitCode::FAILURE
        }
    }
}

async fn start(config: &Config) -> Result<std::convert::Infallible, WxError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        server = %config.store.server,
        bucket = %config.store.bucket,
        sensor_name = %config.station.sensor_name,
        elevation_meters = config.station.elevation_meters,
        "Starting pi-wx"
    );

    let store = InfluxClient::new(&config.store)?;
    let sensor = IioSensor::new(&config.iio_device);
    pi_wx::run(config, sensor, &store).await
}
