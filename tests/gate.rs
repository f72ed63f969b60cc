mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use assert_matches::assert_matches;
use common::{HealthMode, StubSensor, StubStore, WriteMode};
use pi_wx::error::{StoreError, WxError};
use pi_wx::gate::check_ready;
use tokio::time::Instant;

const DEADLINE: Duration = Duration::from_secs(5);

#[tokio::test(start_paused = true)]
async fn passing_store_is_ready() {
    let store = StubStore::healthy();

    let health = check_ready(&store, DEADLINE).await.unwrap();

    assert!(health.is_pass());
    assert_eq!(store.health_checks(), 1);
}

#[tokio::test(start_paused = true)]
async fn non_pass_status_fails() {
    let store = StubStore::new(HealthMode::Status("fail"), WriteMode::FailFirst(0));

    let result = check_ready(&store, DEADLINE).await;

    assert_matches!(
        result,
        Err(WxError::Unhealthy { status, message }) if status == "fail" && message == "stub says fail"
    );
}

#[tokio::test(start_paused = true)]
async fn transport_error_fails() {
    let store = StubStore::new(HealthMode::Unreachable, WriteMode::FailFirst(0));

    let result = check_ready(&store, DEADLINE).await;

    assert_matches!(
        result,
        Err(WxError::StoreUnreachable(StoreError::Api { status: 502, .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn stalled_health_check_times_out() {
    let store = StubStore::new(HealthMode::Hang, WriteMode::FailFirst(0));
    let started = Instant::now();

    let result = check_ready(&store, DEADLINE).await;

    assert_matches!(
        result,
        Err(WxError::StoreUnreachable(StoreError::Timeout(d))) if d == DEADLINE
    );
    assert_eq!(started.elapsed(), DEADLINE);
}

#[tokio::test(start_paused = true)]
async fn unhealthy_store_prevents_any_tick() {
    let config = common::config();
    let store = StubStore::new(HealthMode::Status("warn"), WriteMode::FailFirst(0));
    let (sensor, reads) = StubSensor::new([common::reading()]);

    let result = pi_wx::run(&config, sensor, &store).await;

    assert_matches!(result, Err(WxError::Unhealthy { .. }));
    assert_eq!(reads.load(Ordering::SeqCst), 0);
    assert_eq!(store.writes(), 0);
}

#[tokio::test(start_paused = true)]
async fn healthy_store_lets_sampling_start() {
    let config = common::config();
    let store = StubStore::healthy();
    let (sensor, reads) = StubSensor::new([common::reading()]);

    let result = pi_wx::run(&config, sensor, &store).await;

    assert_matches!(result, Err(WxError::Sensor(_)));
    assert_eq!(store.health_checks(), 1);
    assert_eq!(reads.load(Ordering::SeqCst), 2);
    assert_eq!(store.writes(), 1);
}
