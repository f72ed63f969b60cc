use std::time::Duration;

use tracing::info;

use crate::error::{StoreError, WxError};
use crate::store::{Health, PointStore};

/// One-shot preflight: the store must answer its health check with an
/// explicit pass within `deadline`.
pub async fn check_ready<S: PointStore>(store: &S, deadline: Duration) -> Result<Health, WxError> {
    let health = tokio::time::timeout(deadline, store.health())
        .await
        .map_err(|_| WxError::StoreUnreachable(StoreError::Timeout(deadline)))?
        .map_err(WxError::StoreUnreachable)?;

    if !health.is_pass() {
        return Err(WxError::Unhealthy {
            status: health.status,
            message: health.message.unwrap_or_default(),
        });
    }

    info!(
        status = %health.status,
        version = health.version.as_deref().unwrap_or("unknown"),
        "Store passed health check"
    );
    Ok(health)
}
