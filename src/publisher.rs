//! Best-effort, at-most-once delivery of points to the store.
//!
//! Every failed attempt, including one that runs past its deadline, is
//! retried until the attempt budget is spent. After that the point is
//! dropped: nothing is queued for a later tick.

use std::time::Duration;

use tracing::{debug, error, warn};

use crate::error::StoreError;
use crate::store::{Point, PointStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub attempt_timeout: Duration,
    /// Pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            attempt_timeout: Duration::from_secs(5),
            delay: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
pub enum PublishOutcome {
    Published { attempts: u32 },
    Dropped { attempts: u32, last_error: StoreError },
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Published { attempts } | Self::Dropped { attempts, .. } => *attempts,
        }
    }
}

pub struct Publisher<'a, S> {
    store: &'a S,
    policy: &'a RetryPolicy,
}

impl<'a, S> Publisher<'a, S>
where
    S: PointStore,
{
    pub fn new(store: &'a S, policy: &'a RetryPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn publish(&self, point: &Point) -> PublishOutcome {
        let attempts = self.policy.attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let error = match self.attempt(point).await {
                Ok(()) => {
                    debug!(attempt, measurement = %point.measurement, "Point written");
                    return PublishOutcome::Published { attempts: attempt };
                }
                Err(e) => e,
            };

            if attempt >= attempts {
                error!(attempts = attempt, error = %error, "Failed to write point to store, dropping it");
                return PublishOutcome::Dropped {
                    attempts: attempt,
                    last_error: error,
                };
            }

            warn!(attempt, error = %error, "Write attempt {attempt} failed");
            if !self.policy.delay.is_zero() {
                tokio::time::sleep(self.policy.delay).await;
            }
        }
    }

    async fn attempt(&self, point: &Point) -> Result<(), StoreError> {
        tokio::time::timeout(self.policy.attempt_timeout, self.store.write_point(point))
            .await
            .map_err(|_| StoreError::Timeout(self.policy.attempt_timeout))?
    }
}
