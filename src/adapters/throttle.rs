use crate::domain::ports::Throttle;
use async_trait::async_trait;
use std::time::Duration;

/// Sleeps for a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self) {
        tracing::debug!("Waiting {:?} before the next update", self.0);
        tokio::time::sleep(self.0).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn pause(&self) {}
}
