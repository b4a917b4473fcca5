//! Sleep seam shared by the executor and the collector.
//!
//! Production code waits on the tokio timer. Tests substitute an
//! implementation that records the requested delays and returns at once.

use std::time::Duration;

use async_trait::async_trait;

/// Something that can pause the current task.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by [`tokio::time::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
