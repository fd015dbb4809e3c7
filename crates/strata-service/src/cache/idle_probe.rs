//! Pool manager that only health-checks connections that sat idle.

use deadpool::managed::{self, Manager, Metrics, RecycleResult};
use deadpool_redis::redis::IntoConnectionInfo;
use deadpool_redis::redis::RedisResult;
use std::time::Duration;

/// Connections reused within this window skip the `PING` probe.
pub const PROBE_AFTER_IDLE: Duration = Duration::from_secs(60);

/// Wraps the stock Redis manager and skips its `PING` on recycle for
/// connections that were used recently.
pub struct IdleProbeManager {
    inner: deadpool_redis::Manager,
    probe_after: Duration,
}

impl IdleProbeManager {
    /// Creates a manager for the given connection info.
    pub fn new<T: IntoConnectionInfo>(params: T) -> RedisResult<Self> {
        Ok(Self {
            inner: deadpool_redis::Manager::new(params)?,
            probe_after: PROBE_AFTER_IDLE,
        })
    }

    /// Overrides the idle window after which a connection is probed.
    #[must_use]
    pub fn with_probe_after(mut self, probe_after: Duration) -> Self {
        self.probe_after = probe_after;
        self
    }

    /// Returns true if a connection last used `idle` ago must be probed.
    #[must_use]
    pub fn needs_probe(&self, idle: Duration) -> bool {
        idle >= self.probe_after
    }
}

impl std::fmt::Debug for IdleProbeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdleProbeManager")
            .field("probe_after", &self.probe_after)
            .finish_non_exhaustive()
    }
}

impl Manager for IdleProbeManager {
    type Type = <deadpool_redis::Manager as Manager>::Type;
    type Error = <deadpool_redis::Manager as Manager>::Error;

    async fn create(&self) -> Result<Self::Type, Self::Error> {
        self.inner.create().await
    }

    async fn recycle(&self, conn: &mut Self::Type, metrics: &Metrics) -> RecycleResult<Self::Error> {
        if !self.needs_probe(metrics.last_used()) {
            return Ok(());
        }
        self.inner.recycle(conn, metrics).await
    }
}

/// Pool of probed Redis connections.
pub type ProbedPool = managed::Pool<IdleProbeManager>;

/// A connection borrowed from [`ProbedPool`].
pub type ProbedConnection = managed::Object<IdleProbeManager>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recently_used_connection_skips_probe() {
        let manager = IdleProbeManager::new("redis://127.0.0.1:6379").unwrap();
        assert!(!manager.needs_probe(Duration::from_secs(5)));
        assert!(!manager.needs_probe(Duration::from_secs(59)));
    }

    #[test]
    fn test_idle_connection_is_probed() {
        let manager = IdleProbeManager::new("redis://127.0.0.1:6379").unwrap();
        assert!(manager.needs_probe(Duration::from_secs(60)));
        assert!(manager.needs_probe(Duration::from_secs(3600)));
    }

    #[test]
    fn test_custom_probe_window() {
        let manager = IdleProbeManager::new("redis://127.0.0.1:6379")
            .unwrap()
            .with_probe_after(Duration::ZERO);
        assert!(manager.needs_probe(Duration::ZERO));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(IdleProbeManager::new("not-a-redis-url").is_err());
    }
}
