//! Redis-based cache implementation.

use super::idle_probe::{IdleProbeManager, ProbedConnection, ProbedPool};
use super::ProfileCache;
use async_trait::async_trait;
use deadpool::managed::{self, BuildError, Manager, PoolError};
use deadpool::Runtime;
use deadpool_redis::redis::{self, AsyncCommands};
use parking_lot::Mutex;
use std::time::Duration;
use strata_config::CacheConfig;
use strata_core::{StrataError, StrataResult};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use url::Url;

/// Upper bound on how often the reaper scans idle connections.
const REAPER_INTERVAL: Duration = Duration::from_secs(30);

/// Redis-based cache service.
///
/// Borrowers wait without a deadline when `pool_max_active` connections are
/// out. Idle connections are trimmed by a background reaper.
pub struct RedisCacheService {
    pool: ProbedPool,
    ttl: Option<Duration>,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl RedisCacheService {
    /// Builds the pool from configuration.
    ///
    /// No connection is opened here; the first borrow dials Redis. Must be
    /// called from within a Tokio runtime when idle reaping is enabled.
    pub fn connect(config: &CacheConfig) -> StrataResult<Self> {
        let url = connection_url(config)?;
        let manager = IdleProbeManager::new(url.as_str())
            .map_err(|e| StrataError::Configuration(format!("Invalid Redis URL: {}", e)))?;

        let pool: ProbedPool = build_pool(manager, config)
            .map_err(|e| StrataError::Configuration(format!("Failed to build Redis pool: {}", e)))?;

        let reaper = config
            .idle_timeout()
            .map(|idle_timeout| spawn_reaper(pool.clone(), idle_timeout, config.pool_max_idle));

        info!(
            host = %config.host,
            port = config.port,
            max_active = config.pool_max_active,
            max_idle = config.pool_max_idle,
            ttl_secs = config.ttl_secs,
            "Redis connection pool configured"
        );

        Ok(Self {
            pool,
            ttl: config.ttl(),
            reaper: Mutex::new(reaper),
        })
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> StrataResult<ProbedConnection> {
        self.pool.get().await.map_err(|e| match e {
            PoolError::Closed => StrataError::cache("Cache is closed"),
            other => StrataError::cache(format!("Failed to get Redis connection: {}", other)),
        })
    }

    /// Returns `(size, available)` for the pool.
    #[must_use]
    pub fn pool_status(&self) -> (usize, usize) {
        let status = self.pool.status();
        (status.size, status.available)
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("size", &status.size)
            .field("available", &status.available)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[async_trait]
impl ProfileCache for RedisCacheService {
    async fn get_raw(&self, key: &str) -> StrataResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            StrataError::cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str) -> StrataResult<()> {
        let mut conn = self.get_conn().await?;
        let _: () = set_command(key, value, self.ttl)
            .query_async(&mut *conn)
            .await
            .map_err(|e| StrataError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!(ttl = ?self.ttl, "Cached key '{}'", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StrataResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            StrataError::cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn ping(&self) -> StrataResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| StrataError::cache(format!("PING failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        if let Some(reaper) = self.reaper.lock().take() {
            reaper.abort();
        }
        if !self.pool.is_closed() {
            self.pool.close();
            info!("Redis connection pool closed");
        }
    }

    fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

impl Drop for RedisCacheService {
    fn drop(&mut self) {
        if let Some(reaper) = self.reaper.get_mut().take() {
            reaper.abort();
        }
    }
}

/// Builds the Redis URL, adding the password when one is configured.
fn connection_url(config: &CacheConfig) -> StrataResult<Url> {
    let mut url = Url::parse(&config.redis_url())
        .map_err(|e| StrataError::Configuration(format!("Invalid Redis address: {}", e)))?;

    if !config.password.is_empty() {
        url.set_password(Some(&config.password))
            .map_err(|()| StrataError::Configuration("Cannot set Redis password".to_string()))?;
    }

    Ok(url)
}

/// Builds a pool over `manager` sized and timed from `config`.
///
/// Borrowers wait without a deadline once `pool_max_active` objects are out.
fn build_pool<M: Manager>(
    manager: M,
    config: &CacheConfig,
) -> Result<managed::Pool<M>, BuildError> {
    managed::Pool::builder(manager)
        .max_size(config.pool_max_active)
        .wait_timeout(None)
        .create_timeout(Some(config.connect_timeout()))
        .runtime(Runtime::Tokio1)
        .build()
}

/// `SETEX` when entries expire, plain `SET` otherwise.
fn set_command(key: &str, value: &str, ttl: Option<Duration>) -> redis::Cmd {
    match ttl {
        Some(ttl) => {
            let mut cmd = redis::cmd("SETEX");
            cmd.arg(key).arg(ttl.as_secs()).arg(value);
            cmd
        }
        None => {
            let mut cmd = redis::cmd("SET");
            cmd.arg(key).arg(value);
            cmd
        }
    }
}

/// Whether the reaper keeps an idle connection.
///
/// `kept` is the number already kept this pass. Connections idle for
/// `idle_timeout` or longer go, as does everything past `max_idle`.
fn keep_idle(idle: Duration, kept: usize, idle_timeout: Duration, max_idle: usize) -> bool {
    idle < idle_timeout && kept < max_idle
}

/// Periodically closes connections idle past `idle_timeout` and trims the
/// idle set down to `max_idle`. Exits once the pool is closed.
fn spawn_reaper<M>(pool: managed::Pool<M>, idle_timeout: Duration, max_idle: usize) -> JoinHandle<()>
where
    M: Manager + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REAPER_INTERVAL.min(idle_timeout));
        interval.tick().await;

        loop {
            interval.tick().await;
            if pool.is_closed() {
                debug!("Redis pool closed, stopping reaper");
                break;
            }

            let mut kept = 0usize;
            let reaped = pool.retain(|_, metrics| {
                let keep = keep_idle(metrics.last_used(), kept, idle_timeout, max_idle);
                if keep {
                    kept += 1;
                }
                keep
            });

            let removed = reaped.removed.len();
            if removed > 0 {
                debug!(removed, kept, "Reaped idle Redis connections");
            }
        }
    })
}
