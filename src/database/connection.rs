//! PostgreSQL pool and schema management
//!
//! Pool sizing comes from the `[database]` settings section. Connections
//! report themselves as `campus-events` in `pg_stat_activity`.

use std::str::FromStr;
use std::time::{Duration, Instant};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info};
use crate::config::DatabaseConfig;
use crate::utils::errors::Result;

pub type DatabasePool = PgPool;

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
}

/// Open a pool and make sure the server answers
pub async fn connect(config: &DatabaseConfig) -> Result<DatabasePool> {
    let options = PgConnectOptions::from_str(&config.url)?.application_name(crate::NAME);
    let pool = pool_options(config).connect_with(options).await?;

    let latency = health_check(&pool).await?;
    info!(
        max_connections = config.max_connections,
        latency_ms = latency.as_millis() as u64,
        "Database pool ready"
    );
    Ok(pool)
}

/// Apply pending migrations from `./migrations`
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    let migrator = sqlx::migrate!("./migrations");
    debug!(known = migrator.iter().count(), "Applying database migrations");

    migrator.run(pool).await?;

    info!("Database schema up to date");
    Ok(())
}

/// Round-trip time of a trivial query
pub async fn health_check(pool: &DatabasePool) -> Result<Duration> {
    let started = Instant::now();
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(started.elapsed())
}
