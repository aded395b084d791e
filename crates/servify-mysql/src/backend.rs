use std::time::Duration;

use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::MySqlPool;
use tracing::info;

use servify_core::config::DbConfig;
use servify_core::error::CoreError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// The MySQL store holding `users` and `sales_data`.
///
/// Read-only. Every operation checks a connection out of the pool, runs one
/// statement and hands the connection back when the guard drops, on success
/// and error alike. Idle connections are closed after a minute so nothing is
/// held open between interactions.
#[derive(Clone)]
pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    /// Build the pool without connecting. Connection problems surface on the
    /// first query as [`CoreError::Connection`].
    pub fn connect_lazy(cfg: &DbConfig, max_connections: u32) -> Self {
        let pool = pool_options(max_connections).connect_lazy_with(connect_options(cfg));
        info!(
            host = %cfg.host,
            port = cfg.port,
            database = %cfg.database,
            max_connections,
            "MySQL pool configured"
        );
        Self { pool }
    }

    /// Build the pool and open one connection up front.
    pub async fn connect(cfg: &DbConfig, max_connections: u32) -> Result<Self, CoreError> {
        let pool = pool_options(max_connections)
            .connect_with(connect_options(cfg))
            .await
            .map_err(classify)?;
        info!(host = %cfg.host, database = %cfg.database, "Connected to MySQL");
        Ok(Self { pool })
    }

    pub(crate) async fn acquire(&self) -> Result<PoolConnection<MySql>, CoreError> {
        self.pool.acquire().await.map_err(classify)
    }
}

fn pool_options(max_connections: u32) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(max_connections.max(1))
        .min_connections(0)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
}

pub fn connect_options(cfg: &DbConfig) -> MySqlConnectOptions {
    let options = MySqlConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .database(&cfg.database);
    if cfg.password.is_empty() {
        options
    } else {
        options.password(&cfg.password)
    }
}

/// Map a driver error onto the dashboard taxonomy: failures to reach the
/// server are `Connection`, everything past that is `DataSourceUnavailable`.
pub fn classify(err: sqlx::Error) -> CoreError {
    if matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    ) {
        CoreError::connection(err)
    } else {
        CoreError::unavailable(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_server_is_connection_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            classify(sqlx::Error::Io(io)),
            CoreError::Connection(_)
        ));
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut),
            CoreError::Connection(_)
        ));
        assert!(matches!(
            classify(sqlx::Error::PoolClosed),
            CoreError::Connection(_)
        ));
    }

    #[test]
    fn query_failures_are_unavailable() {
        assert!(matches!(
            classify(sqlx::Error::RowNotFound),
            CoreError::DataSourceUnavailable(_)
        ));
        assert!(matches!(
            classify(sqlx::Error::ColumnNotFound("total_sales".to_string())),
            CoreError::DataSourceUnavailable(_)
        ));
    }
}
