#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub store: StoreKind,
    pub duckdb_path: String,
    pub duckdb_memory_limit: String,
    pub max_connections: u32,
}

/// Connection settings for the relational store.
#[derive(Clone, PartialEq)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

// Keeps the password out of logs.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreKind {
    MySql,
    DuckDb,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from any key lookup. `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            db: DbConfig {
                host: var("DB_HOST", "localhost"),
                user: var("DB_USER", "root"),
                password: var("DB_PASSWORD", ""),
                database: var("DB_NAME", "servify_db"),
                port: var("DB_PORT", "3306")
                    .parse()
                    .map_err(|e| format!("invalid DB_PORT: {e}"))?,
            },
            store: {
                let raw = var("SERVIFY_STORE", "mysql");
                match raw.as_str() {
                    "mysql" => StoreKind::MySql,
                    "duckdb" => StoreKind::DuckDb,
                    other => return Err(format!("SERVIFY_STORE must be mysql or duckdb, got {other:?}")),
                }
            },
            duckdb_path: var("SERVIFY_DUCKDB_PATH", "./data/servify.db"),
            duckdb_memory_limit: var("SERVIFY_DUCKDB_MEMORY", "1GB"),
            max_connections: var("SERVIFY_DB_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(5),
        })
    }
}
