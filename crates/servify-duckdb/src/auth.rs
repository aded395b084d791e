use anyhow::Result;

use servify_core::auth::Credential;
use servify_core::error::CoreError;

use crate::DuckDbBackend;

impl DuckDbBackend {
    /// Look up a credential by exact email match.
    pub async fn find_credential(&self, email: &str) -> Result<Option<Credential>, CoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT email, password FROM users WHERE email = ?1")
            .map_err(CoreError::unavailable)?;
        let mut rows = stmt
            .query_map(duckdb::params![email], |row| {
                Ok(Credential {
                    email: row.get(0)?,
                    password_hash: row.get(1)?,
                })
            })
            .map_err(CoreError::unavailable)?;
        let credential = rows.next().transpose().map_err(CoreError::unavailable)?;
        Ok(credential)
    }

    /// Provision a user. `password_hash` must already be a digest
    /// (see `servify_core::auth`).
    pub async fn upsert_user(&self, email: &str, password_hash: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO users (email, password) VALUES (?1, ?2) \
             ON CONFLICT (email) DO UPDATE SET password = EXCLUDED.password",
            duckdb::params![email, password_hash],
        )?;
        Ok(())
    }
}
