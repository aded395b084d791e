use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use duckdb::Connection;
use tokio::sync::Mutex;
use tracing::info;

use servify_core::analytics::SalesRecord;
use servify_core::query::Predicate;

use crate::schema::init_sql;

/// An embedded DuckDB store holding `users` and `sales_data`.
///
/// Used for local runs (`SERVIFY_STORE=duckdb`) and as the fixture store in
/// tests. The connection sits behind `Arc<Mutex<_>>`: a query holds the
/// guard for exactly one statement and releases it on every exit path.
///
/// Time windows are anchored to a UTC date computed in Rust: DuckDB's
/// `CURRENT_DATE` lives in the `icu` extension, which is fetched over the
/// network on first use.
pub struct DuckDbBackend {
    pub(crate) conn: Arc<Mutex<Connection>>,
    today: Option<NaiveDate>,
}

impl DuckDbBackend {
    /// Open the store file at `path`, creating it and the tables if needed.
    /// `memory_limit` takes DuckDB size syntax (`"1GB"`).
    pub fn open(path: &str, memory_limit: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(&init_sql(memory_limit))?;
        info!(path, memory_limit, "DuckDB sales store opened");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            today: None,
        })
    }

    /// Open an **in-memory** DuckDB database. Data is discarded on drop.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&init_sql("1GB"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            today: None,
        })
    }

    /// Freeze "today" for time-window filters. Fixtures use this so window
    /// boundaries do not move with the wall clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// The predicate with its time window rendered as a date literal.
    pub(crate) fn anchor(&self, predicate: &Predicate) -> Predicate {
        predicate.clone().anchored(self.today())
    }

    /// Insert a batch of sales rows in a single transaction.
    ///
    /// Returns immediately (no-op) if `records` is empty.
    pub async fn insert_sales(&self, records: &[SalesRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        for record in records {
            tx.execute(
                r#"INSERT INTO sales_data (
                    brand, productSubcategory, store, date, sales, revenue
                ) VALUES (?1, ?2, ?3, CAST(?4 AS DATE), ?5, ?6)"#,
                duckdb::params![
                    record.brand,
                    record.product_subcategory,
                    record.store,
                    record.date.format("%Y-%m-%d").to_string(),
                    record.sales,
                    record.revenue,
                ],
            )?;
        }

        tx.commit()?;
        tracing::info!("Inserted {} sales rows into DuckDB", records.len());
        Ok(())
    }
}
