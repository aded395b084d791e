/// Schema for the embedded store, run on every open. Idempotent.
///
/// The tables mirror the MySQL layout the dashboard reads in production:
/// `users.password` holds a digest, never plaintext, and `sales_data` keeps
/// the camel-cased `productSubcategory` column name.
///
/// `memory_limit` comes from `Config.duckdb_memory_limit`
/// (env `SERVIFY_DUCKDB_MEMORY`, default `"1GB"`).
pub fn init_sql(memory_limit: &str) -> String {
    format!(
        r#"SET memory_limit = '{memory_limit}';
SET threads = 2;

CREATE TABLE IF NOT EXISTS users (
    email           VARCHAR PRIMARY KEY,
    password        VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS sales_data (
    brand               VARCHAR,
    productSubcategory  VARCHAR,
    store               VARCHAR,
    date                DATE NOT NULL,
    sales               INTEGER NOT NULL DEFAULT 0,
    revenue             DECIMAL(12, 2) NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_sales_data_date ON sales_data(date);
"#
    )
}
