use servify_core::error::CoreError;
use servify_core::filter::Dimension;
use servify_core::query::distinct_values_sql;

use crate::DuckDbBackend;

pub async fn distinct_values_inner(
    db: &DuckDbBackend,
    dimension: Dimension,
) -> Result<Vec<String>, CoreError> {
    let conn = db.conn.lock().await;
    let mut stmt = conn
        .prepare(&distinct_values_sql(dimension))
        .map_err(CoreError::unavailable)?;
    let values = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(CoreError::unavailable)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(CoreError::unavailable)?;
    Ok(values)
}
