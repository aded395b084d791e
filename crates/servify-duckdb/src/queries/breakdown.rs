use servify_core::analytics::CategoryRow;
use servify_core::error::CoreError;
use servify_core::query::{breakdown_sql, Predicate};

use super::param_refs;
use crate::DuckDbBackend;

pub async fn aggregate_by_category_inner(
    db: &DuckDbBackend,
    predicate: &Predicate,
) -> Result<Vec<CategoryRow>, CoreError> {
    let predicate = db.anchor(predicate);
    let sql = breakdown_sql(&predicate);
    let conn = db.conn.lock().await;
    let params = param_refs(&predicate);
    let mut stmt = conn.prepare(&sql).map_err(CoreError::unavailable)?;
    let rows_iter = stmt
        .query_map(params.as_slice(), |row| {
            Ok(CategoryRow {
                category: row.get(0)?,
                total_sales: row.get(1)?,
                total_revenue: row.get(2)?,
                order_count: row.get(3)?,
            })
        })
        .map_err(CoreError::unavailable)?;

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(CoreError::unavailable)?);
    }
    Ok(rows)
}
