use servify_core::analytics::TotalsRow;
use servify_core::error::CoreError;
use servify_core::query::{metrics_sql, Predicate};

use super::param_refs;
use crate::DuckDbBackend;

pub async fn aggregate_totals_inner(
    db: &DuckDbBackend,
    predicate: &Predicate,
) -> Result<TotalsRow, CoreError> {
    let predicate = db.anchor(predicate);
    let sql = metrics_sql(&predicate);
    let conn = db.conn.lock().await;
    let params = param_refs(&predicate);
    let mut stmt = conn.prepare(&sql).map_err(CoreError::unavailable)?;
    let row = stmt
        .query_row(params.as_slice(), |row| {
            Ok(TotalsRow {
                total_sales: row.get(0)?,
                total_revenue: row.get(1)?,
                total_orders: row.get(2)?,
                average_order_value: row.get(3)?,
            })
        })
        .map_err(CoreError::unavailable)?;
    Ok(row)
}
