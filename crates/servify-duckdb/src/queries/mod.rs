pub mod breakdown;
pub mod options;
pub mod totals;

use duckdb::types::ToSql;

use servify_core::query::Predicate;

/// Borrow the predicate's bound values in placeholder order.
pub(crate) fn param_refs(predicate: &Predicate) -> Vec<&dyn ToSql> {
    predicate
        .params()
        .iter()
        .map(|p| p as &dyn ToSql)
        .collect()
}
