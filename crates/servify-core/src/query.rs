//! Filter → parameterized SQL.
//!
//! Statement text is shared by every store; placeholders are positional `?`
//! and the bound values come from [`Predicate::params`] in the same order.

use chrono::{Days, NaiveDate};

use crate::error::CoreError;
use crate::filter::{Dimension, FilterModel, Selection};

pub const SALES_TABLE: &str = "sales_data";

/// Conjunction of SQL conditions derived from a [`FilterModel`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Predicate {
    equalities: Vec<String>,
    params: Vec<String>,
    window_days: Option<u32>,
    today: Option<NaiveDate>,
}

impl Predicate {
    /// Equality conditions are emitted in the fixed order brand, category,
    /// store, each binding one parameter. The time window comes last and
    /// binds nothing: its bounds come from a closed enum, not user text.
    pub fn build(filter: &FilterModel) -> Result<Self, CoreError> {
        let mut predicate = Self::default();

        for (dimension, selection) in filter.selections() {
            if let Selection::Only(value) = selection {
                // `Only("All Brands")` would bind the sentinel as a literal.
                if value.trim().is_empty() || Selection::is_sentinel(value) {
                    return Err(CoreError::invalid_filter(dimension.field(), value.clone()));
                }
                predicate
                    .equalities
                    .push(format!("{} = ?", dimension.column()));
                predicate.params.push(value.clone());
            }
        }

        predicate.window_days = filter.time_window.days();
        Ok(predicate)
    }

    /// Render the time window against a fixed `today` instead of the
    /// store's `CURRENT_DATE`. The cutoff becomes a `DATE 'YYYY-MM-DD'`
    /// literal computed here, never from caller text.
    pub fn anchored(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn conditions(&self) -> Vec<String> {
        let mut conditions = self.equalities.clone();
        if let Some(days) = self.window_days {
            conditions.push(match self.today {
                Some(today) => {
                    let start = today - Days::new(u64::from(days));
                    format!("date >= DATE '{}'", start.format("%Y-%m-%d"))
                }
                None => format!("date >= CURRENT_DATE - INTERVAL {days} DAY"),
            });
        }
        conditions
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn is_tautology(&self) -> bool {
        self.equalities.is_empty() && self.window_days.is_none()
    }

    pub fn where_clause(&self) -> String {
        if self.is_tautology() {
            "1=1".to_string()
        } else {
            self.conditions().join(" AND ")
        }
    }
}

/// Ungrouped totals over the filtered rows. Aggregates are NULL when nothing
/// matches; callers substitute zero.
pub fn metrics_sql(predicate: &Predicate) -> String {
    format!(
        r#"SELECT
    CAST(SUM(sales) AS DOUBLE) AS total_sales,
    CAST(SUM(revenue) AS DOUBLE) AS total_revenue,
    COUNT(*) AS total_orders,
    CAST(AVG(revenue) AS DOUBLE) AS average_order_value
FROM {SALES_TABLE}
WHERE {where_clause}"#,
        where_clause = predicate.where_clause()
    )
}

/// Per-category totals, largest sales volume first. Rows without a category
/// are dropped, not bucketed.
pub fn breakdown_sql(predicate: &Predicate) -> String {
    format!(
        r#"SELECT
    productSubcategory AS category,
    CAST(SUM(sales) AS DOUBLE) AS total_sales,
    CAST(SUM(revenue) AS DOUBLE) AS total_revenue,
    COUNT(*) AS order_count
FROM {SALES_TABLE}
WHERE {where_clause} AND productSubcategory IS NOT NULL
GROUP BY productSubcategory
ORDER BY total_sales DESC"#,
        where_clause = predicate.where_clause()
    )
}

pub fn distinct_values_sql(dimension: Dimension) -> String {
    let column = dimension.column();
    format!("SELECT DISTINCT {column} FROM {SALES_TABLE} WHERE {column} IS NOT NULL ORDER BY {column}")
}
