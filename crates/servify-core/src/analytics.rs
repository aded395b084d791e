//! Sales store abstraction.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::Credential;
use crate::error::CoreError;
use crate::filter::Dimension;
use crate::query::Predicate;

/// One row of `sales_data`. Read-only from the dashboard's side; stores that
/// support seeding accept it for fixtures and local data loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub brand: Option<String>,
    pub product_subcategory: Option<String>,
    pub store: Option<String>,
    pub date: NaiveDate,
    pub sales: i64,
    pub revenue: f64,
}

/// Raw ungrouped aggregates exactly as the store returned them. Every SQL
/// aggregate except `COUNT(*)` is NULL over an empty row set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalsRow {
    pub total_sales: Option<f64>,
    pub total_revenue: Option<f64>,
    pub total_orders: Option<i64>,
    pub average_order_value: Option<f64>,
}

/// Raw per-category aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub total_sales: Option<f64>,
    pub total_revenue: Option<f64>,
    pub order_count: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
    pub total_sales: f64,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub total_orders: i64,
}

impl From<TotalsRow> for MetricsResult {
    fn from(row: TotalsRow) -> Self {
        Self {
            total_sales: row.total_sales.unwrap_or(0.0),
            total_revenue: row.total_revenue.unwrap_or(0.0),
            average_order_value: row.average_order_value.unwrap_or(0.0),
            total_orders: row.total_orders.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub category: String,
    pub total_sales: f64,
    pub total_revenue: f64,
    pub order_count: i64,
}

impl From<CategoryRow> for CategoryTotals {
    fn from(row: CategoryRow) -> Self {
        Self {
            category: row.category,
            total_sales: row.total_sales.unwrap_or(0.0),
            total_revenue: row.total_revenue.unwrap_or(0.0),
            order_count: row.order_count,
        }
    }
}

/// Per-category totals ordered by `total_sales` descending. Tie order is
/// whatever the store produced and is not part of the contract.
pub type CategoryBreakdown = Vec<CategoryTotals>;

/// Distinct, non-null, ascending values offered by the filter widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub product_subcategories: Vec<String>,
    pub stores: Vec<String>,
}

/// Aggregate queries over `sales_data`.
///
/// Implementations run the statement text from [`crate::query`] and bind
/// `predicate.params()` positionally. Each call performs exactly one query.
#[async_trait]
pub trait SalesBackend: Send + Sync + 'static {
    async fn aggregate_totals(&self, predicate: &Predicate) -> Result<TotalsRow, CoreError>;

    async fn aggregate_by_category(
        &self,
        predicate: &Predicate,
    ) -> Result<Vec<CategoryRow>, CoreError>;

    async fn distinct_values(&self, dimension: Dimension) -> Result<Vec<String>, CoreError>;
}

/// Lookup side of the `users` table.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Exact-match lookup by email. `Ok(None)` when no such user exists.
    async fn find_credential(&self, email: &str) -> Result<Option<Credential>, CoreError>;
}
