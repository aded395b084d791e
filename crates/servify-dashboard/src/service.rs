use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use servify_core::analytics::{
    CategoryBreakdown, CategoryTotals, FilterOptions, MetricsResult, SalesBackend,
};
use servify_core::error::CoreError;
use servify_core::filter::{Dimension, FilterModel};
use servify_core::query::Predicate;

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub filter_options: FilterOptions,
    pub metrics: MetricsResult,
    pub breakdown: CategoryBreakdown,
    /// User-visible, non-fatal data-access warnings.
    pub warnings: Vec<String>,
}

/// Filtered aggregates over the sales store. Stateless: no caching, every
/// call reads the store.
#[derive(Clone)]
pub struct AggregationService {
    backend: Arc<dyn SalesBackend>,
}

impl AggregationService {
    pub fn new(backend: Arc<dyn SalesBackend>) -> Self {
        Self { backend }
    }

    /// Totals over the rows matching `filter`. Zero everywhere when nothing
    /// matches.
    pub async fn compute_metrics(&self, filter: &FilterModel) -> Result<MetricsResult, CoreError> {
        let predicate = Predicate::build(filter)?;
        self.metrics_for(&predicate).await
    }

    /// Per-category totals, `total_sales` descending.
    pub async fn compute_breakdown(
        &self,
        filter: &FilterModel,
    ) -> Result<CategoryBreakdown, CoreError> {
        let predicate = Predicate::build(filter)?;
        self.breakdown_for(&predicate).await
    }

    pub async fn filter_options(&self) -> Result<FilterOptions, CoreError> {
        Ok(FilterOptions {
            brands: self.backend.distinct_values(Dimension::Brand).await?,
            product_subcategories: self.backend.distinct_values(Dimension::Category).await?,
            stores: self.backend.distinct_values(Dimension::Store).await?,
        })
    }

    /// Load a full dashboard. Data-access failures degrade to zero/empty
    /// values plus a warning; an invalid filter is returned as an error
    /// before anything touches the store.
    pub async fn load(&self, filter: &FilterModel) -> Result<DashboardData, CoreError> {
        let predicate = Predicate::build(filter)?;
        let mut warnings = Vec::new();

        let filter_options = absorb(self.filter_options().await, "filter options", &mut warnings)?;
        let metrics = absorb(self.metrics_for(&predicate).await, "metrics", &mut warnings)?;
        let breakdown = absorb(self.breakdown_for(&predicate).await, "sales data", &mut warnings)?;

        debug!(
            conditions = predicate.conditions().len(),
            categories = breakdown.len(),
            warnings = warnings.len(),
            "Dashboard loaded"
        );

        Ok(DashboardData {
            filter_options,
            metrics,
            breakdown,
            warnings,
        })
    }

    async fn metrics_for(&self, predicate: &Predicate) -> Result<MetricsResult, CoreError> {
        let totals = self.backend.aggregate_totals(predicate).await?;
        Ok(MetricsResult::from(totals))
    }

    async fn breakdown_for(&self, predicate: &Predicate) -> Result<CategoryBreakdown, CoreError> {
        let rows = self.backend.aggregate_by_category(predicate).await?;
        let mut breakdown: CategoryBreakdown =
            rows.into_iter().map(CategoryTotals::from).collect();
        // Stable, so ties keep the store's order.
        breakdown.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
        Ok(breakdown)
    }
}

fn absorb<T: Default>(
    result: Result<T, CoreError>,
    what: &str,
    warnings: &mut Vec<String>,
) -> Result<T, CoreError> {
    match result {
        Ok(value) => Ok(value),
        Err(err @ CoreError::Connection(_)) => {
            warn!(error = %err, "Database connection error while loading {what}");
            warnings.push(format!("Database connection error while loading {what}"));
            Ok(T::default())
        }
        Err(err @ CoreError::DataSourceUnavailable(_)) => {
            warn!(error = %err, "Failed to load {what}");
            warnings.push(format!("Error loading {what}"));
            Ok(T::default())
        }
        Err(err) => Err(err),
    }
}
