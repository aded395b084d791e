//! Dashboard filter selections.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One selectable dimension value, or no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parse a raw widget value. The "all" sentinels the UI shell uses map to
    /// [`Selection::All`]; blank values are rejected rather than treated as
    /// "no filter".
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_filter(field, raw));
        }
        if Self::is_sentinel(trimmed) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(trimmed.to_string()))
        }
    }

    /// `true` for the widget texts meaning "no restriction".
    pub fn is_sentinel(raw: &str) -> bool {
        matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "all" | "all brands" | "all categories" | "all stores"
        )
    }

    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v.as_str()),
        }
    }
}

/// Trailing date window relative to the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    Day,
    Week,
    Month,
}

impl TimeWindow {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" | "indefinite" | "all time" => Ok(Self::All),
            "day" | "daily" | "last day" => Ok(Self::Day),
            "week" | "weekly" | "last week" => Ok(Self::Week),
            "month" | "monthly" | "last month" => Ok(Self::Month),
            _ => Err(CoreError::invalid_filter("time_window", raw)),
        }
    }

    /// Length of the window in days; `None` for [`TimeWindow::All`].
    pub fn days(self) -> Option<u32> {
        match self {
            Self::All => None,
            Self::Day => Some(1),
            Self::Week => Some(7),
            Self::Month => Some(30),
        }
    }
}

/// Filterable columns of `sales_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Brand,
    Category,
    Store,
}

impl Dimension {
    pub fn column(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Category => "productSubcategory",
            Self::Store => "store",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Category => "category",
            Self::Store => "store",
        }
    }
}

/// The four-dimension selection controlling which sales rows are aggregated.
///
/// Every field defaults to "no restriction".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterModel {
    pub brand: Selection,
    pub category: Selection,
    pub store: Selection,
    pub time_window: TimeWindow,
}

impl FilterModel {
    /// Build a filter from raw widget values.
    pub fn from_raw(
        brand: &str,
        category: &str,
        store: &str,
        time_window: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            brand: Selection::parse("brand", brand)?,
            category: Selection::parse("category", category)?,
            store: Selection::parse("store", store)?,
            time_window: TimeWindow::parse(time_window)?,
        })
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Selection::only(brand);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Selection::only(category);
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Selection::only(store);
        self
    }

    pub fn with_time_window(mut self, time_window: TimeWindow) -> Self {
        self.time_window = time_window;
        self
    }

    /// Equality selections in binding order: brand, category, store.
    pub fn selections(&self) -> [(Dimension, &Selection); 3] {
        [
            (Dimension::Brand, &self.brand),
            (Dimension::Category, &self.category),
            (Dimension::Store, &self.store),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_unrestricted() {
        let filter = FilterModel::default();
        assert!(filter.brand.is_all());
        assert!(filter.category.is_all());
        assert!(filter.store.is_all());
        assert_eq!(filter.time_window, TimeWindow::All);
    }

    #[test]
    fn ui_sentinels_parse_to_all() {
        let filter = FilterModel::from_raw("All Brands", "all", "ALL STORES", "All Time")
            .expect("parse");
        assert_eq!(filter, FilterModel::default());
    }

    #[test]
    fn sentinel_detection() {
        assert!(Selection::is_sentinel("All Stores"));
        assert!(Selection::is_sentinel(" all "));
        assert!(!Selection::is_sentinel("Allbirds"));
        assert!(!Selection::is_sentinel(""));
    }

    #[test]
    fn concrete_values_are_trimmed() {
        let filter =
            FilterModel::from_raw(" Acme ", "Laptops", "Downtown", "weekly").expect("parse");
        assert_eq!(filter.brand.value(), Some("Acme"));
        assert_eq!(filter.category.value(), Some("Laptops"));
        assert_eq!(filter.store.value(), Some("Downtown"));
        assert_eq!(filter.time_window, TimeWindow::Week);
    }

    #[test]
    fn blank_selection_is_rejected() {
        let err = FilterModel::from_raw("Acme", "  ", "all", "all").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidFilterValue {
                field: "category",
                ..
            }
        ));
    }

    #[test]
    fn unknown_time_window_is_rejected() {
        let err = TimeWindow::parse("fortnightly").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidFilterValue {
                field: "time_window",
                ..
            }
        ));
    }

    #[test]
    fn time_window_aliases() {
        assert_eq!(TimeWindow::parse("Last Day").expect("day"), TimeWindow::Day);
        assert_eq!(TimeWindow::parse("daily").expect("day"), TimeWindow::Day);
        assert_eq!(TimeWindow::parse("month").expect("month"), TimeWindow::Month);
        assert_eq!(TimeWindow::parse("indefinite").expect("all"), TimeWindow::All);
        assert_eq!(TimeWindow::Day.days(), Some(1));
        assert_eq!(TimeWindow::Week.days(), Some(7));
        assert_eq!(TimeWindow::Month.days(), Some(30));
        assert_eq!(TimeWindow::All.days(), None);
    }

    #[test]
    fn filter_serializes_camel_case() {
        let filter = FilterModel::default()
            .with_brand("Acme")
            .with_time_window(TimeWindow::Month);
        let json = serde_json::to_value(&filter).expect("json");
        assert_eq!(json["brand"]["only"], "Acme");
        assert_eq!(json["category"], "all");
        assert_eq!(json["timeWindow"], "month");
    }
}
