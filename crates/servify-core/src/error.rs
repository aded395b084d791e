use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The data store could not be reached (connect, I/O, pool exhaustion).
    #[error("connection error: {0}")]
    Connection(#[source] anyhow::Error),

    /// A filter selection that the query layer does not recognise.
    #[error("invalid value {value:?} for filter `{field}`")]
    InvalidFilterValue { field: &'static str, value: String },

    /// The store was reached but rejected or failed the query.
    #[error("data source unavailable: {0}")]
    DataSourceUnavailable(#[source] anyhow::Error),
}

impl CoreError {
    pub fn connection(err: impl Into<anyhow::Error>) -> Self {
        Self::Connection(err.into())
    }

    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        Self::DataSourceUnavailable(err.into())
    }

    pub fn invalid_filter(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            field,
            value: value.into(),
        }
    }

    /// `true` for failures the UI shell absorbs as zero/empty results plus a
    /// warning. `InvalidFilterValue` is a caller bug and is never absorbed.
    pub fn is_data_access(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::DataSourceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_access_classification() {
        assert!(CoreError::connection(anyhow::anyhow!("refused")).is_data_access());
        assert!(CoreError::unavailable(anyhow::anyhow!("syntax")).is_data_access());
        assert!(!CoreError::invalid_filter("brand", "").is_data_access());
    }

    #[test]
    fn invalid_filter_message_names_field() {
        let err = CoreError::invalid_filter("time_window", "fortnightly");
        assert_eq!(
            err.to_string(),
            "invalid value \"fortnightly\" for filter `time_window`"
        );
    }
}
