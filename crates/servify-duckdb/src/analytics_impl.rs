use async_trait::async_trait;

use servify_core::analytics::{CategoryRow, CredentialStore, SalesBackend, TotalsRow};
use servify_core::auth::Credential;
use servify_core::error::CoreError;
use servify_core::filter::Dimension;
use servify_core::query::Predicate;

use crate::DuckDbBackend;

#[async_trait]
impl SalesBackend for DuckDbBackend {
    async fn aggregate_totals(&self, predicate: &Predicate) -> Result<TotalsRow, CoreError> {
        crate::queries::totals::aggregate_totals_inner(self, predicate).await
    }

    async fn aggregate_by_category(
        &self,
        predicate: &Predicate,
    ) -> Result<Vec<CategoryRow>, CoreError> {
        crate::queries::breakdown::aggregate_by_category_inner(self, predicate).await
    }

    async fn distinct_values(&self, dimension: Dimension) -> Result<Vec<String>, CoreError> {
        crate::queries::options::distinct_values_inner(self, dimension).await
    }
}

#[async_trait]
impl CredentialStore for DuckDbBackend {
    async fn find_credential(&self, email: &str) -> Result<Option<Credential>, CoreError> {
        DuckDbBackend::find_credential(self, email).await
    }
}
