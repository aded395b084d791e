use async_trait::async_trait;
use sqlx::{MySql, Row};

use servify_core::analytics::{CategoryRow, CredentialStore, SalesBackend, TotalsRow};
use servify_core::auth::Credential;
use servify_core::error::CoreError;
use servify_core::filter::Dimension;
use servify_core::query::{breakdown_sql, distinct_values_sql, metrics_sql, Predicate};

use crate::backend::classify;
use crate::MySqlBackend;

#[async_trait]
impl SalesBackend for MySqlBackend {
    async fn aggregate_totals(&self, predicate: &Predicate) -> Result<TotalsRow, CoreError> {
        let sql = metrics_sql(predicate);
        let mut query = sqlx::query::<MySql>(&sql);
        for value in predicate.params() {
            query = query.bind(value.as_str());
        }

        let mut conn = self.acquire().await?;
        let row = query.fetch_one(&mut *conn).await.map_err(classify)?;

        Ok(TotalsRow {
            total_sales: row.try_get("total_sales").map_err(classify)?,
            total_revenue: row.try_get("total_revenue").map_err(classify)?,
            total_orders: row.try_get("total_orders").map_err(classify)?,
            average_order_value: row.try_get("average_order_value").map_err(classify)?,
        })
    }

    async fn aggregate_by_category(
        &self,
        predicate: &Predicate,
    ) -> Result<Vec<CategoryRow>, CoreError> {
        let sql = breakdown_sql(predicate);
        let mut query = sqlx::query::<MySql>(&sql);
        for value in predicate.params() {
            query = query.bind(value.as_str());
        }

        let mut conn = self.acquire().await?;
        let rows = query.fetch_all(&mut *conn).await.map_err(classify)?;

        rows.iter()
            .map(|row| -> Result<CategoryRow, sqlx::Error> {
                Ok(CategoryRow {
                    category: row.try_get("category")?,
                    total_sales: row.try_get("total_sales")?,
                    total_revenue: row.try_get("total_revenue")?,
                    order_count: row.try_get("order_count")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(classify)
    }

    async fn distinct_values(&self, dimension: Dimension) -> Result<Vec<String>, CoreError> {
        let sql = distinct_values_sql(dimension);
        let mut conn = self.acquire().await?;
        sqlx::query_scalar::<MySql, String>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(classify)
    }
}

#[async_trait]
impl CredentialStore for MySqlBackend {
    async fn find_credential(&self, email: &str) -> Result<Option<Credential>, CoreError> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query::<MySql>("SELECT email, password FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
            .map_err(classify)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let credential = Credential {
            email: row.try_get("email").map_err(classify)?,
            password_hash: row.try_get("password").map_err(classify)?,
        };
        // The default MySQL collation compares case-insensitively; only an
        // exact match counts.
        Ok((credential.email == email).then_some(credential))
    }
}
