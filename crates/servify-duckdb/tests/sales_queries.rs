use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use servify_core::{
    analytics::{CredentialStore, SalesBackend, SalesRecord},
    auth::legacy_digest,
    filter::{Dimension, FilterModel, TimeWindow},
    query::Predicate,
};
use servify_duckdb::DuckDbBackend;

fn record(
    brand: &str,
    category: Option<&str>,
    store: &str,
    date: NaiveDate,
    sales: i64,
    revenue: f64,
) -> SalesRecord {
    SalesRecord {
        brand: Some(brand.to_string()),
        product_subcategory: category.map(str::to_string),
        store: Some(store.to_string()),
        date,
        sales,
        revenue,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).expect("date")
}

fn open() -> DuckDbBackend {
    DuckDbBackend::open_in_memory()
        .expect("db")
        .with_today(today())
}

async fn seeded() -> Arc<DuckDbBackend> {
    let db = Arc::new(open());
    let today = today();
    db.insert_sales(&[
        record("Acme", Some("Laptops"), "Downtown", today, 10, 100.0),
        record("Acme", Some("Phones"), "Uptown", today - Duration::days(3), 4, 80.0),
        record("Globex", Some("Laptops"), "Uptown", today - Duration::days(20), 6, 60.0),
        record("Globex", None, "Downtown", today - Duration::days(90), 2, 20.0),
    ])
    .await
    .expect("seed");
    db
}

fn predicate(filter: &FilterModel) -> Predicate {
    Predicate::build(filter).expect("predicate")
}

#[tokio::test]
async fn test_totals_over_all_rows() {
    let db = seeded().await;
    let backend: Arc<dyn SalesBackend> = db.clone();

    let totals = backend
        .aggregate_totals(&predicate(&FilterModel::default()))
        .await
        .expect("totals");
    assert_eq!(totals.total_sales, Some(22.0));
    assert_eq!(totals.total_revenue, Some(260.0));
    assert_eq!(totals.total_orders, Some(4));
    assert_eq!(totals.average_order_value, Some(65.0));
}

#[tokio::test]
async fn test_totals_are_null_when_nothing_matches() {
    let db = seeded().await;
    let totals = db
        .aggregate_totals(&predicate(&FilterModel::default().with_brand("Initech")))
        .await
        .expect("totals");
    assert_eq!(totals.total_sales, None);
    assert_eq!(totals.total_revenue, None);
    assert_eq!(totals.average_order_value, None);
    assert_eq!(totals.total_orders, Some(0));
}

#[tokio::test]
async fn test_equality_filters_bind_positionally() {
    let db = seeded().await;
    let filter = FilterModel::default()
        .with_brand("Acme")
        .with_store("Uptown");
    let totals = db
        .aggregate_totals(&predicate(&filter))
        .await
        .expect("totals");
    assert_eq!(totals.total_orders, Some(1));
    assert_eq!(totals.total_sales, Some(4.0));
}

#[tokio::test]
async fn test_time_windows_trail_current_date() {
    let db = seeded().await;
    let count = |window: TimeWindow| {
        let db = db.clone();
        async move {
            db.aggregate_totals(&predicate(&FilterModel::default().with_time_window(window)))
                .await
                .expect("totals")
                .total_orders
        }
    };
    assert_eq!(count(TimeWindow::Day).await, Some(1));
    assert_eq!(count(TimeWindow::Week).await, Some(2));
    assert_eq!(count(TimeWindow::Month).await, Some(3));
    assert_eq!(count(TimeWindow::All).await, Some(4));
}

#[tokio::test]
async fn test_time_window_edges_are_inclusive() {
    let db = open();
    let rows: Vec<SalesRecord> = [0, 1, 2, 7, 8, 30, 31]
        .into_iter()
        .map(|days_back| {
            record(
                "Acme",
                Some("Laptops"),
                "Downtown",
                today() - Duration::days(days_back),
                1,
                10.0,
            )
        })
        .collect();
    db.insert_sales(&rows).await.expect("seed");

    let mut counts = Vec::new();
    for window in [
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::All,
    ] {
        let totals = db
            .aggregate_totals(&predicate(&FilterModel::default().with_time_window(window)))
            .await
            .expect("totals");
        counts.push(totals.total_orders);
    }
    assert_eq!(counts, [Some(2), Some(4), Some(6), Some(7)]);

    let week = db
        .aggregate_by_category(&predicate(
            &FilterModel::default().with_time_window(TimeWindow::Week),
        ))
        .await
        .expect("breakdown");
    assert_eq!(week.len(), 1);
    assert_eq!(week[0].order_count, 4);
}

#[tokio::test]
async fn test_unpinned_store_uses_utc_today() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    let before = chrono::Utc::now().date_naive();
    let today = db.today();
    let after = chrono::Utc::now().date_naive();
    assert!(before <= today && today <= after);
}

#[tokio::test]
async fn test_breakdown_sorted_and_skips_null_category() {
    let db = seeded().await;
    let rows = db
        .aggregate_by_category(&predicate(&FilterModel::default()))
        .await
        .expect("breakdown");

    let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, ["Laptops", "Phones"]);
    assert_eq!(rows[0].total_sales, Some(16.0));
    assert_eq!(rows[0].total_revenue, Some(160.0));
    assert_eq!(rows[0].order_count, 2);
    assert_eq!(rows[1].order_count, 1);
}

#[tokio::test]
async fn test_breakdown_respects_filter() {
    let db = seeded().await;
    let rows = db
        .aggregate_by_category(&predicate(&FilterModel::default().with_brand("Globex")))
        .await
        .expect("breakdown");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Laptops");
    assert_eq!(rows[0].total_sales, Some(6.0));
}

#[tokio::test]
async fn test_distinct_values_sorted_non_null() {
    let db = seeded().await;
    assert_eq!(
        db.distinct_values(Dimension::Brand).await.expect("brands"),
        ["Acme", "Globex"]
    );
    assert_eq!(
        db.distinct_values(Dimension::Category)
            .await
            .expect("categories"),
        ["Laptops", "Phones"]
    );
    assert_eq!(
        db.distinct_values(Dimension::Store).await.expect("stores"),
        ["Downtown", "Uptown"]
    );
}

#[tokio::test]
async fn test_credential_lookup_is_exact() {
    let db = Arc::new(open());
    db.upsert_user("a@x.com", &legacy_digest("right"))
        .await
        .expect("user");
    let store: Arc<dyn CredentialStore> = db.clone();

    let found = store
        .find_credential("a@x.com")
        .await
        .expect("lookup")
        .expect("credential");
    assert_eq!(found.email, "a@x.com");
    assert_eq!(found.password_hash, legacy_digest("right"));

    assert!(store
        .find_credential("A@X.COM")
        .await
        .expect("lookup")
        .is_none());
    assert!(store
        .find_credential("nouser@x.com")
        .await
        .expect("lookup")
        .is_none());
}

#[tokio::test]
async fn test_upsert_user_replaces_digest() {
    let db = open();
    db.upsert_user("a@x.com", &legacy_digest("old"))
        .await
        .expect("user");
    db.upsert_user("a@x.com", &legacy_digest("new"))
        .await
        .expect("user");
    let found = db
        .find_credential("a@x.com")
        .await
        .expect("lookup")
        .expect("credential");
    assert_eq!(found.password_hash, legacy_digest("new"));
}

#[tokio::test]
async fn test_insert_empty_batch_is_noop() {
    let db = open();
    db.insert_sales(&[]).await.expect("noop");
    let totals = db
        .aggregate_totals(&predicate(&FilterModel::default()))
        .await
        .expect("totals");
    assert_eq!(totals.total_orders, Some(0));
}
