use anyhow::Result;
use tracing::info;

use servify_core::config::Config;
use servify_core::filter::FilterModel;
use servify_dashboard::session::{DashboardSession, View, INVALID_LOGIN};
use servify_dashboard::state::AppState;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `SERVIFY_BRAND` / `SERVIFY_CATEGORY` / `SERVIFY_STORE_FILTER` /
/// `SERVIFY_TIME_WINDOW`; unset means no restriction.
fn filter_from_env() -> Result<FilterModel> {
    Ok(FilterModel::from_raw(
        &env_or("SERVIFY_BRAND", "all"),
        &env_or("SERVIFY_CATEGORY", "all"),
        &env_or("SERVIFY_STORE_FILTER", "all"),
        &env_or("SERVIFY_TIME_WINDOW", "all"),
    )?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("servify=info".parse()?),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    info!(store = ?cfg.store, db = ?cfg.db, "Servify starting");

    let filter = filter_from_env()?;
    let state = AppState::open(cfg).await?;

    let mut session = DashboardSession::new();
    let email = env_or("SERVIFY_EMAIL", "");
    let password = env_or("SERVIFY_PASSWORD", "");
    if !session.login(&state.gate(), &email, &password).await {
        eprintln!("{INVALID_LOGIN}");
        std::process::exit(1);
    }

    session.set_filter(filter);
    if env_or("SERVIFY_VIEW", "sales").eq_ignore_ascii_case("insights") {
        session.select_view(View::Insights);
    }

    let screen = session.render(&state.service()).await?;
    println!("{}", serde_json::to_string_pretty(&screen)?);
    Ok(())
}
