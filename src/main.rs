use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod db;
mod domain;
mod error;
mod metrics;
mod repositories;

use config::AppConfig;
use domain::order::{CreateOrder, CreateOrderService};
use metrics::OrderMetrics;
use repositories::{PgCustomersRepository, PgOrdersRepository, PgProductsRepository};

/// Usage: order_service [request.json]
///
/// Reads one order request (from the given file, or stdin when no path is
/// given), creates the order and prints it as JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
        )
        .init();

    tracing::info!("🚀 Starting order service");

    // === 1. Read the request ===
    let raw = match std::env::args().nth(1) {
        Some(path) => {
            tracing::debug!(path = %path, "Reading order request from file");
            tokio::fs::read_to_string(&path).await?
        }
        None => {
            tracing::debug!("Reading order request from stdin");
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };
    let command: CreateOrder = serde_json::from_str(&raw)?;

    // === 2. Connect to PostgreSQL ===
    let pool = db::connect(&config).await?;
    if config.run_migrations {
        db::run_migrations(&pool).await?;
    }

    // === 3. Wire the workflow ===
    let metrics = Arc::new(OrderMetrics::new()?);
    let service = CreateOrderService::new(
        Arc::new(PgCustomersRepository::new(pool.clone())),
        Arc::new(PgProductsRepository::new(pool.clone())),
        Arc::new(PgOrdersRepository::new(pool.clone())),
        metrics.clone(),
    );

    // === 4. Create the order ===
    let outcome = service.execute(command).await;

    tracing::debug!(metrics = %metrics.render()?, "Order metrics");
    pool.close().await;

    match outcome {
        Ok(order) => {
            println!("{}", serde_json::to_string_pretty(&order)?);
            Ok(())
        }
        Err(error) => {
            tracing::error!(status = error.status_code(), error = %error, "Order creation failed");
            anyhow::bail!("{}", error.message())
        }
    }
}
