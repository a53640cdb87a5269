use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use buildercon_web::config::Config;
use buildercon_web::inventory::{seed, Inventory, InventoryStore};
use buildercon_web::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let inventory = if config.seed_demo_data {
        let inventory = seed::demo_inventory(&config.tax_defaults(), Utc::now().date_naive())
            .context("Failed to seed demo inventory")?;
        tracing::info!(
            "Seeded demo inventory: {} buildings, {} units, {} plots, {} sellers",
            inventory.buildings().len(),
            inventory.units().len(),
            inventory.plots().len(),
            inventory.sellers().len()
        );
        inventory
    } else {
        Inventory::default()
    };

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, InventoryStore::new(inventory));
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
