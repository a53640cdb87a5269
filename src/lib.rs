//! BuilderCon inventory and booking service.
//!
//! JSON API behind the real-estate admin dashboard: buildings, units, plots
//! and sellers held in memory, a booking workflow and a unit cost calculator.

pub mod auth;
pub mod booking;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod inventory;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use cache::AppCache;
use config::Config;
use inventory::InventoryStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: AppCache,
    pub store: InventoryStore,
}

impl AppState {
    pub fn new(config: Config, store: InventoryStore) -> Self {
        Self {
            cache: AppCache::new(config.session_ttl),
            config: Arc::new(config),
            store,
        }
    }
}
