//! Dashboard and health handlers

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::auth::{Role, Session};
use crate::cache::CacheStats;
use crate::inventory::stats::{dashboard_cards, DashboardCard};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub username: String,
    pub role: Role,
    pub cards: Vec<DashboardCard>,
}

/// Stat cards for the signed-in role
pub async fn dashboard(State(state): State<AppState>, session: Session) -> Json<DashboardResponse> {
    let today = Utc::now().date_naive();
    let inventory = state.store.read().await;

    Json(DashboardResponse {
        cards: dashboard_cards(&inventory, session.role, today),
        username: session.username,
        role: session.role,
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: CacheStats,
}

/// Liveness probe with cache statistics
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}
