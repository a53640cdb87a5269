//! Booking endpoint

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::Session;
use crate::error::Result;
use crate::extract::{AppJson, AppPath};
use crate::inventory::Unit;
use crate::pricing::calculate_unit_cost;
use crate::pricing::responses::UnitCostResponse;
use crate::AppState;

use super::models::BookingForm;

/// Booked unit with its cost summary
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub unit: Unit,
    pub cost: UnitCostResponse,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/units/:id/booking", post(book_unit))
}

/// Book an available unit.
///
/// Invalid forms return 422 listing every failing category; units that are
/// not available return 409. Either way nothing changes.
pub async fn book_unit(
    State(state): State<AppState>,
    session: Session,
    AppPath(unit_id): AppPath<Uuid>,
    AppJson(form): AppJson<BookingForm>,
) -> Result<Json<BookingResponse>> {
    let defaults = state.config.tax_defaults();
    let today = Utc::now().date_naive();

    let unit = state
        .store
        .book_unit(unit_id, &form, &defaults, today)
        .await?;
    tracing::info!("Unit {} booked by {}", unit.number, session.username);

    let breakdown = calculate_unit_cost(&unit.cost_inputs(&defaults));
    Ok(Json(BookingResponse {
        cost: UnitCostResponse::from_breakdown(&breakdown, &state.config.currency),
        unit,
    }))
}
