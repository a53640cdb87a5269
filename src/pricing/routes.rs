//! Cost calculator endpoint

use axum::{extract::State, routing::post, Json, Router};

use crate::extract::AppJson;
use crate::AppState;

use super::calculators::calculate_unit_cost;
use super::requests::CalculateUnitCostRequest;
use super::responses::UnitCostResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/pricing/unit-cost", post(unit_cost))
}

/// Live cost summary for the booking form.
///
/// Never fails on bad numbers: unparseable fields count as zero.
pub async fn unit_cost(
    State(state): State<AppState>,
    AppJson(request): AppJson<CalculateUnitCostRequest>,
) -> Json<UnitCostResponse> {
    let inputs = request.into_inputs(
        state.config.default_municipal_tax,
        state.config.default_electricity_tax,
    );
    let breakdown = calculate_unit_cost(&inputs);
    Json(UnitCostResponse::from_breakdown(&breakdown, &state.config.currency))
}
