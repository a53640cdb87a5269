//! Inventory route handlers: buildings, units, plots and sellers

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Session;
use crate::error::{AppError, Result};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::pricing::calculate_unit_cost;
use crate::pricing::responses::UnitCostResponse;
use crate::AppState;

use super::filters::{filter_items, PlotFilter, SellerFilter, UnitFilter};
use super::layout::{BuildingLayout, ExpansionState};
use super::models::{Building, NewBuilding, NewPlot, NewSeller, Plot, Seller, Unit};
use super::stats::{PlotStats, SellerStats, UnitStats};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/buildings", get(list_buildings).post(create_building))
        .route("/api/buildings/:id", get(get_building).delete(delete_building))
        .route("/api/buildings/:id/layout", get(building_layout))
        .route("/api/units", get(list_units))
        .route("/api/units/:id", get(get_unit))
        .route("/api/plots", get(list_plots).post(create_plot))
        .route("/api/sellers", get(list_sellers).post(create_seller))
        .route("/api/sellers/:id", delete(delete_seller))
}

/// Building with its occupancy percentage
#[derive(Debug, Serialize)]
pub struct BuildingView {
    #[serde(flatten)]
    pub building: Building,
    pub occupancy_rate: Decimal,
}

impl From<Building> for BuildingView {
    fn from(building: Building) -> Self {
        Self {
            occupancy_rate: building.occupancy_rate(),
            building,
        }
    }
}

pub async fn list_buildings(
    State(state): State<AppState>,
    _session: Session,
) -> Json<Vec<BuildingView>> {
    let buildings = state.store.list_buildings().await;
    Json(buildings.into_iter().map(BuildingView::from).collect())
}

pub async fn create_building(
    State(state): State<AppState>,
    _session: Session,
    AppJson(request): AppJson<NewBuilding>,
) -> Result<(StatusCode, Json<BuildingView>)> {
    let building = state.store.add_building(request).await?;
    Ok((StatusCode::CREATED, Json(building.into())))
}

pub async fn get_building(
    State(state): State<AppState>,
    _session: Session,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<BuildingView>> {
    let building = state.store.get_building(id).await?;
    Ok(Json(building.into()))
}

pub async fn delete_building(
    State(state): State<AppState>,
    _session: Session,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode> {
    state.store.delete_building(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `?expand=` takes comma-separated wing and floor keys
#[derive(Debug, Default, Deserialize)]
pub struct LayoutQuery {
    #[serde(default)]
    pub expand: String,
}

pub async fn building_layout(
    State(state): State<AppState>,
    _session: Session,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<LayoutQuery>,
) -> Result<Json<BuildingLayout>> {
    let expansion = ExpansionState::from_keys(&query.expand);
    let inventory = state.store.read().await;
    let building = inventory.building(id)?;
    Ok(Json(BuildingLayout::build(
        building,
        inventory.building_units(id),
        &expansion,
    )))
}

/// Filtered units plus summary over every unit
#[derive(Debug, Serialize)]
pub struct UnitListResponse {
    pub units: Vec<Unit>,
    pub stats: UnitStats,
}

pub async fn list_units(
    State(state): State<AppState>,
    _session: Session,
    AppQuery(filter): AppQuery<UnitFilter>,
) -> Json<UnitListResponse> {
    let inventory = state.store.read().await;
    Json(UnitListResponse {
        units: filter_items(inventory.units(), &filter),
        stats: UnitStats::from_units(inventory.units()),
    })
}

/// Unit with its building name and cost summary
#[derive(Debug, Serialize)]
pub struct UnitDetailResponse {
    pub unit: Unit,
    pub building_name: String,
    pub cost: UnitCostResponse,
}

pub async fn get_unit(
    State(state): State<AppState>,
    _session: Session,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<UnitDetailResponse>> {
    let inventory = state.store.read().await;
    let unit = inventory.unit(id)?;
    let building = inventory.building(unit.building_id).map_err(|_| {
        AppError::Internal(format!(
            "unit {} refers to missing building {}",
            unit.id, unit.building_id
        ))
    })?;

    let breakdown = calculate_unit_cost(&unit.cost_inputs(&state.config.tax_defaults()));
    Ok(Json(UnitDetailResponse {
        unit: unit.clone(),
        building_name: building.name.clone(),
        cost: UnitCostResponse::from_breakdown(&breakdown, &state.config.currency),
    }))
}

/// Plot with its derived rate
#[derive(Debug, Serialize)]
pub struct PlotView {
    #[serde(flatten)]
    pub plot: Plot,
    pub price_per_sq_ft: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PlotListResponse {
    pub plots: Vec<PlotView>,
    pub stats: PlotStats,
}

pub async fn list_plots(
    State(state): State<AppState>,
    _session: Session,
    AppQuery(filter): AppQuery<PlotFilter>,
) -> Json<PlotListResponse> {
    let inventory = state.store.read().await;
    let plots = filter_items(inventory.plots(), &filter)
        .into_iter()
        .map(|plot| PlotView {
            price_per_sq_ft: plot.price_per_sq_ft(),
            plot,
        })
        .collect();

    Json(PlotListResponse {
        plots,
        stats: PlotStats::from_plots(inventory.plots()),
    })
}

/// Add a plot, SUPER only
pub async fn create_plot(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<NewPlot>,
) -> Result<(StatusCode, Json<PlotView>)> {
    session.require_super()?;

    let plot = state.store.add_plot(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlotView {
            price_per_sq_ft: plot.price_per_sq_ft(),
            plot,
        }),
    ))
}

/// Seller with conversion rate
#[derive(Debug, Serialize)]
pub struct SellerView {
    #[serde(flatten)]
    pub seller: Seller,
    pub conversion_rate: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SellerListResponse {
    pub sellers: Vec<SellerView>,
    pub stats: SellerStats,
}

/// Sellers listing, SUPER only
pub async fn list_sellers(
    State(state): State<AppState>,
    session: Session,
    AppQuery(filter): AppQuery<SellerFilter>,
) -> Result<Json<SellerListResponse>> {
    session.require_super()?;

    let inventory = state.store.read().await;
    let sellers = filter_items(inventory.sellers(), &filter)
        .into_iter()
        .map(|seller| SellerView {
            conversion_rate: seller.conversion_rate(),
            seller,
        })
        .collect();

    Ok(Json(SellerListResponse {
        sellers,
        stats: SellerStats::from_sellers(inventory.sellers()),
    }))
}

/// Add a seller account, SUPER only
pub async fn create_seller(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<NewSeller>,
) -> Result<(StatusCode, Json<SellerView>)> {
    session.require_super()?;

    let seller = state
        .store
        .add_seller(request, Utc::now().date_naive())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SellerView {
            conversion_rate: seller.conversion_rate(),
            seller,
        }),
    ))
}

/// Remove a seller account, SUPER only
pub async fn delete_seller(
    State(state): State<AppState>,
    session: Session,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode> {
    session.require_super()?;

    state.store.delete_seller(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
