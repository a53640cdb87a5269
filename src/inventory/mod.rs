//! Real-estate inventory: buildings, units, plots and sellers.
//!
//! Entities live in an in-memory [`InventoryStore`]. Handlers read snapshots
//! and apply filters, layout and statistics on top.

pub mod filters;
pub mod layout;
pub mod models;
pub mod routes;
pub mod seed;
pub mod stats;
pub mod store;

use uuid::Uuid;

use crate::booking::BookingValidationError;

pub use filters::{filter_items, Criterion, Filter, PlotFilter, SearchTerm, SellerFilter, UnitFilter};
pub use layout::{BuildingLayout, ExpansionState};
pub use models::{
    Building, Facing, GeoPoint, NewBuilding, NewPlot, NewSeller, OccupancyStatus, Plot, Seller,
    SellerStatus, Unit,
};
pub use store::{Inventory, InventoryStore};

/// Inventory operation error
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Building {0} not found")]
    BuildingNotFound(Uuid),

    #[error("Unit {0} not found")]
    UnitNotFound(Uuid),

    #[error("Unit {unit_id} is {status}; only available units can be booked")]
    UnitNotAvailable {
        unit_id: Uuid,
        status: OccupancyStatus,
    },

    #[error("Seller {0} not found")]
    SellerNotFound(Uuid),

    #[error("{0}")]
    InvalidBuilding(String),

    #[error("{0}")]
    InvalidPlot(String),

    #[error("{0}")]
    InvalidSeller(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error(transparent)]
    Booking(#[from] BookingValidationError),
}
