//! In-memory inventory store.
//!
//! [`Inventory`] holds the entities and enforces the containment and booking
//! rules synchronously; [`InventoryStore`] shares it between requests behind a
//! single `RwLock`, so a booking's check-and-transition is atomic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::info;
use uuid::Uuid;

use crate::booking::{build_booking_record, BookingForm, BookingMode, TaxDefaults};

use super::models::{
    wing_label, Building, NewBuilding, NewPlot, NewSeller, OccupancyStatus, Plot, Seller, Unit,
};
use super::InventoryError;

/// Entities owned by the store
#[derive(Debug, Default)]
pub struct Inventory {
    buildings: Vec<Building>,
    units: Vec<Unit>,
    plots: Vec<Plot>,
    sellers: Vec<Seller>,
}

impl Inventory {
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn sellers(&self) -> &[Seller] {
        &self.sellers
    }

    pub fn building(&self, id: Uuid) -> Result<&Building, InventoryError> {
        self.buildings
            .iter()
            .find(|b| b.id == id)
            .ok_or(InventoryError::BuildingNotFound(id))
    }

    /// Units of one building in generation order (wing, floor, position)
    pub fn building_units(&self, id: Uuid) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.building_id == id)
    }

    pub fn unit(&self, id: Uuid) -> Result<&Unit, InventoryError> {
        self.units
            .iter()
            .find(|u| u.id == id)
            .ok_or(InventoryError::UnitNotFound(id))
    }

    /// Add a building and generate its vacant unit grid.
    pub fn add_building(&mut self, request: NewBuilding) -> Result<Building, InventoryError> {
        request.validate()?;
        let capacity = request.total_units() as usize;

        let mut building = Building {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            address: request.address.filter(|a| !a.trim().is_empty()),
            wings: request.wings,
            floors: request.floors,
            units_per_floor: request.units_per_floor,
            total_units: 0,
            booked_units: 0,
            available_units: 0,
        };

        self.units.reserve(capacity);
        for wing in 0..building.wings {
            let label = wing_label(wing);
            for floor in 1..=building.floors {
                for position in 1..=building.units_per_floor {
                    self.units
                        .push(Unit::vacant(building.id, &label, floor, position));
                }
            }
        }

        building.refresh_counters(&self.units);
        self.buildings.push(building.clone());
        Ok(building)
    }

    /// Remove a building together with all of its units.
    pub fn remove_building(&mut self, id: Uuid) -> Result<Building, InventoryError> {
        let index = self
            .buildings
            .iter()
            .position(|b| b.id == id)
            .ok_or(InventoryError::BuildingNotFound(id))?;

        self.units.retain(|u| u.building_id != id);
        Ok(self.buildings.remove(index))
    }

    /// Book an available unit.
    ///
    /// The unit must be `available`; otherwise nothing changes. The booking
    /// mode follows from the details already on the unit record.
    pub fn book_unit(
        &mut self,
        unit_id: Uuid,
        form: &BookingForm,
        defaults: &TaxDefaults,
        today: NaiveDate,
    ) -> Result<Unit, InventoryError> {
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.id == unit_id)
            .ok_or(InventoryError::UnitNotFound(unit_id))?;

        if unit.status != OccupancyStatus::Available {
            return Err(InventoryError::UnitNotAvailable {
                unit_id,
                status: unit.status,
            });
        }

        let mode = BookingMode::for_unit(unit);
        let record = build_booking_record(form, mode, defaults, today)?;
        unit.book(record)?;

        let booked = unit.clone();
        self.refresh_building(booked.building_id);
        Ok(booked)
    }

    /// Mark an available unit as reserved
    pub fn reserve_unit(&mut self, unit_id: Uuid) -> Result<(), InventoryError> {
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.id == unit_id)
            .ok_or(InventoryError::UnitNotFound(unit_id))?;

        if unit.status != OccupancyStatus::Available {
            return Err(InventoryError::UnitNotAvailable {
                unit_id,
                status: unit.status,
            });
        }
        unit.status = OccupancyStatus::Reserved;
        Ok(())
    }

    /// Record type, size and rate on a unit that is not booked yet
    pub fn set_unit_details(
        &mut self,
        unit_id: Uuid,
        unit_type: &str,
        size: Decimal,
        price_per_sq_ft: Decimal,
    ) -> Result<(), InventoryError> {
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.id == unit_id)
            .ok_or(InventoryError::UnitNotFound(unit_id))?;

        if unit.status == OccupancyStatus::Booked {
            return Err(InventoryError::UnitNotAvailable {
                unit_id,
                status: unit.status,
            });
        }
        unit.unit_type = Some(unit_type.to_string());
        unit.size = Some(size);
        unit.price_per_sq_ft = Some(price_per_sq_ft);
        Ok(())
    }

    pub fn add_plot(&mut self, plot: Plot) {
        self.plots.push(plot);
    }

    pub fn add_seller(&mut self, seller: Seller) {
        self.sellers.push(seller);
    }

    /// Validate and add a plot; plot numbers are unique ignoring case.
    pub fn create_plot(&mut self, request: NewPlot) -> Result<Plot, InventoryError> {
        let plot = request.into_plot()?;
        if self
            .plots
            .iter()
            .any(|p| p.plot_number.eq_ignore_ascii_case(&plot.plot_number))
        {
            return Err(InventoryError::AlreadyExists(format!("Plot {}", plot.plot_number)));
        }
        self.plots.push(plot.clone());
        Ok(plot)
    }

    /// Validate and add a seller account; usernames are unique ignoring case.
    pub fn create_seller(
        &mut self,
        request: NewSeller,
        today: NaiveDate,
    ) -> Result<Seller, InventoryError> {
        let seller = request.into_seller(today)?;
        if self
            .sellers
            .iter()
            .any(|s| s.username.eq_ignore_ascii_case(&seller.username))
        {
            return Err(InventoryError::AlreadyExists(format!(
                "Username {}",
                seller.username
            )));
        }
        self.sellers.push(seller.clone());
        Ok(seller)
    }

    pub fn remove_seller(&mut self, id: Uuid) -> Result<Seller, InventoryError> {
        let index = self
            .sellers
            .iter()
            .position(|s| s.id == id)
            .ok_or(InventoryError::SellerNotFound(id))?;
        Ok(self.sellers.remove(index))
    }

    fn refresh_building(&mut self, id: Uuid) {
        let units = &self.units;
        if let Some(building) = self.buildings.iter_mut().find(|b| b.id == id) {
            building.refresh_counters(units);
        }
    }
}

/// Shared handle to the inventory
#[derive(Clone, Default)]
pub struct InventoryStore {
    inner: Arc<RwLock<Inventory>>,
}

impl InventoryStore {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inventory)),
        }
    }

    /// Read access for multi-entity views (dashboard, layout)
    pub async fn read(&self) -> RwLockReadGuard<'_, Inventory> {
        self.inner.read().await
    }

    pub async fn list_buildings(&self) -> Vec<Building> {
        self.inner.read().await.buildings().to_vec()
    }

    pub async fn get_building(&self, id: Uuid) -> Result<Building, InventoryError> {
        self.inner.read().await.building(id).cloned()
    }

    pub async fn add_building(&self, request: NewBuilding) -> Result<Building, InventoryError> {
        let building = self.inner.write().await.add_building(request)?;
        info!(
            "Added building {} ({}) with {} units",
            building.name, building.id, building.total_units
        );
        Ok(building)
    }

    pub async fn delete_building(&self, id: Uuid) -> Result<Building, InventoryError> {
        let building = self.inner.write().await.remove_building(id)?;
        info!("Deleted building {} ({})", building.name, building.id);
        Ok(building)
    }

    pub async fn book_unit(
        &self,
        unit_id: Uuid,
        form: &BookingForm,
        defaults: &TaxDefaults,
        today: NaiveDate,
    ) -> Result<Unit, InventoryError> {
        let unit = self
            .inner
            .write()
            .await
            .book_unit(unit_id, form, defaults, today)?;
        info!("Booked unit {} ({}) for {}", unit.number, unit.id, form.buyer_name.trim());
        Ok(unit)
    }

    pub async fn add_plot(&self, request: NewPlot) -> Result<Plot, InventoryError> {
        let plot = self.inner.write().await.create_plot(request)?;
        info!("Added plot {} ({})", plot.plot_number, plot.id);
        Ok(plot)
    }

    pub async fn add_seller(
        &self,
        request: NewSeller,
        today: NaiveDate,
    ) -> Result<Seller, InventoryError> {
        let seller = self.inner.write().await.create_seller(request, today)?;
        info!("Added seller {} ({:?})", seller.username, seller.role);
        Ok(seller)
    }

    pub async fn delete_seller(&self, id: Uuid) -> Result<Seller, InventoryError> {
        let seller = self.inner.write().await.remove_seller(id)?;
        info!("Deleted seller {} ({})", seller.username, seller.id);
        Ok(seller)
    }
}
