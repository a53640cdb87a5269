//! Inventory models: buildings, units, plots and sellers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Role;
use crate::booking::models::{blank_as_none, null_as_empty};
use crate::booking::{BookingRecord, TaxDefaults};
use crate::pricing::amount::deserialize_amount;
use crate::pricing::calculators::{percentage, price_per_area, CostInputs};

use super::InventoryError;

/// Occupancy status shared by units and plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyStatus {
    Available,
    Booked,
    Reserved,
}

impl std::fmt::Display for OccupancyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OccupancyStatus::Available => "available",
            OccupancyStatus::Booked => "booked",
            OccupancyStatus::Reserved => "reserved",
        };
        f.write_str(label)
    }
}

/// Building with its structural shape and reconciled unit counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub wings: u32,
    pub floors: u32,
    pub units_per_floor: u32,
    pub total_units: u32,
    pub booked_units: u32,
    pub available_units: u32,
}

impl Building {
    /// Recompute counters from the units the building owns.
    pub fn refresh_counters<'a>(&mut self, units: impl IntoIterator<Item = &'a Unit>) {
        let booked = units
            .into_iter()
            .filter(|u| u.building_id == self.id && u.status == OccupancyStatus::Booked)
            .count() as u32;

        self.total_units = self.wings * self.floors * self.units_per_floor;
        self.booked_units = booked;
        self.available_units = self.total_units.saturating_sub(booked);
    }

    /// Check `total = wings * floors * units_per_floor` and `available = total - booked`.
    pub fn counters_reconcile(&self) -> bool {
        self.total_units == self.wings * self.floors * self.units_per_floor
            && self.booked_units <= self.total_units
            && self.available_units == self.total_units - self.booked_units
    }

    /// Share of booked units as a percentage (one decimal place)
    pub fn occupancy_rate(&self) -> Decimal {
        percentage(Decimal::from(self.booked_units), Decimal::from(self.total_units))
    }
}

/// Payload for adding a building
#[derive(Debug, Clone, Deserialize)]
pub struct NewBuilding {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub wings: u32,
    pub floors: u32,
    pub units_per_floor: u32,
}

/// Most wings a building can have; wings are labelled `A` to `Z`.
pub const MAX_WINGS: u32 = 26;

/// Upper bound on generated units per building.
pub const MAX_UNITS_PER_BUILDING: u32 = 10_000;

impl NewBuilding {
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::InvalidBuilding(
                "Building name is required".to_string(),
            ));
        }
        if self.wings == 0 || self.floors == 0 || self.units_per_floor == 0 {
            return Err(InventoryError::InvalidBuilding(
                "Wings, floors and units per floor must each be at least 1".to_string(),
            ));
        }
        if self.wings > MAX_WINGS {
            return Err(InventoryError::InvalidBuilding(format!(
                "A building can have at most {} wings",
                MAX_WINGS
            )));
        }
        let total = self
            .wings
            .checked_mul(self.floors)
            .and_then(|n| n.checked_mul(self.units_per_floor));
        if total.map_or(true, |n| n > MAX_UNITS_PER_BUILDING) {
            return Err(InventoryError::InvalidBuilding(format!(
                "A building can have at most {} units",
                MAX_UNITS_PER_BUILDING
            )));
        }
        Ok(())
    }

    /// Total units; only meaningful once [`NewBuilding::validate`] passed
    pub fn total_units(&self) -> u32 {
        self.wings * self.floors * self.units_per_floor
    }
}

/// Wing label for a zero-based wing index (`0 -> "A"`).
pub fn wing_label(index: u32) -> String {
    char::from(b'A' + (index % MAX_WINGS) as u8).to_string()
}

/// Unit number as shown on the dashboard, e.g. `A101` for wing A, floor 1, unit 1.
pub fn unit_number(wing: &str, floor: u32, position: u32) -> String {
    format!("{}{}{:02}", wing, floor, position)
}

/// Sellable space within a floor
///
/// `booking` is present iff `status` is [`OccupancyStatus::Booked`]; the only
/// way to reach that state is [`Unit::book`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub number: String,
    pub building_id: Uuid,
    pub wing: String,
    pub floor: u32,
    pub status: OccupancyStatus,
    pub unit_type: Option<String>,
    pub size: Option<Decimal>,
    pub price_per_sq_ft: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingRecord>,
}

impl Unit {
    /// New available unit with no recorded details
    pub fn vacant(building_id: Uuid, wing: &str, floor: u32, position: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: unit_number(wing, floor, position),
            building_id,
            wing: wing.to_string(),
            floor,
            status: OccupancyStatus::Available,
            unit_type: None,
            size: None,
            price_per_sq_ft: None,
            booking: None,
        }
    }

    /// Whether type, size and price are already on record
    pub fn has_unit_details(&self) -> bool {
        self.unit_type.as_deref().is_some_and(|t| !t.trim().is_empty())
            && self.size.is_some_and(|s| s > Decimal::ZERO)
            && self.price_per_sq_ft.is_some_and(|p| p > Decimal::ZERO)
    }

    /// Transition `available -> booked`, attaching the booking record.
    ///
    /// Unit details carried by the record (fresh bookings) replace the ones on file.
    pub fn book(&mut self, record: BookingRecord) -> Result<(), InventoryError> {
        if self.status != OccupancyStatus::Available {
            return Err(InventoryError::UnitNotAvailable {
                unit_id: self.id,
                status: self.status,
            });
        }

        if let Some(unit_type) = &record.unit_type {
            self.unit_type = Some(unit_type.clone());
        }
        if let Some(size) = record.size {
            self.size = Some(size);
        }
        if let Some(rate) = record.price_per_sq_ft {
            self.price_per_sq_ft = Some(rate);
        }

        self.status = OccupancyStatus::Booked;
        self.booking = Some(record);
        Ok(())
    }

    /// Buyer fields exist iff the unit is booked
    pub fn is_consistent(&self) -> bool {
        (self.status == OccupancyStatus::Booked) == self.booking.is_some()
    }

    /// Cost calculator inputs for this unit.
    ///
    /// Booked units use the taxes and paid amount on their booking; others use
    /// `defaults` and nothing paid. Unknown size or rate counts as zero.
    pub fn cost_inputs(&self, defaults: &TaxDefaults) -> CostInputs {
        let (municipal_tax, electricity_tax, paid_amount) = match &self.booking {
            Some(b) => (b.municipal_tax, b.electricity_tax, b.paid_amount),
            None => (defaults.municipal_tax, defaults.electricity_tax, Decimal::ZERO),
        };
        CostInputs {
            size: self.size.unwrap_or_default(),
            price_per_sq_ft: self.price_per_sq_ft.unwrap_or_default(),
            municipal_tax,
            electricity_tax,
            paid_amount,
        }
    }
}

/// Compass direction a plot faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    North,
    South,
    East,
    West,
    #[serde(rename = "North-East")]
    NorthEast,
    #[serde(rename = "North-West")]
    NorthWest,
    #[serde(rename = "South-East")]
    SouthEast,
    #[serde(rename = "South-West")]
    SouthWest,
}

/// Geocoordinate of a plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Independent land parcel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plot {
    pub id: Uuid,
    pub plot_number: String,
    pub area: Decimal,
    pub price: Decimal,
    pub facing: Facing,
    pub status: OccupancyStatus,
    /// Present iff the plot is booked
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub dimensions: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Plot {
    pub fn price_per_sq_ft(&self) -> Decimal {
        price_per_area(self.price, self.area)
    }

    pub fn is_consistent(&self) -> bool {
        (self.status == OccupancyStatus::Booked) == self.owner_name.is_some()
    }
}

/// Payload for adding a plot
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub plot_number: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub area: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub facing: Option<Facing>,
    #[serde(default = "available")]
    pub status: OccupancyStatus,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

const FACING_REQUIRED: &str = "Please select which direction the plot faces";

fn available() -> OccupancyStatus {
    OccupancyStatus::Available
}

impl NewPlot {
    /// Check required fields and that an owner is named iff the plot is booked.
    pub fn validate(&self) -> Result<(), InventoryError> {
        let invalid = |message: &str| Err(InventoryError::InvalidPlot(message.to_string()));

        if self.plot_number.trim().is_empty() {
            return invalid("Plot number is required");
        }
        if self.area <= Decimal::ZERO {
            return invalid("Plot area must be greater than zero");
        }
        if self.price <= Decimal::ZERO {
            return invalid("Plot price must be greater than zero");
        }
        if self.facing.is_none() {
            return invalid(FACING_REQUIRED);
        }
        match (self.status, self.owner_name.is_some()) {
            (OccupancyStatus::Booked, false) => invalid("A booked plot needs an owner name"),
            (OccupancyStatus::Available | OccupancyStatus::Reserved, true) => {
                invalid("Only booked plots have an owner")
            }
            _ => Ok(()),
        }
    }

    /// Validate and build the plot.
    pub fn into_plot(self) -> Result<Plot, InventoryError> {
        self.validate()?;
        let facing = self
            .facing
            .ok_or_else(|| InventoryError::InvalidPlot(FACING_REQUIRED.to_string()))?;

        Ok(Plot {
            id: Uuid::new_v4(),
            plot_number: self.plot_number.trim().to_string(),
            area: self.area,
            price: self.price,
            facing,
            status: self.status,
            owner_name: self.owner_name.map(|name| name.trim().to_string()),
            location: self.location,
            dimensions: self.dimensions,
            amenities: self.amenities,
        })
    }
}

/// Seller account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerStatus {
    Active,
    Inactive,
}

/// Sales-team member or administrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub role: Role,
    pub units_assigned: u32,
    pub units_sold: u32,
    pub total_revenue: Decimal,
    pub join_date: NaiveDate,
    pub status: SellerStatus,
}

impl Seller {
    /// `units_sold / units_assigned` as a percentage, zero when nothing is assigned
    pub fn conversion_rate(&self) -> Decimal {
        percentage(Decimal::from(self.units_sold), Decimal::from(self.units_assigned))
    }
}

/// Payload for adding a seller account
#[derive(Debug, Clone, Deserialize)]
pub struct NewSeller {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default = "seller_role")]
    pub role: Role,
}

fn seller_role() -> Role {
    Role::Seller
}

impl NewSeller {
    pub fn validate(&self) -> Result<(), InventoryError> {
        let invalid = |message: &str| Err(InventoryError::InvalidSeller(message.to_string()));

        if [&self.full_name, &self.email, &self.phone, &self.username]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return invalid("Full name, email, phone and username are required");
        }
        if !self.email.contains('@') {
            return invalid("Please enter a valid email address");
        }
        if self.username.trim().contains(char::is_whitespace) {
            return invalid("Username cannot contain spaces");
        }
        Ok(())
    }

    /// Validate and build an active account with no sales yet, joined on `today`.
    pub fn into_seller(self, today: NaiveDate) -> Result<Seller, InventoryError> {
        self.validate()?;
        Ok(Seller {
            id: Uuid::new_v4(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            username: self.username.trim().to_string(),
            role: self.role,
            units_assigned: 0,
            units_sold: 0,
            total_revenue: Decimal::ZERO,
            join_date: today,
            status: SellerStatus::Active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::PaymentType;
    use rust_decimal_macros::dec;

    fn record() -> BookingRecord {
        BookingRecord {
            buyer_name: "John Doe".to_string(),
            buyer_email: "john@email.com".to_string(),
            buyer_phone: "+1234567890".to_string(),
            gst_number: None,
            unit_type: Some("2BHK".to_string()),
            size: Some(dec!(1200)),
            price_per_sq_ft: Some(dec!(3500)),
            municipal_tax: dec!(50000),
            electricity_tax: dec!(10000),
            payment_type: Some(PaymentType::BankTransfer),
            paid_amount: dec!(2100000),
            booking_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            agreement_date: None,
            possession_date: None,
            registration_date: None,
            status: OccupancyStatus::Booked,
        }
    }

    #[test]
    fn test_unit_number_format() {
        assert_eq!(unit_number("A", 1, 1), "A101");
        assert_eq!(unit_number("B", 12, 4), "B1204");
        assert_eq!(wing_label(0), "A");
        assert_eq!(wing_label(25), "Z");
    }

    #[test]
    fn test_book_available_unit() {
        let mut unit = Unit::vacant(Uuid::new_v4(), "A", 1, 1);
        assert!(unit.is_consistent());

        unit.book(record()).unwrap();

        assert_eq!(unit.status, OccupancyStatus::Booked);
        assert_eq!(unit.unit_type.as_deref(), Some("2BHK"));
        assert_eq!(unit.size, Some(dec!(1200)));
        assert!(unit.is_consistent());
        assert_eq!(unit.price_per_sq_ft, Some(dec!(3500)));

        let defaults = TaxDefaults {
            municipal_tax: dec!(1),
            electricity_tax: dec!(1),
        };
        let inputs = unit.cost_inputs(&defaults);
        assert_eq!(inputs.municipal_tax, dec!(50000));
        assert_eq!(inputs.paid_amount, dec!(2100000));
    }

    #[test]
    fn test_cost_inputs_for_vacant_unit_use_defaults() {
        let unit = Unit::vacant(Uuid::new_v4(), "A", 1, 1);
        let defaults = TaxDefaults {
            municipal_tax: dec!(50000),
            electricity_tax: dec!(10000),
        };
        let inputs = unit.cost_inputs(&defaults);
        assert_eq!(inputs.size, dec!(0));
        assert_eq!(inputs.municipal_tax, dec!(50000));
        assert_eq!(inputs.paid_amount, dec!(0));
    }

    #[test]
    fn test_book_is_one_directional() {
        let mut unit = Unit::vacant(Uuid::new_v4(), "A", 1, 1);
        unit.book(record()).unwrap();

        let err = unit.book(record()).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::UnitNotAvailable { status: OccupancyStatus::Booked, .. }
        ));
    }

    #[test]
    fn test_reserved_unit_cannot_be_booked() {
        let mut unit = Unit::vacant(Uuid::new_v4(), "A", 2, 1);
        unit.status = OccupancyStatus::Reserved;
        assert!(unit.book(record()).is_err());
        assert!(unit.booking.is_none());
    }

    #[test]
    fn test_building_counters_reconcile() {
        let id = Uuid::new_v4();
        let mut building = Building {
            id,
            name: "Sunshine Towers".to_string(),
            address: None,
            wings: 1,
            floors: 1,
            units_per_floor: 3,
            total_units: 0,
            booked_units: 0,
            available_units: 0,
        };
        let mut units: Vec<Unit> = (1..=3).map(|p| Unit::vacant(id, "A", 1, p)).collect();
        units[1].book(record()).unwrap();

        building.refresh_counters(&units);

        assert_eq!(building.total_units, 3);
        assert_eq!(building.booked_units, 1);
        assert_eq!(building.available_units, 2);
        assert!(building.counters_reconcile());
        assert_eq!(building.occupancy_rate(), dec!(33.3));
    }

    #[test]
    fn test_new_building_validation() {
        let mut request = NewBuilding {
            name: "Green Valley".to_string(),
            address: None,
            wings: 3,
            floors: 8,
            units_per_floor: 6,
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.total_units(), 144);

        request.floors = 0;
        assert!(request.validate().is_err());

        request.floors = 8;
        request.name = "   ".to_string();
        assert!(request.validate().is_err());

        request.name = "Green Valley".to_string();
        request.wings = 27;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_facing_serde_names() {
        let json = serde_json::to_string(&Facing::NorthEast).unwrap();
        assert_eq!(json, "\"North-East\"");
        let parsed: Facing = serde_json::from_str("\"South-West\"").unwrap();
        assert_eq!(parsed, Facing::SouthWest);
    }

    #[test]
    fn test_seller_conversion_rate() {
        let mut seller = Seller {
            id: Uuid::new_v4(),
            full_name: "John Smith".to_string(),
            email: "john.smith@company.com".to_string(),
            phone: "+1234567890".to_string(),
            username: "jsmith".to_string(),
            role: Role::Seller,
            units_assigned: 15,
            units_sold: 8,
            total_revenue: dec!(12500000),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: SellerStatus::Active,
        };
        assert_eq!(seller.conversion_rate(), dec!(53.3));

        seller.units_assigned = 0;
        assert_eq!(seller.conversion_rate(), dec!(0));
    }

    fn new_plot() -> NewPlot {
        serde_json::from_value(serde_json::json!({
            "plot_number": "P007",
            "area": "1200",
            "price": "2400000",
            "facing": "North-East",
            "dimensions": "30x40"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_plot_defaults_to_available() {
        let plot = new_plot().into_plot().unwrap();
        assert_eq!(plot.status, OccupancyStatus::Available);
        assert_eq!(plot.facing, Facing::NorthEast);
        assert_eq!(plot.price_per_sq_ft(), dec!(2000));
        assert!(plot.location.is_none());
        assert!(plot.is_consistent());
    }

    #[test]
    fn test_new_plot_validation() {
        let mut request = new_plot();
        request.area = dec!(0);
        assert!(matches!(request.validate(), Err(InventoryError::InvalidPlot(_))));

        let mut request = new_plot();
        request.facing = None;
        assert!(request.into_plot().is_err());

        let mut request = new_plot();
        request.plot_number = "  ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_new_plot_owner_iff_booked() {
        let mut request = new_plot();
        request.status = OccupancyStatus::Booked;
        assert!(request.validate().is_err());

        request.owner_name = Some("Rajesh Kumar".to_string());
        let plot = request.into_plot().unwrap();
        assert!(plot.is_consistent());

        let mut request = new_plot();
        request.owner_name = Some("Rajesh Kumar".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_new_seller() {
        let request: NewSeller = serde_json::from_value(serde_json::json!({
            "full_name": " Priya Nair ",
            "email": "priya.nair@company.com",
            "phone": "+1234567894",
            "username": "pnair"
        }))
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let seller = request.clone().into_seller(today).unwrap();
        assert_eq!(seller.full_name, "Priya Nair");
        assert_eq!(seller.role, Role::Seller);
        assert_eq!(seller.status, SellerStatus::Active);
        assert_eq!(seller.join_date, today);
        assert_eq!(seller.units_sold, 0);

        let mut invalid = request.clone();
        invalid.email = "priya".to_string();
        assert!(matches!(invalid.validate(), Err(InventoryError::InvalidSeller(_))));

        let mut invalid = request;
        invalid.username = String::new();
        assert!(invalid.into_seller(today).is_err());
    }
}
