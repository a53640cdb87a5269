//! Built-in demo inventory loaded when `SEED_DEMO_DATA` is on.
//!
//! Seeded bookings go through the same validation as API bookings, so the
//! demo data satisfies every inventory invariant.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::auth::Role;
use crate::booking::{BookingForm, PaymentType, TaxDefaults};
use crate::pricing::round_money;

use super::models::{
    Facing, GeoPoint, NewBuilding, OccupancyStatus, Plot, Seller, SellerStatus,
};
use super::store::Inventory;
use super::InventoryError;

const BUYERS: [(&str, &str, &str); 6] = [
    ("John Doe", "john@email.com", "+1234567890"),
    ("Jane Smith", "jane@email.com", "+1234567891"),
    ("Rahul Verma", "rahul.verma@email.com", "+919812345670"),
    ("Anita Desai", "anita.desai@email.com", "+919812345671"),
    ("Vikram Singh", "vikram.singh@email.com", "+919812345672"),
    ("Meera Iyer", "meera.iyer@email.com", "+919812345673"),
];

const UNIT_TYPES: [(&str, Decimal, Decimal); 3] = [
    ("2BHK", dec!(1200), dec!(3500)),
    ("1BHK", dec!(800), dec!(3200)),
    ("3BHK", dec!(1500), dec!(3800)),
];

const PAYMENT_TYPES: [PaymentType; 4] = [
    PaymentType::BankTransfer,
    PaymentType::Cheque,
    PaymentType::Upi,
    PaymentType::Cash,
];

/// Building shape plus how many units start out booked
struct DemoBuilding {
    name: &'static str,
    address: &'static str,
    wings: u32,
    floors: u32,
    units_per_floor: u32,
    booked: usize,
    /// Available units carry type, size and rate up front
    details_on_file: bool,
    reserved: usize,
}

const DEMO_BUILDINGS: [DemoBuilding; 2] = [
    DemoBuilding {
        name: "Sunshine Towers",
        address: "12 MG Road, Bengaluru",
        wings: 2,
        floors: 5,
        units_per_floor: 4,
        booked: 24,
        details_on_file: true,
        reserved: 1,
    },
    DemoBuilding {
        name: "Green Valley Apartments",
        address: "48 Ring Road, New Delhi",
        wings: 3,
        floors: 8,
        units_per_floor: 6,
        booked: 89,
        details_on_file: false,
        reserved: 0,
    },
];

/// Spreads bookings over the grid instead of filling the lowest floors first
const BOOKING_STRIDE: usize = 7;

/// Build the demo inventory: two buildings, six plots, four sellers.
pub fn demo_inventory(
    defaults: &TaxDefaults,
    today: NaiveDate,
) -> Result<Inventory, InventoryError> {
    let mut inventory = Inventory::default();

    for demo in &DEMO_BUILDINGS {
        seed_building(&mut inventory, demo, defaults, today)?;
    }

    for plot in demo_plots() {
        inventory.add_plot(plot);
    }
    for seller in demo_sellers() {
        inventory.add_seller(seller);
    }

    Ok(inventory)
}

fn seed_building(
    inventory: &mut Inventory,
    demo: &DemoBuilding,
    defaults: &TaxDefaults,
    today: NaiveDate,
) -> Result<(), InventoryError> {
    let building = inventory.add_building(NewBuilding {
        name: demo.name.to_string(),
        address: Some(demo.address.to_string()),
        wings: demo.wings,
        floors: demo.floors,
        units_per_floor: demo.units_per_floor,
    })?;

    let unit_ids: Vec<Uuid> = inventory.building_units(building.id).map(|u| u.id).collect();
    let total = unit_ids.len();

    // BOOKING_STRIDE is coprime with every demo total, so exactly `booked` units qualify
    let is_booked = |index: usize| (index * BOOKING_STRIDE) % total < demo.booked;

    let mut reserved = 0;
    for (index, unit_id) in unit_ids.iter().copied().enumerate() {
        let (unit_type, size, rate) = UNIT_TYPES[index % UNIT_TYPES.len()];

        if demo.details_on_file {
            inventory.set_unit_details(unit_id, unit_type, size, rate)?;
        }

        if is_booked(index) {
            let form = demo_booking_form(index, unit_type, size, rate, today);
            inventory.book_unit(unit_id, &form, defaults, today)?;
        } else if reserved < demo.reserved {
            inventory.reserve_unit(unit_id)?;
            reserved += 1;
        }
    }

    Ok(())
}

fn demo_booking_form(
    index: usize,
    unit_type: &str,
    size: Decimal,
    rate: Decimal,
    today: NaiveDate,
) -> BookingForm {
    let (name, email, phone) = BUYERS[index % BUYERS.len()];
    // a few bookings land in the last week so the recent sales card is populated
    let booking_date = today - Duration::days((index % 45) as i64);
    let share = Decimal::from(30 + (index % 5) as i64 * 10) / Decimal::ONE_HUNDRED;

    BookingForm {
        unit_type: Some(unit_type.to_string()),
        size,
        price_per_sq_ft: rate,
        buyer_name: name.to_string(),
        buyer_email: email.to_string(),
        buyer_phone: phone.to_string(),
        gst_number: None,
        municipal_tax: None,
        electricity_tax: None,
        payment_type: Some(PAYMENT_TYPES[index % PAYMENT_TYPES.len()]),
        paid_amount: round_money(size * rate * share, 0),
        booking_date: Some(booking_date),
        agreement_date: Some(booking_date + Duration::days(14)),
        possession_date: None,
        registration_date: None,
    }
}

fn amenities(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn plot(
    number: &str,
    area: Decimal,
    price: Decimal,
    facing: Facing,
    status: OccupancyStatus,
    owner_name: Option<&str>,
    dimensions: &str,
    amenity_names: &[&str],
    (lat, lng): (f64, f64),
) -> Plot {
    Plot {
        id: Uuid::new_v4(),
        plot_number: number.to_string(),
        area,
        price,
        facing,
        status,
        owner_name: owner_name.map(str::to_string),
        location: Some(GeoPoint { lat, lng }),
        dimensions: Some(dimensions.to_string()),
        amenities: amenities(amenity_names),
    }
}

#[rustfmt::skip]
fn demo_plots() -> Vec<Plot> {
    const BASIC: &[&str] = &["Water Connection", "Electricity"];
    const ROAD: &[&str] = &["Water Connection", "Electricity", "Road Access"];

    vec![
        plot("P001", dec!(1200), dec!(2400000), Facing::North, OccupancyStatus::Available, None, "30x40", ROAD, (28.7041, 77.1025)),
        plot(
            "P002",
            dec!(1500),
            dec!(3000000),
            Facing::East,
            OccupancyStatus::Booked,
            Some("Rajesh Kumar"),
            "30x50",
            &["Water Connection", "Electricity", "Road Access", "Corner Plot"],
            (28.7050, 77.1030),
        ),
        plot("P003", dec!(1000), dec!(2000000), Facing::South, OccupancyStatus::Reserved, None, "25x40", BASIC, (28.7060, 77.1040)),
        plot("P004", dec!(1800), dec!(3600000), Facing::West, OccupancyStatus::Available, None, "36x50", ROAD, (28.7070, 77.1050)),
        plot("P005", dec!(1300), dec!(2600000), Facing::NorthEast, OccupancyStatus::Available, None, "26x50", ROAD, (28.7080, 77.1060)),
        plot("P006", dec!(900), dec!(1800000), Facing::SouthWest, OccupancyStatus::Booked, Some("Priya Sharma"), "30x30", BASIC, (28.7090, 77.1070)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seller(
    full_name: &str,
    email: &str,
    phone: &str,
    username: &str,
    role: Role,
    (units_assigned, units_sold): (u32, u32),
    total_revenue: Decimal,
    join_date: (i32, u32, u32),
    status: SellerStatus,
) -> Seller {
    let (year, month, day) = join_date;
    Seller {
        id: Uuid::new_v4(),
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        username: username.to_string(),
        role,
        units_assigned,
        units_sold,
        total_revenue,
        join_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        status,
    }
}

#[rustfmt::skip]
fn demo_sellers() -> Vec<Seller> {
    vec![
        seller("John Smith", "john.smith@company.com", "+1234567890", "jsmith", Role::Seller, (15, 8), dec!(12500000), (2024, 1, 15), SellerStatus::Active),
        seller("Sarah Johnson", "sarah.j@company.com", "+1234567891", "sarahj", Role::Seller, (12, 10), dec!(18200000), (2024, 2, 1), SellerStatus::Active),
        seller("Michael Brown", "mike.brown@company.com", "+1234567892", "mbrown", Role::Seller, (20, 5), dec!(7800000), (2024, 3, 10), SellerStatus::Inactive),
        seller("Admin User", "admin@company.com", "+1234567893", "admin", Role::Super, (0, 0), dec!(0), (2024, 1, 1), SellerStatus::Active),
    ]
}
