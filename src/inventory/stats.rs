//! Summary statistics for list pages and the dashboard.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::Role;
use crate::pricing::calculators::percentage;

use super::models::{OccupancyStatus, Plot, Seller, SellerStatus, Unit};
use super::store::Inventory;

/// Window for the "recent sales" card, in days
pub const RECENT_SALES_DAYS: i64 = 7;

/// Units page summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitStats {
    pub total: usize,
    pub booked: usize,
    pub available: usize,
    pub reserved: usize,
    /// Sum of paid amounts over booked units
    pub revenue: Decimal,
}

impl UnitStats {
    pub fn from_units<'a>(units: impl IntoIterator<Item = &'a Unit>) -> Self {
        units.into_iter().fold(Self::default(), |mut stats, unit| {
            stats.total += 1;
            match unit.status {
                OccupancyStatus::Available => stats.available += 1,
                OccupancyStatus::Reserved => stats.reserved += 1,
                OccupancyStatus::Booked => {
                    stats.booked += 1;
                    if let Some(booking) = &unit.booking {
                        stats.revenue = stats.revenue.saturating_add(booking.paid_amount);
                    }
                }
            }
            stats
        })
    }
}

/// Plots page summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlotStats {
    pub total: usize,
    pub available: usize,
    pub booked: usize,
    pub reserved: usize,
    /// Sum of list prices over all plots
    pub total_value: Decimal,
}

impl PlotStats {
    pub fn from_plots<'a>(plots: impl IntoIterator<Item = &'a Plot>) -> Self {
        plots.into_iter().fold(Self::default(), |mut stats, plot| {
            stats.total += 1;
            match plot.status {
                OccupancyStatus::Available => stats.available += 1,
                OccupancyStatus::Booked => stats.booked += 1,
                OccupancyStatus::Reserved => stats.reserved += 1,
            }
            stats.total_value = stats.total_value.saturating_add(plot.price);
            stats
        })
    }
}

/// Sellers page summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SellerStats {
    pub total: usize,
    pub active: usize,
    pub total_revenue: Decimal,
    pub total_units_sold: u32,
}

impl SellerStats {
    pub fn from_sellers<'a>(sellers: impl IntoIterator<Item = &'a Seller>) -> Self {
        sellers.into_iter().fold(Self::default(), |mut stats, seller| {
            stats.total += 1;
            if seller.status == SellerStatus::Active {
                stats.active += 1;
            }
            stats.total_revenue = stats.total_revenue.saturating_add(seller.total_revenue);
            stats.total_units_sold = stats.total_units_sold.saturating_add(seller.units_sold);
            stats
        })
    }
}

/// Occupancy of a floor (or a whole wing)
///
/// Reserved units count as available, matching the building counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FloorStats {
    pub total: usize,
    pub booked: usize,
    pub available: usize,
    pub occupancy_rate: Decimal,
}

impl FloorStats {
    fn new(total: usize, booked: usize) -> Self {
        Self {
            total,
            booked,
            available: total - booked,
            occupancy_rate: percentage(Decimal::from(booked), Decimal::from(total)),
        }
    }

    pub fn from_units<'a>(units: impl IntoIterator<Item = &'a Unit>) -> Self {
        let (total, booked) = units.into_iter().fold((0, 0), |(total, booked), unit| {
            let is_booked = unit.status == OccupancyStatus::Booked;
            (total + 1, booked + usize::from(is_booked))
        });
        Self::new(total, booked)
    }

    pub fn combine<'a>(parts: impl IntoIterator<Item = &'a FloorStats>) -> Self {
        let (total, booked) = parts
            .into_iter()
            .fold((0, 0), |(total, booked), part| (total + part.total, booked + part.booked));
        Self::new(total, booked)
    }
}

/// Stat card identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    TotalBuildings,
    AvailableUnits,
    ActiveSellers,
    AvailablePlots,
    Revenue,
    RecentSales,
}

impl CardKind {
    /// Cards visible to a role, in display order
    pub fn visible_to(role: Role) -> &'static [CardKind] {
        const SUPER: &[CardKind] = &[
            CardKind::TotalBuildings,
            CardKind::AvailableUnits,
            CardKind::ActiveSellers,
            CardKind::AvailablePlots,
            CardKind::Revenue,
            CardKind::RecentSales,
        ];
        const SELLER: &[CardKind] = &[
            CardKind::TotalBuildings,
            CardKind::AvailableUnits,
            CardKind::RecentSales,
        ];
        match role {
            Role::Super => SUPER,
            Role::Seller => SELLER,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            CardKind::TotalBuildings => "Total Buildings",
            CardKind::AvailableUnits => "Available Units",
            CardKind::ActiveSellers => "Active Sellers",
            CardKind::AvailablePlots => "Available Plots",
            CardKind::Revenue => "Total Revenue",
            CardKind::RecentSales => "Recent Sales",
        }
    }
}

/// Dashboard stat card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCard {
    pub kind: CardKind,
    pub title: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Bookings dated within the last [`RECENT_SALES_DAYS`] days, today included
pub fn recent_sales<'a>(units: impl IntoIterator<Item = &'a Unit>, today: NaiveDate) -> usize {
    let since = today - Duration::days(RECENT_SALES_DAYS);
    units
        .into_iter()
        .filter_map(|u| u.booking.as_ref())
        .filter(|b| b.booking_date > since && b.booking_date <= today)
        .count()
}

/// Stat cards for the dashboard, filtered by role.
pub fn dashboard_cards(inventory: &Inventory, role: Role, today: NaiveDate) -> Vec<DashboardCard> {
    CardKind::visible_to(role)
        .iter()
        .map(|&kind| {
            let (value, detail) = match kind {
                CardKind::TotalBuildings => (inventory.buildings().len().to_string(), None),
                CardKind::AvailableUnits => {
                    let stats = UnitStats::from_units(inventory.units());
                    (
                        stats.available.to_string(),
                        Some(format!("of {} total units", stats.total)),
                    )
                }
                CardKind::ActiveSellers => {
                    let stats = SellerStats::from_sellers(inventory.sellers());
                    (
                        stats.active.to_string(),
                        Some(format!("of {} sellers", stats.total)),
                    )
                }
                CardKind::AvailablePlots => {
                    let stats = PlotStats::from_plots(inventory.plots());
                    (
                        stats.available.to_string(),
                        Some(format!("of {} plots", stats.total)),
                    )
                }
                CardKind::Revenue => {
                    let stats = UnitStats::from_units(inventory.units());
                    (stats.revenue.to_string(), Some("collected on booked units".to_string()))
                }
                CardKind::RecentSales => (
                    recent_sales(inventory.units(), today).to_string(),
                    Some(format!("in the last {} days", RECENT_SALES_DAYS)),
                ),
            };
            DashboardCard {
                kind,
                title: kind.title(),
                value,
                detail,
            }
        })
        .collect()
}
