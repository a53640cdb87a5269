//! Pricing engine module.
//!
//! Unit cost calculations for bookings. The dashboard calls these on every
//! keystroke to render the cost summary.

pub mod amount;
pub mod calculators;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use amount::parse_amount;
pub use calculators::{calculate_unit_cost, round_money, CostBreakdown, CostInputs};
pub use routes::router;
