//! Core pricing calculation functions.
//!
//! Pure functions for unit cost math - no store access.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use buildercon_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Inputs to the unit cost calculation, already parsed and non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostInputs {
    pub size: Decimal,
    pub price_per_sq_ft: Decimal,
    pub municipal_tax: Decimal,
    pub electricity_tax: Decimal,
    pub paid_amount: Decimal,
}

/// Result of the unit cost calculation.
///
/// Taxes and paid amount are echoed back so a presentation layer can render
/// the full summary from one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub base_cost: Decimal,
    pub municipal_tax: Decimal,
    pub electricity_tax: Decimal,
    pub total_cost: Decimal,
    pub paid_amount: Decimal,
    pub pending_amount: Decimal,
}

/// Calculate base cost, total cost and pending amount for a unit.
///
/// * `base_cost = size * price_per_sq_ft`
/// * `total_cost = base_cost + municipal_tax + electricity_tax`
/// * `pending_amount = max(0, total_cost - paid_amount)`
///
/// Overpayment clamps the pending amount to zero. Arithmetic saturates at
/// `Decimal::MAX`, so the function never panics.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use buildercon_web::pricing::{calculate_unit_cost, CostInputs};
///
/// let breakdown = calculate_unit_cost(&CostInputs {
///     size: dec!(1200),
///     price_per_sq_ft: dec!(5000),
///     municipal_tax: dec!(50000),
///     electricity_tax: dec!(10000),
///     paid_amount: dec!(6000000),
/// });
/// assert_eq!(breakdown.total_cost, dec!(6060000));
/// assert_eq!(breakdown.pending_amount, dec!(60000));
/// ```
pub fn calculate_unit_cost(inputs: &CostInputs) -> CostBreakdown {
    let base_cost = inputs
        .size
        .checked_mul(inputs.price_per_sq_ft)
        .unwrap_or(Decimal::MAX);

    let total_cost = base_cost
        .checked_add(inputs.municipal_tax)
        .and_then(|sum| sum.checked_add(inputs.electricity_tax))
        .unwrap_or(Decimal::MAX);

    let pending_amount = total_cost
        .saturating_sub(inputs.paid_amount)
        .max(Decimal::ZERO);

    CostBreakdown {
        base_cost,
        municipal_tax: inputs.municipal_tax,
        electricity_tax: inputs.electricity_tax,
        total_cost,
        paid_amount: inputs.paid_amount,
        pending_amount,
    }
}

/// Percentage of `part` in `whole`, rounded to one decimal place.
///
/// Returns zero when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .map(|pct| round_money(pct, 1))
        .unwrap_or(Decimal::ZERO)
}

/// Price per square foot for a parcel sold at a flat price, rounded to whole units.
pub fn price_per_area(price: Decimal, area: Decimal) -> Decimal {
    if area.is_zero() {
        return Decimal::ZERO;
    }
    price
        .checked_div(area)
        .map(|rate| round_money(rate, 0))
        .unwrap_or(Decimal::ZERO)
}
