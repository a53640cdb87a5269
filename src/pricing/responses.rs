//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::CostBreakdown;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Response for unit cost calculation
#[derive(Debug, Clone, Serialize)]
pub struct UnitCostResponse {
    pub base_cost: MoneyResponse,
    pub municipal_tax: MoneyResponse,
    pub electricity_tax: MoneyResponse,
    pub total_cost: MoneyResponse,
    pub paid_amount: MoneyResponse,
    pub pending_amount: MoneyResponse,
}

impl UnitCostResponse {
    pub fn from_breakdown(breakdown: &CostBreakdown, currency: &str) -> Self {
        Self {
            base_cost: MoneyResponse::new(breakdown.base_cost, currency),
            municipal_tax: MoneyResponse::new(breakdown.municipal_tax, currency),
            electricity_tax: MoneyResponse::new(breakdown.electricity_tax, currency),
            total_cost: MoneyResponse::new(breakdown.total_cost, currency),
            paid_amount: MoneyResponse::new(breakdown.paid_amount, currency),
            pending_amount: MoneyResponse::new(breakdown.pending_amount, currency),
        }
    }
}
