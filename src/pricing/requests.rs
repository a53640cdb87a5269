//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::amount::{deserialize_amount, deserialize_optional_amount};
use super::calculators::CostInputs;

/// Request to calculate unit cost.
///
/// Fields accept strings, numbers or null; anything unparseable counts as zero.
/// Omitted taxes fall back to the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CalculateUnitCostRequest {
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub size: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub price_per_sq_ft: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub municipal_tax: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub electricity_tax: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub paid_amount: Decimal,
}

impl CalculateUnitCostRequest {
    pub fn into_inputs(self, default_municipal_tax: Decimal, default_electricity_tax: Decimal) -> CostInputs {
        CostInputs {
            size: self.size,
            price_per_sq_ft: self.price_per_sq_ft,
            municipal_tax: self.municipal_tax.unwrap_or(default_municipal_tax),
            electricity_tax: self.electricity_tax.unwrap_or(default_electricity_tax),
            paid_amount: self.paid_amount,
        }
    }
}
