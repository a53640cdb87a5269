//! Booking form and record types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::inventory::{OccupancyStatus, Unit};
use crate::pricing::amount::{deserialize_amount, deserialize_optional_amount};

/// How the buyer pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    Cash,
    Cheque,
    BankTransfer,
    Upi,
}

/// Whether a booking also records the unit's details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingMode {
    /// Fresh booking: unit type, size and rate come from the form and are required
    NewUnit,
    /// Booking an existing unit record whose details are already on file
    ExistingUnit,
}

impl BookingMode {
    pub fn for_unit(unit: &Unit) -> Self {
        if unit.has_unit_details() {
            BookingMode::ExistingUnit
        } else {
            BookingMode::NewUnit
        }
    }
}

/// Booking form state as submitted by the dashboard
///
/// Numeric fields accept strings or numbers. Blank optional fields are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub unit_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub size: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub price_per_sq_ft: Decimal,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub buyer_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub buyer_email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub buyer_phone: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub gst_number: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub municipal_tax: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub electricity_tax: Option<Decimal>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub payment_type: Option<PaymentType>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub paid_amount: Decimal,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub booking_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub agreement_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub possession_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub registration_date: Option<NaiveDate>,
}

/// Booking attached to a unit once it is booked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub buyer_name: String,
    pub buyer_email: String,
    pub buyer_phone: String,
    pub gst_number: Option<String>,

    /// Unit details recorded by a fresh booking
    pub unit_type: Option<String>,
    pub size: Option<Decimal>,
    pub price_per_sq_ft: Option<Decimal>,

    pub municipal_tax: Decimal,
    pub electricity_tax: Decimal,
    pub payment_type: Option<PaymentType>,
    pub paid_amount: Decimal,

    pub booking_date: NaiveDate,
    pub agreement_date: Option<NaiveDate>,
    pub possession_date: Option<NaiveDate>,
    pub registration_date: Option<NaiveDate>,

    pub status: OccupancyStatus,
}

/// Deserialize a text field where null reads as empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an optional value where null, missing and blank strings mean `None`.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => {
            let inner: de::value::StrDeserializer<'_, de::value::Error> = text.into_deserializer();
            T::deserialize(inner).map(Some).map_err(de::Error::custom)
        }
    }
}
