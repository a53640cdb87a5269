//! Booking validation and record assembly.
//!
//! Pure functions - the store applies the resulting record to a unit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::inventory::OccupancyStatus;

use super::models::{BookingForm, BookingMode, BookingRecord};

/// Defaults pre-filled on the booking form when the buyer leaves taxes blank
#[derive(Debug, Clone, Copy)]
pub struct TaxDefaults {
    pub municipal_tax: Decimal,
    pub electricity_tax: Decimal,
}

/// Which booking requirement failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingErrorCategory {
    BuyerInfo,
    PaidAmount,
    UnitDetails,
}

impl BookingErrorCategory {
    /// User-facing message for the category
    pub fn message(&self) -> &'static str {
        match self {
            BookingErrorCategory::BuyerInfo => {
                "Please fill in all required buyer information fields"
            }
            BookingErrorCategory::PaidAmount => "Please enter a valid paid amount",
            BookingErrorCategory::UnitDetails => {
                "Please select a unit type and enter size and price per sq. ft."
            }
        }
    }
}

/// One failed requirement with the fields responsible for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingIssue {
    pub category: BookingErrorCategory,
    pub message: &'static str,
    pub fields: Vec<&'static str>,
}

impl BookingIssue {
    fn new(category: BookingErrorCategory, fields: Vec<&'static str>) -> Self {
        Self {
            category,
            message: category.message(),
            fields,
        }
    }
}

/// Booking submission rejected; every failing category is listed
#[derive(Debug, Clone, PartialEq)]
pub struct BookingValidationError {
    pub issues: Vec<BookingIssue>,
}

impl BookingValidationError {
    pub fn has(&self, category: BookingErrorCategory) -> bool {
        self.issues.iter().any(|issue| issue.category == category)
    }
}

impl std::fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.issues.iter().map(|issue| issue.message).collect();
        write!(f, "Booking rejected: {}", messages.join("; "))
    }
}

impl std::error::Error for BookingValidationError {}

/// Validate booking form state and assemble the record to attach to a unit.
///
/// # Arguments
/// * `form` - Submitted form state (numeric fields already parsed)
/// * `mode` - `NewUnit` also requires unit type, size and rate
/// * `defaults` - Taxes to use when the form leaves them blank
/// * `today` - Booking date used when the form has none
///
/// # Returns
/// The booking record with `status = booked`, or every failing requirement
pub fn build_booking_record(
    form: &BookingForm,
    mode: BookingMode,
    defaults: &TaxDefaults,
    today: NaiveDate,
) -> Result<BookingRecord, BookingValidationError> {
    let mut issues = Vec::new();

    let missing_buyer: Vec<&'static str> = [
        ("buyer_name", &form.buyer_name),
        ("buyer_email", &form.buyer_email),
        ("buyer_phone", &form.buyer_phone),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing_buyer.is_empty() {
        issues.push(BookingIssue::new(BookingErrorCategory::BuyerInfo, missing_buyer));
    }

    if form.paid_amount <= Decimal::ZERO {
        issues.push(BookingIssue::new(
            BookingErrorCategory::PaidAmount,
            vec!["paid_amount"],
        ));
    }

    if mode == BookingMode::NewUnit {
        let mut missing_details = Vec::new();
        if form.unit_type.as_deref().map_or(true, |t| t.trim().is_empty()) {
            missing_details.push("unit_type");
        }
        if form.size <= Decimal::ZERO {
            missing_details.push("size");
        }
        if form.price_per_sq_ft <= Decimal::ZERO {
            missing_details.push("price_per_sq_ft");
        }
        if !missing_details.is_empty() {
            issues.push(BookingIssue::new(
                BookingErrorCategory::UnitDetails,
                missing_details,
            ));
        }
    }

    if !issues.is_empty() {
        return Err(BookingValidationError { issues });
    }

    let (unit_type, size, price_per_sq_ft) = match mode {
        BookingMode::NewUnit => (
            form.unit_type.as_ref().map(|t| t.trim().to_string()),
            Some(form.size),
            Some(form.price_per_sq_ft),
        ),
        BookingMode::ExistingUnit => (None, None, None),
    };

    Ok(BookingRecord {
        buyer_name: form.buyer_name.trim().to_string(),
        buyer_email: form.buyer_email.trim().to_string(),
        buyer_phone: form.buyer_phone.trim().to_string(),
        gst_number: form.gst_number.clone(),
        unit_type,
        size,
        price_per_sq_ft,
        municipal_tax: form.municipal_tax.unwrap_or(defaults.municipal_tax),
        electricity_tax: form.electricity_tax.unwrap_or(defaults.electricity_tax),
        payment_type: form.payment_type,
        paid_amount: form.paid_amount,
        booking_date: form.booking_date.unwrap_or(today),
        agreement_date: form.agreement_date,
        possession_date: form.possession_date,
        registration_date: form.registration_date,
        status: OccupancyStatus::Booked,
    })
}
