//! Booking workflow: form parsing, validation and the booking endpoint.

pub mod builder;
pub mod models;
pub mod routes;

pub use builder::{
    build_booking_record, BookingErrorCategory, BookingIssue, BookingValidationError,
    TaxDefaults,
};
pub use models::{BookingForm, BookingMode, BookingRecord, PaymentType};
pub use routes::router;
