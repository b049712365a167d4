//! Database repositories
//!
//! Read-only data access for clients and the records attached to them.

pub mod client;
pub mod measurement;
pub mod payment;
pub mod skinfold;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub use client::{ClientRecord, ClientRepository};
pub use measurement::{MeasurementRecord, MeasurementRepository};
pub use payment::{PaymentRecord, PaymentRepository};
pub use skinfold::{SkinfoldRecord, SkinfoldRepository};

/// Convert an optional NUMERIC column to f64
pub(crate) fn decimal_to_f64(d: Option<Decimal>) -> Option<f64> {
    d.and_then(|v| v.to_f64())
}
