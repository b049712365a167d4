//! Data models for the Gym Manager application
//!
//! These are read-only views of records owned by the persistence layer.
//! The calculators only ever borrow them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Client gender as recorded on the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Single-letter code used in storage
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        f.write_str(label)
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "masculino" => Ok(Gender::Male),
            "f" | "female" | "feminino" => Ok(Gender::Female),
            "o" | "other" | "outro" => Ok(Gender::Other),
            _ => Err(DomainError::InvalidGender(s.to_string())),
        }
    }
}

/// A single payment made by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_date: NaiveDate,
    pub value: Decimal,
}

impl Payment {
    pub fn new(payment_date: NaiveDate, value: Decimal) -> Self {
        Self {
            payment_date,
            value,
        }
    }
}

/// Body measurement snapshot. Height in cm, weight in kg, girths in cm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub chest: Option<f64>,
    pub left_arm: Option<f64>,
    pub right_arm: Option<f64>,
    pub waist: Option<f64>,
    pub abdomen: Option<f64>,
    pub hips: Option<f64>,
    pub left_thigh: Option<f64>,
    pub right_thigh: Option<f64>,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Skinfold caliper readings in millimetres
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skinfold {
    pub chest: Option<f64>,
    pub midaxillary: Option<f64>,
    pub subscapular: Option<f64>,
    pub bicep: Option<f64>,
    pub tricep: Option<f64>,
    pub abdominal: Option<f64>,
    pub suprailiac: Option<f64>,
    pub thigh: Option<f64>,
    pub calf: Option<f64>,
    pub lower_back: Option<f64>,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Everything the calculators need to know about one client
///
/// Built by the repository layer from the client row, all of its payments
/// and the most recent measurement and skinfold records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSnapshot {
    pub id: Uuid,
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub gender: Gender,
    pub payments: Vec<Payment>,
    pub latest_measurement: Option<Measurement>,
    pub latest_skinfold: Option<Skinfold>,
}

impl ClientSnapshot {
    /// Snapshot with no payments or measurements yet
    pub fn new(id: Uuid, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id,
            name: name.into(),
            birthdate: None,
            gender,
            payments: Vec::new(),
            latest_measurement: None,
            latest_skinfold: None,
        }
    }
}
