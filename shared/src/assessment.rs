//! Per-client assessment
//!
//! Combines billing status and body composition for one client into a single
//! serializable value for dashboards and client pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::{latest_payment, next_payment_date, BillingStatus, OverduePolicy};
use crate::body_composition::{
    age_from, bmi_reading, body_fat_percentage_with, BmiGranularity, BmiReading, SkinfoldProtocol,
};
use crate::models::{ClientSnapshot, Gender};

/// Calculation choices applied to every client in a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentSettings {
    pub overdue_policy: OverduePolicy,
    pub skinfold_protocol: SkinfoldProtocol,
    pub bmi_granularity: BmiGranularity,
}

/// Derived values for one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientAssessment {
    pub client_id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub age: Option<u32>,
    pub billing: BillingStatus,
    pub payment_count: usize,
    pub last_payment_date: Option<NaiveDate>,
    pub next_payment_date: Option<NaiveDate>,
    pub latest_weight_kg: Option<f64>,
    pub latest_height_cm: Option<f64>,
    pub bmi: Option<BmiReading>,
    pub body_fat_percent: Option<f64>,
}

/// Assess a client as of `today`
pub fn assess(
    snapshot: &ClientSnapshot,
    today: NaiveDate,
    settings: &AssessmentSettings,
) -> ClientAssessment {
    let age = age_from(snapshot.birthdate, today);
    let measurement = snapshot.latest_measurement.as_ref();

    let bmi = measurement.and_then(|m| bmi_reading(m.height_cm, m.weight_kg, settings.bmi_granularity));

    let body_fat_percent = match (age, snapshot.latest_skinfold.as_ref()) {
        (Some(age), Some(skinfold)) => {
            body_fat_percentage_with(settings.skinfold_protocol, snapshot.gender, age, skinfold)
        }
        _ => None,
    };

    ClientAssessment {
        client_id: snapshot.id,
        name: snapshot.name.clone(),
        gender: snapshot.gender,
        age,
        billing: settings.overdue_policy.classify(&snapshot.payments, today),
        payment_count: snapshot.payments.len(),
        last_payment_date: latest_payment(&snapshot.payments).map(|p| p.payment_date),
        next_payment_date: next_payment_date(&snapshot.payments),
        latest_weight_kg: measurement.and_then(|m| m.weight_kg),
        latest_height_cm: measurement.and_then(|m| m.height_cm),
        bmi,
        body_fat_percent,
    }
}
