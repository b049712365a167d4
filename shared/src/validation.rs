//! Input validation functions
//!
//! Checks applied to intake-form values before they are stored or fed to a
//! calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Measurement, Skinfold};

/// Validate a payment amount
pub fn validate_payment_value(value: Decimal) -> Result<(), String> {
    if value <= Decimal::ZERO {
        return Err("Payment value must be greater than zero".to_string());
    }
    Ok(())
}

/// Validate a client's birthdate
/// Must not be in the future relative to `today`
pub fn validate_birthdate(birthdate: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if birthdate > today {
        return Err("Birthdate cannot be in the future".to_string());
    }
    Ok(())
}

/// Validate height (cm); must be positive when given
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm <= 0.0 {
        return Err("Height must be greater than zero".to_string());
    }
    Ok(())
}

/// Validate weight (kg); must be positive when given
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than zero".to_string());
    }
    Ok(())
}

/// Validate a girth or caliper reading; zero is allowed
pub fn validate_reading(name: &str, value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", name));
    }
    if value < 0.0 {
        return Err(format!("{} cannot be negative", name));
    }
    Ok(())
}

fn validate_optional(name: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(v) => validate_reading(name, v),
        None => Ok(()),
    }
}

/// Validate every field of a measurement
pub fn validate_measurement(measurement: &Measurement) -> Result<(), String> {
    if let Some(height) = measurement.height_cm {
        validate_height_cm(height)?;
    }
    if let Some(weight) = measurement.weight_kg {
        validate_weight_kg(weight)?;
    }
    validate_optional("Chest", measurement.chest)?;
    validate_optional("Left arm", measurement.left_arm)?;
    validate_optional("Right arm", measurement.right_arm)?;
    validate_optional("Waist", measurement.waist)?;
    validate_optional("Abdomen", measurement.abdomen)?;
    validate_optional("Hips", measurement.hips)?;
    validate_optional("Left thigh", measurement.left_thigh)?;
    validate_optional("Right thigh", measurement.right_thigh)?;
    Ok(())
}

/// Validate every site of a skinfold record
pub fn validate_skinfold(skinfold: &Skinfold) -> Result<(), String> {
    let sites = [
        ("Chest", skinfold.chest),
        ("Midaxillary", skinfold.midaxillary),
        ("Subscapular", skinfold.subscapular),
        ("Bicep", skinfold.bicep),
        ("Tricep", skinfold.tricep),
        ("Abdominal", skinfold.abdominal),
        ("Suprailiac", skinfold.suprailiac),
        ("Thigh", skinfold.thigh),
        ("Calf", skinfold.calf),
        ("Lower back", skinfold.lower_back),
    ];
    for (name, value) in sites {
        validate_optional(name, value)?;
    }
    Ok(())
}
