//! Gym Manager WASM Module
//!
//! WebAssembly bindings so the intake forms can show BMI, body fat and
//! validation feedback in the browser before anything is saved.

use chrono::NaiveDate;
use gym_manager_shared::{
    age, bmi, bmi_reading, body_fat_percentage_with, round1, validation, BmiGranularity, Gender,
    Measurement, Skinfold, SkinfoldProtocol,
};
use wasm_bindgen::prelude::*;

/// Calculate BMI from weight (kg) and height (cm), rounded to one decimal
///
/// Returns `undefined` for missing, zero or negative inputs.
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    bmi(Some(height_cm), Some(weight_kg)).map(round1)
}

/// BMI category label ("Normal weight", "Obesity (Class II)", ...)
///
/// With `obesity_grades` the six-band table is used.
#[wasm_bindgen]
pub fn bmi_category(weight_kg: f64, height_cm: f64, obesity_grades: bool) -> Option<String> {
    let granularity = if obesity_grades {
        BmiGranularity::ObesityGrades
    } else {
        BmiGranularity::Standard
    };
    let reading = bmi_reading(Some(height_cm), Some(weight_kg), granularity)?;
    let label = match reading.grade {
        Some(grade) => grade.description(),
        None => reading.category.description(),
    };
    Some(label.to_string())
}

/// Jackson-Pollock 3-site body fat percentage
///
/// Sites are chest, abdominal, thigh for men and tricep, suprailiac, thigh
/// for women. Returns `undefined` for an unknown gender or any site that is
/// not positive.
#[wasm_bindgen]
pub fn body_fat_percentage(
    gender: &str,
    age_years: u32,
    site1: f64,
    site2: f64,
    site3: f64,
) -> Option<f64> {
    let gender: Gender = gender.parse().ok()?;
    let skinfold = match gender {
        Gender::Female => Skinfold {
            tricep: Some(site1),
            suprailiac: Some(site2),
            thigh: Some(site3),
            ..Default::default()
        },
        _ => Skinfold {
            chest: Some(site1),
            abdominal: Some(site2),
            thigh: Some(site3),
            ..Default::default()
        },
    };
    body_fat_percentage_with(SkinfoldProtocol::ThreeSite, gender, age_years, &skinfold)
}

/// Whole years between two ISO dates (YYYY-MM-DD)
#[wasm_bindgen]
pub fn age_in_years(birthdate: &str, today: &str) -> Option<u32> {
    let birthdate = NaiveDate::parse_from_str(birthdate, "%Y-%m-%d").ok()?;
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").ok()?;
    age(birthdate, today)
}

/// Validate one caliper reading; returns the error message, if any
#[wasm_bindgen]
pub fn validate_skinfold_reading(site: &str, value: f64) -> Option<String> {
    validation::validate_reading(site, value).err()
}

/// Validate a measurement form submitted as JSON; returns the error message, if any
#[wasm_bindgen]
pub fn validate_measurement(json: &str) -> Option<String> {
    match serde_json::from_str::<Measurement>(json) {
        Ok(measurement) => validation::validate_measurement(&measurement).err(),
        Err(e) => Some(format!("Invalid measurement: {}", e)),
    }
}
