//! Body composition calculations
//!
//! Provides age, BMI and skinfold body-fat calculations for a client.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Fail Closed**: Missing or unusable inputs yield `None`, never a guess
//! 3. **Full Precision**: Values are only rounded at the display boundary

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::models::{Gender, Skinfold};

/// Round to one decimal place for display
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

// ============================================================================
// Age
// ============================================================================

/// Whole years between `birthdate` and `today`, using 365.25-day years
///
/// Returns `None` when the birthdate lies after `today`.
pub fn age(birthdate: NaiveDate, today: NaiveDate) -> Option<u32> {
    let days = (today - birthdate).num_days();
    if days < 0 {
        return None;
    }
    Some((days as f64 / 365.25).floor() as u32)
}

/// [`age`] for an optional birthdate
pub fn age_from(birthdate: Option<NaiveDate>, today: NaiveDate) -> Option<u32> {
    birthdate.and_then(|b| age(b, today))
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the BMI range for this category (inclusive lower, exclusive upper)
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Finer BMI banding that splits obesity into three classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiGrade {
    Underweight,
    Normal,
    Overweight,
    ObesityClass1,
    ObesityClass2,
    ObesityClass3,
}

impl BmiGrade {
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiGrade::Underweight => (0.0, 18.5),
            BmiGrade::Normal => (18.5, 25.0),
            BmiGrade::Overweight => (25.0, 30.0),
            BmiGrade::ObesityClass1 => (30.0, 35.0),
            BmiGrade::ObesityClass2 => (35.0, 40.0),
            BmiGrade::ObesityClass3 => (40.0, f64::INFINITY),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiGrade::Underweight => "Underweight",
            BmiGrade::Normal => "Normal weight",
            BmiGrade::Overweight => "Overweight",
            BmiGrade::ObesityClass1 => "Obesity (Class I)",
            BmiGrade::ObesityClass2 => "Obesity (Class II)",
            BmiGrade::ObesityClass3 => "Obesity (Class III)",
        }
    }

    /// Collapse to the four-band category
    pub fn category(&self) -> BmiCategory {
        match self {
            BmiGrade::Underweight => BmiCategory::Underweight,
            BmiGrade::Normal => BmiCategory::Normal,
            BmiGrade::Overweight => BmiCategory::Overweight,
            BmiGrade::ObesityClass1 | BmiGrade::ObesityClass2 | BmiGrade::ObesityClass3 => {
                BmiCategory::Obese
            }
        }
    }
}

/// Which BMI banding a reading should carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiGranularity {
    /// Four bands only
    #[default]
    Standard,
    /// Four bands plus the obesity grade
    ObesityGrades,
}

impl FromStr for BmiGranularity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(BmiGranularity::Standard),
            "obesity_grades" => Ok(BmiGranularity::ObesityGrades),
            _ => Err(DomainError::InvalidBmiGranularity(s.to_string())),
        }
    }
}

/// BMI value rounded for display, with its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    /// BMI rounded to one decimal place
    pub value: f64,
    pub category: BmiCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<BmiGrade>,
}

/// Calculate BMI from height and weight
///
/// Formula: BMI = weight(kg) / height(m)²
///
/// Returns `None` if either input is missing, zero, negative or not finite.
pub fn bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height_m = positive(height_cm)? / 100.0;
    let weight_kg = positive(weight_kg)?;
    Some(weight_kg / (height_m * height_m))
}

/// Classify BMI into the four standard bands
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Classify BMI into the six-band table with obesity classes
pub fn grade_bmi(bmi: f64) -> BmiGrade {
    if bmi < 18.5 {
        BmiGrade::Underweight
    } else if bmi < 25.0 {
        BmiGrade::Normal
    } else if bmi < 30.0 {
        BmiGrade::Overweight
    } else if bmi < 35.0 {
        BmiGrade::ObesityClass1
    } else if bmi < 40.0 {
        BmiGrade::ObesityClass2
    } else {
        BmiGrade::ObesityClass3
    }
}

/// Calculate a display-ready BMI reading
///
/// The category is taken from the unrounded value.
pub fn bmi_reading(
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    granularity: BmiGranularity,
) -> Option<BmiReading> {
    let value = bmi(height_cm, weight_kg)?;
    let grade = match granularity {
        BmiGranularity::Standard => None,
        BmiGranularity::ObesityGrades => Some(grade_bmi(value)),
    };
    Some(BmiReading {
        value: round1(value),
        category: classify_bmi(value),
        grade,
    })
}

// ============================================================================
// Skinfold Body Fat
// ============================================================================

/// Skinfold protocol used for the body density equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinfoldProtocol {
    /// Jackson-Pollock 3-site
    /// (men: chest, abdominal, thigh; women: tricep, suprailiac, thigh)
    #[default]
    ThreeSite,
    /// Jackson-Pollock 7-site
    /// (chest, midaxillary, subscapular, tricep, abdominal, suprailiac, thigh)
    SevenSite,
}

impl fmt::Display for SkinfoldProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkinfoldProtocol::ThreeSite => f.write_str("three_site"),
            SkinfoldProtocol::SevenSite => f.write_str("seven_site"),
        }
    }
}

impl FromStr for SkinfoldProtocol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "three_site" | "3" => Ok(SkinfoldProtocol::ThreeSite),
            "seven_site" | "7" => Ok(SkinfoldProtocol::SevenSite),
            _ => Err(DomainError::InvalidSkinfoldProtocol(s.to_string())),
        }
    }
}

/// Coefficients of `base - a·S + b·S² - c·age`
#[derive(Debug, Clone, Copy)]
struct DensityCoefficients {
    base: f64,
    sum: f64,
    sum_squared: f64,
    age: f64,
}

const THREE_SITE_MALE: DensityCoefficients = DensityCoefficients {
    base: 1.10938,
    sum: 0.0008267,
    sum_squared: 0.0000016,
    age: 0.0002574,
};

const THREE_SITE_FEMALE: DensityCoefficients = DensityCoefficients {
    base: 1.0994921,
    sum: 0.0009929,
    sum_squared: 0.0000023,
    age: 0.0001392,
};

const SEVEN_SITE_MALE: DensityCoefficients = DensityCoefficients {
    base: 1.112,
    sum: 0.00043499,
    sum_squared: 0.00000055,
    age: 0.00028826,
};

const SEVEN_SITE_FEMALE: DensityCoefficients = DensityCoefficients {
    base: 1.097,
    sum: 0.00046971,
    sum_squared: 0.00000056,
    age: 0.00012828,
};

impl SkinfoldProtocol {
    fn coefficients(&self, gender: Gender) -> Option<DensityCoefficients> {
        match (self, gender) {
            (SkinfoldProtocol::ThreeSite, Gender::Male) => Some(THREE_SITE_MALE),
            (SkinfoldProtocol::ThreeSite, Gender::Female) => Some(THREE_SITE_FEMALE),
            (SkinfoldProtocol::SevenSite, Gender::Male) => Some(SEVEN_SITE_MALE),
            (SkinfoldProtocol::SevenSite, Gender::Female) => Some(SEVEN_SITE_FEMALE),
            (_, Gender::Other) => None,
        }
    }

    /// Readings this protocol sums for the given gender
    fn sites(&self, gender: Gender, skinfold: &Skinfold) -> Vec<Option<f64>> {
        match (self, gender) {
            (SkinfoldProtocol::ThreeSite, Gender::Female) => {
                vec![skinfold.tricep, skinfold.suprailiac, skinfold.thigh]
            }
            (SkinfoldProtocol::ThreeSite, _) => {
                vec![skinfold.chest, skinfold.abdominal, skinfold.thigh]
            }
            (SkinfoldProtocol::SevenSite, _) => vec![
                skinfold.chest,
                skinfold.midaxillary,
                skinfold.subscapular,
                skinfold.tricep,
                skinfold.abdominal,
                skinfold.suprailiac,
                skinfold.thigh,
            ],
        }
    }

    /// Sum of the protocol's sites, if every one is present and positive
    pub fn site_sum(&self, gender: Gender, skinfold: &Skinfold) -> Option<f64> {
        self.sites(gender, skinfold)
            .into_iter()
            .map(positive)
            .sum::<Option<f64>>()
    }
}

/// Body density (g/cm³) from the Jackson-Pollock regression
pub fn body_density(
    protocol: SkinfoldProtocol,
    gender: Gender,
    age_years: u32,
    skinfold: &Skinfold,
) -> Option<f64> {
    let c = protocol.coefficients(gender)?;
    let sum = protocol.site_sum(gender, skinfold)?;
    let density =
        c.base - c.sum * sum + c.sum_squared * sum * sum - c.age * f64::from(age_years);
    (density > 0.0).then_some(density)
}

/// Convert body density to body fat percentage with the Siri equation
///
/// BF% = 495 / density - 450
pub fn siri_body_fat(density: f64) -> f64 {
    495.0 / density - 450.0
}

/// Body fat percentage using the Jackson-Pollock 3-site protocol
///
/// Rounded to one decimal place. `None` for [`Gender::Other`] or when any
/// required site is missing, zero or negative.
pub fn body_fat_percentage(gender: Gender, age_years: u32, skinfold: &Skinfold) -> Option<f64> {
    body_fat_percentage_with(SkinfoldProtocol::ThreeSite, gender, age_years, skinfold)
}

/// Body fat percentage using the given protocol, rounded to one decimal place
pub fn body_fat_percentage_with(
    protocol: SkinfoldProtocol,
    gender: Gender,
    age_years: u32,
    skinfold: &Skinfold,
) -> Option<f64> {
    body_density(protocol, gender, age_years, skinfold).map(|d| round1(siri_body_fat(d)))
}
