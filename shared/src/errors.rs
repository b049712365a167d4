//! Error types for the Gym Manager domain

use thiserror::Error;

/// Errors raised while interpreting user-supplied domain values
///
/// Missing anthropometric or payment data is never an error; calculations
/// return `None` instead. These variants only cover values that cannot be
/// understood at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid gender: {0}")]
    InvalidGender(String),

    #[error("Invalid overdue policy: {0}")]
    InvalidOverduePolicy(String),

    #[error("Invalid skinfold protocol: {0}")]
    InvalidSkinfoldProtocol(String),

    #[error("Invalid BMI granularity: {0}")]
    InvalidBmiGranularity(String),
}
