//! Billing status calculations
//!
//! Determines whether a client is current or overdue from their payment
//! history, and by how many days.
//!
//! Two overdue rules exist:
//!
//! - [`OverduePolicy::Strict`]: the client is overdue as soon as the most
//!   recent payment date is in the past. This is the default.
//! - [`OverduePolicy::MonthlyGrace`]: the client is overdue once the date one
//!   calendar month after the most recent payment has passed.
//!
//! A client without any payments is never overdue.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::models::Payment;

/// Whether a client is up to date with payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Current,
    Overdue,
}

impl Standing {
    pub fn is_overdue(&self) -> bool {
        matches!(self, Standing::Overdue)
    }
}

/// Payment standing plus delinquency in whole days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingStatus {
    pub standing: Standing,
    pub days_overdue: i64,
}

impl BillingStatus {
    pub const CURRENT: BillingStatus = BillingStatus {
        standing: Standing::Current,
        days_overdue: 0,
    };
}

/// Rule used to decide when a client becomes overdue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverduePolicy {
    /// Overdue when the latest payment date is before today
    #[default]
    Strict,
    /// Overdue when the latest payment date plus one month is before today;
    /// the due date itself still counts as current
    MonthlyGrace,
}

impl OverduePolicy {
    /// Date after which the client counts as overdue, if they have paid at all
    fn reference_date(&self, payments: &[Payment]) -> Option<NaiveDate> {
        match self {
            OverduePolicy::Strict => latest_payment(payments).map(|p| p.payment_date),
            OverduePolicy::MonthlyGrace => next_payment_date(payments),
        }
    }

    pub fn is_overdue(&self, payments: &[Payment], today: NaiveDate) -> bool {
        self.reference_date(payments)
            .map(|due| due < today)
            .unwrap_or(false)
    }

    pub fn days_overdue(&self, payments: &[Payment], today: NaiveDate) -> i64 {
        match self.reference_date(payments) {
            Some(due) if due < today => (today - due).num_days(),
            _ => 0,
        }
    }

    pub fn classify(&self, payments: &[Payment], today: NaiveDate) -> BillingStatus {
        let days_overdue = self.days_overdue(payments, today);
        if self.is_overdue(payments, today) {
            BillingStatus {
                standing: Standing::Overdue,
                days_overdue,
            }
        } else {
            BillingStatus::CURRENT
        }
    }
}

impl fmt::Display for OverduePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverduePolicy::Strict => f.write_str("strict"),
            OverduePolicy::MonthlyGrace => f.write_str("monthly_grace"),
        }
    }
}

impl FromStr for OverduePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(OverduePolicy::Strict),
            "monthly_grace" | "grace" => Ok(OverduePolicy::MonthlyGrace),
            _ => Err(DomainError::InvalidOverduePolicy(s.to_string())),
        }
    }
}

/// Most recent payment by date
///
/// When several payments share the latest date, the first one in the slice
/// wins.
pub fn latest_payment(payments: &[Payment]) -> Option<&Payment> {
    payments.iter().fold(None, |best: Option<&Payment>, p| match best {
        Some(b) if b.payment_date >= p.payment_date => Some(b),
        _ => Some(p),
    })
}

/// Latest payment date plus one calendar month
///
/// Month ends clamp, so a payment on January 31st is next due on the last
/// day of February.
pub fn next_payment_date(payments: &[Payment]) -> Option<NaiveDate> {
    latest_payment(payments).and_then(|p| p.payment_date.checked_add_months(Months::new(1)))
}

/// Overdue check using the strict rule
pub fn is_overdue(payments: &[Payment], today: NaiveDate) -> bool {
    OverduePolicy::Strict.is_overdue(payments, today)
}

/// Days since the latest payment, or 0 when not overdue
pub fn days_overdue(payments: &[Payment], today: NaiveDate) -> i64 {
    OverduePolicy::Strict.days_overdue(payments, today)
}

/// Standing and days overdue using the strict rule
pub fn classify(payments: &[Payment], today: NaiveDate) -> BillingStatus {
    OverduePolicy::Strict.classify(payments, today)
}
