//! Skinfold repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use gym_manager_shared::Skinfold;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::decimal_to_f64;

/// Skinfold record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SkinfoldRecord {
    pub id: Uuid,
    pub client_id: Uuid,
    pub chest: Option<Decimal>,
    pub midaxillary: Option<Decimal>,
    pub subscapular: Option<Decimal>,
    pub bicep: Option<Decimal>,
    pub tricep: Option<Decimal>,
    pub abdominal: Option<Decimal>,
    pub suprailiac: Option<Decimal>,
    pub thigh: Option<Decimal>,
    pub calf: Option<Decimal>,
    pub lower_back: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl From<SkinfoldRecord> for Skinfold {
    fn from(r: SkinfoldRecord) -> Self {
        Skinfold {
            chest: decimal_to_f64(r.chest),
            midaxillary: decimal_to_f64(r.midaxillary),
            subscapular: decimal_to_f64(r.subscapular),
            bicep: decimal_to_f64(r.bicep),
            tricep: decimal_to_f64(r.tricep),
            abdominal: decimal_to_f64(r.abdominal),
            suprailiac: decimal_to_f64(r.suprailiac),
            thigh: decimal_to_f64(r.thigh),
            calf: decimal_to_f64(r.calf),
            lower_back: decimal_to_f64(r.lower_back),
            recorded_at: Some(r.created_at),
        }
    }
}

/// Skinfold repository for database operations
pub struct SkinfoldRepository;

impl SkinfoldRepository {
    /// Get the most recent skinfold record for a client
    pub async fn get_latest(pool: &PgPool, client_id: Uuid) -> Result<Option<SkinfoldRecord>> {
        let record = sqlx::query_as::<_, SkinfoldRecord>(
            r#"
            SELECT id, client_id, chest, midaxillary, subscapular, bicep, tricep, abdominal,
                   suprailiac, thigh, calf, lower_back, created_at
            FROM skinfolds
            WHERE client_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(client_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Get the most recent skinfold record of every client a trainer owns
    pub async fn latest_for_trainer(pool: &PgPool, user_id: Uuid) -> Result<Vec<SkinfoldRecord>> {
        let records = sqlx::query_as::<_, SkinfoldRecord>(
            r#"
            SELECT DISTINCT ON (s.client_id)
                   s.id, s.client_id, s.chest, s.midaxillary, s.subscapular, s.bicep, s.tricep,
                   s.abdominal, s.suprailiac, s.thigh, s.calf, s.lower_back, s.created_at
            FROM skinfolds s
            JOIN clients c ON c.id = s.client_id
            WHERE c.user_id = $1
            ORDER BY s.client_id, s.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
