//! Body measurement repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use gym_manager_shared::Measurement;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::decimal_to_f64;

/// Measurement record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeasurementRecord {
    pub id: Uuid,
    pub client_id: Uuid,
    pub height: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub chest: Option<Decimal>,
    pub left_arm: Option<Decimal>,
    pub right_arm: Option<Decimal>,
    pub waist: Option<Decimal>,
    pub abdomen: Option<Decimal>,
    pub hips: Option<Decimal>,
    pub left_thigh: Option<Decimal>,
    pub right_thigh: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl From<MeasurementRecord> for Measurement {
    fn from(r: MeasurementRecord) -> Self {
        Measurement {
            height_cm: decimal_to_f64(r.height),
            weight_kg: decimal_to_f64(r.weight),
            chest: decimal_to_f64(r.chest),
            left_arm: decimal_to_f64(r.left_arm),
            right_arm: decimal_to_f64(r.right_arm),
            waist: decimal_to_f64(r.waist),
            abdomen: decimal_to_f64(r.abdomen),
            hips: decimal_to_f64(r.hips),
            left_thigh: decimal_to_f64(r.left_thigh),
            right_thigh: decimal_to_f64(r.right_thigh),
            recorded_at: Some(r.created_at),
        }
    }
}

/// Measurement repository for database operations
pub struct MeasurementRepository;

impl MeasurementRepository {
    /// Get the most recent measurement for a client
    pub async fn get_latest(pool: &PgPool, client_id: Uuid) -> Result<Option<MeasurementRecord>> {
        let record = sqlx::query_as::<_, MeasurementRecord>(
            r#"
            SELECT id, client_id, height, weight, chest, left_arm, right_arm, waist, abdomen, hips,
                   left_thigh, right_thigh, created_at
            FROM measurements
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

    /// Get the most recent measurement of every client a trainer owns
    pub async fn latest_for_trainer(pool: &PgPool, user_id: Uuid) -> Result<Vec<MeasurementRecord>> {
        let records = sqlx::query_as::<_, MeasurementRecord>(
            r#"
            SELECT DISTINCT ON (m.client_id)
                   m.id, m.client_id, m.height, m.weight, m.chest, m.left_arm, m.right_arm, m.waist,
                   m.abdomen, m.hips, m.left_thigh, m.right_thigh, m.created_at
            FROM measurements m
            JOIN clients c ON c.id = m.client_id
            WHERE c.user_id = $1
            ORDER BY m.client_id, m.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
