//! Client assessment service

use chrono::NaiveDate;
use gym_manager_shared::{assess, AssessmentSettings, ClientAssessment};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::services::snapshot::SnapshotService;

/// Assessment service for single-client pages
pub struct AssessmentService;

impl AssessmentService {
    /// Billing status and body composition for one client
    ///
    /// Returns `NotFound` when the client does not exist.
    pub async fn assess_client(
        pool: &PgPool,
        client_id: Uuid,
        today: NaiveDate,
        settings: &AssessmentSettings,
    ) -> ServiceResult<ClientAssessment> {
        let snapshot = SnapshotService::for_client(pool, client_id).await?;
        let assessment = assess(&snapshot, today, settings);

        debug!(
            %client_id,
            overdue = assessment.billing.standing.is_overdue(),
            has_bmi = assessment.bmi.is_some(),
            has_body_fat = assessment.body_fat_percent.is_some(),
            "Assessed client"
        );

        Ok(assessment)
    }
}
