//! Billing service
//!
//! Client lists filtered by billing standing, the overdue roster and the
//! current/overdue counts for a trainer.

use chrono::NaiveDate;
use gym_manager_shared::{
    assess, AssessmentSettings, ClientAssessment, ClientFilter, ClientSnapshot, ClientStatistics,
    OverdueEntry, OverduePolicy, ReportContext,
};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::services::snapshot::{SnapshotScope, SnapshotService};

/// Billing service for trainer-wide client views
pub struct BillingService;

impl BillingService {
    /// Assessments of a trainer's clients matching `filter`, ordered by name
    pub async fn list_clients(
        pool: &PgPool,
        user_id: Uuid,
        filter: ClientFilter,
        today: NaiveDate,
        settings: &AssessmentSettings,
    ) -> ServiceResult<Vec<ClientAssessment>> {
        let snapshots = SnapshotService::for_trainer(pool, user_id, SnapshotScope::Full).await?;
        let assessments = filter_and_assess(&snapshots, filter, today, settings);

        info!(
            %user_id,
            ?filter,
            matched = assessments.len(),
            total = snapshots.len(),
            "Listed clients"
        );

        Ok(assessments)
    }

    /// Overdue clients, longest overdue first
    pub async fn overdue_roster(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
        policy: OverduePolicy,
        limit: usize,
    ) -> ServiceResult<Vec<OverdueEntry>> {
        let snapshots = SnapshotService::for_trainer(pool, user_id, SnapshotScope::Billing).await?;
        let roster = ReportContext::new(today, policy, &snapshots).overdue_roster(limit);

        debug!(%user_id, %policy, entries = roster.len(), "Built overdue roster");
        Ok(roster)
    }

    /// Total, current and overdue counts
    pub async fn statistics(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
        policy: OverduePolicy,
    ) -> ServiceResult<ClientStatistics> {
        let snapshots = SnapshotService::for_trainer(pool, user_id, SnapshotScope::Billing).await?;
        let stats = ReportContext::new(today, policy, &snapshots).statistics();

        debug!(
            %user_id,
            total = stats.total,
            overdue = stats.overdue,
            "Computed client statistics"
        );
        Ok(stats)
    }
}

/// Apply `filter` with the settings' overdue policy and assess the matches
pub fn filter_and_assess(
    snapshots: &[ClientSnapshot],
    filter: ClientFilter,
    today: NaiveDate,
    settings: &AssessmentSettings,
) -> Vec<ClientAssessment> {
    ReportContext::new(today, settings.overdue_policy, snapshots)
        .filter(filter)
        .into_iter()
        .map(|snapshot| assess(snapshot, today, settings))
        .collect()
}
