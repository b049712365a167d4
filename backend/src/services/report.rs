//! Report service
//!
//! Dashboard and revenue reports over a trainer's clients. Each call loads
//! fresh data and builds its own [`ReportContext`].

use chrono::{Datelike, NaiveDate};
use gym_manager_shared::{DashboardReport, OverduePolicy, ReportContext, RevenueSeries};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::services::snapshot::{SnapshotScope, SnapshotService};

/// Report service for dashboard and revenue views
pub struct ReportService;

impl ReportService {
    /// Statistics, revenue totals, trailing chart and overdue roster
    pub async fn dashboard(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
        policy: OverduePolicy,
        roster_limit: usize,
    ) -> ServiceResult<DashboardReport> {
        let snapshots = SnapshotService::for_trainer(pool, user_id, SnapshotScope::Billing).await?;
        let report = ReportContext::new(today, policy, &snapshots).dashboard(roster_limit);

        info!(
            %user_id,
            as_of = %today,
            total = report.statistics.total,
            overdue = report.statistics.overdue,
            month_revenue = %report.month_revenue,
            "Built dashboard"
        );

        Ok(report)
    }

    /// Revenue per month of `year`, or per day when `month` is given
    ///
    /// `year` defaults to the year of `today`.
    pub async fn revenue(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
        year: Option<i32>,
        month: Option<u32>,
    ) -> ServiceResult<RevenueSeries> {
        check_month(month)?;

        let snapshots = SnapshotService::for_trainer(pool, user_id, SnapshotScope::Billing).await?;
        let ctx = ReportContext::new(today, OverduePolicy::default(), &snapshots);
        let series = revenue_series(&ctx, year, month)?;

        info!(%user_id, ?year, ?month, total = %series.total, "Built revenue series");
        Ok(series)
    }
}

fn check_month(month: Option<u32>) -> ServiceResult<()> {
    match month {
        Some(m) if !(1..=12).contains(&m) => Err(ServiceError::Validation(format!(
            "Month must be between 1 and 12, got {}",
            m
        ))),
        _ => Ok(()),
    }
}

/// Pick the daily or monthly series for the requested period
pub fn revenue_series(
    ctx: &ReportContext<'_>,
    year: Option<i32>,
    month: Option<u32>,
) -> ServiceResult<RevenueSeries> {
    check_month(month)?;
    let year = year.unwrap_or_else(|| ctx.today().year());

    match month {
        Some(m) => ctx.daily_revenue(year, m).ok_or_else(|| {
            ServiceError::Validation(format!("No such month: {}-{:02}", year, m))
        }),
        None => Ok(ctx.monthly_revenue(year)),
    }
}
