//! Integration tests for dashboard and revenue reports

mod common;

use common::{date, TestDb};
use gym_manager_backend::error::ServiceError;
use gym_manager_backend::services::ReportService;
use gym_manager_shared::{OverduePolicy, RevenuePeriod};
use rust_decimal_macros::dec;

#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_totals() {
    let db = TestDb::new().await;
    let trainer = db.create_trainer().await;
    let today = date(2024, 6, 10);

    let ana = db.create_client(trainer, Some("Ana"), "F", None).await;
    db.add_payment(ana, date(2024, 6, 2), dec!(120)).await;
    db.add_payment(ana, date(2024, 1, 15), dec!(100)).await;
    let bruno = db.create_client(trainer, Some("Bruno"), "M", None).await;
    db.add_payment(bruno, date(2023, 11, 3), dec!(90)).await;

    let report = ReportService::dashboard(&db.pool, trainer, today, OverduePolicy::Strict, 10)
        .await
        .unwrap();

    assert_eq!(report.as_of, today);
    assert_eq!(report.statistics.total, 2);
    assert_eq!(report.statistics.overdue, 2);
    assert_eq!(report.month_revenue, dec!(120));
    assert_eq!(report.year_revenue, dec!(220));
    assert_eq!(report.chart.points.len(), 12);
    assert_eq!(report.chart.total, dec!(310));
    assert_eq!(report.overdue_roster[0].name, "Bruno");

    db.cleanup(trainer).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_daily_revenue() {
    let db = TestDb::new().await;
    let trainer = db.create_trainer().await;

    let client = db.create_client(trainer, None, "O", None).await;
    db.add_payment(client, date(2024, 3, 1), dec!(50)).await;
    db.add_payment(client, date(2024, 3, 31), dec!(70)).await;
    db.add_payment(client, date(2024, 4, 1), dec!(999)).await;

    let series = ReportService::revenue(&db.pool, trainer, date(2024, 6, 10), Some(2024), Some(3))
        .await
        .unwrap();

    assert_eq!(series.period, RevenuePeriod::Daily);
    assert_eq!(series.points.len(), 31);
    assert_eq!(series.total, dec!(120));

    db.cleanup(trainer).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_revenue_rejects_invalid_month() {
    let db = TestDb::new().await;
    let trainer = db.create_trainer().await;

    let result = ReportService::revenue(&db.pool, trainer, date(2024, 6, 10), None, Some(13)).await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    db.cleanup(trainer).await;
}
