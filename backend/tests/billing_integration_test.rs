//! Integration tests for billing status queries

mod common;

use common::{date, TestDb};
use gym_manager_backend::services::BillingService;
use gym_manager_shared::{AssessmentSettings, ClientFilter, OverduePolicy, Standing};
use rust_decimal_macros::dec;

#[tokio::test]
#[ignore = "requires database"]
async fn test_statistics_counts_clients_without_payments_as_current() {
    let db = TestDb::new().await;
    let trainer = db.create_trainer().await;
    let today = date(2024, 6, 10);

    let paid = db.create_client(trainer, None, "M", None).await;
    db.add_payment(paid, today, dec!(100)).await;
    let late = db.create_client(trainer, None, "F", None).await;
    db.add_payment(late, date(2024, 5, 1), dec!(100)).await;
    db.create_client(trainer, None, "O", None).await;

    let stats = BillingService::statistics(&db.pool, trainer, today, OverduePolicy::Strict)
        .await
        .unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.current, 2);

    db.cleanup(trainer).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_latest_payment_decides_standing() {
    let db = TestDb::new().await;
    let trainer = db.create_trainer().await;
    let today = date(2024, 6, 10);

    let client = db.create_client(trainer, Some("Ana"), "F", None).await;
    db.add_payment(client, date(2024, 4, 1), dec!(100)).await;
    db.add_payment(client, date(2024, 6, 10), dec!(100)).await;
    db.add_payment(client, date(2024, 5, 1), dec!(100)).await;

    let overdue = BillingService::list_clients(
        &db.pool,
        trainer,
        ClientFilter::Overdue,
        today,
        &AssessmentSettings::default(),
    )
    .await
    .unwrap();
    assert!(overdue.is_empty());

    let all = BillingService::list_clients(
        &db.pool,
        trainer,
        ClientFilter::All,
        today,
        &AssessmentSettings::default(),
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].billing.standing, Standing::Current);
    assert_eq!(all[0].payment_count, 3);
    assert_eq!(all[0].next_payment_date, Some(date(2024, 7, 10)));

    db.cleanup(trainer).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_overdue_roster_sorted_and_limited() {
    let db = TestDb::new().await;
    let trainer = db.create_trainer().await;
    let today = date(2024, 6, 10);

    for (name, day) in [("Ana", 9), ("Bruno", 1), ("Carla", 5)] {
        let client = db.create_client(trainer, Some(name), "O", None).await;
        db.add_payment(client, date(2024, 6, day), dec!(80)).await;
    }

    let roster =
        BillingService::overdue_roster(&db.pool, trainer, today, OverduePolicy::Strict, 2)
            .await
            .unwrap();

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].name, "Bruno");
    assert_eq!(roster[0].days_overdue, 9);
    assert_eq!(roster[1].name, "Carla");
    assert_eq!(roster[1].last_payment_date, Some(date(2024, 6, 5)));

    db.cleanup(trainer).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_grace_policy_hides_recent_payers() {
    let db = TestDb::new().await;
    let trainer = db.create_trainer().await;
    let today = date(2024, 6, 10);

    let client = db.create_client(trainer, None, "M", None).await;
    db.add_payment(client, date(2024, 5, 20), dec!(90)).await;

    let strict = BillingService::statistics(&db.pool, trainer, today, OverduePolicy::Strict)
        .await
        .unwrap();
    let grace = BillingService::statistics(&db.pool, trainer, today, OverduePolicy::MonthlyGrace)
        .await
        .unwrap();

    assert_eq!(strict.overdue, 1);
    assert_eq!(grace.overdue, 0);

    db.cleanup(trainer).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_trainers_do_not_see_each_others_clients() {
    let db = TestDb::new().await;
    let first = db.create_trainer().await;
    let second = db.create_trainer().await;
    db.create_client(first, None, "F", None).await;

    let stats = BillingService::statistics(&db.pool, second, date(2024, 6, 10), OverduePolicy::Strict)
        .await
        .unwrap();
    assert_eq!(stats.total, 0);

    db.cleanup(first).await;
    db.cleanup(second).await;
}
