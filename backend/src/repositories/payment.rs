//! Payment repository for database operations

use anyhow::Result;
use chrono::NaiveDate;
use gym_manager_shared::Payment;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Payment record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub client_id: Uuid,
    pub payment_date: NaiveDate,
    pub value: Decimal,
}

impl From<PaymentRecord> for Payment {
    fn from(record: PaymentRecord) -> Self {
        Payment::new(record.payment_date, record.value)
    }
}

/// Payment repository for database operations
pub struct PaymentRepository;

impl PaymentRepository {
    /// All payments of one client, most recent first
    pub async fn list_for_client(pool: &PgPool, client_id: Uuid) -> Result<Vec<PaymentRecord>> {
        let records = sqlx::query_as::<_, PaymentRecord>(
            r#"
            SELECT id, client_id, payment_date, value
            FROM payments
            WHERE client_id = $1
            ORDER BY payment_date DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// All payments of every client a trainer owns
    pub async fn list_for_trainer(pool: &PgPool, user_id: Uuid) -> Result<Vec<PaymentRecord>> {
        let records = sqlx::query_as::<_, PaymentRecord>(
            r#"
            SELECT p.id, p.client_id, p.payment_date, p.value
            FROM payments p
            JOIN clients c ON c.id = p.client_id
            WHERE c.user_id = $1
            ORDER BY p.payment_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
