//! Client repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use gym_manager_shared::Gender;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

/// Client record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub gender: String,
    pub registration_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl ClientRecord {
    /// Parsed gender; unrecognised values are treated as `Other`
    pub fn gender(&self) -> Gender {
        self.gender.parse().unwrap_or_else(|_| {
            warn!(client_id = %self.id, gender = %self.gender, "Unrecognised gender, treating as other");
            Gender::Other
        })
    }
}

/// Client repository for database operations
pub struct ClientRepository;

impl ClientRepository {
    /// All clients owned by a trainer, ordered by name
    pub async fn list_for_trainer(pool: &PgPool, user_id: Uuid) -> Result<Vec<ClientRecord>> {
        let records = sqlx::query_as::<_, ClientRecord>(
            r#"
            SELECT id, user_id, name, birthdate, gender, registration_date, created_at
            FROM clients
            WHERE user_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get a client by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ClientRecord>> {
        let record = sqlx::query_as::<_, ClientRecord>(
            r#"
            SELECT id, user_id, name, birthdate, gender, registration_date, created_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
