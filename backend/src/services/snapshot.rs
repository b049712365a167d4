//! Client snapshot assembly
//!
//! Loads the rows the calculators need and groups them into one
//! [`ClientSnapshot`] per client.

use std::collections::HashMap;

use gym_manager_shared::{ClientSnapshot, Measurement, Payment, Skinfold};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::repositories::{
    ClientRecord, ClientRepository, MeasurementRecord, MeasurementRepository, PaymentRecord,
    PaymentRepository, SkinfoldRecord, SkinfoldRepository,
};

/// How much of each client to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotScope {
    /// Client rows and payments only
    Billing,
    /// Payments plus the latest measurement and skinfold
    Full,
}

/// Snapshot service for loading client data
pub struct SnapshotService;

impl SnapshotService {
    /// Load one client with all payments and latest body records
    pub async fn for_client(pool: &PgPool, client_id: Uuid) -> ServiceResult<ClientSnapshot> {
        let client = ClientRepository::get_by_id(pool, client_id)
            .await
            .map_err(ServiceError::from_repository)?
            .ok_or_else(|| ServiceError::NotFound(format!("Client {} not found", client_id)))?;

        let payments = PaymentRepository::list_for_client(pool, client_id)
            .await
            .map_err(ServiceError::from_repository)?;
        let measurement = MeasurementRepository::get_latest(pool, client_id)
            .await
            .map_err(ServiceError::from_repository)?;
        let skinfold = SkinfoldRepository::get_latest(pool, client_id)
            .await
            .map_err(ServiceError::from_repository)?;

        let mut snapshots = assemble(
            vec![client],
            payments,
            measurement.into_iter().collect(),
            skinfold.into_iter().collect(),
        );
        snapshots
            .pop()
            .ok_or_else(|| ServiceError::NotFound(format!("Client {} not found", client_id)))
    }

    /// Load every client a trainer owns
    pub async fn for_trainer(
        pool: &PgPool,
        user_id: Uuid,
        scope: SnapshotScope,
    ) -> ServiceResult<Vec<ClientSnapshot>> {
        let clients = ClientRepository::list_for_trainer(pool, user_id)
            .await
            .map_err(ServiceError::from_repository)?;
        let payments = PaymentRepository::list_for_trainer(pool, user_id)
            .await
            .map_err(ServiceError::from_repository)?;

        let (measurements, skinfolds) = match scope {
            SnapshotScope::Billing => (Vec::new(), Vec::new()),
            SnapshotScope::Full => {
                let measurements = MeasurementRepository::latest_for_trainer(pool, user_id)
                    .await
                    .map_err(ServiceError::from_repository)?;
                let skinfolds = SkinfoldRepository::latest_for_trainer(pool, user_id)
                    .await
                    .map_err(ServiceError::from_repository)?;
                (measurements, skinfolds)
            }
        };

        debug!(
            %user_id,
            clients = clients.len(),
            payments = payments.len(),
            ?scope,
            "Loaded client records"
        );

        Ok(assemble(clients, payments, measurements, skinfolds))
    }
}

/// Group loaded rows into snapshots, keeping the order of `clients`
///
/// Expects at most one measurement and one skinfold per client; if more are
/// given the first one wins.
pub fn assemble(
    clients: Vec<ClientRecord>,
    payments: Vec<PaymentRecord>,
    measurements: Vec<MeasurementRecord>,
    skinfolds: Vec<SkinfoldRecord>,
) -> Vec<ClientSnapshot> {
    let mut payments_by_client: HashMap<Uuid, Vec<Payment>> = HashMap::new();
    for record in payments {
        payments_by_client
            .entry(record.client_id)
            .or_default()
            .push(record.into());
    }

    let mut measurement_by_client: HashMap<Uuid, Measurement> = HashMap::new();
    for record in measurements {
        measurement_by_client
            .entry(record.client_id)
            .or_insert_with(|| record.into());
    }

    let mut skinfold_by_client: HashMap<Uuid, Skinfold> = HashMap::new();
    for record in skinfolds {
        skinfold_by_client
            .entry(record.client_id)
            .or_insert_with(|| record.into());
    }

    clients
        .into_iter()
        .map(|client| ClientSnapshot {
            id: client.id,
            gender: client.gender(),
            birthdate: client.birthdate,
            payments: payments_by_client.remove(&client.id).unwrap_or_default(),
            latest_measurement: measurement_by_client.remove(&client.id),
            latest_skinfold: skinfold_by_client.remove(&client.id),
            name: client.name,
        })
        .collect()
}
