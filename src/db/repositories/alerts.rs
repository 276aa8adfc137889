use crate::db::{
    models::{Alert, EntityId, NewAlert},
    MemoryDb,
};
use std::sync::Arc;
use tracing::info;

/// Alerts repository. Alerts record dispatches of incidents to services.
#[derive(Clone)]
pub struct AlertsRepository {
    db: Arc<MemoryDb>,
}

impl AlertsRepository {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }

    pub fn create(&self, alert: NewAlert) -> Alert {
        let created = self.db.write(|tables| {
            tables.alerts.insert_with(|id| Alert {
                id,
                incident_id: alert.incident_id,
                service_id: alert.service_id,
                channel_id: alert.channel_id,
                timestamp: alert.timestamp,
                status: alert.status,
                details: alert.details,
            })
        });

        info!(
            "Created alert {} for incident {} via channel {}",
            created.id, created.incident_id, created.channel_id
        );
        created
    }

    pub fn get_by_id(&self, id: EntityId) -> Option<Alert> {
        self.db.read(|tables| tables.alerts.get(id).cloned())
    }

    pub fn get_all(&self) -> Vec<Alert> {
        self.db.read(|tables| tables.alerts.all())
    }
}
