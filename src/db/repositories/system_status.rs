use crate::db::{
    models::{EntityId, NewSystemStatus, SystemStatus},
    MemoryDb,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// System status repository. Holds at most one record per service name.
#[derive(Clone)]
pub struct SystemStatusRepository {
    db: Arc<MemoryDb>,
}

impl SystemStatusRepository {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }

    pub fn get_all(&self) -> Vec<SystemStatus> {
        self.db.read(|tables| tables.system_status.all())
    }

    pub fn get_by_id(&self, id: EntityId) -> Option<SystemStatus> {
        self.db.read(|tables| tables.system_status.get(id).cloned())
    }

    /// Update the record for `status.service_name`, or insert one.
    ///
    /// An update keeps the previous metrics when none are supplied.
    pub fn upsert(&self, status: NewSystemStatus) -> SystemStatus {
        self.db.write(|tables| {
            let existing = tables
                .system_status
                .values()
                .find(|s| s.service_name == status.service_name)
                .cloned();

            match existing {
                Some(existing) => {
                    let updated = SystemStatus {
                        status: status.status,
                        last_updated: Utc::now(),
                        metrics: status.metrics.or(existing.metrics),
                        ..existing
                    };
                    tables.system_status.replace(updated.id, updated.clone());

                    debug!(
                        "Updated status of {}: {}",
                        updated.service_name, updated.status
                    );
                    updated
                }
                None => {
                    let created = tables.system_status.insert_with(|id| SystemStatus {
                        id,
                        service_name: status.service_name,
                        status: status.status,
                        last_updated: Utc::now(),
                        metrics: status.metrics,
                    });

                    info!(
                        "Tracking status of {}: {}",
                        created.service_name, created.status
                    );
                    created
                }
            }
        })
    }
}
