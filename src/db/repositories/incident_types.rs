use crate::db::{
    models::{EntityId, IncidentType, NewIncidentType},
    MemoryDb,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct IncidentTypesRepository {
    db: Arc<MemoryDb>,
}

impl IncidentTypesRepository {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }

    pub fn create(&self, incident_type: NewIncidentType) -> IncidentType {
        let created = self.db.write(|tables| {
            tables.incident_types.insert_with(|id| IncidentType {
                id,
                name: incident_type.name,
                description: incident_type.description,
                severity: incident_type.severity,
                icon: incident_type.icon,
            })
        });

        info!(
            "Created incident type {}: {} ({})",
            created.id, created.name, created.severity
        );
        created
    }

    pub fn get_by_id(&self, id: EntityId) -> Option<IncidentType> {
        self.db.read(|tables| tables.incident_types.get(id).cloned())
    }

    pub fn get_all(&self) -> Vec<IncidentType> {
        self.db.read(|tables| tables.incident_types.all())
    }
}
