use crate::db::{
    models::{EntityId, Incident, IncidentWithType, NewIncident},
    MemoryDb, Tables,
};
use std::sync::Arc;
use tracing::info;

/// Number of incidents returned when no limit is configured
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Incidents repository. Reads are enriched with the incident type's name and
/// severity.
#[derive(Clone)]
pub struct IncidentsRepository {
    db: Arc<MemoryDb>,
}

impl IncidentsRepository {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }

    /// Store a detected incident
    pub fn create(&self, incident: NewIncident) -> Incident {
        let created = self.db.write(|tables| {
            tables.incidents.insert_with(|id| Incident {
                id,
                type_id: incident.type_id,
                camera_id: incident.camera_id,
                timestamp: incident.timestamp,
                location: incident.location,
                status: incident.status,
                screenshot: incident.screenshot,
                notes: incident.notes,
            })
        });

        info!(
            "Recorded incident {} (type {}, camera {})",
            created.id, created.type_id, created.camera_id
        );
        created
    }

    /// Get a single enriched incident
    pub fn get_by_id(&self, id: EntityId) -> Option<IncidentWithType> {
        self.db.read(|tables| {
            tables
                .incidents
                .get(id)
                .map(|incident| enrich(tables, incident.clone()))
        })
    }

    /// Get all enriched incidents in insertion order
    pub fn get_all(&self) -> Vec<IncidentWithType> {
        self.db.read(|tables| {
            tables
                .incidents
                .values()
                .map(|incident| enrich(tables, incident.clone()))
                .collect()
        })
    }

    /// Get the `limit` newest incidents, newest first
    pub fn get_recent(&self, limit: usize) -> Vec<IncidentWithType> {
        self.db.read(|tables| {
            let mut incidents: Vec<&Incident> = tables.incidents.values().collect();
            // stable: equal timestamps stay in insertion order
            incidents.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

            incidents
                .into_iter()
                .take(limit)
                .map(|incident| enrich(tables, incident.clone()))
                .collect()
        })
    }
}

fn enrich(tables: &Tables, incident: Incident) -> IncidentWithType {
    let incident_type = tables.incident_types.get(incident.type_id);
    IncidentWithType::new(incident, incident_type)
}
