use crate::db::{
    models::{
        EmergencyService, EmergencyServiceWithRelations, EntityId, NewEmergencyService,
        NewServiceIncidentType, ServiceIncidentType,
    },
    MemoryDb, Tables,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Emergency services repository.
///
/// Reads attach the names of the incident types a service handles and the
/// channel types it can be reached on, both in creation order.
#[derive(Clone)]
pub struct EmergencyServicesRepository {
    db: Arc<MemoryDb>,
}

impl EmergencyServicesRepository {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }

    pub fn create(&self, service: NewEmergencyService) -> EmergencyService {
        self.create_with_links(service, &[])
    }

    /// Create a service and its incident type links under a single write lock
    pub fn create_with_links(
        &self,
        service: NewEmergencyService,
        incident_type_ids: &[EntityId],
    ) -> EmergencyService {
        let created = self.db.write(|tables| {
            let created = tables.emergency_services.insert_with(|id| EmergencyService {
                id,
                name: service.name,
                priority_level: service.priority_level,
                icon: service.icon,
                status: service.status,
            });

            for &incident_type_id in incident_type_ids {
                tables
                    .service_incident_types
                    .insert_with(|id| ServiceIncidentType {
                        id,
                        service_id: created.id,
                        incident_type_id,
                    });
            }

            created
        });

        info!(
            "Created emergency service {}: {} ({} incident types)",
            created.id,
            created.name,
            incident_type_ids.len()
        );
        created
    }

    /// Record that a service handles an incident type
    pub fn link_incident_type(&self, link: NewServiceIncidentType) -> ServiceIncidentType {
        let created = self.db.write(|tables| {
            tables
                .service_incident_types
                .insert_with(|id| ServiceIncidentType {
                    id,
                    service_id: link.service_id,
                    incident_type_id: link.incident_type_id,
                })
        });

        info!(
            "Linked emergency service {} to incident type {}",
            created.service_id, created.incident_type_id
        );
        created
    }

    pub fn get_link(&self, id: EntityId) -> Option<ServiceIncidentType> {
        self.db
            .read(|tables| tables.service_incident_types.get(id).cloned())
    }

    pub fn get_all_links(&self) -> Vec<ServiceIncidentType> {
        self.db.read(|tables| tables.service_incident_types.all())
    }

    /// Whether a service with this id exists
    pub fn exists(&self, id: EntityId) -> bool {
        self.db
            .read(|tables| tables.emergency_services.get(id).is_some())
    }

    pub fn get_by_id(&self, id: EntityId) -> Option<EmergencyServiceWithRelations> {
        self.db.read(|tables| {
            let service = tables.emergency_services.get(id)?.clone();

            let incident_types = tables
                .service_incident_types
                .values()
                .filter(|link| link.service_id == id)
                .filter_map(|link| tables.incident_types.get(link.incident_type_id))
                .map(|incident_type| incident_type.name.clone())
                .collect();

            let contact_channels = tables
                .contact_channels
                .values()
                .filter(|channel| channel.service_id == id)
                .map(|channel| channel.channel_type.clone())
                .collect();

            Some(EmergencyServiceWithRelations {
                service,
                incident_types,
                contact_channels,
            })
        })
    }

    pub fn get_all(&self) -> Vec<EmergencyServiceWithRelations> {
        self.db.read(|tables| {
            let mut incident_types = incident_type_names_by_service(tables);
            let mut contact_channels = channel_types_by_service(tables);

            tables
                .emergency_services
                .values()
                .map(|service| EmergencyServiceWithRelations {
                    service: service.clone(),
                    incident_types: incident_types.remove(&service.id).unwrap_or_default(),
                    contact_channels: contact_channels.remove(&service.id).unwrap_or_default(),
                })
                .collect()
        })
    }
}

// Links to incident types that no longer resolve are skipped.
fn incident_type_names_by_service(tables: &Tables) -> HashMap<EntityId, Vec<String>> {
    let mut by_service: HashMap<EntityId, Vec<String>> = HashMap::new();

    for link in tables.service_incident_types.values() {
        if let Some(incident_type) = tables.incident_types.get(link.incident_type_id) {
            by_service
                .entry(link.service_id)
                .or_default()
                .push(incident_type.name.clone());
        }
    }

    by_service
}

fn channel_types_by_service(tables: &Tables) -> HashMap<EntityId, Vec<String>> {
    let mut by_service: HashMap<EntityId, Vec<String>> = HashMap::new();

    for channel in tables.contact_channels.values() {
        by_service
            .entry(channel.service_id)
            .or_default()
            .push(channel.channel_type.clone());
    }

    by_service
}
