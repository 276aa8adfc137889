//! Demo data loaded into a fresh store so the dashboard has something to show.

use super::models::{
    NewCamera, NewContactChannel, NewEmergencyService, NewIncident, NewIncidentType,
    NewServiceIncidentType, NewSystemStatus,
};
use super::repositories::{
    CamerasRepository, ContactChannelsRepository, EmergencyServicesRepository,
    IncidentTypesRepository, IncidentsRepository, SystemStatusRepository,
};
use super::MemoryDb;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;

/// Populate `db` with the demo data set.
///
/// Ids referenced below assume an empty store: incident types 1..=5,
/// cameras 1..=4, services 1..=3.
pub fn seed_demo_data(db: &Arc<MemoryDb>) {
    let incident_types = IncidentTypesRepository::new(db.clone());
    for (name, description, severity, icon) in [
        ("Incendie", "Détection de feu ou de fumée", "critique", "fire"),
        (
            "Agression",
            "Détection de violence physique entre personnes",
            "urgent",
            "user-voice",
        ),
        ("Accident", "Accident impliquant des véhicules", "urgent", "car-crash"),
        (
            "Intrusion",
            "Personne détectée dans une zone restreinte",
            "modéré",
            "user-follow",
        ),
        (
            "Chute",
            "Personne tombée nécessitant potentiellement une assistance",
            "modéré",
            "heart-pulse",
        ),
    ] {
        incident_types.create(NewIncidentType {
            name: name.to_string(),
            description: Some(description.to_string()),
            severity: severity.to_string(),
            icon: Some(icon.to_string()),
        });
    }

    let cameras = CamerasRepository::new(db.clone());
    for (name, location, stream_url, status) in [
        ("Caméra Entrée Nord", "48.8566,2.3522", "rtsp://example.com/stream1", "active"),
        ("Caméra Place Centrale", "48.8584,2.3548", "rtsp://example.com/stream2", "active"),
        ("Caméra Parking Sud", "48.8550,2.3500", "rtsp://example.com/stream3", "maintenance"),
        ("Caméra Entrée Ouest", "48.8570,2.3510", "rtsp://example.com/stream4", "active"),
    ] {
        cameras.create(NewCamera {
            name: name.to_string(),
            location: location.to_string(),
            stream_url: stream_url.to_string(),
            status: status.to_string(),
        });
    }

    let services = EmergencyServicesRepository::new(db.clone());
    for (name, icon) in [("Pompiers", "fire"), ("Police", "shield"), ("SAMU", "heart-pulse")] {
        services.create(NewEmergencyService {
            name: name.to_string(),
            priority_level: "haute".to_string(),
            icon: Some(icon.to_string()),
            status: "active".to_string(),
        });
    }

    let incidents = IncidentsRepository::new(db.clone());
    let now = Utc::now();
    for (type_id, camera_id, minutes_ago, location, status, notes) in [
        (1, 1, 0, "48.8566,2.3522", "pending", "Feu détecté près de l'entrée du bâtiment"),
        (2, 2, 15, "48.8584,2.3548", "pending", "Altercation détectée entre deux individus"),
        (3, 4, 45, "48.8570,2.3510", "resolved", "Accident mineur, intervention terminée"),
    ] {
        incidents.create(NewIncident {
            type_id,
            camera_id,
            timestamp: now - Duration::minutes(minutes_ago),
            location: location.to_string(),
            status: status.to_string(),
            screenshot: None,
            notes: Some(notes.to_string()),
        });
    }

    let channels = ContactChannelsRepository::new(db.clone());
    for (service_id, channel_type, contact_value) in [
        (1, "email", "pompiers@example.com"),
        (1, "telegram", "@FireDept"),
        (2, "email", "police@example.com"),
        (2, "whatsapp", "+33123456789"),
        (3, "sms", "+33987654321"),
    ] {
        channels.create(NewContactChannel {
            service_id,
            channel_type: channel_type.to_string(),
            contact_value: contact_value.to_string(),
            is_active: true,
        });
    }

    // Pompiers: Incendie. Police: Agression, Intrusion. SAMU: Accident, Chute.
    for (service_id, incident_type_id) in [(1, 1), (2, 2), (2, 4), (3, 3), (3, 5)] {
        services.link_incident_type(NewServiceIncidentType {
            service_id,
            incident_type_id,
        });
    }

    let statuses = SystemStatusRepository::new(db.clone());
    for (service_name, metrics) in [
        (
            "Détection IA",
            json!({"cpuUsage": 32, "memoryUsage": 1.2, "detectionSpeed": 45}),
        ),
        (
            "Système d'alerte",
            json!({"queueSize": 0, "avgDeliveryTime": 1.5, "successRate": 98.5}),
        ),
        (
            "Base de données",
            json!({"size": 120, "queries": 246, "responseTime": 12}),
        ),
    ] {
        statuses.upsert(NewSystemStatus {
            service_name: service_name.to_string(),
            status: "active".to_string(),
            metrics: metrics.as_object().cloned(),
        });
    }
}
