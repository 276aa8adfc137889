use super::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyService {
    pub id: EntityId,
    pub name: String,
    pub priority_level: String,
    pub icon: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewEmergencyService {
    pub name: String,
    pub priority_level: String,
    pub icon: Option<String>,
    pub status: String,
}

/// Link between an emergency service and an incident type it handles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIncidentType {
    pub id: EntityId,
    pub service_id: EntityId,
    pub incident_type_id: EntityId,
}

#[derive(Debug, Clone, Copy)]
pub struct NewServiceIncidentType {
    pub service_id: EntityId,
    pub incident_type_id: EntityId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactChannel {
    pub id: EntityId,
    pub service_id: EntityId,
    /// email, sms, whatsapp or telegram
    pub channel_type: String,
    pub contact_value: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewContactChannel {
    pub service_id: EntityId,
    pub channel_type: String,
    pub contact_value: String,
    pub is_active: bool,
}

/// Emergency service with the names of its incident types and its channel types
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyServiceWithRelations {
    #[serde(flatten)]
    pub service: EmergencyService,
    pub incident_types: Vec<String>,
    pub contact_channels: Vec<String>,
}
