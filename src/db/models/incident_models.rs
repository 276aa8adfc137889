use super::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used when an incident points at an unknown incident type
pub const UNKNOWN_INCIDENT_TYPE: &str = "Inconnu";
/// Severity used when an incident points at an unknown incident type
pub const DEFAULT_SEVERITY: &str = "modéré";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncidentType {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub severity: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewIncidentType {
    pub name: String,
    pub description: Option<String>,
    pub severity: String,
    pub icon: Option<String>,
}

/// Incident as detected by the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: EntityId,
    pub type_id: EntityId,
    pub camera_id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub status: String,
    pub screenshot: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewIncident {
    pub type_id: EntityId,
    pub camera_id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub status: String,
    pub screenshot: Option<String>,
    pub notes: Option<String>,
}

/// Incident with the name and severity of its type attached
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IncidentWithType {
    #[serde(flatten)]
    pub incident: Incident,
    #[serde(rename = "type")]
    pub type_name: String,
    pub severity: String,
}

impl IncidentWithType {
    /// Attach type details, falling back to placeholders for a dangling `type_id`
    pub fn new(incident: Incident, incident_type: Option<&IncidentType>) -> Self {
        let (type_name, severity) = match incident_type {
            Some(t) => (t.name.clone(), t.severity.clone()),
            None => (
                UNKNOWN_INCIDENT_TYPE.to_string(),
                DEFAULT_SEVERITY.to_string(),
            ),
        };

        Self {
            incident,
            type_name,
            severity,
        }
    }
}
