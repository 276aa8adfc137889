use super::{EntityId, Metrics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of an incident being dispatched to a service over one channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: EntityId,
    pub incident_id: EntityId,
    pub service_id: EntityId,
    pub channel_id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub details: Option<Metrics>,
}

#[derive(Debug, Clone)]
pub struct NewAlert {
    pub incident_id: EntityId,
    pub service_id: EntityId,
    pub channel_id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub details: Option<Metrics>,
}
