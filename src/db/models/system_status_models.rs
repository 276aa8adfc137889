use super::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form structured values attached to statuses and alerts
pub type Metrics = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub id: EntityId,
    pub service_name: String,
    pub status: String,
    pub last_updated: DateTime<Utc>,
    pub metrics: Option<Metrics>,
}

#[derive(Debug, Clone)]
pub struct NewSystemStatus {
    pub service_name: String,
    pub status: String,
    pub metrics: Option<Metrics>,
}
