use super::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Camera model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: EntityId,
    pub name: String,
    /// "lat,lng" pair
    pub location: String,
    pub stream_url: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Camera fields supplied on creation; `created_at` is set by the store
#[derive(Debug, Clone)]
pub struct NewCamera {
    pub name: String,
    pub location: String,
    pub stream_url: String,
    pub status: String,
}
