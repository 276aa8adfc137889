pub mod alert_models;
pub mod camera_models;
pub mod emergency_service_models;
pub mod incident_models;
pub mod system_status_models;
pub mod user_models;

pub use alert_models::{Alert, NewAlert};
pub use camera_models::{Camera, NewCamera};
pub use emergency_service_models::{
    ContactChannel, EmergencyService, EmergencyServiceWithRelations, NewContactChannel,
    NewEmergencyService, NewServiceIncidentType, ServiceIncidentType,
};
pub use incident_models::{
    Incident, IncidentType, IncidentWithType, NewIncident, NewIncidentType, DEFAULT_SEVERITY,
    UNKNOWN_INCIDENT_TYPE,
};
pub use system_status_models::{Metrics, NewSystemStatus, SystemStatus};
pub use user_models::{NewUser, User};

/// Identifier type shared by every entity
pub type EntityId = i32;
