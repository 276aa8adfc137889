pub mod alerts;
pub mod cameras;
pub mod contact_channels;
pub mod emergency_services;
pub mod incident_types;
pub mod incidents;
pub mod system_status;
pub mod users;

pub use alerts::AlertsRepository;
pub use cameras::CamerasRepository;
pub use contact_channels::ContactChannelsRepository;
pub use emergency_services::EmergencyServicesRepository;
pub use incident_types::IncidentTypesRepository;
pub use incidents::IncidentsRepository;
pub use system_status::SystemStatusRepository;
pub use users::UsersRepository;
