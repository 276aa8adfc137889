use crate::config::StorageConfig;
use models::{
    Alert, Camera, ContactChannel, EmergencyService, Incident, IncidentType, ServiceIncidentType,
    SystemStatus, User,
};
use std::sync::{Arc, PoisonError, RwLock};
use table::Table;
use tracing::info;

pub mod models;
pub mod repositories;
pub mod seed;
pub mod table;


/// Every entity collection held by the store
#[derive(Debug, Default)]
pub struct Tables {
    pub users: Table<User>,
    pub cameras: Table<Camera>,
    pub incident_types: Table<IncidentType>,
    pub incidents: Table<Incident>,
    pub emergency_services: Table<EmergencyService>,
    pub service_incident_types: Table<ServiceIncidentType>,
    pub contact_channels: Table<ContactChannel>,
    pub alerts: Table<Alert>,
    pub system_status: Table<SystemStatus>,
}

/// Process-local entity store shared by all repositories.
///
/// All tables sit behind one lock. Each repository call locks once and never
/// holds the guard across an await point.
#[derive(Debug, Default)]
pub struct MemoryDb {
    tables: RwLock<Tables>,
}

impl MemoryDb {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared store according to the storage configuration
    pub fn from_config(config: &StorageConfig) -> Arc<Self> {
        let db = Arc::new(Self::new());

        if config.seed_demo_data {
            seed::seed_demo_data(&db);
            info!("In-memory store seeded with demo data");
        } else {
            info!("In-memory store starts empty");
        }

        db
    }

    // A poisoned lock is recovered: a panicking writer leaves every row it
    // already inserted intact and the counters in step with them.

    /// Run `f` with shared access to the tables
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f(&tables)
    }

    /// Run `f` with exclusive access to the tables
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut tables)
    }
}
