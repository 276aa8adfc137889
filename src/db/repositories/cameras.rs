use crate::db::{
    models::{Camera, EntityId, NewCamera},
    MemoryDb,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Cameras repository for handling camera operations
#[derive(Clone)]
pub struct CamerasRepository {
    db: Arc<MemoryDb>,
}

impl CamerasRepository {
    /// Create a new cameras repository
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }

    /// Create a new camera
    pub fn create(&self, camera: NewCamera) -> Camera {
        let created = self.db.write(|tables| {
            tables.cameras.insert_with(|id| Camera {
                id,
                name: camera.name,
                location: camera.location,
                stream_url: camera.stream_url,
                status: camera.status,
                created_at: Utc::now(),
            })
        });

        info!("Created camera {}: {}", created.id, created.name);
        created
    }

    /// Get camera by ID
    pub fn get_by_id(&self, id: EntityId) -> Option<Camera> {
        self.db.read(|tables| tables.cameras.get(id).cloned())
    }

    /// Get all cameras
    pub fn get_all(&self) -> Vec<Camera> {
        self.db.read(|tables| tables.cameras.all())
    }
}
