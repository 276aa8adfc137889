use crate::db::{
    models::{ContactChannel, EntityId, NewContactChannel},
    MemoryDb,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct ContactChannelsRepository {
    db: Arc<MemoryDb>,
}

impl ContactChannelsRepository {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }

    pub fn create(&self, channel: NewContactChannel) -> ContactChannel {
        let created = self.db.write(|tables| {
            tables.contact_channels.insert_with(|id| ContactChannel {
                id,
                service_id: channel.service_id,
                channel_type: channel.channel_type,
                contact_value: channel.contact_value,
                is_active: channel.is_active,
            })
        });

        info!(
            "Created {} contact channel {} for service {}",
            created.channel_type, created.id, created.service_id
        );
        created
    }

    pub fn get_by_id(&self, id: EntityId) -> Option<ContactChannel> {
        self.db.read(|tables| tables.contact_channels.get(id).cloned())
    }

    pub fn get_all(&self) -> Vec<ContactChannel> {
        self.db.read(|tables| tables.contact_channels.all())
    }

    /// Get every channel of one service, in creation order
    pub fn get_by_service(&self, service_id: EntityId) -> Vec<ContactChannel> {
        self.db.read(|tables| {
            tables
                .contact_channels
                .values()
                .filter(|channel| channel.service_id == service_id)
                .cloned()
                .collect()
        })
    }
}
