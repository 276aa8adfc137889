use crate::db::{
    models::{EntityId, NewUser, User},
    MemoryDb,
};
use std::sync::Arc;
use tracing::info;

/// Users repository for handling user operations
#[derive(Clone)]
pub struct UsersRepository {
    db: Arc<MemoryDb>,
}

impl UsersRepository {
    /// Create a new users repository
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }

    /// Create a new user
    pub fn create(&self, user: NewUser) -> User {
        let created = self.db.write(|tables| {
            tables.users.insert_with(|id| User {
                id,
                username: user.username,
                password: user.password,
                email: user.email,
                full_name: user.full_name,
                role: user.role,
            })
        });

        info!("Created user {}: {}", created.id, created.username);
        created
    }

    /// Get user by ID
    pub fn get_by_id(&self, id: EntityId) -> Option<User> {
        self.db.read(|tables| tables.users.get(id).cloned())
    }

    pub fn get_all(&self) -> Vec<User> {
        self.db.read(|tables| tables.users.all())
    }

    /// Get user by username
    pub fn get_by_username(&self, username: &str) -> Option<User> {
        self.db.read(|tables| {
            tables
                .users
                .values()
                .find(|user| user.username == username)
                .cloned()
        })
    }
}
