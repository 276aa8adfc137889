pub mod api;
pub mod config;
pub mod db;
pub mod error;

// Re-export main components for easier use
pub use api::rest::{create_router, AppState, RestApi};
pub use db::MemoryDb;
pub use error::Error;
