use crate::config::ApiConfig;
use crate::db::MemoryDb;
use crate::error::{Error, FieldError};
use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use log::{error, info};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub mod camera_controller;
pub mod emergency_service_controller;
pub mod incident_controller;
pub mod system_controller;
pub mod validation;

#[cfg(test)]
mod router_tests;

/// Message returned for failures the client cannot act on
pub const INTERNAL_ERROR_MESSAGE: &str = "Erreur interne du serveur";

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<MemoryDb>,
    /// Size of the recent incidents list
    pub recent_incidents_limit: usize,
}

impl AppState {
    pub fn new(db: Arc<MemoryDb>, recent_incidents_limit: usize) -> Self {
        Self {
            db,
            recent_incidents_limit,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ApiError {
    fn new(status: StatusCode, message: String) -> Self {
        ApiError {
            message,
            status: status.as_u16(),
            errors: Vec::new(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation { message, fields } => ApiError {
                message,
                status: StatusCode::BAD_REQUEST.as_u16(),
                errors: fields,
            },
            Error::NotFound(message) => ApiError::new(StatusCode::NOT_FOUND, message),
            Error::Config(_) => {
                error!("Request failed: {}", err);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(err) = err.downcast_ref::<Error>() {
            return err.clone().into();
        }

        error!("Request failed: {:#}", err);
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_MESSAGE.to_string(),
        )
    }
}

/// Implement IntoResponse for ApiError
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(self);
        (status, body).into_response()
    }
}

/// Build the API router with every route and its state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(camera_controller::routes())
        .merge(incident_controller::routes())
        .merge(emergency_service_controller::routes())
        .merge(system_controller::routes())
        .with_state(state)
}

pub struct RestApi {
    config: ApiConfig,
    state: AppState,
}

impl RestApi {
    pub fn new(config: &ApiConfig, state: AppState) -> Self {
        Self {
            config: config.clone(),
            state,
        }
    }

    /// API routes plus CORS and, when configured, the dashboard files
    pub fn app(&self) -> Router {
        // The dashboard may be served from another origin during development
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_credentials(false)
            .max_age(Duration::from_secs(self.config.cors_max_age_secs));

        let mut app = create_router(self.state.clone());

        if let Some(dir) = &self.config.static_dir {
            info!("Serving dashboard files from {:?}", dir);
            app = app.fallback_service(ServeDir::new(dir));
        }

        app.layer(cors)
    }

    /// Serve until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let app = self.app();

        let addr = format!("{}:{}", self.config.address, self.config.port);
        let addr: SocketAddr = addr.parse()?;

        info!("API server listening on {}", addr);

        axum::Server::try_bind(&addr)?
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down...");
}

#[cfg(test)]
pub(crate) fn test_state(seed: bool) -> AppState {
    let config = crate::config::StorageConfig {
        seed_demo_data: seed,
        ..Default::default()
    };
    AppState::new(MemoryDb::from_config(&config), config.recent_incidents_limit)
}
