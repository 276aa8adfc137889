use crate::api::rest::validation::{
    self, parse_body, parse_id, Validator, INVALID_LOCATION, INVALID_STATUS, INVALID_STREAM_URL,
    MIN_NAME_LENGTH, NAME_TOO_SHORT,
};
use crate::api::rest::{ApiResult, AppState};
use crate::db::models::{Camera, EntityId, NewCamera};
use crate::db::repositories::CamerasRepository;
use crate::error::Error;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const INVALID_CAMERA: &str = "Données de caméra invalides";
pub const CAMERA_NOT_FOUND: &str = "Caméra introuvable";
pub const CAMERA_STATUSES: &[&str] = &["active", "inactive", "maintenance"];

/// Request for registering a camera
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCameraRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub stream_url: Option<String>,
    pub status: Option<String>,
}

impl CreateCameraRequest {
    pub fn validate(self) -> Result<NewCamera, Error> {
        let mut v = Validator::new();

        let name = v.min_length("name", self.name, MIN_NAME_LENGTH, NAME_TOO_SHORT);
        let location = v.required("location", self.location);
        if !location.is_empty() {
            v.check(
                "location",
                validation::is_valid_location(&location),
                INVALID_LOCATION,
            );
        }
        let stream_url = v.required("streamUrl", self.stream_url);
        if !stream_url.is_empty() {
            v.check(
                "streamUrl",
                validation::is_valid_stream_url(&stream_url),
                INVALID_STREAM_URL,
            );
        }
        let status = v.one_of(
            "status",
            self.status,
            CAMERA_STATUSES,
            Some("active"),
            INVALID_STATUS,
        );

        v.finish(
            INVALID_CAMERA,
            NewCamera {
                name,
                location,
                stream_url,
                status,
            },
        )
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cameras", get(list_cameras).post(create_camera))
        .route("/api/cameras/:id", get(get_camera))
}

pub async fn list_cameras(State(state): State<AppState>) -> Json<Vec<Camera>> {
    let repo = CamerasRepository::new(Arc::clone(&state.db));
    Json(repo.get_all())
}

pub async fn get_camera(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> ApiResult<Json<Camera>> {
    let id = parse_id(id, CAMERA_NOT_FOUND)?;

    let repo = CamerasRepository::new(Arc::clone(&state.db));
    let camera = repo
        .get_by_id(id)
        .ok_or_else(|| Error::NotFound(format!("{} : {}", CAMERA_NOT_FOUND, id)))?;

    Ok(Json(camera))
}

pub async fn create_camera(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Camera>)> {
    let request: CreateCameraRequest = parse_body(payload, INVALID_CAMERA)?;
    let new_camera = request.validate()?;

    let repo = CamerasRepository::new(Arc::clone(&state.db));
    let camera = repo.create(new_camera);

    Ok((StatusCode::CREATED, Json(camera)))
}
