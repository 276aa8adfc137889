use crate::api::rest::validation::{
    parse_body, parse_id, Validator, INVALID_SEVERITY, INVALID_STATUS, INVALID_TIMESTAMP, MIN_NAME_LENGTH,
    NAME_TOO_SHORT,
};
use crate::api::rest::{ApiResult, AppState};
use crate::db::models::{
    EntityId, Incident, IncidentType, IncidentWithType, NewIncident, NewIncidentType,
};
use crate::db::repositories::{CamerasRepository, IncidentTypesRepository, IncidentsRepository};
use crate::error::Error;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const INVALID_INCIDENT_TYPE: &str = "Données de type d'incident invalides";
pub const INVALID_INCIDENT: &str = "Données d'incident invalides";
pub const INCIDENT_NOT_FOUND: &str = "Incident introuvable";

/// English and French severity levels are both in use by the dashboard
pub const SEVERITIES: &[&str] = &["high", "medium", "low", "critique", "urgent", "modéré"];
pub const INCIDENT_STATUSES: &[&str] = &["pending", "processing", "resolved"];

/// Request for creating an incident type
#[derive(Debug, Deserialize)]
pub struct CreateIncidentTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub icon: Option<String>,
}

impl CreateIncidentTypeRequest {
    pub fn validate(self) -> Result<NewIncidentType, Error> {
        let mut v = Validator::new();

        let name = v.min_length("name", self.name, MIN_NAME_LENGTH, NAME_TOO_SHORT);
        let severity = v.one_of("severity", self.severity, SEVERITIES, None, INVALID_SEVERITY);

        v.finish(
            INVALID_INCIDENT_TYPE,
            NewIncidentType {
                name,
                description: non_blank(self.description),
                severity,
                icon: non_blank(self.icon),
            },
        )
    }
}

/// Incident reported by the detection pipeline
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentRequest {
    pub type_id: Option<EntityId>,
    pub camera_id: Option<EntityId>,
    pub timestamp: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub screenshot: Option<String>,
    pub notes: Option<String>,
}

impl CreateIncidentRequest {
    pub fn validate(self) -> Result<NewIncident, Error> {
        let mut v = Validator::new();

        let type_id = v.required_id("typeId", self.type_id);
        let camera_id = v.required_id("cameraId", self.camera_id);
        let timestamp = match self.timestamp {
            None => Utc::now(),
            Some(raw) => match DateTime::parse_from_rfc3339(raw.trim()) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(_) => {
                    v.check("timestamp", false, INVALID_TIMESTAMP);
                    Utc::now()
                }
            },
        };
        let location = v.required("location", self.location);
        let status = v.one_of(
            "status",
            self.status,
            INCIDENT_STATUSES,
            Some("pending"),
            INVALID_STATUS,
        );

        v.finish(
            INVALID_INCIDENT,
            NewIncident {
                type_id,
                camera_id,
                timestamp,
                location,
                status,
                screenshot: non_blank(self.screenshot),
                notes: non_blank(self.notes),
            },
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/incidents", get(list_incidents).post(create_incident))
        .route("/api/incidents/recent", get(recent_incidents))
        .route("/api/incidents/:id", get(get_incident))
        .route(
            "/api/incident-types",
            get(list_incident_types).post(create_incident_type),
        )
}

pub async fn list_incidents(State(state): State<AppState>) -> Json<Vec<IncidentWithType>> {
    let repo = IncidentsRepository::new(Arc::clone(&state.db));
    Json(repo.get_all())
}

pub async fn recent_incidents(State(state): State<AppState>) -> Json<Vec<IncidentWithType>> {
    let repo = IncidentsRepository::new(Arc::clone(&state.db));
    Json(repo.get_recent(state.recent_incidents_limit))
}

pub async fn get_incident(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> ApiResult<Json<IncidentWithType>> {
    let id = parse_id(id, INCIDENT_NOT_FOUND)?;

    let repo = IncidentsRepository::new(Arc::clone(&state.db));
    let incident = repo
        .get_by_id(id)
        .ok_or_else(|| Error::NotFound(format!("{} : {}", INCIDENT_NOT_FOUND, id)))?;

    Ok(Json(incident))
}

pub async fn create_incident(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Incident>)> {
    let request: CreateIncidentRequest = parse_body(payload, INVALID_INCIDENT)?;
    let new_incident = request.validate()?;

    // References are not enforced; reads fall back to placeholders
    let types = IncidentTypesRepository::new(Arc::clone(&state.db));
    if types.get_by_id(new_incident.type_id).is_none() {
        warn!(
            "Incident references unknown incident type {}",
            new_incident.type_id
        );
    }
    let cameras = CamerasRepository::new(Arc::clone(&state.db));
    if cameras.get_by_id(new_incident.camera_id).is_none() {
        warn!("Incident references unknown camera {}", new_incident.camera_id);
    }

    let repo = IncidentsRepository::new(Arc::clone(&state.db));
    let incident = repo.create(new_incident);

    Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn list_incident_types(State(state): State<AppState>) -> Json<Vec<IncidentType>> {
    let repo = IncidentTypesRepository::new(Arc::clone(&state.db));
    Json(repo.get_all())
}

pub async fn create_incident_type(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<IncidentType>)> {
    let request: CreateIncidentTypeRequest = parse_body(payload, INVALID_INCIDENT_TYPE)?;
    let new_type = request.validate()?;

    let repo = IncidentTypesRepository::new(Arc::clone(&state.db));
    let incident_type = repo.create(new_type);

    Ok((StatusCode::CREATED, Json(incident_type)))
}
