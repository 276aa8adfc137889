use crate::api::rest::validation::{
    parse_body, parse_id, Validator, INVALID_CHANNEL_TYPE, INVALID_CONTACT_VALUE, INVALID_PRIORITY,
    INVALID_STATUS, MIN_NAME_LENGTH, NAME_TOO_SHORT,
};
use crate::api::rest::{ApiResult, AppState};
use crate::db::models::{
    ContactChannel, EmergencyService, EmergencyServiceWithRelations, EntityId, NewContactChannel,
    NewEmergencyService, NewServiceIncidentType, ServiceIncidentType,
};
use crate::db::repositories::{
    ContactChannelsRepository, EmergencyServicesRepository, IncidentTypesRepository,
};
use crate::error::Error;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const INVALID_SERVICE: &str = "Données de service d'urgence invalides";
pub const INVALID_CONTACT_CHANNEL: &str = "Données de canal de contact invalides";
pub const INVALID_SERVICE_LINK: &str = "Données d'association invalides";
pub const SERVICE_NOT_FOUND: &str = "Service d'urgence introuvable";

pub const PRIORITY_LEVELS: &[&str] = &["high", "medium", "low", "haute", "moyenne", "basse"];
pub const SERVICE_STATUSES: &[&str] = &["active", "pending"];
pub const CHANNEL_TYPES: &[&str] = &["email", "sms", "whatsapp", "telegram"];
pub const MIN_CONTACT_VALUE_LENGTH: usize = 3;

/// Request for creating an emergency service, optionally with the incident
/// types it handles
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub name: Option<String>,
    pub priority_level: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
    pub incident_type_ids: Option<Vec<EntityId>>,
}

impl CreateServiceRequest {
    pub fn validate(self) -> Result<(NewEmergencyService, Vec<EntityId>), Error> {
        let mut v = Validator::new();

        let name = v.min_length("name", self.name, MIN_NAME_LENGTH, NAME_TOO_SHORT);
        let priority_level = v.one_of(
            "priorityLevel",
            self.priority_level,
            PRIORITY_LEVELS,
            None,
            INVALID_PRIORITY,
        );
        let status = v.one_of(
            "status",
            self.status,
            SERVICE_STATUSES,
            Some("active"),
            INVALID_STATUS,
        );

        v.finish(
            INVALID_SERVICE,
            (
                NewEmergencyService {
                    name,
                    priority_level,
                    icon: self.icon.filter(|icon| !icon.trim().is_empty()),
                    status,
                },
                self.incident_type_ids.unwrap_or_default(),
            ),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactChannelRequest {
    pub service_id: Option<EntityId>,
    pub channel_type: Option<String>,
    pub contact_value: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateContactChannelRequest {
    pub fn validate(self) -> Result<NewContactChannel, Error> {
        let mut v = Validator::new();

        let service_id = v.required_id("serviceId", self.service_id);
        let channel_type = v.one_of(
            "channelType",
            self.channel_type,
            CHANNEL_TYPES,
            None,
            INVALID_CHANNEL_TYPE,
        );
        let contact_value = v.min_length(
            "contactValue",
            self.contact_value,
            MIN_CONTACT_VALUE_LENGTH,
            INVALID_CONTACT_VALUE,
        );

        v.finish(
            INVALID_CONTACT_CHANNEL,
            NewContactChannel {
                service_id,
                channel_type,
                contact_value,
                is_active: self.is_active.unwrap_or(true),
            },
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceIncidentTypeRequest {
    pub service_id: Option<EntityId>,
    pub incident_type_id: Option<EntityId>,
}

impl CreateServiceIncidentTypeRequest {
    pub fn validate(self) -> Result<NewServiceIncidentType, Error> {
        let mut v = Validator::new();

        let service_id = v.required_id("serviceId", self.service_id);
        let incident_type_id = v.required_id("incidentTypeId", self.incident_type_id);

        v.finish(
            INVALID_SERVICE_LINK,
            NewServiceIncidentType {
                service_id,
                incident_type_id,
            },
        )
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/emergency-services",
            get(list_services).post(create_service),
        )
        .route("/api/emergency-services/:id", get(get_service))
        .route(
            "/api/emergency-services/:id/contact-channels",
            get(list_service_channels),
        )
        .route("/api/contact-channels", post(create_contact_channel))
        .route("/api/service-incident-types", post(link_incident_type))
}

pub async fn list_services(
    State(state): State<AppState>,
) -> Json<Vec<EmergencyServiceWithRelations>> {
    let repo = EmergencyServicesRepository::new(Arc::clone(&state.db));
    Json(repo.get_all())
}

pub async fn get_service(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> ApiResult<Json<EmergencyServiceWithRelations>> {
    let id = parse_id(id, SERVICE_NOT_FOUND)?;

    let repo = EmergencyServicesRepository::new(Arc::clone(&state.db));
    let service = repo.get_by_id(id).ok_or_else(|| service_not_found(id))?;

    Ok(Json(service))
}

pub async fn create_service(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EmergencyService>)> {
    let request: CreateServiceRequest = parse_body(payload, INVALID_SERVICE)?;
    let (new_service, incident_type_ids) = request.validate()?;

    let types = IncidentTypesRepository::new(Arc::clone(&state.db));
    for &incident_type_id in &incident_type_ids {
        if types.get_by_id(incident_type_id).is_none() {
            warn!(
                "Emergency service {} linked to unknown incident type {}",
                new_service.name, incident_type_id
            );
        }
    }

    let repo = EmergencyServicesRepository::new(Arc::clone(&state.db));
    let service = repo.create_with_links(new_service, &incident_type_ids);

    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn list_service_channels(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> ApiResult<Json<Vec<ContactChannel>>> {
    let id = parse_id(id, SERVICE_NOT_FOUND)?;

    let services = EmergencyServicesRepository::new(Arc::clone(&state.db));
    if !services.exists(id) {
        return Err(service_not_found(id).into());
    }

    let repo = ContactChannelsRepository::new(Arc::clone(&state.db));
    Ok(Json(repo.get_by_service(id)))
}

pub async fn create_contact_channel(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContactChannel>)> {
    let request: CreateContactChannelRequest = parse_body(payload, INVALID_CONTACT_CHANNEL)?;
    let new_channel = request.validate()?;

    let services = EmergencyServicesRepository::new(Arc::clone(&state.db));
    if !services.exists(new_channel.service_id) {
        warn!(
            "Contact channel references unknown emergency service {}",
            new_channel.service_id
        );
    }

    let repo = ContactChannelsRepository::new(Arc::clone(&state.db));
    let channel = repo.create(new_channel);

    Ok((StatusCode::CREATED, Json(channel)))
}

pub async fn link_incident_type(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ServiceIncidentType>)> {
    let request: CreateServiceIncidentTypeRequest = parse_body(payload, INVALID_SERVICE_LINK)?;
    let link = request.validate()?;

    let repo = EmergencyServicesRepository::new(Arc::clone(&state.db));
    if !repo.exists(link.service_id) {
        warn!("Link references unknown emergency service {}", link.service_id);
    }
    let types = IncidentTypesRepository::new(Arc::clone(&state.db));
    if types.get_by_id(link.incident_type_id).is_none() {
        warn!("Link references unknown incident type {}", link.incident_type_id);
    }

    let created = repo.link_incident_type(link);

    Ok((StatusCode::CREATED, Json(created)))
}

fn service_not_found(id: EntityId) -> Error {
    Error::NotFound(format!("{} : {}", SERVICE_NOT_FOUND, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::rest::test_state;
    use serde_json::json;

    #[tokio::test]
    async fn seeded_services_carry_relations() {
        let Json(services) = list_services(State(test_state(true))).await;

        assert_eq!(services.len(), 3);
        assert_eq!(services[0].service.name, "Pompiers");
        assert_eq!(services[0].incident_types, vec!["Incendie"]);
        assert_eq!(services[0].contact_channels, vec!["email", "telegram"]);
        assert_eq!(services[2].contact_channels, vec!["sms"]);
    }

    #[tokio::test]
    async fn create_service_with_incident_types() {
        let state = test_state(true);

        let (status, Json(service)) = create_service(
            State(state.clone()),
            Ok(Json(json!({
                "name": "Sécurité civile",
                "priorityLevel": "medium",
                "incidentTypeIds": [1, 4],
            }))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(service.id, 4);
        assert_eq!(service.status, "active");

        let Json(found) = get_service(State(state), Ok(Path(service.id))).await.unwrap();
        assert_eq!(found.incident_types, vec!["Incendie", "Intrusion"]);
        assert!(found.contact_channels.is_empty());
    }

    #[tokio::test]
    async fn null_incident_type_ids_mean_none() {
        let state = test_state(false);

        let (status, Json(service)) = create_service(
            State(state.clone()),
            Ok(Json(json!({
                "name": "Police municipale",
                "priorityLevel": "moyenne",
                "incidentTypeIds": null,
            }))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let Json(found) = get_service(State(state), Ok(Path(service.id)))
            .await
            .unwrap();
        assert!(found.incident_types.is_empty());
    }

    #[tokio::test]
    async fn invalid_service_is_rejected() {
        let err = create_service(
            State(test_state(false)),
            Ok(Json(json!({"name": "SOS", "priorityLevel": "urgent", "status": "closed"}))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, 400);
        assert_eq!(err.message, INVALID_SERVICE);
        let fields: Vec<&str> = err.errors.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["priorityLevel", "status"]);
    }

    #[tokio::test]
    async fn channel_shows_up_on_its_service() {
        let state = test_state(true);

        let (status, Json(channel)) = create_contact_channel(
            State(state.clone()),
            Ok(Json(json!({
                "serviceId": 3,
                "channelType": "email",
                "contactValue": "samu@example.com",
            }))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(channel.is_active);

        let Json(channels) = list_service_channels(State(state.clone()), Ok(Path(3)))
            .await
            .unwrap();
        let types: Vec<&str> = channels.iter().map(|c| c.channel_type.as_str()).collect();
        assert_eq!(types, vec!["sms", "email"]);

        let Json(service) = get_service(State(state), Ok(Path(3))).await.unwrap();
        assert_eq!(service.contact_channels, vec!["sms", "email"]);
    }

    #[tokio::test]
    async fn channel_for_unknown_service_is_accepted() {
        let (status, Json(channel)) = create_contact_channel(
            State(test_state(false)),
            Ok(Json(json!({
                "serviceId": 12,
                "channelType": "telegram",
                "contactValue": "@Dispatch",
                "isActive": false,
            }))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(channel.service_id, 12);
        assert!(!channel.is_active);
    }

    #[tokio::test]
    async fn invalid_channel_is_rejected() {
        let err = create_contact_channel(
            State(test_state(true)),
            Ok(Json(json!({"serviceId": 1, "channelType": "fax", "contactValue": "1"}))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, 400);
        assert_eq!(err.message, INVALID_CONTACT_CHANNEL);
        assert_eq!(err.errors.len(), 2);
    }

    #[tokio::test]
    async fn link_endpoint_adds_incident_type() {
        let state = test_state(true);

        let (status, Json(link)) = link_incident_type(
            State(state.clone()),
            Ok(Json(json!({"serviceId": 1, "incidentTypeId": 3}))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(link.id, 6);

        let Json(service) = get_service(State(state), Ok(Path(1))).await.unwrap();
        assert_eq!(service.incident_types, vec!["Incendie", "Accident"]);
    }

    #[tokio::test]
    async fn unknown_service_is_not_found() {
        let state = test_state(false);

        let err = get_service(State(state.clone()), Ok(Path(1))).await.unwrap_err();
        assert_eq!(err.status, 404);

        let err = list_service_channels(State(state), Ok(Path(1)))
            .await
            .unwrap_err();
        assert_eq!(err.status, 404);
    }
}
