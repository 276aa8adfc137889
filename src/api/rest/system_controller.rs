use crate::api::rest::validation::{parse_body, Validator};
use crate::api::rest::{ApiResult, AppState};
use crate::db::models::{Alert, Metrics, NewSystemStatus, SystemStatus};
use crate::db::repositories::{AlertsRepository, SystemStatusRepository};
use crate::error::Error;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const INVALID_SYSTEM_STATUS: &str = "Données de statut système invalides";

/// Heartbeat posted by a component of the platform
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSystemStatusRequest {
    pub service_name: Option<String>,
    pub status: Option<String>,
    pub metrics: Option<Metrics>,
}

impl UpdateSystemStatusRequest {
    pub fn validate(self) -> Result<NewSystemStatus, Error> {
        let mut v = Validator::new();

        let service_name = v.required("serviceName", self.service_name);
        let status = v.required("status", self.status);

        v.finish(
            INVALID_SYSTEM_STATUS,
            NewSystemStatus {
                service_name,
                status,
                metrics: self.metrics,
            },
        )
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/system-status",
            get(list_system_status).post(update_system_status),
        )
        .route("/api/alerts", get(list_alerts))
}

pub async fn list_system_status(State(state): State<AppState>) -> Json<Vec<SystemStatus>> {
    let repo = SystemStatusRepository::new(Arc::clone(&state.db));
    Json(repo.get_all())
}

pub async fn update_system_status(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SystemStatus>> {
    let request: UpdateSystemStatusRequest = parse_body(payload, INVALID_SYSTEM_STATUS)?;
    let new_status = request.validate()?;

    let repo = SystemStatusRepository::new(Arc::clone(&state.db));
    Ok(Json(repo.upsert(new_status)))
}

pub async fn list_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    let repo = AlertsRepository::new(Arc::clone(&state.db));
    Json(repo.get_all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::rest::test_state;
    use crate::db::models::NewAlert;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn seeded_statuses_are_listed() {
        let Json(statuses) = list_system_status(State(test_state(true))).await;

        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses[0].service_name, "Détection IA");
        assert!(statuses.iter().all(|s| s.metrics.is_some()));
    }

    #[tokio::test]
    async fn repeated_updates_keep_one_record() {
        let state = test_state(false);

        let Json(first) = update_system_status(
            State(state.clone()),
            Ok(Json(json!({
                "serviceName": "Détection IA",
                "status": "active",
                "metrics": {"cpuUsage": 40},
            }))),
        )
        .await
        .unwrap();

        let Json(second) = update_system_status(
            State(state.clone()),
            Ok(Json(json!({"serviceName": "Détection IA", "status": "degraded"}))),
        )
        .await
        .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.status, "degraded");
        assert_eq!(second.metrics, first.metrics);

        let Json(statuses) = list_system_status(State(state)).await;
        assert_eq!(statuses, vec![second]);
    }

    #[tokio::test]
    async fn status_update_requires_name_and_status() {
        let err = update_system_status(
            State(test_state(false)),
            Ok(Json(json!({"serviceName": "  ", "metrics": {}}))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, 400);
        assert_eq!(err.message, INVALID_SYSTEM_STATUS);
        let fields: Vec<&str> = err.errors.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["serviceName", "status"]);
    }

    #[tokio::test]
    async fn metrics_must_be_an_object() {
        let err = update_system_status(
            State(test_state(false)),
            Ok(Json(json!({"serviceName": "Caméras", "status": "active", "metrics": [1, 2]}))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, 400);
        assert!(err.errors.is_empty());
    }

    #[tokio::test]
    async fn alerts_are_listed() {
        let state = test_state(true);
        let Json(alerts) = list_alerts(State(state.clone())).await;
        assert!(alerts.is_empty());

        let alert = AlertsRepository::new(Arc::clone(&state.db)).create(NewAlert {
            incident_id: 1,
            service_id: 1,
            channel_id: 1,
            timestamp: Utc::now(),
            status: "sent".to_string(),
            details: None,
        });

        let Json(alerts) = list_alerts(State(state)).await;
        assert_eq!(alerts, vec![alert]);
    }
}
