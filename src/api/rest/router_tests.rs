use super::camera_controller::{CAMERA_NOT_FOUND, INVALID_CAMERA};
use super::emergency_service_controller::SERVICE_NOT_FOUND;
use super::incident_controller::INCIDENT_NOT_FOUND;
use super::*;
use axum::body::Body;
use axum::http::{header, Method, Request};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn seeded_app() -> Router {
    create_router(test_state(true))
}

#[tokio::test]
async fn read_routes_resolve() {
    let app = seeded_app();

    for (uri, expected_len) in [
        ("/api/cameras", Some(4)),
        ("/api/cameras/1", None),
        ("/api/incidents", Some(3)),
        ("/api/incidents/recent", Some(3)),
        ("/api/incidents/1", None),
        ("/api/incident-types", Some(5)),
        ("/api/emergency-services", Some(3)),
        ("/api/emergency-services/1", None),
        ("/api/emergency-services/1/contact-channels", Some(2)),
        ("/api/alerts", Some(0)),
        ("/api/system-status", Some(3)),
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);

        match expected_len {
            Some(len) => assert_eq!(body.as_array().map(Vec::len), Some(len), "{}", uri),
            None => assert!(body.is_object(), "{}", uri),
        }
    }
}

#[tokio::test]
async fn write_routes_resolve() {
    let app = seeded_app();

    for (uri, body, expected) in [
        (
            "/api/cameras",
            json!({"name": "Caméra Quai", "location": "48.85,2.36", "streamUrl": "rtsp://example.com/s5"}),
            StatusCode::CREATED,
        ),
        (
            "/api/incidents",
            json!({"typeId": 4, "cameraId": 2, "location": "48.8584,2.3548"}),
            StatusCode::CREATED,
        ),
        (
            "/api/incident-types",
            json!({"name": "Vandalisme", "severity": "low"}),
            StatusCode::CREATED,
        ),
        (
            "/api/emergency-services",
            json!({"name": "Gendarmerie", "priorityLevel": "haute", "incidentTypeIds": [2]}),
            StatusCode::CREATED,
        ),
        (
            "/api/service-incident-types",
            json!({"serviceId": 1, "incidentTypeId": 5}),
            StatusCode::CREATED,
        ),
        (
            "/api/contact-channels",
            json!({"serviceId": 1, "channelType": "sms", "contactValue": "+33100000000"}),
            StatusCode::CREATED,
        ),
        (
            "/api/system-status",
            json!({"serviceName": "Détection IA", "status": "degraded"}),
            StatusCode::OK,
        ),
    ] {
        let (status, created) = post(&app, uri, body).await;
        assert_eq!(status, expected, "{}", uri);
        assert!(created["id"].is_i64(), "{}", uri);
    }

    let (_, statuses) = get(&app, "/api/system-status").await;
    assert_eq!(statuses.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn recent_is_not_read_as_an_id() {
    let app = seeded_app();

    let (status, body) = get(&app, "/api/incidents/recent").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["type"], "Incendie");
    assert_eq!(body[0]["severity"], "critique");
}

#[tokio::test]
async fn unknown_ids_are_french_not_found() {
    let app = seeded_app();

    let (status, body) = get(&app, "/api/cameras/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"message": format!("{} : 99", CAMERA_NOT_FOUND), "status": 404})
    );

    for (uri, message) in [
        ("/api/cameras/abc", CAMERA_NOT_FOUND),
        ("/api/cameras/99999999999", CAMERA_NOT_FOUND),
        ("/api/incidents/-x", INCIDENT_NOT_FOUND),
        ("/api/emergency-services/abc", SERVICE_NOT_FOUND),
        ("/api/emergency-services/abc/contact-channels", SERVICE_NOT_FOUND),
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, json!({"message": message, "status": 404}), "{}", uri);
    }
}

#[tokio::test]
async fn malformed_bodies_get_the_entity_message() {
    let app = seeded_app();

    let bad_json = Request::builder()
        .method(Method::POST)
        .uri("/api/cameras")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = send(&app, bad_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": INVALID_CAMERA, "status": 400}));

    let no_content_type = Request::builder()
        .method(Method::POST)
        .uri("/api/cameras")
        .body(Body::from(json!({"name": "Caméra"}).to_string()))
        .unwrap();
    let (status, body) = send(&app, no_content_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": INVALID_CAMERA, "status": 400}));

    let (_, cameras) = get(&app, "/api/cameras").await;
    assert_eq!(cameras.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn rule_violations_list_fields() {
    let app = seeded_app();

    let (status, body) = post(
        &app,
        "/api/cameras",
        json!({"name": "AB", "location": "48.85,2.36", "streamUrl": "rtsp://example.com/s"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_CAMERA);
    assert_eq!(
        body["errors"],
        json!([{"field": "name", "message": validation::NAME_TOO_SHORT}])
    );
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let api = RestApi::new(&ApiConfig::default(), test_state(false));
    let app = api.app();

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/cameras")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(preflight).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "3600");

    let request = Request::builder()
        .uri("/api/cameras")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn dashboard_files_are_served_behind_the_api() {
    let dir = std::env::temp_dir().join(format!("guardian-dashboard-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Guardian</h1>").unwrap();

    let config = ApiConfig {
        static_dir: Some(dir.clone()),
        ..ApiConfig::default()
    };
    let app = RestApi::new(&config, test_state(true)).app();

    let request = Request::builder()
        .uri("/index.html")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Guardian</h1>");

    let (status, cameras) = get(&app, "/api/cameras").await;
    assert_eq!(status, StatusCode::OK);
    assert!(cameras.is_array());

    std::fs::remove_dir_all(&dir).unwrap();
}
