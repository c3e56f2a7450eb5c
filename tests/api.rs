use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use health_tracker::{router, AppState, HealthStore, MemoryBackend};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const DAY: &str = "2026-01-05";

async fn app_with(backend: Arc<MemoryBackend>) -> Router {
    let store = HealthStore::load(backend).await;
    router(AppState::new(store))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn full_day_reaches_goal() {
    let app = app_with(Arc::new(MemoryBackend::default())).await;

    for id in ["neck_mobility_all", "neck_overstretch", "double_chin_exercise", "serving_exercise", "heat_pad"] {
        let (status, _) = send_json(
            &app,
            Method::PUT,
            &format!("/api/exercises/{DAY}/{id}"),
            Some(json!({ "done": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // click the top cube of every level to fill it
    for (level, max) in [("drinks", 6), ("veg_fruit", 5), ("carbs", 4), ("milk_meat", 4), ("fats", 2), ("extras", 1)] {
        let (status, _) = send_json(
            &app,
            Method::POST,
            &format!("/api/nutrition/{DAY}/{level}"),
            Some(json!({ "cube": max - 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    for exercise in ["Squat", "Row"] {
        let (status, _) = send_json(
            &app,
            Method::POST,
            &format!("/api/sport/{DAY}/strength"),
            Some(json!({ "exercise": exercise, "weight": "40", "reps": 10, "sets": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, goals) = send_json(&app, Method::GET, &format!("/api/goals/{DAY}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goals["exercises_percent"], 83);
    assert_eq!(goals["nutrition_percent"], 100);
    assert_eq!(goals["sport_percent"], 100);
    assert_eq!(goals["overall_percent"], 94);
    assert_eq!(goals["sport_based_on"], "strength");
    assert_eq!(goals["goal_reached"], true);
}

#[tokio::test]
async fn invalid_input_is_rejected_without_mutation() {
    let backend = Arc::new(MemoryBackend::default());
    let app = app_with(backend.clone()).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/sport/{DAY}/running"),
        Some(json!({ "distance": "-3" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/sport/{DAY}/strength"),
        Some(json!({ "exercise": "Squat", "reps": 0, "sets": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8_lossy(&body).contains("required"));

    let (status, _) = send(&app, Method::GET, "/api/sport/not-a-date", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/exercises/{DAY}/cartwheel"),
        Some(json!({ "done": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, sport) = send_json(&app, Method::GET, &format!("/api/sport/{DAY}"), None).await;
    assert_eq!(sport["running_km"], Value::Null);
    assert_eq!(sport["strength"], json!([]));
    assert!(backend.contents().is_none());
}

#[tokio::test]
async fn destructive_actions_need_confirmation() {
    let app = app_with(Arc::new(MemoryBackend::default())).await;

    send(
        &app,
        Method::POST,
        &format!("/api/sport/{DAY}/strength"),
        Some(json!({ "exercise": "Squat", "reps": 5, "sets": 5 })),
    )
    .await;
    send(
        &app,
        Method::PUT,
        &format!("/api/exercises/{DAY}/heat_pad"),
        Some(json!({ "done": true })),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/sport/{DAY}/strength/0"), None).await;
    assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
    let (status, _) = send(&app, Method::POST, &format!("/api/exercises/{DAY}/reset"), None).await;
    assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);

    let (status, sport) = send_json(
        &app,
        Method::DELETE,
        &format!("/api/sport/{DAY}/strength/0?confirm=true"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sport["strength"], json!([]));

    let (status, exercises) = send_json(
        &app,
        Method::POST,
        &format!("/api/exercises/{DAY}/reset?confirm=true"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exercises["done_count"], 0);
    assert_eq!(exercises["items"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn export_import_round_trip() {
    let stored = json!({
        "exercises": { DAY: { "heat_pad": true } },
        "sport": {
            "running": { DAY: 4.5 },
            "strength": { DAY: [{ "exercise": "Squat", "weight": null, "reps": 8, "sets": 3 }] }
        },
        "nutrition": { DAY: { "drinks": 3 } }
    });
    let backend = Arc::new(MemoryBackend::with_payload(stored.to_string()));
    let app = app_with(backend.clone()).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/export").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"health-data-"));
    let exported = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let exported: Value = serde_json::from_slice(&exported).unwrap();
    assert_eq!(exported, stored);

    // import into a fresh app and compare documents
    let other = Arc::new(MemoryBackend::default());
    let other_app = app_with(other.clone()).await;
    let (status, result) = send_json(&other_app, Method::POST, "/api/import", Some(exported.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["imported_days"], 1);

    let saved: Value = serde_json::from_slice(&other.contents().unwrap()).unwrap();
    assert_eq!(saved, exported);
}

#[tokio::test]
async fn invalid_import_leaves_data_untouched() {
    let stored = json!({ "exercises": {}, "sport": { "running": { DAY: 2.0 } }, "nutrition": {} });
    let app = app_with(Arc::new(MemoryBackend::with_payload(stored.to_string()))).await;

    let (status, _) = send(&app, Method::POST, "/api/import", Some(json!({ "exercises": {} }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::POST, "/api/import", Some(json!([1, 2, 3]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, sport) = send_json(&app, Method::GET, &format!("/api/sport/{DAY}"), None).await;
    assert_eq!(sport["running_km"], 2.0);
}

#[tokio::test]
async fn failed_writes_keep_session_state() {
    let app = app_with(Arc::new(MemoryBackend::read_only(None))).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/sport/{DAY}/running"),
        Some(json!({ "distance": "6" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, goals) = send_json(&app, Method::GET, &format!("/api/goals/{DAY}"), None).await;
    assert_eq!(goals["sport_met"], true);
}

#[tokio::test]
async fn timers_start_and_reset() {
    let app = app_with(Arc::new(MemoryBackend::default())).await;

    let (status, timers) = send_json(&app, Method::POST, "/api/timers/ice/start", None).await;
    assert_eq!(status, StatusCode::OK);
    let ice = timers["timers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|timer| timer["id"] == "ice")
        .unwrap();
    assert_eq!(ice["phase"], "running");

    let (_, timers) = send_json(&app, Method::POST, "/api/timers/ice/reset", None).await;
    let ice = timers["timers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|timer| timer["id"] == "ice")
        .unwrap();
    assert_eq!(ice["phase"], "idle");
    assert_eq!(ice["display"], "1:10");

    let (status, _) = send(&app, Method::POST, "/api/timers/sauna/start", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::POST, "/api/timers/ice/explode", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn index_page_renders() {
    let app = app_with(Arc::new(MemoryBackend::default())).await;
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Daily Health Tracker"));
    assert!(html.contains("0 / 7"));
}

#[tokio::test]
async fn strength_form_fields_are_read_loosely() {
    let app = app_with(Arc::new(MemoryBackend::default())).await;
    let uri = format!("/api/sport/{DAY}/strength");

    let (status, sport) = send_json(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "exercise": "Squat", "weight": 40, "reps": "8", "sets": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sport["strength"][0]["reps"], 8);
    assert_eq!(sport["strength"][0]["weight"], 40.0);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "exercise": "Squat", "reps": "lots", "sets": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8_lossy(&body).contains("required"));
}

#[tokio::test]
async fn markup_in_exercise_names_stays_out_of_the_page() {
    let app = app_with(Arc::new(MemoryBackend::default())).await;
    let name = "<img src=x onerror=alert(1)>";

    let (status, sport) = send_json(
        &app,
        Method::POST,
        "/api/sport/today/strength",
        Some(json!({ "exercise": name, "reps": 5, "sets": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sport["strength"][0]["exercise"], name);

    let (_, body) = send(&app, Method::GET, "/", None).await;
    let html = String::from_utf8(body).unwrap();
    assert!(!html.contains(name));
    assert!(!html.contains("innerHTML"));
}
