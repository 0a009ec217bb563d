//! End-to-end tests of the HTTP surface, driven through the router with `oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use booking_wizard::{build_router, config::Config, services::FixedAvailability, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// ===== Helpers =====

fn app_with_taken(taken: &[&str]) -> Router {
    let availability = Arc::new(FixedAvailability::new(taken.iter().copied()));
    let state = AppState::with_availability(Config::default(), availability).unwrap();
    build_router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn new_session(app: &Router, path: &str) -> String {
    let (status, body) = send(app, "POST", path, None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn seat_event(app: &Router, id: &str, event: Value) -> (StatusCode, Value) {
    send(app, "POST", &format!("/api/bookings/{}/events", id), Some(event)).await
}

async fn event_action(app: &Router, id: &str, action: Value) -> (StatusCode, Value) {
    send(app, "POST", &format!("/api/event-bookings/{}/events", id), Some(action)).await
}

// ===== Catalog =====

#[tokio::test]
async fn health_and_catalog() {
    let app = app_with_taken(&[]);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, sections) = send(&app, "GET", "/api/catalog/sections", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = sections
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["PLATINUM", "VIP", "GOLD", "SILVER"]);

    let (status, gold) = send(&app, "GET", "/api/catalog/sections/gold", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gold["price"], 299);

    let (status, body) = send(&app, "GET", "/api/catalog/sections/balcony", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "unknown_offering");

    let (_, packages) = send(&app, "GET", "/api/catalog/packages", None).await;
    assert_eq!(packages["platinum"].as_array().unwrap().len(), 2);
    assert_eq!(packages["performance"].as_array().unwrap().len(), 3);
}

// ===== Seat flow =====

#[tokio::test]
async fn gold_b5_and_b6_total_778() {
    let app = app_with_taken(&[]);
    let id = new_session(&app, "/api/bookings").await;

    let (status, body) = seat_event(&app, &id, json!({"type": "select_section", "section_id": "gold"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], "seats");
    assert_eq!(body["seats"].as_array().unwrap().len(), 100);
    assert_eq!(body["can_checkout"], false);

    seat_event(&app, &id, json!({"type": "toggle_seat", "seat_id": "gold-B5"})).await;
    let (status, body) = seat_event(&app, &id, json!({"type": "toggle_seat", "seat_id": "gold-B6"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected_seats"], json!(["gold-B5", "gold-B6"]));
    assert_eq!(body["total_price"], 778);
    assert_eq!(body["can_checkout"], true);

    let (status, body) = seat_event(&app, &id, json!({"type": "checkout"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], "payment");
    assert_eq!(body["receipt"]["total_price"], 778);
    assert_eq!(body["receipt"]["flow"], "seats");
    assert!(body["submitted_at"].is_string());

    let (_, body) = seat_event(&app, &id, json!({"type": "back"})).await;
    assert_eq!(body["current_step"], "section");
    assert!(body["selected_offering"].is_null());
}

#[tokio::test]
async fn rejected_events_leave_session_untouched() {
    let app = app_with_taken(&["gold-A1"]);
    let id = new_session(&app, "/api/bookings").await;

    let (status, body) = seat_event(&app, &id, json!({"type": "back"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_at_start");

    seat_event(&app, &id, json!({"type": "select_section", "section_id": "gold"})).await;

    let (status, body) = seat_event(&app, &id, json!({"type": "checkout"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_seats_selected");

    let (status, body) = seat_event(&app, &id, json!({"type": "toggle_seat", "seat_id": "gold-A1"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "seat_taken");
    assert_eq!(body["detail"], "gold-A1");

    let (status, body) = send(&app, "GET", &format!("/api/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], "seats");
    assert_eq!(body["selected_seats"], json!([]));
    let a1 = body["seats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "gold-A1")
        .cloned()
        .unwrap();
    assert_eq!(a1["status"], "taken");
}

#[tokio::test]
async fn unknown_and_deleted_sessions() {
    let app = app_with_taken(&[]);
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, "GET", &format!("/api/bookings/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");

    let id = new_session(&app, "/api/bookings").await;
    let (status, _) = send(&app, "DELETE", &format!("/api/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ===== Event package flow =====

#[tokio::test]
async fn djing_set_skips_performance() {
    let app = app_with_taken(&[]);
    let id = new_session(&app, "/api/event-bookings").await;

    let (_, body) = event_action(&app, &id, json!({"type": "open_platinum"})).await;
    assert_eq!(body["current_step"], "platinum");
    assert_eq!(body["options"].as_array().unwrap().len(), 2);

    let (status, body) = event_action(&app, &id, json!({"type": "choose_option", "option_id": "djing"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], "details");
    assert_eq!(body["selected_offering"]["name"], "DJING SET");
}

#[tokio::test]
async fn live_performance_then_full_form_submits() {
    let app = app_with_taken(&[]);
    let id = new_session(&app, "/api/event-bookings").await;

    event_action(&app, &id, json!({"type": "open_platinum"})).await;
    let (_, body) = event_action(&app, &id, json!({"type": "choose_option", "option_id": "live"})).await;
    assert_eq!(body["current_step"], "performance");
    let options: Vec<_> = body["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(options, vec!["solo", "threepiece", "fivepiece"]);

    let (_, body) = event_action(&app, &id, json!({"type": "choose_performance", "option_id": "threepiece"})).await;
    assert_eq!(body["current_step"], "details");
    assert_eq!(body["missing_fields"].as_array().unwrap().len(), 7);

    let (status, body) = event_action(&app, &id, json!({"type": "submit"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "incomplete_form");

    let fields = [
        ("eventName", "Album launch"),
        ("eventDate", "2026-12-05"),
        ("venue", "Harbour Hall"),
        ("expectedAttendance", "800"),
        ("contactName", "Ada Obi"),
        ("contactEmail", "ada@example.com"),
        ("contactPhone", "+234 800 000 0000"),
    ];
    for (field, value) in fields {
        let (status, _) = event_action(&app, &id, json!({"type": "update_field", "field": field, "value": value})).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = event_action(&app, &id, json!({"type": "submit"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], "payment");
    assert_eq!(body["receipt"]["offering_id"], "threepiece");
    assert_eq!(body["receipt"]["total_price"], 20000);
    assert_eq!(body["receipt"]["details"]["venue"], "Harbour Hall");

    let (_, body) = event_action(&app, &id, json!({"type": "back"})).await;
    assert_eq!(body["current_step"], "initial");
    assert!(body["selected_offering"].is_null());
}

#[tokio::test]
async fn malformed_event_is_rejected_by_extractor() {
    let app = app_with_taken(&[]);
    let id = new_session(&app, "/api/bookings").await;

    let (status, body) = seat_event(&app, &id, json!({"type": "teleport"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_request");
    assert!(body["message"].as_str().unwrap().starts_with("malformed request"));

    let event_id = new_session(&app, "/api/event-bookings").await;
    let (status, body) = event_action(&app, &event_id, json!({"type": "choose_option"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_request");

    // body without a JSON content type
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/bookings/{}/events", id))
        .body(Body::from(r#"{"type":"checkout"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "malformed_request");
}

#[tokio::test]
async fn bad_session_id_gets_json_error() {
    let app = app_with_taken(&[]);

    for path in ["/api/bookings/not-a-uuid", "/api/event-bookings/42"] {
        let (status, body) = send(&app, "GET", path, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(body["error"], "malformed_request");
    }

    let (status, body) = seat_event(&app, "nope", json!({"type": "checkout"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_request");
}
