use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use work_timer::{
    api::create_router,
    settings::{MemoryStore, SettingsStore},
    state::AppState,
    tasks::TimerDriver,
};

fn app(pairs: &[(&'static str, &'static str)]) -> Router {
    let store: Box<dyn SettingsStore> = Box::new(MemoryStore::with_values(pairs.iter().copied()));
    let (driver, commands, snapshots) = TimerDriver::new(store).unwrap();
    tokio::spawn(driver.run());

    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), commands, snapshots));
    create_router(state)
}

async fn request(app: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health() {
    let app = app(&[]);
    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_pause_reset_cycle() {
    let app = app(&[("Autostart", "false"), ("Minutes", "10")]);

    let (_, body) = request(&app, "GET", "/status", None).await;
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["frame"]["text"], "00:10:00");
    assert_eq!(body["timer"]["frame"]["background"], "000000");

    let (status, body) = request(&app, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["timer"]["active_activities"], json!(["countdown"]));

    let (_, body) = request(&app, "POST", "/pause", None).await;
    assert_eq!(body["timer"]["phase"], "paused");
    assert_eq!(body["timer"]["active_activities"], json!(["pause_blink"]));
    assert_eq!(body["timer"]["frame"]["background"], "ff0000");

    let (_, body) = request(&app, "POST", "/reset", None).await;
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["remaining_seconds"], 600);
    assert_eq!(body["timer"]["active_activities"], json!([]));

    let (_, body) = request(&app, "GET", "/status", None).await;
    assert_eq!(body["last_action"], "reset");
}

#[tokio::test]
async fn settings_round_trip_through_the_form() {
    let app = app(&[("Autostart", "false")]);

    let (status, body) = request(&app, "GET", "/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settings"]["Minutes"], "25");
    assert_eq!(body["settings"]["Message"], "Take a break!");

    let (status, body) = request(
        &app,
        "POST",
        "/settings",
        Some(json!({"action": "commit", "values": {"Minutes": 5, "Colour": "#00FF00"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Settings committed");
    assert_eq!(body["timer"]["frame"]["text_color"], "00ff00");
    assert_eq!(body["timer"]["remaining_seconds"], 1500);

    let (_, body) = request(&app, "GET", "/settings", None).await;
    assert_eq!(body["settings"]["Minutes"], "5");
    assert_eq!(body["settings"]["Colour"], "00ff00");
}

#[tokio::test]
async fn invalid_minutes_are_rejected_at_commit() {
    let app = app(&[("Autostart", "false")]);

    let (status, body) = request(
        &app,
        "POST",
        "/settings",
        Some(json!({"action": "commit", "values": {"Minutes": "soon", "Message": "x"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (_, body) = request(&app, "GET", "/settings", None).await;
    assert_eq!(body["settings"]["Minutes"], "25");
    assert_eq!(body["settings"]["Message"], "Take a break!");
}

#[tokio::test]
async fn cancelled_settings_write_nothing() {
    let app = app(&[("Autostart", "false")]);

    let (status, body) = request(
        &app,
        "POST",
        "/settings",
        Some(json!({"action": "cancel", "values": {"Message": "ignored"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Settings unchanged");

    let (_, body) = request(&app, "GET", "/settings", None).await;
    assert_eq!(body["settings"]["Message"], "Take a break!");
}
