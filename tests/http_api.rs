//! HTTP API driven through the router without binding a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use lecture_dash::config::ServerConfig;
use lecture_dash::routes::build_router;
use lecture_dash::state::AppState;

fn app() -> Router {
  build_router(Arc::new(AppState::new(ServerConfig::default())))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(b) => builder
      .header("content-type", "application/json")
      .body(Body::from(b.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };
  let res = app.clone().oneshot(req).await.unwrap();
  let status = res.status();
  let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  (status, value)
}

#[tokio::test]
async fn health_is_ok() {
  let (status, body) = call(&app(), "GET", "/api/v1/health", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn difficulties_table_is_static() {
  let (status, body) = call(&app(), "GET", "/api/v1/difficulties", None).await;
  assert_eq!(status, StatusCode::OK);
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0]["id"], "easy");
  assert_eq!(rows[0]["totalQuestions"], 8);
  assert_eq!(rows[2]["startMinutes"], 510);
}

#[tokio::test]
async fn clock_endpoint_renders_both_forms() {
  let (status, body) = call(&app(), "GET", "/api/v1/clock?minutes=525", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["clock"], "8:45");
  assert_eq!(body["clockZh"], "差一刻九点");
}

#[tokio::test]
async fn question_count_is_clamped() {
  let app = app();
  let (_, body) = call(&app, "GET", "/api/v1/questions?count=3", None).await;
  assert_eq!(body["questions"].as_array().unwrap().len(), 3);
  let (_, body) = call(&app, "GET", "/api/v1/questions?count=500", None).await;
  assert_eq!(body["questions"].as_array().unwrap().len(), 50);
  let (_, body) = call(&app, "GET", "/api/v1/questions", None).await;
  assert_eq!(body["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn unknown_session_is_404() {
  let (status, body) = call(&app(), "POST", "/api/v1/sessions/nope/advance", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn session_round_trip() {
  let app = app();
  let (status, created) = call(&app, "POST", "/api/v1/sessions", None).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["screen"], "title");
  let id = created["id"].as_str().unwrap().to_string();

  let (status, view) = call(&app, "POST", &format!("/api/v1/sessions/{id}/start"), Some(json!({ "difficulty": "hard" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(view["screen"], "playing");
  assert_eq!(view["totalQuestions"], 15);
  assert_eq!(view["clock"], "8:30");
  assert_eq!(view["question"]["answers"].as_array().unwrap().len(), 4);
  assert!(view["question"].get("correctAnswers").is_none());

  let (status, out) = call(&app, "POST", &format!("/api/v1/sessions/{id}/answer"), Some(json!({ "answer": "not an option" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(out["isCorrect"], false);
  assert!(out["obstacle"].is_object());
  assert!(!out["correctAnswers"].as_array().unwrap().is_empty());
  assert_eq!(out["session"]["currentMinutes"], 515);
  assert_eq!(out["session"]["awaitingAdvance"], true);

  let (status, _) = call(&app, "POST", &format!("/api/v1/sessions/{id}/answer"), Some(json!({ "answer": "again" }))).await;
  assert_eq!(status, StatusCode::CONFLICT);

  let (status, view) = call(&app, "POST", &format!("/api/v1/sessions/{id}/advance"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(view["questionIndex"], 1);

  let (status, missed) = call(&app, "GET", &format!("/api/v1/sessions/{id}/missed"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(missed["vocabulary"].is_array());

  let (status, _) = call(&app, "POST", &format!("/api/v1/sessions/{id}/restart"), None).await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn pinyin_endpoint_reads_hanzi() {
  let (status, body) = call(&app(), "POST", "/api/v1/pinyin", Some(json!({ "text": "上课" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["pinyin"], "shàng kè");
}

#[tokio::test]
async fn deleting_a_session_frees_it() {
  let state = Arc::new(AppState::new(ServerConfig::default()));
  let app = build_router(state.clone());
  let mut ids = Vec::new();
  for _ in 0..20 {
    let (_, created) = call(&app, "POST", "/api/v1/sessions", None).await;
    ids.push(created["id"].as_str().unwrap().to_string());
  }
  assert_eq!(state.session_count().await, 20);

  for id in &ids {
    let (status, body) = call(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
  }
  assert_eq!(state.session_count().await, 0);

  let (status, _) = call(&app, "DELETE", &format!("/api/v1/sessions/{}", ids[0]), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = call(&app, "GET", &format!("/api/v1/sessions/{}", ids[0]), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
