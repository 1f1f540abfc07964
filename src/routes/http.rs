//! HTTP endpoint handlers. These are thin wrappers that forward to session
//! commands. Each handler is instrumented and logs its parameters and basic
//! result info.

use std::sync::Arc;
use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};

use crate::domain::Difficulty;
use crate::logic::{self, ApiError};
use crate::protocol::*;
use crate::rules::{format_clock, format_clock_in_chinese};
use crate::state::AppState;

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::UnknownSession(_) => StatusCode::NOT_FOUND,
      ApiError::Game(_) => StatusCode::CONFLICT,
    };
    warn!(target: "lecture_dash", %status, error = %self, "Request rejected");
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_get_difficulties() -> impl IntoResponse {
  let out: Vec<DifficultyOut> = Difficulty::ALL
    .iter()
    .map(|d| DifficultyOut { id: *d, settings: d.settings().clone() })
    .collect();
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_questions(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionsQuery>,
) -> impl IntoResponse {
  let questions = logic::sample_questions(&state, q.count);
  info!(target: "lecture_dash", count = questions.len(), "HTTP question set served");
  Json(QuestionsOut { questions })
}

#[instrument(level = "info")]
pub async fn http_get_clock(Query(q): Query<ClockQuery>) -> impl IntoResponse {
  Json(ClockOut { clock: format_clock(q.minutes), clock_zh: format_clock_in_chinese(q.minutes) })
}

#[instrument(level = "info", skip(body), fields(text_len = body.text.len()))]
pub async fn http_post_pinyin(Json(body): Json<PinyinIn>) -> impl IntoResponse {
  let pinyin = logic::do_pinyin(&body.text);
  Json(PinyinOut { pinyin })
}

#[instrument(level = "info", skip(state))]
pub async fn http_create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let view = logic::create_session(&state).await;
  (StatusCode::CREATED, Json(view))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, ApiError> {
  Ok(Json(logic::get_session(&state, &id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  logic::delete_session(&state, &id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body), fields(difficulty = ?body.difficulty))]
pub async fn http_start_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<StartIn>,
) -> Result<Json<SessionOut>, ApiError> {
  let view = logic::start_session(&state, &id, body.difficulty).await?;
  info!(target: "game", %id, total = view.total_questions, "HTTP game started");
  Ok(Json(view))
}

#[instrument(level = "info", skip(state, body), fields(answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, ApiError> {
  let out = logic::submit_answer(&state, &id, &body.answer).await?;
  info!(target: "game", %id, correct = out.is_correct, gained = out.score_gained, screen = %out.screen, "HTTP answer evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_advance(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, ApiError> {
  Ok(Json(logic::advance(&state, &id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_restart(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, ApiError> {
  Ok(Json(logic::restart(&state, &id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_missed(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<MissedOut>, ApiError> {
  let vocabulary = logic::missed_vocabulary(&state, &id).await?;
  Ok(Json(MissedOut { vocabulary }))
}
