//! Session commands shared by both HTTP and WebSocket handlers.
//!
//! Each command looks a session up by id, runs one state-machine command under
//! the write lock and renders the resulting view. Feedback messages and
//! obstacles are picked here; the core stays free of presentation.

use std::time::Instant;

use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use crate::domain::{Difficulty, Question, VocabularyEntry};
use crate::error::GameError;
use crate::game::GameSession;
use crate::pinyin::reading;
use crate::protocol::{session_out, AnswerOut, SessionOut};
use crate::questions::generate_questions;
use crate::seeds::{Obstacle, CORRECT_MESSAGES, OBSTACLES, WRONG_MESSAGES};
use crate::state::AppState;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ApiError {
  #[error("unknown session: {0}")]
  UnknownSession(String),
  #[error(transparent)]
  Game(#[from] GameError),
}

/// Runs `f` on the session under the write lock.
async fn with_session<T>(
  state: &AppState,
  id: &str,
  f: impl FnOnce(&mut GameSession) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
  let mut sessions = state.sessions.write().await;
  let session = sessions.get_mut(id).ok_or_else(|| ApiError::UnknownSession(id.to_string()))?;
  f(session)
}

pub async fn get_session(state: &AppState, id: &str) -> Result<SessionOut, ApiError> {
  let sessions = state.sessions.read().await;
  let session = sessions.get(id).ok_or_else(|| ApiError::UnknownSession(id.to_string()))?;
  Ok(session_out(id, session))
}

#[instrument(level = "info", skip(state))]
pub async fn create_session(state: &AppState) -> SessionOut {
  let id = state.create_session().await;
  info!(target: "lecture_dash", %id, "Session created");
  let sessions = state.sessions.read().await;
  match sessions.get(&id) {
    Some(s) => session_out(&id, s),
    None => session_out(&id, &GameSession::default()),
  }
}

#[instrument(level = "info", skip(state), fields(%id, ?difficulty))]
pub async fn start_session(state: &AppState, id: &str, difficulty: Difficulty) -> Result<SessionOut, ApiError> {
  with_session(state, id, |s| {
    let mut rng = rand::thread_rng();
    s.start(difficulty, &mut rng, Instant::now())?;
    Ok(session_out(id, s))
  })
  .await
}

#[instrument(level = "info", skip(state, answer), fields(%id, answer_len = answer.len()))]
pub async fn submit_answer(state: &AppState, id: &str, answer: &str) -> Result<AnswerOut, ApiError> {
  with_session(state, id, |s| {
    let correct_answers = s
      .current_question()
      .map(|q| q.correct_answers.clone())
      .unwrap_or_default();
    let outcome = s.submit_answer(answer, Instant::now())?;
    let (message, obstacle) = feedback(outcome.is_correct);
    debug!(target: "lecture_dash", %id, is_correct = outcome.is_correct, feedback = message, "Feedback picked");
    Ok(AnswerOut::new(outcome, message, obstacle, correct_answers, session_out(id, s)))
  })
  .await
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn advance(state: &AppState, id: &str) -> Result<SessionOut, ApiError> {
  with_session(state, id, |s| {
    s.advance(Instant::now());
    Ok(session_out(id, s))
  })
  .await
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn restart(state: &AppState, id: &str) -> Result<SessionOut, ApiError> {
  with_session(state, id, |s| {
    s.restart()?;
    Ok(session_out(id, s))
  })
  .await
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn delete_session(state: &AppState, id: &str) -> Result<(), ApiError> {
  if state.remove_session(id).await {
    Ok(())
  } else {
    Err(ApiError::UnknownSession(id.to_string()))
  }
}

pub async fn missed_vocabulary(state: &AppState, id: &str) -> Result<Vec<VocabularyEntry>, ApiError> {
  let sessions = state.sessions.read().await;
  let session = sessions.get(id).ok_or_else(|| ApiError::UnknownSession(id.to_string()))?;
  Ok(session.missed_vocabulary().into_iter().copied().collect())
}

/// Stand-alone question set, clamped to `1..=max_question_count`.
pub fn sample_questions(state: &AppState, count: Option<usize>) -> Vec<Question> {
  let count = count.unwrap_or(10).clamp(1, state.config.max_question_count.max(1));
  generate_questions(&mut rand::thread_rng(), count)
}

pub fn do_pinyin(text: &str) -> String {
  let p = reading(text);
  debug!(target: "lecture_dash", text, p, "pinyin reading");
  p
}

/// One encouragement line, plus an obstacle for wrong answers.
fn feedback(is_correct: bool) -> (&'static str, Option<Obstacle>) {
  let mut rng = rand::thread_rng();
  if is_correct {
    (CORRECT_MESSAGES.choose(&mut rng).copied().unwrap_or(CORRECT_MESSAGES[0]), None)
  } else {
    let message = WRONG_MESSAGES.choose(&mut rng).copied().unwrap_or(WRONG_MESSAGES[0]);
    (message, OBSTACLES.choose(&mut rng).copied())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ServerConfig;
  use crate::domain::Screen;

  #[tokio::test]
  async fn unknown_session_is_reported() {
    let state = AppState::new(ServerConfig::default());
    let err = advance(&state, "missing").await.unwrap_err();
    assert_eq!(err, ApiError::UnknownSession("missing".into()));
  }

  #[tokio::test]
  async fn full_command_cycle_on_one_session() {
    let state = AppState::new(ServerConfig::default());
    let view = create_session(&state).await;
    assert_eq!(view.screen, Screen::Title);

    let view = start_session(&state, &view.id, Difficulty::Easy).await.unwrap();
    assert_eq!(view.screen, Screen::Playing);
    assert!(view.question.is_some());

    let out = submit_answer(&state, &view.id, "definitely wrong").await.unwrap();
    assert!(!out.is_correct);
    assert!(out.obstacle.is_some());
    assert!(WRONG_MESSAGES.contains(&out.message));
    assert!(!out.correct_answers.is_empty());

    let again = submit_answer(&state, &view.id, "x").await.unwrap_err();
    assert_eq!(again, ApiError::Game(GameError::AnswerPending { question_index: 0 }));

    let view = advance(&state, &view.id).await.unwrap();
    assert_eq!(view.question_index, 1);
    assert!(!missed_vocabulary(&state, &view.id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn deleted_sessions_are_freed() {
    let state = AppState::new(ServerConfig::default());
    let a = create_session(&state).await;
    let b = create_session(&state).await;
    assert_eq!(state.session_count().await, 2);

    delete_session(&state, &a.id).await.unwrap();
    assert_eq!(state.session_count().await, 1);
    assert_eq!(get_session(&state, &a.id).await.unwrap_err(), ApiError::UnknownSession(a.id.clone()));
    assert_eq!(delete_session(&state, &a.id).await.unwrap_err(), ApiError::UnknownSession(a.id.clone()));
    assert!(get_session(&state, &b.id).await.is_ok());
  }

  #[test]
  fn question_count_is_clamped() {
    let state = AppState::new(ServerConfig { max_question_count: 12, ..ServerConfig::default() });
    assert_eq!(sample_questions(&state, Some(0)).len(), 1);
    assert_eq!(sample_questions(&state, Some(500)).len(), 12);
    assert_eq!(sample_questions(&state, None).len(), 10);
  }
}
