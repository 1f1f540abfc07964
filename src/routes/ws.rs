//! WebSocket upgrade + message loop. Each connection owns one game session
//! and the feedback timer for it: after an answer result the loop arms a
//! single-shot sleep, and when it fires the session advances and the new view
//! is pushed. A successful start or restart, or an explicit `advance`,
//! disarms it.

use std::{pin::Pin, sync::Arc, time::Duration};
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::time::{sleep, Sleep};
use tracing::{debug, error, info, instrument};

use crate::logic::{self, ApiError};
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Pending `advance` for the connection's session.
type FeedbackTimer = Option<Pin<Box<Sleep>>>;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "lecture_dash", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let view = logic::create_session(&state).await;
  let session_id = view.id.clone();
  info!(target: "lecture_dash", %session_id, "WebSocket connected");

  if !send(&mut socket, &ServerWsMessage::Session { session: view }).await {
    state.remove_session(&session_id).await;
    return;
  }

  let delay = Duration::from_millis(state.config.feedback_delay_ms);
  let mut timer: FeedbackTimer = None;

  loop {
    tokio::select! {
      _ = beat(&mut timer) => {
        let reply = on_beat(&state, &session_id, &mut timer).await;
        if !send(&mut socket, &reply).await {
          break;
        }
      }
      incoming = socket.recv() => {
        let msg = match incoming {
          Some(Ok(msg)) => msg,
          _ => break,
        };
        match msg {
          Message::Text(txt) => {
            let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
              Ok(incoming) => {
                debug!(target: "lecture_dash", "WS received: {:?}", &incoming);
                handle_client_ws(incoming, &state, &session_id, &mut timer, delay).await
              }
              Err(e) => {
                debug!(target: "lecture_dash", raw = %trunc_for_log(&txt, 120), "WS message rejected");
                ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }
              }
            };
            if !send(&mut socket, &reply_msg).await {
              break;
            }
          }
          Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
          Message::Close(_) => break,
          _ => {}
        }
      }
    }
  }

  state.remove_session(&session_id).await;
  info!(target: "lecture_dash", %session_id, "WebSocket disconnected");
}

/// Resolves when the armed timer fires; never resolves while disarmed.
async fn beat(timer: &mut FeedbackTimer) {
  match timer.as_mut() {
    Some(t) => t.await,
    None => std::future::pending().await,
  }
}

/// The armed beat fired: disarm and advance once.
async fn on_beat(state: &AppState, session_id: &str, timer: &mut FeedbackTimer) -> ServerWsMessage {
  *timer = None;
  debug!(target: "lecture_dash", %session_id, "Feedback beat elapsed");
  to_message(logic::advance(state, session_id).await.map(|session| ServerWsMessage::Session { session }))
}

/// Serialize and send; false when the socket is gone.
async fn send(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  if let Err(e) = socket.send(Message::Text(out)).await {
    error!(target: "lecture_dash", error = %e, "WS send error");
    return false;
  }
  true
}

fn to_message(result: Result<ServerWsMessage, ApiError>) -> ServerWsMessage {
  result.unwrap_or_else(|e| ServerWsMessage::Error { message: e.to_string() })
}

#[instrument(level = "info", skip(state, timer))]
async fn handle_client_ws(
  msg: ClientWsMessage,
  state: &AppState,
  session_id: &str,
  timer: &mut FeedbackTimer,
  delay: Duration,
) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Start { difficulty } => {
      let result = logic::start_session(state, session_id, difficulty).await;
      if result.is_ok() {
        *timer = None;
      }
      to_message(result.map(|session| ServerWsMessage::Session { session }))
    }

    ClientWsMessage::SubmitAnswer { answer } => {
      let result = logic::submit_answer(state, session_id, &answer).await;
      if let Ok(out) = &result {
        // Terminal screens need no beat; there is nothing to advance to.
        if out.session.awaiting_advance {
          *timer = Some(Box::pin(sleep(delay)));
        }
        tracing::info!(target: "game", %session_id, correct = out.is_correct, screen = %out.screen, "WS submit_answer evaluated");
      }
      to_message(result.map(|result| ServerWsMessage::AnswerResult { result }))
    }

    ClientWsMessage::Advance => {
      *timer = None;
      to_message(logic::advance(state, session_id).await.map(|session| ServerWsMessage::Session { session }))
    }

    ClientWsMessage::Restart => {
      let result = logic::restart(state, session_id).await;
      if result.is_ok() {
        *timer = None;
      }
      to_message(result.map(|session| ServerWsMessage::Session { session }))
    }

    ClientWsMessage::Pinyin { text } => {
      let pinyin = logic::do_pinyin(&text);
      ServerWsMessage::Pinyin { text, pinyin }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ServerConfig;
  use crate::domain::{Difficulty, Screen};

  const DELAY: Duration = Duration::from_millis(1500);

  async fn session(state: &AppState) -> String {
    logic::create_session(state).await.id
  }

  async fn send_msg(state: &AppState, id: &str, timer: &mut FeedbackTimer, msg: ClientWsMessage) -> ServerWsMessage {
    handle_client_ws(msg, state, id, timer, DELAY).await
  }

  fn answer(text: &str) -> ClientWsMessage {
    ClientWsMessage::SubmitAnswer { answer: text.to_string() }
  }

  #[tokio::test]
  async fn answer_arms_and_explicit_advance_disarms() {
    let state = AppState::new(ServerConfig::default());
    let id = session(&state).await;
    let mut timer: FeedbackTimer = None;

    send_msg(&state, &id, &mut timer, ClientWsMessage::Start { difficulty: Difficulty::Medium }).await;
    assert!(timer.is_none());

    let reply = send_msg(&state, &id, &mut timer, answer("wrong")).await;
    assert!(matches!(reply, ServerWsMessage::AnswerResult { .. }));
    assert!(timer.is_some());

    // a rejected second answer leaves the beat alone
    let reply = send_msg(&state, &id, &mut timer, answer("wrong")).await;
    assert!(matches!(reply, ServerWsMessage::Error { .. }));
    assert!(timer.is_some());

    send_msg(&state, &id, &mut timer, ClientWsMessage::Advance).await;
    assert!(timer.is_none());
    assert_eq!(logic::get_session(&state, &id).await.unwrap().question_index, 1);
  }

  #[tokio::test]
  async fn fatal_miss_does_not_arm() {
    let state = AppState::new(ServerConfig::default());
    let id = session(&state).await;
    let mut timer: FeedbackTimer = None;
    send_msg(&state, &id, &mut timer, ClientWsMessage::Start { difficulty: Difficulty::Hard }).await;

    for _ in 0..5 {
      send_msg(&state, &id, &mut timer, answer("wrong")).await;
      assert!(timer.is_some());
      send_msg(&state, &id, &mut timer, ClientWsMessage::Advance).await;
    }
    let reply = send_msg(&state, &id, &mut timer, answer("wrong")).await;
    assert!(matches!(reply, ServerWsMessage::AnswerResult { ref result } if result.screen == Screen::Lose));
    assert!(timer.is_none());

    let reply = send_msg(&state, &id, &mut timer, ClientWsMessage::Restart).await;
    assert!(matches!(reply, ServerWsMessage::Session { ref session } if session.screen == Screen::Title));
  }

  #[tokio::test]
  async fn successful_start_and_restart_disarm() {
    let state = AppState::new(ServerConfig::default());
    let id = session(&state).await;
    let mut timer: FeedbackTimer = Some(Box::pin(sleep(DELAY)));
    send_msg(&state, &id, &mut timer, ClientWsMessage::Start { difficulty: Difficulty::Easy }).await;
    assert!(timer.is_none());

    send_msg(&state, &id, &mut timer, answer("wrong")).await;
    assert!(timer.is_some());
    // restart is rejected while playing, so the pending beat survives
    let reply = send_msg(&state, &id, &mut timer, ClientWsMessage::Restart).await;
    assert!(matches!(reply, ServerWsMessage::Error { .. }));
    assert!(timer.is_some());

    // finish the run so restart is accepted
    send_msg(&state, &id, &mut timer, ClientWsMessage::Advance).await;
    while logic::get_session(&state, &id).await.unwrap().screen == Screen::Playing {
      send_msg(&state, &id, &mut timer, answer("wrong")).await;
      send_msg(&state, &id, &mut timer, ClientWsMessage::Advance).await;
    }
    timer = Some(Box::pin(sleep(DELAY)));
    send_msg(&state, &id, &mut timer, ClientWsMessage::Restart).await;
    assert!(timer.is_none());
  }

  #[tokio::test(start_paused = true)]
  async fn one_beat_advances_exactly_one_question() {
    let state = AppState::new(ServerConfig::default());
    let id = session(&state).await;
    let mut timer: FeedbackTimer = None;
    send_msg(&state, &id, &mut timer, ClientWsMessage::Start { difficulty: Difficulty::Medium }).await;
    send_msg(&state, &id, &mut timer, answer("wrong")).await;

    let started = tokio::time::Instant::now();
    beat(&mut timer).await;
    assert!(started.elapsed() >= DELAY);
    let reply = on_beat(&state, &id, &mut timer).await;
    assert!(matches!(reply, ServerWsMessage::Session { ref session } if session.question_index == 1));
    assert!(timer.is_none());

    // disarmed: the beat never resolves again
    assert!(tokio::time::timeout(Duration::from_secs(60), beat(&mut timer)).await.is_err());
    assert_eq!(logic::get_session(&state, &id).await.unwrap().question_index, 1);
  }
}
