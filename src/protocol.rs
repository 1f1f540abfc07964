//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Views never carry the accepted answers of the question on screen.

use serde::{Deserialize, Serialize};

use crate::domain::{Difficulty, Question, QuestionType, Screen, VocabularyEntry};
use crate::game::{AnswerOutcome, GameSession};
use crate::rules::{format_clock, format_clock_in_chinese, progress_message};
use crate::seeds::Obstacle;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  Start {
    #[serde(default)]
    difficulty: Difficulty,
  },
  SubmitAnswer {
    answer: String,
  },
  Advance,
  Restart,
  Pinyin {
    text: String,
  },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  Session {
    session: SessionOut,
  },
  AnswerResult {
    result: AnswerOut,
  },
  Pinyin {
    text: String,
    pinyin: String,
  },
  Error {
    message: String,
  },
}

/// A question as shown to the player.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
  pub id: u32,
  #[serde(rename = "type")]
  pub kind: QuestionType,
  pub prompt: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_element: Option<String>,
  pub answers: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pinyin: Option<String>,
}

impl From<&Question> for QuestionOut {
  fn from(q: &Question) -> Self {
    Self {
      id: q.id,
      kind: q.kind,
      prompt: q.prompt.clone(),
      display_element: q.display_element.clone(),
      answers: q.answers.clone(),
      pinyin: q.pinyin.clone(),
    }
  }
}

/// Win/lose screen summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOut {
  pub perfect: bool,
  pub perfect_bonus: u32,
  pub final_score: u32,
  pub arrival_clock_zh: String,
  pub answered: usize,
  pub correct: usize,
  pub missed_vocabulary: Vec<VocabularyEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
  pub id: String,
  pub screen: Screen,
  pub difficulty: Difficulty,
  pub question_index: usize,
  pub total_questions: usize,
  pub score: u32,
  pub streak: u32,
  pub best_streak: u32,
  pub current_minutes: u32,
  pub target_minutes: u32,
  pub clock: String,
  pub target_clock: String,
  pub minutes_remaining: u32,
  pub urgent: bool,
  pub progress_percent: f64,
  pub progress_message: &'static str,
  pub show_pinyin: bool,
  pub awaiting_advance: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub question: Option<QuestionOut>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<SummaryOut>,
}

pub fn session_out(id: &str, s: &GameSession) -> SessionOut {
  let summary = s.screen().is_terminal().then(|| SummaryOut {
    perfect: s.is_perfect(),
    perfect_bonus: s.perfect_bonus(),
    final_score: s.final_score(),
    arrival_clock_zh: format_clock_in_chinese(s.current_minutes()),
    answered: s.answered().len(),
    correct: s.answered().iter().filter(|a| a.is_correct).count(),
    missed_vocabulary: s.missed_vocabulary().into_iter().copied().collect(),
  });

  SessionOut {
    id: id.to_string(),
    screen: s.screen(),
    difficulty: s.difficulty(),
    question_index: s.question_index(),
    total_questions: s.total_questions(),
    score: s.score(),
    streak: s.streak(),
    best_streak: s.best_streak(),
    current_minutes: s.current_minutes(),
    target_minutes: s.target_minutes(),
    clock: format_clock(s.current_minutes()),
    target_clock: format_clock(s.target_minutes()),
    minutes_remaining: s.minutes_remaining(),
    urgent: s.is_urgent(),
    progress_percent: s.progress_percent(),
    progress_message: progress_message(s.progress_percent()),
    show_pinyin: s.show_pinyin(),
    awaiting_advance: s.awaiting_advance(),
    question: s.current_question().map(QuestionOut::from),
    summary,
  }
}

/// Result of one submitted answer, with the feedback beat's content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
  pub is_correct: bool,
  pub score_gained: u32,
  pub streak_after: u32,
  pub screen: Screen,
  pub message: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub obstacle: Option<Obstacle>,
  pub correct_answers: Vec<String>,
  pub session: SessionOut,
}

impl AnswerOut {
  pub fn new(
    outcome: AnswerOutcome,
    message: &'static str,
    obstacle: Option<Obstacle>,
    correct_answers: Vec<String>,
    session: SessionOut,
  ) -> Self {
    Self {
      is_correct: outcome.is_correct,
      score_gained: outcome.score_gained,
      streak_after: outcome.streak_after,
      screen: outcome.screen,
      message,
      obstacle,
      correct_answers,
      session,
    }
  }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct StartIn {
  #[serde(default)]
  pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
  pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
  pub count: Option<usize>,
}

#[derive(Serialize)]
pub struct QuestionsOut {
  pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub struct ClockQuery {
  pub minutes: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockOut {
  pub clock: String,
  pub clock_zh: String,
}

#[derive(Deserialize)]
pub struct PinyinIn {
  pub text: String,
}
#[derive(Serialize)]
pub struct PinyinOut {
  pub pinyin: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyOut {
  pub id: Difficulty,
  #[serde(flatten)]
  pub settings: crate::domain::DifficultySettings,
}

#[derive(Serialize)]
pub struct MissedOut {
  pub vocabulary: Vec<VocabularyEntry>,
}

#[derive(Serialize)]
pub struct ErrorOut {
  pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
