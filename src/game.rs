//! Session state machine: `Title → Playing → {Win, Lose}`, and back to
//! `Title` on restart.
//!
//! Scoring and the clock penalty are applied as soon as an answer is
//! submitted. Moving on to the next question (or to the win screen) waits for
//! `advance`, which the caller runs after its feedback beat. A clock overrun
//! is the exception: it ends the session at submission time.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::domain::{AnsweredQuestion, Difficulty, Question, Screen, VocabularyEntry};
use crate::error::GameError;
use crate::questions::generate_questions;
use crate::rules::{speed_bonus, streak_bonus, BASE_SCORE, PERFECT_BONUS};
use crate::vocabulary::missed_vocabulary;

/// Minutes left at which the clock is shown as urgent.
pub const URGENT_MINUTES: u32 = 15;

/// What happened on `submit_answer`, for feedback rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
  pub is_correct: bool,
  pub score_gained: u32,
  pub streak_after: u32,
  /// Screen after the answer was applied; `Lose` on a fatal overrun.
  pub screen: Screen,
}

#[derive(Clone, Debug)]
pub struct GameSession {
  screen: Screen,
  difficulty: Difficulty,
  question_index: usize,
  total_questions: usize,
  score: u32,
  streak: u32,
  best_streak: u32,
  current_minutes: u32,
  target_minutes: u32,
  progress_percent: f64,
  questions: Vec<Question>,
  answered: Vec<AnsweredQuestion>,
  question_started_at: Option<Instant>,
  time_penalty_minutes: u32,
  show_pinyin: bool,
  /// Set between `submit_answer` and `advance` for the current question.
  awaiting_advance: bool,
}

impl Default for GameSession {
  fn default() -> Self {
    Self::new(Difficulty::default())
  }
}

impl GameSession {
  /// Fresh session on the title screen with no questions.
  pub fn new(difficulty: Difficulty) -> Self {
    let settings = difficulty.settings();
    Self {
      screen: Screen::Title,
      difficulty,
      question_index: 0,
      total_questions: settings.total_questions,
      score: 0,
      streak: 0,
      best_streak: 0,
      current_minutes: settings.start_minutes,
      target_minutes: settings.target_minutes,
      progress_percent: 0.0,
      questions: Vec::new(),
      answered: Vec::new(),
      question_started_at: None,
      time_penalty_minutes: settings.time_penalty_minutes,
      show_pinyin: settings.show_pinyin_by_default,
      awaiting_advance: false,
    }
  }

  /// Generates the question set and starts playing. Only valid on `Title`.
  pub fn start<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R, now: Instant) -> Result<(), GameError> {
    if self.screen != Screen::Title {
      warn!(target: "game", screen = %self.screen, "start rejected");
      return Err(GameError::InvalidState { operation: "start", screen: self.screen });
    }
    let mut next = Self::new(difficulty);
    next.questions = generate_questions(rng, next.total_questions);
    next.screen = Screen::Playing;
    next.question_started_at = Some(now);
    *self = next;
    info!(target: "game", ?difficulty, questions = self.questions.len(), clock = self.current_minutes, target = self.target_minutes, "Game started");
    Ok(())
  }

  /// Scores `answer` against the current question and logs it.
  ///
  /// Rejected with `AnswerPending` if the current question was already
  /// answered and `advance` has not run since.
  pub fn submit_answer(&mut self, answer: &str, now: Instant) -> Result<AnswerOutcome, GameError> {
    if self.screen != Screen::Playing {
      warn!(target: "game", screen = %self.screen, "submit_answer rejected");
      return Err(GameError::InvalidState { operation: "submit an answer", screen: self.screen });
    }
    if self.awaiting_advance {
      warn!(target: "game", index = self.question_index, "duplicate submit_answer ignored");
      return Err(GameError::AnswerPending { question_index: self.question_index });
    }
    let question = match self.questions.get(self.question_index) {
      Some(q) => q.clone(),
      None => return Err(GameError::InvalidState { operation: "submit an answer", screen: self.screen }),
    };

    let elapsed_ms = self
      .question_started_at
      .map(|t| now.saturating_duration_since(t).as_millis() as u64)
      .unwrap_or(0);
    let is_correct = question.accepts(answer);

    let mut score_gained = 0;
    if is_correct {
      let streak_after = self.streak + 1;
      score_gained = BASE_SCORE + speed_bonus(elapsed_ms) + streak_bonus(streak_after);
      self.score += score_gained;
      self.streak = streak_after;
      self.best_streak = self.best_streak.max(streak_after);
      let done = (self.question_index + 1) as f64 / self.total_questions as f64 * 100.0;
      self.progress_percent = done.min(100.0);
    } else {
      self.current_minutes += self.time_penalty_minutes;
      self.streak = 0;
      if self.is_late() {
        self.screen = Screen::Lose;
      }
    }

    self.answered.push(AnsweredQuestion {
      question,
      selected_answer: answer.to_string(),
      is_correct,
      time_to_answer_ms: elapsed_ms,
    });
    self.awaiting_advance = self.screen == Screen::Playing;

    debug!(target: "game", index = self.question_index, is_correct, score_gained, streak = self.streak, clock = self.current_minutes, elapsed_ms, "Answer applied");
    if self.screen == Screen::Lose {
      info!(target: "game", clock = self.current_minutes, target = self.target_minutes, score = self.score, "Late for the lecture");
    }

    Ok(AnswerOutcome { is_correct, score_gained, streak_after: self.streak, screen: self.screen })
  }

  /// Moves past the answered question. A no-op unless an answer is pending,
  /// so repeated calls never skip a question.
  pub fn advance(&mut self, now: Instant) -> Screen {
    if self.screen != Screen::Playing || !self.awaiting_advance {
      debug!(target: "game", screen = %self.screen, "advance ignored");
      return self.screen;
    }
    self.awaiting_advance = false;

    if self.is_late() {
      self.screen = Screen::Lose;
      info!(target: "game", clock = self.current_minutes, "Late for the lecture");
    } else if self.question_index + 1 >= self.total_questions {
      self.screen = Screen::Win;
      self.progress_percent = 100.0;
      info!(target: "game", score = self.score, perfect = self.is_perfect(), clock = self.current_minutes, "Arrived on time");
    } else {
      self.question_index += 1;
      self.question_started_at = Some(now);
    }
    self.screen
  }

  /// Back to a fresh title screen at the default difficulty. Only valid on a
  /// terminal screen.
  pub fn restart(&mut self) -> Result<(), GameError> {
    if !self.screen.is_terminal() {
      warn!(target: "game", screen = %self.screen, "restart rejected");
      return Err(GameError::InvalidState { operation: "restart", screen: self.screen });
    }
    *self = Self::default();
    info!(target: "game", "Session restarted");
    Ok(())
  }

  pub fn screen(&self) -> Screen {
    self.screen
  }

  pub fn difficulty(&self) -> Difficulty {
    self.difficulty
  }

  pub fn question_index(&self) -> usize {
    self.question_index
  }

  pub fn total_questions(&self) -> usize {
    self.total_questions
  }

  pub fn score(&self) -> u32 {
    self.score
  }

  pub fn streak(&self) -> u32 {
    self.streak
  }

  pub fn best_streak(&self) -> u32 {
    self.best_streak
  }

  pub fn current_minutes(&self) -> u32 {
    self.current_minutes
  }

  pub fn target_minutes(&self) -> u32 {
    self.target_minutes
  }

  pub fn progress_percent(&self) -> f64 {
    self.progress_percent
  }

  pub fn questions(&self) -> &[Question] {
    &self.questions
  }

  pub fn answered(&self) -> &[AnsweredQuestion] {
    &self.answered
  }

  pub fn question_started_at(&self) -> Option<Instant> {
    self.question_started_at
  }

  pub fn time_penalty_minutes(&self) -> u32 {
    self.time_penalty_minutes
  }

  pub fn show_pinyin(&self) -> bool {
    self.show_pinyin
  }

  pub fn awaiting_advance(&self) -> bool {
    self.awaiting_advance
  }

  /// Question on screen, if playing.
  pub fn current_question(&self) -> Option<&Question> {
    if self.screen != Screen::Playing {
      return None;
    }
    self.questions.get(self.question_index)
  }

  pub fn is_late(&self) -> bool {
    self.current_minutes >= self.target_minutes
  }

  pub fn minutes_remaining(&self) -> u32 {
    self.target_minutes.saturating_sub(self.current_minutes)
  }

  pub fn is_urgent(&self) -> bool {
    !self.is_late() && self.minutes_remaining() <= URGENT_MINUTES
  }

  /// Won with every logged answer correct.
  pub fn is_perfect(&self) -> bool {
    self.screen == Screen::Win && self.answered.iter().all(|a| a.is_correct)
  }

  pub fn perfect_bonus(&self) -> u32 {
    if self.is_perfect() { PERFECT_BONUS } else { 0 }
  }

  /// Score as displayed on the win screen; not fed back into play.
  pub fn final_score(&self) -> u32 {
    self.score + self.perfect_bonus()
  }

  pub fn missed_vocabulary(&self) -> Vec<&'static VocabularyEntry> {
    missed_vocabulary(&self.answered)
  }
}
