//! Errors signalled by the game core.

use crate::domain::Screen;

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
  /// Command issued on a screen where it does not apply.
  #[error("cannot {operation} while on the {screen} screen")]
  InvalidState { operation: &'static str, screen: Screen },

  /// The current question was already answered and `advance` has not run yet.
  #[error("question {} was already answered", .question_index + 1)]
  AnswerPending { question_index: usize },

  /// Vocabulary id that is not in the corpus.
  #[error("no vocabulary entry with id {id}")]
  NotFound { id: u32 },
}
