//! Domain models: vocabulary entries, questions, answered questions,
//! difficulty settings and the screen a session is on.

use serde::{Deserialize, Serialize};

/// One vocabulary item of the built-in corpus. Ids are unique and stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct VocabularyEntry {
  pub id: u32,
  pub chinese: &'static str,
  pub pinyin: &'static str,
  pub english: &'static str,
}

/// Which kind of question is presented to the player?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
  /// Read an analog-style `H:MM` clock and pick its Chinese rendering.
  TimeReading,
  ChineseToEnglish,
  EnglishToChinese,
  /// Pick the single character that completes a short phrase.
  FillBlank,
  /// Pick the time word that completes `X点___`. May accept an answer that is
  /// not offered as an option.
  TimeConstruction,
  SentenceComplete,
}

/// A multiple-choice question.
///
/// Optional fields by type:
///
/// | type               | `display_element` | `pinyin`                 |
/// |--------------------|-------------------|--------------------------|
/// | `TimeReading`      | `H:MM` clock      | fixed prompt reading     |
/// | `ChineseToEnglish` | –                 | entry pinyin             |
/// | `EnglishToChinese` | –                 | –                        |
/// | `FillBlank`        | blanked phrase    | answer pinyin (if known) |
/// | `TimeConstruction` | –                 | –                        |
/// | `SentenceComplete` | –                 | sentence reading         |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub id: u32,
  #[serde(rename = "type")]
  pub kind: QuestionType,
  pub prompt: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_element: Option<String>,
  /// Exactly four distinct options, shuffled.
  pub answers: Vec<String>,
  pub correct_answers: Vec<String>,
  pub vocabulary_ids: Vec<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pinyin: Option<String>,
}

impl Question {
  /// Literal match against any accepted answer.
  pub fn accepts(&self, answer: &str) -> bool {
    self.correct_answers.iter().any(|a| a == answer)
  }
}

/// A question together with what the player chose. Appended to the session
/// log on submission and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
  #[serde(flatten)]
  pub question: Question,
  pub selected_answer: String,
  pub is_correct: bool,
  pub time_to_answer_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  #[default]
  Medium,
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  pub fn settings(self) -> &'static DifficultySettings {
    match self {
      Difficulty::Easy => &EASY,
      Difficulty::Medium => &MEDIUM,
      Difficulty::Hard => &HARD,
    }
  }
}

/// Static per-difficulty tuning. Clock values are minutes since midnight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultySettings {
  pub name: &'static str,
  pub name_zh: &'static str,
  pub description: &'static str,
  pub total_questions: usize,
  pub start_minutes: u32,
  pub target_minutes: u32,
  pub time_penalty_minutes: u32,
  pub show_pinyin_by_default: bool,
}

static EASY: DifficultySettings = DifficultySettings {
  name: "Easy",
  name_zh: "简单",
  description: "More time, pinyin hints shown",
  total_questions: 8,
  start_minutes: 480,
  target_minutes: 540,
  time_penalty_minutes: 3,
  show_pinyin_by_default: true,
};

static MEDIUM: DifficultySettings = DifficultySettings {
  name: "Medium",
  name_zh: "中等",
  description: "Standard mode",
  total_questions: 10,
  start_minutes: 495,
  target_minutes: 540,
  time_penalty_minutes: 5,
  show_pinyin_by_default: false,
};

static HARD: DifficultySettings = DifficultySettings {
  name: "Hard",
  name_zh: "困难",
  description: "Less time, more questions",
  total_questions: 15,
  start_minutes: 510,
  target_minutes: 540,
  time_penalty_minutes: 5,
  show_pinyin_by_default: false,
};

/// Which screen the session is on. `Win` and `Lose` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
  #[default]
  Title,
  Playing,
  Win,
  Lose,
}

impl Screen {
  pub fn is_terminal(self) -> bool {
    matches!(self, Screen::Win | Screen::Lose)
  }
}

impl std::fmt::Display for Screen {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Screen::Title => "title",
      Screen::Playing => "playing",
      Screen::Win => "win",
      Screen::Lose => "lose",
    };
    f.write_str(s)
  }
}
