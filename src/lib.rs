//! Lecture Dash · timed Chinese vocabulary run
//!
//! A student runs to a 9:00 lecture while answering vocabulary and
//! time-telling questions; every wrong answer costs minutes on the clock.
//!
//! Core (no I/O):
//!   - `vocabulary` / `seeds` : the static corpus and template tables
//!   - `questions`            : seeded, type-balanced question sets
//!   - `rules`                : speed/streak bonuses, clock formatting
//!   - `game`                 : the session state machine
//!
//! Host (axum HTTP + WebSocket): `config`, `state`, `logic`, `protocol`,
//! `routes`, `telemetry`.

pub mod config;
pub mod domain;
pub mod error;
pub mod game;
pub mod logic;
pub mod pinyin;
pub mod protocol;
pub mod questions;
pub mod routes;
pub mod rules;
pub mod seeds;
pub mod state;
pub mod telemetry;
pub mod util;
pub mod vocabulary;

pub use domain::{AnsweredQuestion, Difficulty, DifficultySettings, Question, QuestionType, Screen, VocabularyEntry};
pub use error::GameError;
pub use game::{AnswerOutcome, GameSession};
pub use questions::generate_questions;
