//! Question generation.
//!
//! Flow:
//! 1) Two time-reading questions on distinct clock values.
//! 2) Three Chinese→English questions on core words.
//! 3) Two English→Chinese questions on words not used yet.
//! 4) One fill-blank, one time-construction and one sentence-completion
//!    question from the template tables.
//! 5) Random top-up (Chinese→English, English→Chinese or time-reading) until
//!    the requested count is reached, preferring unused words.
//! 6) Shuffle, truncate, and number the kept questions 1..=count in the order
//!    they were emitted.
//!
//! All randomness comes from the caller's `Rng`, so a seeded generator yields
//! a reproducible set.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::{Question, QuestionType, VocabularyEntry};
use crate::pinyin::reading;
use crate::rules::{format_clock, format_clock_in_chinese};
use crate::seeds::*;
use crate::util::fill_template;
use crate::vocabulary;

const DISTRACTORS: usize = 3;

const TOP_UP_KINDS: [QuestionType; 3] = [
  QuestionType::ChineseToEnglish,
  QuestionType::EnglishToChinese,
  QuestionType::TimeReading,
];

/// Builds `count` questions. Never fails: once every word has been used the
/// top-up step samples with reuse.
pub fn generate_questions<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Question> {
  let mut gen = Generator { rng, next_id: 1, used: HashSet::new(), out: Vec::with_capacity(count.max(10)) };
  gen.run(count);
  let questions = gen.finish(count);
  let time_readings = questions.iter().filter(|q| q.kind == QuestionType::TimeReading).count();
  debug!(target: "questions", count = questions.len(), time_readings, "Generated question set");
  questions
}

struct Generator<'r, R: Rng + ?Sized> {
  rng: &'r mut R,
  next_id: u32,
  used: HashSet<u32>,
  out: Vec<Question>,
}

impl<'r, R: Rng + ?Sized> Generator<'r, R> {
  fn run(&mut self, count: usize) {
    let times: Vec<u32> = TIME_TABLE.choose_multiple(self.rng, 2).copied().collect();
    for minutes in times {
      let q = self.time_reading(minutes);
      self.push(q);
    }

    let core: Vec<&'static VocabularyEntry> = PRIORITY_VOCAB_IDS
      .choose_multiple(self.rng, 3)
      .filter_map(|id| vocabulary::lookup_by_id(*id).ok())
      .collect();
    for v in core {
      let q = self.chinese_to_english(v);
      self.push(q);
    }

    for v in vocabulary::sample_random(self.rng, 2, &self.used) {
      let q = self.english_to_chinese(v);
      self.push(q);
    }

    let q = self.fill_blank();
    self.push(q);
    let q = self.time_construction();
    self.push(q);
    let q = self.sentence_complete();
    self.push(q);

    while self.out.len() < count {
      let kind = *TOP_UP_KINDS.choose(self.rng).unwrap_or(&QuestionType::TimeReading);
      let word = self.top_up_word();
      let q = match (kind, word) {
        (QuestionType::ChineseToEnglish, Some(v)) => self.chinese_to_english(v),
        (QuestionType::EnglishToChinese, Some(v)) => self.english_to_chinese(v),
        _ => {
          let minutes = *TIME_TABLE.choose(self.rng).unwrap_or(&TIME_TABLE[0]);
          self.time_reading(minutes)
        }
      };
      self.push(q);
    }
  }

  /// Unused word if any remain, otherwise any word.
  fn top_up_word(&mut self) -> Option<&'static VocabularyEntry> {
    if let Some(v) = vocabulary::sample_random(self.rng, 1, &self.used).into_iter().next() {
      return Some(v);
    }
    vocabulary::sample_random(self.rng, 1, &HashSet::new()).into_iter().next()
  }

  fn push(&mut self, q: Question) {
    self.used.extend(q.vocabulary_ids.iter().copied());
    self.out.push(q);
  }

  fn take_id(&mut self) -> u32 {
    let id = self.next_id;
    self.next_id += 1;
    id
  }

  fn finish(self, count: usize) -> Vec<Question> {
    let mut out = self.out;
    out.shuffle(self.rng);
    out.truncate(count);

    // Renumber 1..=count, keeping emission order among the survivors.
    let mut order: Vec<usize> = (0..out.len()).collect();
    order.sort_by_key(|&i| out[i].id);
    for (rank, i) in order.into_iter().enumerate() {
      out[i].id = rank as u32 + 1;
    }
    out
  }

  /// `correct` plus three distinct distractors from `pool`, shuffled.
  fn options(&mut self, correct: &str, pool: impl Iterator<Item = String>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for item in pool {
      if item != correct && !candidates.contains(&item) {
        candidates.push(item);
      }
    }
    let mut answers: Vec<String> = vec![correct.to_string()];
    answers.extend(candidates.choose_multiple(self.rng, DISTRACTORS).cloned());
    answers.shuffle(self.rng);
    answers
  }

  fn time_reading(&mut self, minutes: u32) -> Question {
    let correct = format_clock_in_chinese(minutes);
    let others = TIME_TABLE.iter().filter(|m| **m != minutes).map(|m| format_clock_in_chinese(*m));
    let answers = self.options(&correct, others);
    Question {
      id: self.take_id(),
      kind: QuestionType::TimeReading,
      prompt: TIME_READING_PROMPT.to_string(),
      display_element: Some(format_clock(minutes)),
      answers,
      correct_answers: vec![correct],
      vocabulary_ids: TIME_READING_VOCAB_IDS.to_vec(),
      pinyin: Some(TIME_READING_PINYIN.to_string()),
    }
  }

  fn chinese_to_english(&mut self, v: &'static VocabularyEntry) -> Question {
    let pool = vocabulary::all().iter().map(|e| e.english.to_string());
    let answers = self.options(v.english, pool);
    Question {
      id: self.take_id(),
      kind: QuestionType::ChineseToEnglish,
      prompt: fill_template(CHINESE_TO_ENGLISH_PROMPT, &[("chinese", v.chinese)]),
      display_element: None,
      answers,
      correct_answers: vec![v.english.to_string()],
      vocabulary_ids: vec![v.id],
      pinyin: Some(v.pinyin.to_string()),
    }
  }

  fn english_to_chinese(&mut self, v: &'static VocabularyEntry) -> Question {
    let pool = vocabulary::all().iter().map(|e| e.chinese.to_string());
    let answers = self.options(v.chinese, pool);
    Question {
      id: self.take_id(),
      kind: QuestionType::EnglishToChinese,
      prompt: fill_template(ENGLISH_TO_CHINESE_PROMPT, &[("english", v.english)]),
      display_element: None,
      answers,
      correct_answers: vec![v.chinese.to_string()],
      vocabulary_ids: vec![v.id],
      pinyin: None,
    }
  }

  fn fill_blank(&mut self) -> Question {
    let tpl = FILL_BLANK_TEMPLATES.choose(self.rng).unwrap_or(&FILL_BLANK_TEMPLATES[0]);
    let entry = vocabulary::by_chinese(tpl.answer);
    let singles = vocabulary::all()
      .iter()
      .filter(|e| e.chinese.chars().count() == 1)
      .map(|e| e.chinese.to_string());
    let answers = self.options(tpl.answer, singles);
    Question {
      id: self.take_id(),
      kind: QuestionType::FillBlank,
      prompt: tpl.prompt.to_string(),
      display_element: Some(tpl.template.to_string()),
      answers,
      correct_answers: vec![tpl.answer.to_string()],
      vocabulary_ids: entry.map(|e| vec![e.id]).unwrap_or_default(),
      pinyin: entry.map(|e| e.pinyin.to_string()),
    }
  }

  fn time_construction(&mut self) -> Question {
    let tpl = TIME_CONSTRUCTION_TEMPLATES.choose(self.rng).unwrap_or(&TIME_CONSTRUCTION_TEMPLATES[0]);
    let display = format_clock(tpl.hour * 60 + tpl.minute);
    let hour = format_clock_in_chinese(tpl.hour * 60);
    let hour = hour.trim_end_matches('点');
    let pool = TIME_UNIT_WORDS
      .iter()
      .filter(|w| !tpl.alternatives.contains(*w))
      .map(|w| w.to_string());
    let answers = self.options(tpl.answer, pool);
    let mut correct_answers = vec![tpl.answer.to_string()];
    correct_answers.extend(tpl.alternatives.iter().map(|a| a.to_string()));
    Question {
      id: self.take_id(),
      kind: QuestionType::TimeConstruction,
      prompt: fill_template(TIME_CONSTRUCTION_PROMPT, &[("display", &display), ("hour", hour)]),
      display_element: None,
      answers,
      correct_answers,
      vocabulary_ids: TIME_CONSTRUCTION_VOCAB_IDS.to_vec(),
      pinyin: None,
    }
  }

  fn sentence_complete(&mut self) -> Question {
    let tpl = SENTENCE_TEMPLATES.choose(self.rng).unwrap_or(&SENTENCE_TEMPLATES[0]);
    let mut answers: Vec<String> = tpl.options.iter().map(|o| o.to_string()).collect();
    answers.shuffle(self.rng);
    Question {
      id: self.take_id(),
      kind: QuestionType::SentenceComplete,
      prompt: tpl.sentence.to_string(),
      display_element: None,
      answers,
      correct_answers: vec![tpl.answer.to_string()],
      vocabulary_ids: vec![tpl.vocab_id.unwrap_or(SENTENCE_DEFAULT_VOCAB_ID)],
      pinyin: Some(reading(tpl.sentence)),
    }
  }
}
