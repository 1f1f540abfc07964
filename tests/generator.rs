//! Properties every generated question set must hold, checked over many
//! seeds and lengths.

use std::collections::HashSet;

use lecture_dash::vocabulary::lookup_by_id;
use lecture_dash::{generate_questions, QuestionType};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn ids_are_exactly_one_to_len() {
  for seed in 0..20u64 {
    for len in 1..=40usize {
      let qs = generate_questions(&mut StdRng::seed_from_u64(seed), len);
      assert_eq!(qs.len(), len, "seed {seed} len {len}");
      let mut ids: Vec<u32> = qs.iter().map(|q| q.id).collect();
      ids.sort_unstable();
      let expected: Vec<u32> = (1..=len as u32).collect();
      assert_eq!(ids, expected, "seed {seed} len {len}");
    }
  }
}

#[test]
fn every_question_offers_four_distinct_options() {
  for seed in 0..50u64 {
    for q in generate_questions(&mut StdRng::seed_from_u64(seed), 15) {
      assert_eq!(q.answers.len(), 4, "{:?}", q);
      let distinct: HashSet<&String> = q.answers.iter().collect();
      assert_eq!(distinct.len(), 4, "{:?}", q);
    }
  }
}

#[test]
fn an_accepted_answer_is_offered_except_for_time_construction() {
  for seed in 0..50u64 {
    for q in generate_questions(&mut StdRng::seed_from_u64(seed), 12) {
      assert!(!q.correct_answers.is_empty());
      if q.kind == QuestionType::TimeConstruction {
        continue;
      }
      assert!(
        q.correct_answers.iter().any(|a| q.answers.contains(a)),
        "no accepted answer among options: {:?}",
        q
      );
    }
  }
}

#[test]
fn referenced_vocabulary_always_resolves() {
  for seed in 0..30u64 {
    for q in generate_questions(&mut StdRng::seed_from_u64(seed), 40) {
      for id in &q.vocabulary_ids {
        assert!(lookup_by_id(*id).is_ok(), "dangling vocabulary id {id} in {:?}", q);
      }
    }
  }
}

#[test]
fn counts_beyond_the_corpus_degrade_to_reuse() {
  let qs = generate_questions(&mut StdRng::seed_from_u64(99), 120);
  assert_eq!(qs.len(), 120);
}

#[test]
fn a_full_set_covers_every_question_type() {
  let qs = generate_questions(&mut StdRng::seed_from_u64(3), 10);
  let kinds: HashSet<QuestionType> = qs.iter().map(|q| q.kind).collect();
  for kind in [
    QuestionType::TimeReading,
    QuestionType::ChineseToEnglish,
    QuestionType::EnglishToChinese,
    QuestionType::FillBlank,
    QuestionType::TimeConstruction,
    QuestionType::SentenceComplete,
  ] {
    assert!(kinds.contains(&kind), "missing {:?}", kind);
  }
}
