//! Read-only access to the vocabulary corpus.

use std::collections::{BTreeSet, HashSet};

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::domain::{AnsweredQuestion, VocabularyEntry};
use crate::error::GameError;
use crate::seeds::VOCABULARY;

pub fn all() -> &'static [VocabularyEntry] {
  &VOCABULARY
}

pub fn lookup_by_id(id: u32) -> Result<&'static VocabularyEntry, GameError> {
  VOCABULARY
    .iter()
    .find(|v| v.id == id)
    .ok_or(GameError::NotFound { id })
}

/// Entry whose Chinese form is exactly `chinese`.
pub fn by_chinese(chinese: &str) -> Option<&'static VocabularyEntry> {
  VOCABULARY.iter().find(|v| v.chinese == chinese)
}

/// Draws up to `count` distinct entries, uniformly and without replacement,
/// from the entries whose id is not in `exclude`. Returns every remaining
/// entry when fewer than `count` are left.
pub fn sample_random<R: Rng + ?Sized>(
  rng: &mut R,
  count: usize,
  exclude: &HashSet<u32>,
) -> Vec<&'static VocabularyEntry> {
  VOCABULARY
    .iter()
    .filter(|v| !exclude.contains(&v.id))
    .choose_multiple(rng, count)
}

/// Entries referenced by any incorrectly answered question, each once, in
/// corpus order.
pub fn missed_vocabulary(log: &[AnsweredQuestion]) -> Vec<&'static VocabularyEntry> {
  let missed: BTreeSet<u32> = log
    .iter()
    .filter(|a| !a.is_correct)
    .flat_map(|a| a.question.vocabulary_ids.iter().copied())
    .collect();
  VOCABULARY.iter().filter(|v| missed.contains(&v.id)).collect()
}
