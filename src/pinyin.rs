//! Pinyin readings for question text.
//!
//! Hanzi become tone-marked syllables separated by single spaces; everything
//! else (blanks, punctuation, ASCII) is copied through. Readings are
//! per-character, so polyphonic characters get the crate's default reading.

use pinyin::ToPinyin;

/// Tone-marked reading of `text`, e.g. `"课___了"` → `"kè ___ le"`.
pub fn reading(text: &str) -> String {
  let mut out = String::with_capacity(text.len() * 2);
  let mut last_was_hanzi = false;

  for ch in text.chars() {
    match ch.to_pinyin() {
      Some(py) => {
        if !out.is_empty() && !out.ends_with(' ') {
          out.push(' ');
        }
        out.push_str(py.with_tone());
        last_was_hanzi = true;
      }
      None => {
        // Separate a run of non-Hanzi from the syllable before it.
        if last_was_hanzi && ch == '_' {
          out.push(' ');
        }
        out.push(ch);
        last_was_hanzi = false;
      }
    }
  }

  out
}
