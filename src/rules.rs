//! Pure scoring and clock rules.
//!
//! Clock values are minutes since midnight. Nothing here touches session state.

/// Points for any correct answer before bonuses.
pub const BASE_SCORE: u32 = 100;
/// Added to the displayed total of a perfect game.
pub const PERFECT_BONUS: u32 = 500;

const SPEED_BONUS_MAX: f64 = 50.0;
const SPEED_WINDOW_MS: u64 = 10_000;
const STREAK_STEP: u32 = 25;

const HOUR_WORDS: [&str; 12] = ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "十一", "十二"];

/// Linear decay from 50 at 0 ms to 0 at 10 s, rounded to the nearest point.
///
/// Computed in `f64`, so a nominal half like 5.5 s (22.5) lands at 22 because
/// `1 - 0.55` is slightly below 0.45.
pub fn speed_bonus(elapsed_ms: u64) -> u32 {
  if elapsed_ms >= SPEED_WINDOW_MS {
    return 0;
  }
  let left = 1.0 - elapsed_ms as f64 / SPEED_WINDOW_MS as f64;
  (left * SPEED_BONUS_MAX).round() as u32
}

/// Bonus for the streak length *after* the current answer.
pub fn streak_bonus(streak: u32) -> u32 {
  if streak < 2 {
    return 0;
  }
  (streak - 1) * STREAK_STEP
}

/// `H:MM`, hours not padded.
pub fn format_clock(minutes: u32) -> String {
  format!("{}:{:02}", minutes / 60, minutes % 60)
}

fn hour_word(hour: u32) -> String {
  match hour {
    1..=12 => HOUR_WORDS[(hour - 1) as usize].to_string(),
    _ => hour.to_string(),
  }
}

fn minute_word(minute: u32) -> String {
  match minute {
    5 => "五".into(),
    10 => "十".into(),
    20 => "二十".into(),
    40 => "四十".into(),
    50 => "五十".into(),
    _ => minute.to_string(),
  }
}

/// Spoken Chinese rendering: 九点, 九点半, 九点一刻, 差一刻十点, 九点二十分.
///
/// A quarter to the hour names the *next* hour.
pub fn format_clock_in_chinese(minutes: u32) -> String {
  let hour = minutes / 60;
  let minute = minutes % 60;
  match minute {
    0 => format!("{}点", hour_word(hour)),
    30 => format!("{}点半", hour_word(hour)),
    15 => format!("{}点一刻", hour_word(hour)),
    45 => format!("差一刻{}点", hour_word(hour + 1)),
    m => format!("{}点{}分", hour_word(hour), minute_word(m)),
  }
}

/// Encouragement shown under the progress bar.
pub fn progress_message(percent: f64) -> &'static str {
  if percent < 30.0 {
    "刚开始!"
  } else if percent < 50.0 {
    "部分完成!"
  } else if percent < 80.0 {
    "大部分完成!"
  } else {
    "快到了!"
  }
}
