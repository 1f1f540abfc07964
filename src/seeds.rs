//! Built-in content: the chapter vocabulary, the clock table and the small
//! template tables the question generator draws from.

use crate::domain::VocabularyEntry;

const fn entry(id: u32, chinese: &'static str, pinyin: &'static str, english: &'static str) -> VocabularyEntry {
  VocabularyEntry { id, chinese, pinyin, english }
}

/// Time expressions and university life.
pub static VOCABULARY: [VocabularyEntry; 27] = [
  entry(1, "大学", "dàxué", "university"),
  entry(2, "早上", "zǎoshang", "morning"),
  entry(3, "几", "jǐ", "what/how many"),
  entry(4, "点", "diǎn", "o'clock"),
  entry(5, "上课", "shàngkè", "to start class"),
  entry(6, "大部分", "dàbùfèn", "most/majority"),
  entry(7, "部分", "bùfèn", "part"),
  entry(8, "九", "jiǔ", "nine"),
  entry(9, "我们", "wǒmen", "we/us"),
  entry(10, "八", "bā", "eight"),
  entry(11, "五十", "wǔshí", "fifty"),
  entry(12, "分", "fēn", "minute"),
  entry(13, "下课", "xiàkè", "to end class"),
  entry(14, "十", "shí", "ten"),
  entry(15, "半", "bàn", "half"),
  entry(16, "太……了", "tài...le", "too..."),
  entry(17, "早", "zǎo", "early"),
  entry(18, "讲座", "jiǎngzuò", "lecture"),
  entry(19, "开始", "kāishǐ", "to begin"),
  entry(20, "七", "qī", "seven"),
  entry(21, "现在", "xiànzài", "now"),
  entry(22, "差", "chà", "lacking/to"),
  entry(23, "一", "yī", "one"),
  entry(24, "刻", "kè", "quarter (15 min)"),
  entry(25, "六", "liù", "six"),
  entry(26, "一会儿", "yīhuìr", "a moment"),
  entry(27, "见", "jiàn", "to see/meet"),
];

/// Core words the Chinese→English block is drawn from.
pub static PRIORITY_VOCAB_IDS: [u32; 10] = [1, 2, 5, 13, 17, 18, 19, 21, 26, 27];

/// 现在 / 几 / 点
pub const TIME_READING_VOCAB_IDS: [u32; 3] = [21, 3, 4];
pub const TIME_READING_PROMPT: &str = "现在几点?";
pub const TIME_READING_PINYIN: &str = "xiànzài jǐ diǎn?";

/// Clock values (minutes since midnight) used by time-reading questions.
pub static TIME_TABLE: [u32; 10] = [480, 495, 510, 525, 540, 555, 420, 450, 360, 600];

pub struct FillBlankTemplate {
  pub template: &'static str,
  pub answer: &'static str,
  pub prompt: &'static str,
}

pub static FILL_BLANK_TEMPLATES: [FillBlankTemplate; 3] = [
  FillBlankTemplate { template: "___上好!", answer: "早", prompt: "Good morning!" },
  FillBlankTemplate { template: "___点了?", answer: "几", prompt: "What time is it?" },
  FillBlankTemplate { template: "讲座___点开始", answer: "几", prompt: "What time does the lecture start?" },
];

pub struct TimeConstructionTemplate {
  pub hour: u32,
  pub minute: u32,
  pub answer: &'static str,
  /// Accepted but never offered as an option.
  pub alternatives: &'static [&'static str],
}

pub static TIME_CONSTRUCTION_TEMPLATES: [TimeConstructionTemplate; 3] = [
  TimeConstructionTemplate { hour: 8, minute: 30, answer: "半", alternatives: &["三十分"] },
  TimeConstructionTemplate { hour: 8, minute: 45, answer: "四十五分", alternatives: &["三刻"] },
  TimeConstructionTemplate { hour: 8, minute: 15, answer: "一刻", alternatives: &["十五分"] },
];

pub const TIME_CONSTRUCTION_PROMPT: &str = "\"{display}\" = {hour}点___";

/// Distractor pool for time-construction questions.
pub static TIME_UNIT_WORDS: [&str; 4] = ["半", "一刻", "整", "四十五分"];

/// 半 / 刻 / 五十 / 分
pub const TIME_CONSTRUCTION_VOCAB_IDS: [u32; 4] = [15, 24, 11, 12];

pub struct SentenceTemplate {
  pub sentence: &'static str,
  pub answer: &'static str,
  pub options: [&'static str; 4],
  pub vocab_id: Option<u32>,
}

pub static SENTENCE_TEMPLATES: [SentenceTemplate; 3] = [
  SentenceTemplate { sentence: "我们的讲座九点___", answer: "开始", options: ["开始", "下课", "见", "早"], vocab_id: None },
  SentenceTemplate { sentence: "现在八点半,___上好!", answer: "早", options: ["早", "晚", "下", "上"], vocab_id: None },
  SentenceTemplate { sentence: "课___了,我们走吧", answer: "下", options: ["下", "上", "开始", "半"], vocab_id: Some(13) },
];

/// 开始, referenced by sentence templates without their own entry.
pub const SENTENCE_DEFAULT_VOCAB_ID: u32 = 19;

pub const CHINESE_TO_ENGLISH_PROMPT: &str = "\"{chinese}\" means...";
pub const ENGLISH_TO_CHINESE_PROMPT: &str = "How do you say \"{english}\"?";

pub static CORRECT_MESSAGES: [&str; 4] = ["太好了!", "太快了!", "我们继续!", "太厉害了!"];
pub static WRONG_MESSAGES: [&str; 3] = ["太慢了!", "再试一会儿!", "差一点!"];

/// Something the runner trips over after a wrong answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Obstacle {
  pub emoji: &'static str,
  pub message: &'static str,
  pub english: &'static str,
}

pub static OBSTACLES: [Obstacle; 5] = [
  Obstacle { emoji: "☕", message: "太烫了!", english: "Too hot!" },
  Obstacle { emoji: "👋", message: "等一会儿!", english: "Wait a moment!" },
  Obstacle { emoji: "🚲", message: "小心!", english: "Watch out!" },
  Obstacle { emoji: "📚", message: "我的书!", english: "My books!" },
  Obstacle { emoji: "🏢", message: "这不是我们的大学!", english: "This isn't our university!" },
];
