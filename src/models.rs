use serde::{Deserialize, Serialize};

pub type ItemId = u32;

pub const DEFAULT_DIFFICULTY: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTerm {
    pub korean: String,
    pub vietnamese: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioData {
    pub title: String,
    pub description: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub sample_messages: Vec<String>,
    #[serde(default)]
    pub key_expressions: Vec<String>,
}

/// One catalog entry. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningItem {
    pub id: ItemId,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub korean_word: String,
    #[serde(default)]
    pub vietnamese_word: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(default)]
    pub example_ko: String,
    #[serde(default)]
    pub example_vi: String,
    #[serde(rename = "audioURL", default)]
    pub audio_url: String,
    #[serde(rename = "audioWordKoURL", default)]
    pub audio_word_ko_url: Option<String>,
    #[serde(rename = "audioExampleKoURL", default)]
    pub audio_example_ko_url: Option<String>,
    #[serde(default)]
    pub related_terms: Vec<RelatedTerm>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub writing_challenge: Option<String>,
    #[serde(default)]
    pub vietnamese_sentence: Option<String>,
    #[serde(default)]
    pub korean_options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answer: Option<usize>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub scenario_data: Option<ScenarioData>,
}

impl LearningItem {
    /// Star count for display; items without a difficulty show as medium.
    pub fn stars(&self) -> u8 {
        self.difficulty.unwrap_or(DEFAULT_DIFFICULTY).clamp(1, 3)
    }

    pub fn has_quiz(&self) -> bool {
        matches!(
            (&self.vietnamese_sentence, &self.korean_options, self.correct_answer),
            (Some(_), Some(options), Some(answer)) if answer < options.len()
        )
    }

    pub fn has_writing_challenge(&self) -> bool {
        self.writing_challenge
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}

fn default_difficulty() -> u8 {
    DEFAULT_DIFFICULTY
}

/// Entry written when a quiz answer is wrong. One per item id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswer {
    pub id: ItemId,
    pub chosen: String,
    pub correct: String,
    pub category: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageLearningRecord {
    pub id: i64,
    pub scenario_id: ItemId,
    pub original_message: String,
    pub corrected_message: String,
    pub timestamp: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Main,
    Vocabulary,
    Writing,
    Quiz,
    Review,
    MessageWriting,
}

impl AppState {
    pub const MENU: [AppState; 5] = [
        AppState::Writing,
        AppState::Vocabulary,
        AppState::Quiz,
        AppState::MessageWriting,
        AppState::Review,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AppState::Main => "aigo",
            AppState::Vocabulary => "Từ vựng",
            AppState::Writing => "Viết",
            AppState::Quiz => "Câu đố",
            AppState::Review => "복습하기",
            AppState::MessageWriting => "문자 연습",
        }
    }
}
