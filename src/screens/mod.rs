//! Input handling for each study screen. Screens own their session and popup state;
//! drawing lives in `ui`.

use crossterm::event::{KeyCode, KeyEvent};

pub mod message;
pub mod quiz;
pub mod review;
pub mod vocabulary;
pub mod writing;

pub use message::{MessageScratch, MessageScreen, MESSAGE_MAX_CHARS};
pub use quiz::{QuizScratch, QuizScreen};
pub use review::ReviewScreen;
pub use vocabulary::{CardScratch, VocabularyScreen};
pub use writing::{WritingScratch, WritingScreen};

/// Modal shown over a screen. Any dismiss key closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    Notice { title: String, body: String },
    /// Daily correction quota is used up.
    Premium,
    /// Last item finished.
    Celebration { body: String },
}

impl Popup {
    pub fn notice(title: &str, body: &str) -> Self {
        Popup::Notice {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

pub(crate) fn is_dismiss_key(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
    )
}
