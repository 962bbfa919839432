use super::{is_dismiss_key, Popup};
use crate::grading::{evaluate_writing, Verdict};
use crate::input::TextInput;
use crate::models::{AppState, LearningItem};
use crate::navigation::{Step, StudySession};
use crate::speech::{Speaker, KOREAN};
use crossterm::event::{KeyCode, KeyEvent};

pub const CORRECT_TITLE: &str = "정답입니다!";
pub const WRONG_TITLE: &str = "오답";
pub const WRONG_BODY: &str = "틀린 부분을 확인하고 수정해 보세요.";
pub const COMPLETED_BODY: &str = "모든 쓰기 연습을 마쳤습니다.";

#[derive(Debug, Clone, Default)]
pub struct WritingScratch {
    pub input: TextInput,
    pub show_diff: bool,
    pub verdict: Option<Verdict>,
    pub input_scroll_y: u16,
}

/// Dictation drill: the target sentence is spoken and the learner types it.
pub struct WritingScreen {
    pub session: StudySession<LearningItem, WritingScratch>,
    pub popup: Option<Popup>,
}

impl WritingScreen {
    pub fn new(items: Vec<LearningItem>) -> Self {
        Self {
            session: StudySession::new(items),
            popup: None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.session
            .current()
            .and_then(|item| item.writing_challenge.as_deref())
    }

    /// Speaks the current target. Called when the screen opens and after each move.
    pub fn announce(&self, speaker: &Speaker) {
        if let Some(target) = self.target() {
            speaker.speak(target, KOREAN);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, app_state: &mut AppState, speaker: &Speaker) {
        if self.popup.is_some() {
            if is_dismiss_key(&key) {
                self.popup = None;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => *app_state = AppState::Main,
            KeyCode::Tab => self.announce(speaker),
            KeyCode::Enter => self.submit(speaker),
            KeyCode::Up => {
                if let Step::Moved(_) = self.session.previous() {
                    self.announce(speaker);
                }
            }
            KeyCode::Down => self.advance(speaker),
            _ => {
                if self.session.scratch.input.handle_key(key) {
                    let scratch = &mut self.session.scratch;
                    scratch.show_diff = false;
                    scratch.verdict = None;
                }
            }
        }
    }

    fn submit(&mut self, speaker: &Speaker) {
        let Some(target) = self.target() else {
            return;
        };
        let verdict = evaluate_writing(target, self.session.scratch.input.value());
        self.session.scratch.verdict = Some(verdict);
        match verdict {
            Verdict::Correct => {
                self.popup = Some(Popup::notice(CORRECT_TITLE, ""));
                self.advance(speaker);
            }
            Verdict::Incorrect => {
                self.session.scratch.show_diff = true;
                self.popup = Some(Popup::notice(WRONG_TITLE, WRONG_BODY));
            }
        }
    }

    fn advance(&mut self, speaker: &Speaker) {
        match self.session.next() {
            Step::Moved(_) => self.announce(speaker),
            Step::Completed => {
                self.popup = Some(Popup::Celebration {
                    body: COMPLETED_BODY.to_string(),
                })
            }
            Step::Stayed => {}
        }
    }
}
