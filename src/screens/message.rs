use super::{is_dismiss_key, Popup};
use crate::grading::{mock_correction, FeedbackLanguage};
use crate::input::TextInput;
use crate::logger;
use crate::models::{AppState, LearningItem, MessageLearningRecord};
use crate::navigation::{Step, StudySession};
use crate::store::{or_default_logged, KeyValueStore, ProgressRepository};
use crate::usage::{GateDecision, UsageGate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const MESSAGE_MAX_CHARS: usize = 200;
pub const DEFAULT_CATEGORY: &str = "기타";
pub const EMPTY_TITLE: &str = "Thông báo";
pub const EMPTY_BODY: &str = "Vui lòng nhập tin nhắn.";
pub const COMPLETED_BODY: &str = "Hoàn thành tất cả các bài tập viết tin nhắn!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionFeedback {
    pub original: String,
    pub corrected: String,
}

#[derive(Debug, Clone)]
pub struct MessageScratch {
    pub input: TextInput,
    pub show_hint: bool,
    pub feedback: Option<CorrectionFeedback>,
    pub input_scroll_y: u16,
}

impl Default for MessageScratch {
    fn default() -> Self {
        Self {
            input: TextInput::with_limit(MESSAGE_MAX_CHARS),
            show_hint: false,
            feedback: None,
            input_scroll_y: 0,
        }
    }
}

/// Scenario messages written to a guardian, with a quota-limited correction.
pub struct MessageScreen {
    pub session: StudySession<LearningItem, MessageScratch>,
    pub language: FeedbackLanguage,
    pub gate: UsageGate,
    pub popup: Option<Popup>,
    today: String,
}

impl MessageScreen {
    pub fn new<S: KeyValueStore>(
        items: Vec<LearningItem>,
        progress: &ProgressRepository<S>,
        today: String,
    ) -> Self {
        let mut screen = Self {
            session: StudySession::new(items),
            language: FeedbackLanguage::default(),
            gate: UsageGate::new(false, 0),
            popup: None,
            today,
        };
        screen.refresh(progress);
        screen
    }

    /// Reloads the premium flag and today's usage count.
    pub fn refresh<S: KeyValueStore>(&mut self, progress: &ProgressRepository<S>) {
        let premium = or_default_logged(progress.is_premium(), "load premium flag");
        let used = or_default_logged(progress.daily_usage(&self.today), "load daily usage");
        self.gate = UsageGate::new(premium, used);
    }

    pub fn handle_key<S: KeyValueStore>(
        &mut self,
        key: KeyEvent,
        app_state: &mut AppState,
        progress: &mut ProgressRepository<S>,
    ) {
        if let Some(popup) = &self.popup {
            if is_dismiss_key(&key) {
                if let Popup::Celebration { .. } = popup {
                    *app_state = AppState::Main;
                }
                self.popup = None;
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => *app_state = AppState::Main,
            KeyCode::Tab => {
                let scratch = &mut self.session.scratch;
                scratch.show_hint = !scratch.show_hint;
            }
            KeyCode::Char('l') if ctrl => self.language = self.language.toggle(),
            KeyCode::Char('u') if ctrl && !self.gate.premium => {
                self.popup = Some(Popup::Premium)
            }
            KeyCode::Enter => {
                if self.session.scratch.feedback.is_some() {
                    self.advance();
                } else {
                    self.request_correction(progress);
                }
            }
            KeyCode::Up => {
                self.session.previous();
            }
            KeyCode::Down => self.advance(),
            _ => {
                if self.session.scratch.input.handle_key(key) {
                    self.session.scratch.feedback = None;
                }
            }
        }
    }

    /// Runs the correction for the typed message, subject to the daily quota.
    pub fn request_correction<S: KeyValueStore>(&mut self, progress: &mut ProgressRepository<S>) {
        let Some(item) = self.session.current() else {
            return;
        };
        if self.session.scratch.input.is_blank() {
            self.popup = Some(Popup::notice(EMPTY_TITLE, EMPTY_BODY));
            return;
        }
        if self.gate.check() == GateDecision::Blocked {
            self.popup = Some(Popup::Premium);
            return;
        }

        let original = self.session.scratch.input.value().to_string();
        let corrected = mock_correction(&original);
        let record = MessageLearningRecord {
            id: chrono::Utc::now().timestamp_millis(),
            scenario_id: item.id,
            original_message: original.clone(),
            corrected_message: corrected.clone(),
            timestamp: chrono::Local::now().to_rfc3339(),
            category: if item.category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                item.category.clone()
            },
        };

        if !self.gate.premium {
            match progress.increment_daily_usage(&self.today) {
                Ok(count) => self.gate.used_today = count,
                Err(e) => {
                    logger::log(&format!("save daily usage failed: {}", e));
                    self.gate.record_use();
                }
            }
        }
        or_default_logged(progress.append_message_record(record), "save message record");
        self.session.scratch.feedback = Some(CorrectionFeedback {
            original,
            corrected,
        });
    }

    fn advance(&mut self) {
        if self.session.next() == Step::Completed {
            self.popup = Some(Popup::Celebration {
                body: COMPLETED_BODY.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{catalog, key, repo};
    use crate::store::MemoryStore;
    use crate::usage::DAILY_LIMIT;

    const TODAY: &str = "Thu Oct 15 2026";

    fn screen(progress: &ProgressRepository<MemoryStore>) -> MessageScreen {
        MessageScreen::new(catalog().scenario_items(), progress, TODAY.to_string())
    }

    fn type_and_submit(
        screen: &mut MessageScreen,
        text: &str,
        state: &mut AppState,
        progress: &mut ProgressRepository<MemoryStore>,
    ) {
        screen.session.scratch.input.set_value(text);
        screen.handle_key(key(KeyCode::Enter), state, progress);
    }

    #[test]
    fn test_correction_records_and_counts_usage() {
        let mut progress = repo();
        let mut state = AppState::MessageWriting;
        let mut screen = screen(&progress);

        type_and_submit(&mut screen, "할머니가 아프다", &mut state, &mut progress);
        assert_eq!(
            screen.session.scratch.feedback,
            Some(CorrectionFeedback {
                original: "할머니가 아프다".to_string(),
                corrected: "할머니께서 아프시다".to_string(),
            })
        );
        assert_eq!(progress.daily_usage(TODAY).unwrap(), 1);
        assert_eq!(screen.gate.remaining(), DAILY_LIMIT - 1);

        let records = progress.message_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scenario_id, 5);
        assert_eq!(records[0].category, "가족");
        assert_eq!(records[0].corrected_message, "할머니께서 아프시다");
    }

    #[test]
    fn test_empty_message_shows_notice_without_counting() {
        let mut progress = repo();
        let mut state = AppState::MessageWriting;
        let mut screen = screen(&progress);

        type_and_submit(&mut screen, "   ", &mut state, &mut progress);
        assert_eq!(screen.popup, Some(Popup::notice(EMPTY_TITLE, EMPTY_BODY)));
        assert_eq!(progress.daily_usage(TODAY).unwrap(), 0);
        assert!(progress.message_records().unwrap().is_empty());
    }

    #[test]
    fn test_quota_blocks_fourth_request() {
        let mut progress = repo();
        for _ in 0..DAILY_LIMIT {
            progress.increment_daily_usage(TODAY).unwrap();
        }
        let mut state = AppState::MessageWriting;
        let mut screen = screen(&progress);
        assert_eq!(screen.gate.remaining(), 0);

        type_and_submit(&mut screen, "안녕하세요", &mut state, &mut progress);
        assert_eq!(screen.popup, Some(Popup::Premium));
        assert!(screen.session.scratch.feedback.is_none());
        assert_eq!(progress.daily_usage(TODAY).unwrap(), DAILY_LIMIT);
        assert!(progress.message_records().unwrap().is_empty());

        screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
        assert!(screen.popup.is_none());
        assert_eq!(state, AppState::MessageWriting);
    }

    #[test]
    fn test_premium_is_unlimited_and_uncounted() {
        let mut progress = repo();
        progress.set_premium(true).unwrap();
        for _ in 0..DAILY_LIMIT {
            progress.increment_daily_usage(TODAY).unwrap();
        }
        let mut state = AppState::MessageWriting;
        let mut screen = screen(&progress);

        for _ in 0..5 {
            type_and_submit(&mut screen, "통증이 심하다", &mut state, &mut progress);
            assert!(screen.popup.is_none());
            screen.session.scratch.feedback = None;
        }
        assert_eq!(progress.daily_usage(TODAY).unwrap(), DAILY_LIMIT);
        assert_eq!(progress.message_records().unwrap().len(), 5);
    }

    #[test]
    fn test_move_resets_input_hint_and_feedback() {
        let mut progress = repo();
        let mut state = AppState::MessageWriting;
        let mut screen = screen(&progress);

        screen.handle_key(key(KeyCode::Tab), &mut state, &mut progress);
        assert!(screen.session.scratch.show_hint);
        type_and_submit(&mut screen, "병원에 간다", &mut state, &mut progress);
        assert!(screen.session.scratch.feedback.is_some());

        screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
        assert_eq!(screen.session.index(), 1);
        assert!(!screen.session.scratch.show_hint);
        assert!(screen.session.scratch.feedback.is_none());
        assert!(screen.session.scratch.input.value().is_empty());
        assert_eq!(
            screen.session.scratch.input.max_chars(),
            Some(MESSAGE_MAX_CHARS)
        );
    }

    #[test]
    fn test_celebration_returns_to_main() {
        let mut progress = repo();
        let mut state = AppState::MessageWriting;
        let mut screen = screen(&progress);
        let last = screen.session.len() - 1;
        screen.session.jump_to(last);

        screen.handle_key(key(KeyCode::Down), &mut state, &mut progress);
        assert!(matches!(screen.popup, Some(Popup::Celebration { .. })));
        screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
        assert_eq!(state, AppState::Main);
    }

    #[test]
    fn test_language_toggle_survives_moves() {
        let mut progress = repo();
        let mut state = AppState::MessageWriting;
        let mut screen = screen(&progress);

        screen.handle_key(
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
            &mut state,
            &mut progress,
        );
        assert_eq!(screen.language, FeedbackLanguage::Vietnamese);
        screen.handle_key(key(KeyCode::Down), &mut state, &mut progress);
        assert_eq!(screen.language, FeedbackLanguage::Vietnamese);
        assert!(screen.session.scratch.input.value().is_empty());
    }

    #[test]
    fn test_store_failure_still_corrects() {
        let mut progress = ProgressRepository::new(MemoryStore::failing());
        let mut state = AppState::MessageWriting;
        let mut screen = MessageScreen::new(
            catalog().scenario_items(),
            &progress,
            TODAY.to_string(),
        );

        type_and_submit(&mut screen, "할머니가 아프다", &mut state, &mut progress);
        assert!(screen.session.scratch.feedback.is_some());
        assert_eq!(screen.gate.used_today, 1);
    }
}
