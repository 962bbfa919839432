use super::{is_dismiss_key, Popup};
use crate::grading::{evaluate_choice, Verdict};
use crate::models::{AppState, LearningItem, WrongAnswer};
use crate::navigation::{Step, StudySession};
use crate::store::{or_default_logged, KeyValueStore, ProgressRepository};
use crossterm::event::{KeyCode, KeyEvent};

pub const COMPLETED_BODY: &str = "Bạn đã hoàn thành tất cả các câu đố!";

#[derive(Debug, Clone, Default)]
pub struct QuizScratch {
    pub selected: usize,
    pub answered: Option<Verdict>,
}

/// Sentence quiz: pick the Korean sentence that translates the Vietnamese one.
pub struct QuizScreen {
    pub session: StudySession<LearningItem, QuizScratch>,
    pub popup: Option<Popup>,
}

impl QuizScreen {
    pub fn new(items: Vec<LearningItem>) -> Self {
        Self {
            session: StudySession::new(items),
            popup: None,
        }
    }

    pub fn options(&self) -> &[String] {
        self.session
            .current()
            .and_then(|item| item.korean_options.as_deref())
            .unwrap_or(&[])
    }

    pub fn handle_key<S: KeyValueStore>(
        &mut self,
        key: KeyEvent,
        app_state: &mut AppState,
        progress: &mut ProgressRepository<S>,
    ) {
        if self.popup.is_some() {
            if is_dismiss_key(&key) {
                self.popup = None;
            }
            return;
        }

        let answered = self.session.scratch.answered.is_some();
        match key.code {
            KeyCode::Esc => *app_state = AppState::Main,
            KeyCode::Up if !answered => {
                let scratch = &mut self.session.scratch;
                scratch.selected = scratch.selected.saturating_sub(1);
            }
            KeyCode::Down if !answered => {
                let last = self.options().len().saturating_sub(1);
                let scratch = &mut self.session.scratch;
                scratch.selected = (scratch.selected + 1).min(last);
            }
            KeyCode::Enter if !answered => self.answer(progress),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') => self.advance(),
            KeyCode::Left | KeyCode::Char('p') => {
                self.session.previous();
            }
            _ => {}
        }
    }

    fn answer<S: KeyValueStore>(&mut self, progress: &mut ProgressRepository<S>) {
        let Some(item) = self.session.current() else {
            return;
        };
        let selected = self.session.scratch.selected;
        let verdict = evaluate_choice(item, selected);
        if verdict == Verdict::Incorrect
            && let Some(wrong) = wrong_answer(item, selected)
        {
            or_default_logged(progress.record_wrong_answer(wrong), "record wrong answer");
        }
        self.session.scratch.answered = Some(verdict);
    }

    fn advance(&mut self) {
        if self.session.next() == Step::Completed {
            self.popup = Some(Popup::Celebration {
                body: COMPLETED_BODY.to_string(),
            });
        }
    }
}

fn wrong_answer(item: &LearningItem, selected: usize) -> Option<WrongAnswer> {
    let options = item.korean_options.as_ref()?;
    let correct = options.get(item.correct_answer?)?;
    Some(WrongAnswer {
        id: item.id,
        chosen: options.get(selected).cloned().unwrap_or_default(),
        correct: correct.clone(),
        category: item.category.clone(),
        timestamp: chrono::Local::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{key, quiz_items, repo};

    #[test]
    fn test_correct_choice_is_not_recorded() {
        let mut progress = repo();
        let mut state = AppState::Quiz;
        let mut screen = QuizScreen::new(quiz_items(2));

        screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
        assert_eq!(screen.session.scratch.answered, Some(Verdict::Correct));
        assert!(progress.wrong_answers().unwrap().is_empty());

        screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
        assert_eq!(screen.session.index(), 1);
        assert_eq!(screen.session.scratch.answered, None);
    }

    #[test]
    fn test_wrong_choice_recorded_once_across_retries() {
        let mut progress = repo();
        let mut state = AppState::Quiz;
        let mut screen = QuizScreen::new(quiz_items(5));

        screen.handle_key(key(KeyCode::Right), &mut state, &mut progress);
        screen.handle_key(key(KeyCode::Right), &mut state, &mut progress);
        assert_eq!(screen.session.current().unwrap().id, 3);

        for chosen_down in [1, 2] {
            for _ in 0..chosen_down {
                screen.handle_key(key(KeyCode::Down), &mut state, &mut progress);
            }
            screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
            assert_eq!(screen.session.scratch.answered, Some(Verdict::Incorrect));
            // leave and come back to retry
            screen.handle_key(key(KeyCode::Char('n')), &mut state, &mut progress);
            screen.handle_key(key(KeyCode::Char('p')), &mut state, &mut progress);
            assert_eq!(screen.session.scratch.answered, None);
        }

        let records = progress.wrong_answers().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 3);
        assert_eq!(records[0].chosen, "오답3");
        assert_eq!(records[0].correct, "정답3");
        assert_eq!(records[0].category, "병원");
        assert!(chrono::DateTime::parse_from_rfc3339(&records[0].timestamp).is_ok());
    }

    #[test]
    fn test_selection_is_bounded_and_locked_after_answer() {
        let mut progress = repo();
        let mut state = AppState::Quiz;
        let mut screen = QuizScreen::new(quiz_items(1));

        screen.handle_key(key(KeyCode::Up), &mut state, &mut progress);
        assert_eq!(screen.session.scratch.selected, 0);
        for _ in 0..5 {
            screen.handle_key(key(KeyCode::Down), &mut state, &mut progress);
        }
        assert_eq!(screen.session.scratch.selected, 2);

        screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
        screen.handle_key(key(KeyCode::Up), &mut state, &mut progress);
        assert_eq!(screen.session.scratch.selected, 2);
    }

    #[test]
    fn test_finishing_last_question_celebrates() {
        let mut progress = repo();
        let mut state = AppState::Quiz;
        let mut screen = QuizScreen::new(quiz_items(1));

        screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
        screen.handle_key(key(KeyCode::Enter), &mut state, &mut progress);
        assert!(matches!(screen.popup, Some(Popup::Celebration { .. })));
        screen.handle_key(key(KeyCode::Esc), &mut state, &mut progress);
        assert!(screen.popup.is_none());
        assert_eq!(state, AppState::Quiz);
    }
}
