use crate::catalog::{Catalog, CategoryStat};
use crate::models::{AppState, LearningItem, MessageLearningRecord, WrongAnswer};
use crate::navigation::StudySession;
use crate::store::{or_default_logged, Flag, KeyValueStore, ProgressRepository};
use crossterm::event::{KeyCode, KeyEvent};

/// Progress overview. The selectable list holds the checked words.
pub struct ReviewScreen {
    pub stats: Vec<CategoryStat>,
    pub checked: StudySession<LearningItem, ()>,
    pub difficult: Vec<LearningItem>,
    pub wrong_answers: Vec<WrongAnswer>,
    pub message_records: Vec<MessageLearningRecord>,
}

impl ReviewScreen {
    pub fn new<S: KeyValueStore>(catalog: &Catalog, progress: &ProgressRepository<S>) -> Self {
        let mut screen = Self {
            stats: Vec::new(),
            checked: StudySession::new(Vec::new()),
            difficult: Vec::new(),
            wrong_answers: Vec::new(),
            message_records: Vec::new(),
        };
        screen.refresh(catalog, progress);
        screen
    }

    /// Re-reads progress and refilters. The selection is kept where possible.
    pub fn refresh<S: KeyValueStore>(&mut self, catalog: &Catalog, progress: &ProgressRepository<S>) {
        let checked = or_default_logged(progress.flags(Flag::Checked), "load checked words");
        let difficult = or_default_logged(progress.flags(Flag::Difficult), "load difficult words");

        self.stats = catalog.category_stats(&checked);
        self.checked.replace_items(catalog.flagged(&checked));
        self.difficult = catalog.flagged(&difficult);
        self.wrong_answers = or_default_logged(progress.wrong_answers(), "load wrong answers");
        self.message_records =
            or_default_logged(progress.message_records(), "load message records");
    }

    pub fn handle_key<S: KeyValueStore>(
        &mut self,
        key: KeyEvent,
        app_state: &mut AppState,
        catalog: &Catalog,
        progress: &mut ProgressRepository<S>,
    ) {
        match key.code {
            KeyCode::Esc => *app_state = AppState::Main,
            KeyCode::Up => {
                self.checked.previous();
            }
            KeyCode::Down => {
                self.checked.next();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.checked.current().map(|item| item.id) {
                    or_default_logged(
                        progress.set_flag(Flag::Checked, id, false),
                        "uncheck word",
                    );
                    self.refresh(catalog, progress);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{catalog, key, repo};

    #[test]
    fn test_stats_and_lists_follow_progress() {
        let catalog = catalog();
        let mut progress = repo();
        progress.set_flag(Flag::Checked, 2, true).unwrap();
        progress.set_flag(Flag::Checked, 3, true).unwrap();
        progress.set_flag(Flag::Checked, 42, true).unwrap();
        progress.set_flag(Flag::Difficult, 1, true).unwrap();

        let screen = ReviewScreen::new(&catalog, &progress);
        let ids: Vec<_> = screen.checked.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(screen.difficult.len(), 1);

        let hospital = screen
            .stats
            .iter()
            .find(|s| s.category == "병원")
            .unwrap();
        assert_eq!(hospital.checked, 2);
        assert_eq!(hospital.total, 2);
        assert_eq!(hospital.percent(), 100);
        assert_eq!(screen.stats[0].category, "가족");
        assert_eq!(screen.stats[0].percent(), 0);
    }

    #[test]
    fn test_uncheck_refilters_and_clamps_selection() {
        let catalog = catalog();
        let mut progress = repo();
        let mut state = AppState::Review;
        progress.set_flag(Flag::Checked, 1, true).unwrap();
        progress.set_flag(Flag::Checked, 2, true).unwrap();

        let mut screen = ReviewScreen::new(&catalog, &progress);
        screen.handle_key(key(KeyCode::Down), &mut state, &catalog, &mut progress);
        assert_eq!(screen.checked.current().unwrap().id, 2);

        screen.handle_key(key(KeyCode::Char(' ')), &mut state, &catalog, &mut progress);
        assert!(!progress.is_flagged(Flag::Checked, 2).unwrap());
        assert_eq!(screen.checked.len(), 1);
        assert_eq!(screen.checked.current().unwrap().id, 1);

        screen.handle_key(key(KeyCode::Enter), &mut state, &catalog, &mut progress);
        assert!(screen.checked.is_empty());
        screen.handle_key(key(KeyCode::Enter), &mut state, &catalog, &mut progress);
        assert_eq!(state, AppState::Review);
    }

    #[test]
    fn test_failing_store_renders_empty() {
        let catalog = catalog();
        let progress = ProgressRepository::new(crate::store::MemoryStore::failing());
        let screen = ReviewScreen::new(&catalog, &progress);
        assert!(screen.checked.is_empty());
        assert!(screen.wrong_answers.is_empty());
        assert!(screen.stats.iter().all(|s| s.checked == 0));
    }
}
