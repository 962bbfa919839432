use super::{is_dismiss_key, Popup};
use crate::models::{AppState, ItemId, LearningItem};
use crate::navigation::{Step, StudySession};
use crate::speech::{Speaker, KOREAN};
use crate::store::{or_default_logged, Flag, KeyValueStore, ProgressRepository};
use crate::swipe::{SwipeDirection, SwipeOutcome, SwipeTracker};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::collections::{BTreeMap, BTreeSet};

pub const COMPLETED_TITLE: &str = "완료";
pub const COMPLETED_BODY: &str = "모든 단어 학습을 마쳤습니다.";

/// Per-card state, cleared whenever the card changes.
#[derive(Debug, Clone, Default)]
pub struct CardScratch {
    /// Indices into `related_terms` that are ticked.
    pub related_checked: BTreeSet<usize>,
    pub swipe: SwipeTracker,
}

pub struct VocabularyScreen {
    pub session: StudySession<LearningItem, CardScratch>,
    pub checked: BTreeMap<ItemId, bool>,
    pub difficult: BTreeMap<ItemId, bool>,
    pub popup: Option<Popup>,
    /// Where the card was last drawn. Mouse swipes are measured against its width.
    pub card_area: Rect,
}

impl VocabularyScreen {
    pub fn new<S: KeyValueStore>(items: Vec<LearningItem>, progress: &ProgressRepository<S>) -> Self {
        let mut screen = Self {
            session: StudySession::new(items),
            checked: BTreeMap::new(),
            difficult: BTreeMap::new(),
            popup: None,
            card_area: Rect::default(),
        };
        screen.refresh(progress);
        screen
    }

    pub fn refresh<S: KeyValueStore>(&mut self, progress: &ProgressRepository<S>) {
        self.checked = or_default_logged(progress.flags(Flag::Checked), "load checked words");
        self.difficult = or_default_logged(progress.flags(Flag::Difficult), "load difficult words");
    }

    pub fn is_checked(&self, id: ItemId) -> bool {
        self.checked.get(&id).copied().unwrap_or(false)
    }

    pub fn is_difficult(&self, id: ItemId) -> bool {
        self.difficult.get(&id).copied().unwrap_or(false)
    }

    pub fn handle_key<S: KeyValueStore>(
        &mut self,
        key: KeyEvent,
        app_state: &mut AppState,
        progress: &mut ProgressRepository<S>,
        speaker: &Speaker,
    ) {
        if self.popup.is_some() {
            if is_dismiss_key(&key) {
                self.popup = None;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => *app_state = AppState::Main,
            KeyCode::Up => {
                self.session.previous();
            }
            KeyCode::Down => self.advance(),
            KeyCode::Right => self.commit_swipe(SwipeDirection::Right, progress),
            KeyCode::Left => self.commit_swipe(SwipeDirection::Left, progress),
            KeyCode::Char('c') => self.toggle_checked(progress),
            KeyCode::Char('s') => {
                if let Some(item) = self.session.current() {
                    speaker.play_or_speak(
                        item.audio_word_ko_url.as_deref(),
                        &item.korean_word,
                        KOREAN,
                    );
                }
            }
            KeyCode::Char('e') => {
                if let Some(item) = self.session.current() {
                    speaker.play_or_speak(
                        item.audio_example_ko_url.as_deref(),
                        &item.example_ko,
                        KOREAN,
                    );
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                let index = (c as u8 - b'1') as usize;
                self.toggle_related(index, progress);
            }
            _ => {}
        }
    }

    pub fn handle_mouse<S: KeyValueStore>(
        &mut self,
        mouse: MouseEvent,
        progress: &mut ProgressRepository<S>,
    ) {
        if self.popup.is_some() {
            return;
        }
        let x = mouse.column as f64;
        let width = self.card_area.width as f64;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let inside = mouse.column >= self.card_area.x
                    && mouse.column < self.card_area.x + self.card_area.width
                    && mouse.row >= self.card_area.y
                    && mouse.row < self.card_area.y + self.card_area.height;
                if inside {
                    self.session.scratch.swipe.press(x);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.session.scratch.swipe.drag(x, width);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if !self.session.scratch.swipe.is_dragging() {
                    return;
                }
                if let SwipeOutcome::Commit(direction) =
                    self.session.scratch.swipe.release(x, width)
                {
                    self.commit_swipe(direction, progress);
                }
            }
            _ => {}
        }
    }

    /// Right marks the card as known, left as difficult. Either way the next card
    /// is shown.
    fn commit_swipe<S: KeyValueStore>(
        &mut self,
        direction: SwipeDirection,
        progress: &mut ProgressRepository<S>,
    ) {
        let Some(id) = self.session.current().map(|item| item.id) else {
            return;
        };
        match direction {
            SwipeDirection::Right => {
                or_default_logged(progress.set_flag(Flag::Checked, id, true), "mark word known");
                self.checked.insert(id, true);
            }
            SwipeDirection::Left => {
                or_default_logged(
                    progress.set_flag(Flag::Difficult, id, true),
                    "mark word difficult",
                );
                self.difficult.insert(id, true);
            }
        }
        self.advance();
    }

    fn advance(&mut self) {
        if self.session.next() == Step::Completed {
            self.session.scratch.swipe.reset();
            self.popup = Some(Popup::notice(COMPLETED_TITLE, COMPLETED_BODY));
        }
    }

    fn toggle_checked<S: KeyValueStore>(&mut self, progress: &mut ProgressRepository<S>) {
        let Some(id) = self.session.current().map(|item| item.id) else {
            return;
        };
        let value = or_default_logged(progress.toggle_flag(Flag::Checked, id), "toggle checked word");
        self.set_cached(id, value);
    }

    /// Ticks a related term. The word counts as checked while any related term is ticked.
    fn toggle_related<S: KeyValueStore>(
        &mut self,
        index: usize,
        progress: &mut ProgressRepository<S>,
    ) {
        let Some(item) = self.session.current() else {
            return;
        };
        if index >= item.related_terms.len() {
            return;
        }
        let id = item.id;
        let ticked = &mut self.session.scratch.related_checked;
        if !ticked.remove(&index) {
            ticked.insert(index);
        }
        let any = !ticked.is_empty();
        or_default_logged(progress.set_flag(Flag::Checked, id, any), "save checked word");
        self.set_cached(id, any);
    }

    fn set_cached(&mut self, id: ItemId, value: bool) {
        if value {
            self.checked.insert(id, true);
        } else {
            self.checked.remove(&id);
        }
    }
}
