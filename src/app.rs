use crate::catalog::Catalog;
use crate::logger;
use crate::models::AppState;
use crate::screens::{MessageScreen, QuizScreen, ReviewScreen, VocabularyScreen, WritingScreen};
use crate::speech::Speaker;
use crate::store::{KeyValueStore, ProgressRepository};
use crate::ui::{
    draw_menu, draw_message, draw_quiz, draw_review, draw_vocabulary, draw_writing,
};
use crate::usage::today_label;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::Frame;

/// The screen currently shown, with its state. Rebuilt on every entry.
pub enum Screen {
    Main,
    Vocabulary(VocabularyScreen),
    Writing(WritingScreen),
    Quiz(QuizScreen),
    Review(ReviewScreen),
    MessageWriting(MessageScreen),
}

pub struct App<S: KeyValueStore> {
    pub state: AppState,
    pub screen: Screen,
    pub menu_index: usize,
    pub should_quit: bool,
    catalog: Catalog,
    progress: ProgressRepository<S>,
    speaker: Speaker,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(catalog: Catalog, progress: ProgressRepository<S>, speaker: Speaker) -> Self {
        Self {
            state: AppState::Main,
            screen: Screen::Main,
            menu_index: 0,
            should_quit: false,
            catalog,
            progress,
            speaker,
        }
    }

    pub fn progress(&self) -> &ProgressRepository<S> {
        &self.progress
    }

    pub fn enter(&mut self, state: AppState) {
        logger::log(&format!("Entering {:?}", state));
        self.state = state;
        self.screen = match state {
            AppState::Main => Screen::Main,
            AppState::Vocabulary => {
                Screen::Vocabulary(VocabularyScreen::new(self.catalog.vocabulary(), &self.progress))
            }
            AppState::Writing => {
                let screen = WritingScreen::new(self.catalog.writing_items());
                screen.announce(&self.speaker);
                Screen::Writing(screen)
            }
            AppState::Quiz => Screen::Quiz(QuizScreen::new(self.catalog.quiz_items())),
            AppState::Review => Screen::Review(ReviewScreen::new(&self.catalog, &self.progress)),
            AppState::MessageWriting => Screen::MessageWriting(MessageScreen::new(
                self.catalog.scenario_items(),
                &self.progress,
                today_label(),
            )),
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let mut next = self.state;
        match &mut self.screen {
            Screen::Main => match key.code {
                KeyCode::Up => self.menu_index = self.menu_index.saturating_sub(1),
                KeyCode::Down => {
                    self.menu_index = (self.menu_index + 1).min(AppState::MENU.len() - 1)
                }
                KeyCode::Char(c @ '1'..='5') => {
                    self.menu_index = (c as u8 - b'1') as usize;
                    next = AppState::MENU[self.menu_index];
                }
                KeyCode::Enter => next = AppState::MENU[self.menu_index],
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            Screen::Vocabulary(screen) => {
                screen.handle_key(key, &mut next, &mut self.progress, &self.speaker)
            }
            Screen::Writing(screen) => screen.handle_key(key, &mut next, &self.speaker),
            Screen::Quiz(screen) => screen.handle_key(key, &mut next, &mut self.progress),
            Screen::Review(screen) => {
                screen.handle_key(key, &mut next, &self.catalog, &mut self.progress)
            }
            Screen::MessageWriting(screen) => {
                screen.handle_key(key, &mut next, &mut self.progress)
            }
        }

        if next != self.state {
            self.enter(next);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let Screen::Vocabulary(screen) = &mut self.screen {
            screen.handle_mouse(mouse, &mut self.progress);
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        match &mut self.screen {
            Screen::Main => draw_menu(f, self.menu_index, !self.catalog.is_empty()),
            Screen::Vocabulary(screen) => draw_vocabulary(f, screen),
            Screen::Writing(screen) => draw_writing(f, screen),
            Screen::Quiz(screen) => draw_quiz(f, screen),
            Screen::Review(screen) => draw_review(f, screen),
            Screen::MessageWriting(screen) => draw_message(f, screen),
        }
    }
}
