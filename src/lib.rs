pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grading;
pub mod input;
pub mod logger;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod speech;
pub mod store;
pub mod swipe;
pub mod ui;
pub mod usage;
pub mod utils;

// Re-exports for convenience
pub use app::App;
pub use catalog::{load_catalog, parse_catalog, Catalog, CategoryStat};
pub use config::AppConfig;
pub use error::{CatalogError, StoreError, StoreResult};
pub use grading::{annotate, evaluate_choice, evaluate_writing, mock_correction, Verdict};
pub use models::{AppState, ItemId, LearningItem, MessageLearningRecord, WrongAnswer};
pub use navigation::{Cursor, Step, StudySession};
pub use speech::Speaker;
pub use store::{open_store, Flag, KeyValueStore, MemoryStore, ProgressRepository, SqliteStore};
pub use swipe::{classify_release, SwipeDirection, SwipeOutcome, SwipeTracker};
pub use usage::{GateDecision, UsageGate};
pub use utils::calculate_wrapped_cursor_position;
