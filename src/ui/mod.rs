pub mod layout;
mod menu;
mod message;
mod popup;
mod quiz;
mod review;
mod vocabulary;
mod writing;

pub use layout::{calculate_card_chunks, calculate_screen_chunks, centered_rect};
pub use menu::draw_menu;
pub use message::draw_message;
pub use popup::draw_popup;
pub use quiz::draw_quiz;
pub use review::draw_review;
pub use vocabulary::draw_vocabulary;
pub use writing::draw_writing;
