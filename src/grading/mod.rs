pub mod correction;
pub mod evaluator;

pub use correction::{feedback_comment, mock_correction, FeedbackLanguage};
pub use evaluator::{
    annotate, evaluate_choice, evaluate_writing, AnnotatedChar, CharMark, Verdict,
};
