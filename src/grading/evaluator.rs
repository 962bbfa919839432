use crate::models::LearningItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn from_bool(is_correct: bool) -> Self {
        if is_correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

/// How one position of the writing drill is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharMark {
    Correct,
    Wrong,
    /// Not typed yet; the target character is shown as a placeholder.
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedChar {
    pub ch: char,
    pub mark: CharMark,
}

/// Exact match after trimming both sides.
pub fn evaluate_writing(target: &str, typed: &str) -> Verdict {
    Verdict::from_bool(typed.trim() == target.trim())
}

/// Position-wise annotation. Index `i` compares `typed[i]` with `target[i]`, so a
/// transposition marks both positions wrong.
pub fn annotate(target: &str, typed: &str, show_diff: bool) -> Vec<AnnotatedChar> {
    let target_chars: Vec<char> = target.chars().collect();
    let typed_chars: Vec<char> = typed.chars().collect();
    let max_len = target_chars.len().max(typed_chars.len());

    let mut marks = Vec::with_capacity(max_len);
    for i in 0..max_len {
        let t = target_chars.get(i).copied();
        let v = typed_chars.get(i).copied();
        match (v, t) {
            (Some(v), t) if show_diff => marks.push(AnnotatedChar {
                ch: v,
                mark: if Some(v) == t {
                    CharMark::Correct
                } else {
                    CharMark::Wrong
                },
            }),
            (_, Some(t)) => marks.push(AnnotatedChar {
                ch: t,
                mark: CharMark::Ghost,
            }),
            _ => {}
        }
    }
    marks
}

/// Index equality against the catalog-declared answer. Items without a quiz are
/// never correct.
pub fn evaluate_choice(item: &LearningItem, selected: usize) -> Verdict {
    Verdict::from_bool(item.correct_answer == Some(selected))
}
