//! Grading of a recall attempt against the memorized word grid.

use serde::{Deserialize, Serialize};

/// Shown in place of an answer the user left blank.
const EMPTY_ANSWER: &str = "(empty)";

/// A cell the user got wrong. Rows and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mistake {
    /// Row, starting at 1.
    pub row: usize,
    /// Column, starting at 1.
    pub col: usize,
    /// The word that was shown.
    pub correct_word: String,
    /// What the user typed.
    pub user_answer: String,
}

/// Outcome of grading one recall attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallGrade {
    /// Cells answered correctly.
    pub correct: usize,
    /// Cells in the grid.
    pub total: usize,
    /// `correct / total` as a rounded percentage, 0 for an empty grid.
    pub percentage: u32,
    /// Every wrong cell in row-major order.
    pub mistakes: Vec<Mistake>,
}

impl RecallGrade {
    /// Number of wrong cells.
    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }
}

/// Compare typed answers with the grid, ignoring case.
///
/// `answers` may be ragged or shorter than `words`; missing cells count as
/// blank answers.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn grade_recall<W, A>(words: &[Vec<W>], answers: &[Vec<A>]) -> RecallGrade
where
    W: AsRef<str>,
    A: AsRef<str>,
{
    let mut correct = 0;
    let mut total = 0;
    let mut mistakes = Vec::new();

    for (row_idx, row) in words.iter().enumerate() {
        for (col_idx, word) in row.iter().enumerate() {
            total += 1;
            let word = word.as_ref();
            let answer = answers
                .get(row_idx)
                .and_then(|r| r.get(col_idx))
                .map_or("", |a| a.as_ref());

            if answer.to_lowercase() == word.to_lowercase() {
                correct += 1;
            } else {
                mistakes.push(Mistake {
                    row: row_idx + 1,
                    col: col_idx + 1,
                    correct_word: word.to_string(),
                    user_answer: if answer.is_empty() {
                        EMPTY_ANSWER.to_string()
                    } else {
                        answer.to_string()
                    },
                });
            }
        }
    }

    let percentage = if total > 0 {
        (correct as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };

    RecallGrade {
        correct,
        total,
        percentage,
        mistakes,
    }
}
