use std::fmt;

use crate::constants::HYPOTHESIS_DELIMITER;
use crate::rules::Rule;

/// The coach's verdict on a set of learner traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub is_correct: bool,
    pub feedback: Vec<Rule>,
}

impl Evaluation {
    /// The learner reached the goal.
    pub fn correct() -> Self {
        Self {
            is_correct: true,
            feedback: Vec::new(),
        }
    }

    pub fn incorrect(feedback: Vec<Rule>) -> Self {
        Self {
            is_correct: false,
            feedback,
        }
    }

    /// Feedback rendered as a single line.
    pub fn feedback_str(&self) -> String {
        self.feedback
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(HYPOTHESIS_DELIMITER)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_correct {
            f.write_str("correct")
        } else {
            write!(f, "incorrect [{}]", self.feedback_str())
        }
    }
}
