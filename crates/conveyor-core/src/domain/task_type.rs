//! Task kinds dispatched onto the queue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ML work a dispatch message requests.
///
/// Design note: a closed enum instead of open string tags, so adding a task
/// kind is a compile-checked change and consumers can match exhaustively.
/// The wire strings are stable; `as_str` is what goes into stream messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Train a model from scratch.
    Learn,
    /// Run inference against a trained model.
    Predict,
    /// Continue training an existing model on new data.
    Finetune,
    /// Produce a description/analysis of a trained model.
    Describe,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Learn => "learn",
            TaskType::Predict => "predict",
            TaskType::Finetune => "finetune",
            TaskType::Describe => "describe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "learn" => Some(TaskType::Learn),
            "predict" => Some(TaskType::Predict),
            "finetune" => Some(TaskType::Finetune),
            "describe" => Some(TaskType::Describe),
            _ => None,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TaskType::Learn, "learn")]
    #[case(TaskType::Predict, "predict")]
    #[case(TaskType::Finetune, "finetune")]
    #[case(TaskType::Describe, "describe")]
    fn wire_strings_round_trip(#[case] task_type: TaskType, #[case] wire: &str) {
        assert_eq!(task_type.as_str(), wire);
        assert_eq!(TaskType::from_str(wire), Some(task_type));
    }

    #[test]
    fn unknown_wire_string_is_rejected() {
        assert_eq!(TaskType::from_str("retrain"), None);
    }
}
