use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::CalculationError;
use crate::rule::RecurrenceRule;

/// A scheduled task as stored in the `scheduler` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    /// Scheduled day, `YYYYMMDD`.
    pub date: String,
    pub title: String,
    pub comment: String,
    /// Repeat rule text; empty for one-off tasks.
    pub repeat: String,
}

impl Task {
    pub fn is_repeating(&self) -> bool {
        !self.repeat.is_empty()
    }

    /// Parses the stored repeat rule, `None` for one-off tasks.
    pub fn rule(&self) -> Result<Option<RecurrenceRule>, CalculationError> {
        if self.repeat.is_empty() {
            Ok(None)
        } else {
            self.repeat.parse().map(Some)
        }
    }
}

/// Input for creating a task. Empty `date` means today, empty `repeat` means one-off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTaskData {
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

/// Partial update; `None` keeps the stored value.
///
/// `date: Some(String::new())` resets the date to today and
/// `repeat: Some(String::new())` turns a repeating task into a one-off.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub repeat: Option<String>,
}

impl UpdateTaskData {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none() && self.comment.is_none() && self.repeat.is_none()
    }
}

#[derive(Debug)]
pub enum CompletionResult {
    /// A one-off task was done and removed.
    Removed(Task),
    /// A repeating task moved to its next occurrence.
    Rescheduled { task: Task, previous_date: String },
}
