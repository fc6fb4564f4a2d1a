//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and its editable draft.
//! - Own field-level validation shared by create, update and rehydration.
//!
//! # Invariants
//! - `id` is stable and never reassigned after creation.
//! - `text` is trimmed and never empty for a stored record.
//! - `created_at` is stamped once at creation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for one todo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Parses the hyphenated textual form used by frontends.
    pub fn parse_str(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_str(value)
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority `{other}`; expected low|medium|high")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Shopping,
    Health,
    Other,
}

impl Category {
    /// Lowercase name, also used as the searchable category text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "shopping" => Ok(Self::Shopping),
            "health" => Ok(Self::Health),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "unknown category `{other}`; expected personal|work|shopping|health|other"
            )),
        }
    }
}

/// Validation failure for todo writes and rehydrated records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `text` is empty after trimming.
    EmptyText,
    /// `id` is the nil UUID.
    NilId,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text must not be empty"),
            Self::NilId => write!(f, "todo id must not be nil"),
        }
    }
}

impl Error for TodoValidationError {}

/// Editable fields of a todo, used for both add and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub text: String,
    pub priority: Priority,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
}

impl TodoDraft {
    /// Draft with default priority/category and no due date.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Returns the trimmed text, or `EmptyText` when nothing is left.
    pub fn normalized_text(&self) -> Result<String, TodoValidationError> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Err(TodoValidationError::EmptyText);
        }
        Ok(trimmed.to_string())
    }
}

/// Canonical todo record.
///
/// Serialized with camelCase keys; this is the persisted wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TodoRecord")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub category: Category,
    /// Calendar date, serialized as `YYYY-MM-DD`. Not range-checked.
    pub due_date: Option<NaiveDate>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Todo {
    /// Creates an open todo from a draft with a fresh id.
    ///
    /// # Errors
    /// - `EmptyText` when the draft text trims to empty.
    pub fn from_draft(draft: &TodoDraft, created_at: i64) -> Result<Self, TodoValidationError> {
        Ok(Self {
            id: TodoId::new(),
            text: draft.normalized_text()?,
            completed: false,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            created_at,
        })
    }

    /// Replaces the editable fields, keeping `id`, `completed`, `created_at`.
    pub fn apply_draft(&mut self, draft: &TodoDraft) -> Result<(), TodoValidationError> {
        self.text = draft.normalized_text()?;
        self.priority = draft.priority;
        self.category = draft.category;
        self.due_date = draft.due_date;
        Ok(())
    }

    /// Draft prefilled from this record, for entering edit mode.
    pub fn to_draft(&self) -> TodoDraft {
        TodoDraft {
            text: self.text.clone(),
            priority: self.priority,
            category: self.category,
            due_date: self.due_date,
        }
    }

    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        if self.text.trim().is_empty() {
            return Err(TodoValidationError::EmptyText);
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Unvalidated serde mirror of [`Todo`]; decoding goes through `validate()`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoRecord {
    id: TodoId,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    created_at: i64,
}

impl TryFrom<TodoRecord> for Todo {
    type Error = TodoValidationError;

    fn try_from(value: TodoRecord) -> Result<Self, Self::Error> {
        let todo = Todo {
            id: value.id,
            text: value.text,
            completed: value.completed,
            priority: value.priority,
            category: value.category,
            due_date: value.due_date,
            created_at: value.created_at,
        };
        todo.validate()?;
        Ok(todo)
    }
}

/// Current wall clock in epoch milliseconds; falls back to 0 before 1970.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Category, Priority, Todo, TodoDraft, TodoValidationError};

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Shopping".parse::<Category>().unwrap(), Category::Shopping);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn draft_text_is_trimmed() {
        let draft = TodoDraft::new("  walk the dog \n");
        assert_eq!(draft.normalized_text().unwrap(), "walk the dog");
    }

    #[test]
    fn whitespace_draft_is_rejected() {
        let err = Todo::from_draft(&TodoDraft::new(" \t "), 0).unwrap_err();
        assert_eq!(err, TodoValidationError::EmptyText);
    }

    #[test]
    fn defaults_are_medium_personal() {
        let todo = Todo::from_draft(&TodoDraft::new("x"), 1).unwrap();
        assert_eq!(todo.priority, Priority::Medium);
        assert_eq!(todo.category, Category::Personal);
        assert!(todo.is_active());
    }
}
