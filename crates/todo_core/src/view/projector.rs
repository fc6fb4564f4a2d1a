//! Filtered/searched projection of the todo collection.
//!
//! # Responsibility
//! - Derive the visible list from items plus ephemeral filter state.
//! - Aggregate statistics over the full collection.
//!
//! # Invariants
//! - Pure: no I/O, no mutation of inputs.
//! - Status filter runs before search; surviving items keep insertion order.
//! - Statistics ignore the filter state.

use crate::model::todo::{Priority, Todo};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Three-way selector over completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown status `{other}`; expected all|active|completed")),
        }
    }
}

/// Ephemeral view filters. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub status: StatusFilter,
    /// Case-insensitive substring matched against text and category.
    pub search_query: String,
}

impl FilterState {
    pub fn with_status(status: StatusFilter) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn with_search(query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..Self::default()
        }
    }
}

/// Aggregate counters over the unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub high_priority_active: usize,
}

impl TodoStats {
    pub fn from_items(items: &[Todo]) -> Self {
        let completed = items.iter().filter(|todo| todo.completed).count();
        let high_priority_active = items
            .iter()
            .filter(|todo| !todo.completed && todo.priority == Priority::High)
            .count();
        Self {
            total: items.len(),
            active: items.len() - completed,
            completed,
            high_priority_active,
        }
    }
}

/// Visible items plus statistics for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub visible: Vec<&'a Todo>,
    pub stats: TodoStats,
}

/// Computes the visible list and statistics for `items` under `filter`.
pub fn project<'a>(items: &'a [Todo], filter: &FilterState) -> Projection<'a> {
    let needle = filter.search_query.to_lowercase();
    let visible = items
        .iter()
        .filter(|todo| filter.status.matches(todo))
        .filter(|todo| needle.is_empty() || matches_search(todo, &needle))
        .collect();

    Projection {
        visible,
        stats: TodoStats::from_items(items),
    }
}

fn matches_search(todo: &Todo, lowered_needle: &str) -> bool {
    todo.text.to_lowercase().contains(lowered_needle)
        || todo.category.as_str().contains(lowered_needle)
}
