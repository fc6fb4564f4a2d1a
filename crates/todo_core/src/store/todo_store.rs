//! Todo collection store with write-through persistence.
//!
//! # Responsibility
//! - Own the ordered todo collection for one session.
//! - Rehydrate from and write back to the `todos` storage key.
//!
//! # Invariants
//! - Ids are unique within the collection.
//! - Order is insertion order; edits and toggles never move an item.
//! - Every mutation is persisted before it is applied in memory. A failed
//!   write leaves the in-memory collection untouched.
//! - Reads of the persisted payload never fail: missing or malformed data
//!   rehydrates as an empty collection.

use crate::model::todo::{now_epoch_ms, Todo, TodoDraft, TodoId, TodoValidationError};
use crate::storage::{KeyValueStore, StorageError, TODOS_KEY};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store mutations.
#[derive(Debug)]
pub enum StoreError {
    /// Draft failed field validation; nothing was changed.
    Validation(TodoValidationError),
    /// Referenced id is not in the collection; nothing was changed.
    NotFound(TodoId),
    /// Write-through failed; in-memory state was kept as before.
    Storage(StorageError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Storage(err) => write!(f, "failed to persist todos: {err}"),
            Self::Encode(err) => write!(f, "failed to encode todos: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<TodoValidationError> for StoreError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Reads the persisted todo collection.
///
/// Returns an empty collection when the key is missing, the payload does not
/// decode, or the payload contains duplicate ids. Storage read failures are
/// logged and also yield an empty collection.
pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Vec<Todo> {
    let raw = match storage.get(TODOS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=todos_load module=store status=empty reason=missing_key");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=todos_load module=store status=fallback reason=read_failed error={err}");
            return Vec::new();
        }
    };

    let todos: Vec<Todo> = match serde_json::from_str(&raw) {
        Ok(todos) => todos,
        Err(err) => {
            warn!(
                "event=todos_load module=store status=fallback reason=malformed_payload bytes={} error={}",
                raw.len(),
                err
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(todos.len());
    if let Some(duplicate) = todos.iter().find(|todo| !seen.insert(todo.id)) {
        warn!(
            "event=todos_load module=store status=fallback reason=duplicate_id id={}",
            duplicate.id
        );
        return Vec::new();
    }

    info!("event=todos_load module=store status=ok count={}", todos.len());
    todos
}

/// Ordered todo collection bound to its durable storage.
pub struct TodoStore<S: KeyValueStore> {
    storage: S,
    items: Vec<Todo>,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Opens the store, rehydrating items from `storage`.
    pub fn open(storage: S) -> Self {
        let items = load(&storage);
        Self { storage, items }
    }

    /// Current items in insertion order.
    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.position(id).is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Appends a new open todo stamped with the current time.
    ///
    /// # Errors
    /// - `Validation(EmptyText)` when text trims to empty; nothing is written.
    /// - `Storage`/`Encode` when the write-through fails.
    pub fn add_todo(&mut self, draft: &TodoDraft) -> StoreResult<Todo> {
        self.add_todo_at(draft, now_epoch_ms())
    }

    /// Same as [`Self::add_todo`] with a caller-provided creation time.
    pub fn add_todo_at(&mut self, draft: &TodoDraft, created_at: i64) -> StoreResult<Todo> {
        let todo = Todo::from_draft(draft, created_at)?;

        let mut next = self.items.clone();
        next.push(todo.clone());
        self.commit(next)?;

        info!(
            "event=todo_add module=store status=ok id={} count={}",
            todo.id,
            self.items.len()
        );
        Ok(todo)
    }

    /// Replaces text, priority, category and due date of an existing todo.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `Validation(EmptyText)` when the new text trims to empty.
    pub fn update_todo(&mut self, id: TodoId, draft: &TodoDraft) -> StoreResult<Todo> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        let mut next = self.items.clone();
        next[index].apply_draft(draft)?;
        let updated = next[index].clone();
        self.commit(next)?;

        info!("event=todo_update module=store status=ok id={id}");
        Ok(updated)
    }

    /// Flips `completed` and returns the updated todo.
    ///
    /// The value before the toggle is `!returned.completed`.
    pub fn toggle_completed(&mut self, id: TodoId) -> StoreResult<Todo> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        let mut next = self.items.clone();
        next[index].completed = !next[index].completed;
        let updated = next[index].clone();
        self.commit(next)?;

        info!(
            "event=todo_toggle module=store status=ok id={} completed={}",
            id, updated.completed
        );
        Ok(updated)
    }

    /// Removes the todo with `id`. Returns whether anything was removed.
    ///
    /// The collection is persisted even when nothing matched.
    pub fn delete_todo(&mut self, id: TodoId) -> StoreResult<bool> {
        let mut next = self.items.clone();
        next.retain(|todo| todo.id != id);
        let removed = next.len() != self.items.len();
        self.commit(next)?;

        info!("event=todo_delete module=store status=ok id={id} removed={removed}");
        Ok(removed)
    }

    /// Removes every completed todo and returns how many were removed.
    pub fn clear_completed(&mut self) -> StoreResult<usize> {
        let next: Vec<Todo> = self.items.iter().filter(|todo| todo.is_active()).cloned().collect();
        let removed = self.items.len() - next.len();
        self.commit(next)?;

        info!("event=todo_clear_completed module=store status=ok removed={removed}");
        Ok(removed)
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|todo| todo.id == id)
    }

    fn commit(&mut self, next: Vec<Todo>) -> StoreResult<()> {
        let payload = serde_json::to_string(&next)?;
        if let Err(err) = self.storage.set(TODOS_KEY, &payload) {
            warn!("event=todos_persist module=store status=error error={err}");
            return Err(err.into());
        }
        self.items = next;
        Ok(())
    }
}
