//! Core domain logic for the todo manager.
//! This crate owns the todo invariants; frontends only render and forward intents.

pub mod logging;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo::{Category, Priority, Todo, TodoDraft, TodoId, TodoValidationError};
pub use session::app_session::{AppSession, Page, ViewSnapshot};
pub use session::contact::{ContactField, ContactForm};
pub use session::notification::{
    DismissTicket, Notification, NotificationCenter, NotificationKind, DISMISS_AFTER,
};
pub use storage::{
    open_storage, open_storage_in_memory, KeyValueStore, MemoryKeyValueStore,
    SqliteKeyValueStore, StorageError, StorageResult, DARK_MODE_KEY, TODOS_KEY,
};
pub use store::preferences::{load_dark_mode, save_dark_mode};
pub use store::todo_store::{load, StoreError, StoreResult, TodoStore};
pub use view::projector::{project, FilterState, Projection, StatusFilter, TodoStats};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
