//! UI session controller.
//!
//! # Responsibility
//! - Route user intents to the store, preferences and contact form.
//! - Track explicit edit mode, active page and filter state.
//! - Announce outcomes through the notification center.
//! - Produce a render snapshot after each intent.
//!
//! # Invariants
//! - `editing` always references an id present in the store, or is `None`.
//! - Empty todo text is declined without mutation or notification.
//! - Filter and page changes never touch persisted state.

use crate::model::todo::{Todo, TodoDraft, TodoId, TodoValidationError};
use crate::session::contact::{ContactField, ContactForm};
use crate::session::notification::{
    DismissTicket, Notification, NotificationCenter, NotificationKind,
};
use crate::store::preferences::{load_dark_mode, save_dark_mode};
use crate::store::todo_store::{StoreError, StoreResult, TodoStore};
use crate::storage::KeyValueStore;
use crate::view::projector::{project, FilterState, StatusFilter, TodoStats};
use log::debug;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    About,
    Contact,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About Us",
            Self::Contact => "Contact Us",
        }
    }
}

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot<'a> {
    pub visible: Vec<&'a Todo>,
    pub stats: TodoStats,
    pub filter: &'a FilterState,
    pub page: Page,
    pub dark_mode: bool,
    pub editing: Option<TodoId>,
    pub notification: Option<&'a Notification>,
}

pub struct AppSession<S: KeyValueStore> {
    store: TodoStore<S>,
    filter: FilterState,
    editing: Option<TodoId>,
    page: Page,
    dark_mode: bool,
    notifications: NotificationCenter,
    contact: ContactForm,
}

impl<S: KeyValueStore> AppSession<S> {
    /// Rehydrates todos and preferences from `storage`.
    pub fn open(storage: S) -> Self {
        let dark_mode = load_dark_mode(&storage);
        Self {
            store: TodoStore::open(storage),
            filter: FilterState::default(),
            editing: None,
            page: Page::default(),
            dark_mode,
            notifications: NotificationCenter::new(),
            contact: ContactForm::default(),
        }
    }

    pub fn store(&self) -> &TodoStore<S> {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn editing(&self) -> Option<TodoId> {
        self.editing
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn contact_form(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_form_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    /// Adds a todo, or updates the edited one when edit mode is active.
    ///
    /// Returns `Ok(None)` when the text is blank and the submit was declined.
    pub fn submit_todo(&mut self, draft: &TodoDraft, now: Instant) -> StoreResult<Option<Todo>> {
        let result = match self.editing {
            Some(id) => self.store.update_todo(id, draft),
            None => self.store.add_todo(draft),
        };

        let todo = match result {
            Ok(todo) => todo,
            Err(StoreError::Validation(TodoValidationError::EmptyText)) => {
                debug!("event=todo_submit module=session status=declined reason=empty_text");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let message = if self.editing.take().is_some() {
            "Todo updated successfully!"
        } else {
            "Todo added successfully!"
        };
        self.notifications.show(message, NotificationKind::Success, now);
        Ok(Some(todo))
    }

    /// Enters edit mode for `id` and returns the prefilled draft.
    pub fn start_edit(&mut self, id: TodoId) -> StoreResult<TodoDraft> {
        let draft = self.store.get(id).ok_or(StoreError::NotFound(id))?.to_draft();
        self.editing = Some(id);
        Ok(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn toggle(&mut self, id: TodoId, now: Instant) -> StoreResult<Todo> {
        let todo = self.store.toggle_completed(id)?;
        if todo.completed {
            self.notifications.show("Todo completed!", NotificationKind::Success, now);
        } else {
            self.notifications.show("Todo marked as active", NotificationKind::Info, now);
        }
        Ok(todo)
    }

    pub fn delete(&mut self, id: TodoId, now: Instant) -> StoreResult<()> {
        if !self.store.delete_todo(id)? {
            return Err(StoreError::NotFound(id));
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.notifications.show("Todo deleted", NotificationKind::Info, now);
        Ok(())
    }

    pub fn clear_completed(&mut self, now: Instant) -> StoreResult<usize> {
        let removed = self.store.clear_completed()?;
        if self.editing.is_some_and(|id| !self.store.contains(id)) {
            self.editing = None;
        }
        if removed > 0 {
            self.notifications.show(
                format!("Cleared {removed} completed todo(s)"),
                NotificationKind::Success,
                now,
            );
        } else {
            self.notifications.show(
                "No completed todos to clear",
                NotificationKind::Warning,
                now,
            );
        }
        Ok(removed)
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
    }

    pub fn reset_filters(&mut self) {
        self.filter = FilterState::default();
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    /// Flips and persists the dark-mode preference.
    pub fn toggle_dark_mode(&mut self) -> StoreResult<bool> {
        let next = !self.dark_mode;
        save_dark_mode(self.store.storage_mut(), next)?;
        self.dark_mode = next;
        Ok(next)
    }

    /// Validates and acknowledges the contact form. Nothing leaves the process.
    pub fn submit_contact(&mut self, now: Instant) -> Result<DismissTicket, Vec<ContactField>> {
        if let Err(missing) = self.contact.validate() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            self.notifications.show(
                format!("Please fill in: {}", names.join(", ")),
                NotificationKind::Error,
                now,
            );
            return Err(missing);
        }

        self.contact.clear();
        Ok(self.notifications.show(
            "Message sent! We'll get back to you soon.",
            NotificationKind::Success,
            now,
        ))
    }

    pub fn snapshot(&self, now: Instant) -> ViewSnapshot<'_> {
        let projection = project(self.store.items(), &self.filter);
        ViewSnapshot {
            visible: projection.visible,
            stats: projection.stats,
            filter: &self.filter,
            page: self.page,
            dark_mode: self.dark_mode,
            editing: self.editing,
            notification: self.notifications.current(now),
        }
    }
}
