//! Stateful stores over durable storage.
//!
//! # Responsibility
//! - Own the todo collection and persisted preferences.
//! - Keep serialization details out of session/view code.

pub mod preferences;
pub mod todo_store;
