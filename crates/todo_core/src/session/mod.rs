//! Session-level orchestration between user intents and core state.
//!
//! # Responsibility
//! - Hold ephemeral UI state (filters, edit mode, page, notifications).
//! - Keep frontends decoupled from store and storage details.

pub mod app_session;
pub mod contact;
pub mod notification;
