//! Todo domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by store and view logic.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - Deletion is a hard remove from the collection.

pub mod todo;
