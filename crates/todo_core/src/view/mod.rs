//! Derived read models for rendering.

pub mod projector;
