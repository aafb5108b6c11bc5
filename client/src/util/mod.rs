//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate formatting, styling lookups, and browser resource
//! handling from page and component logic to improve reuse and testability.

pub mod badge;
pub mod format;
pub mod preview;
