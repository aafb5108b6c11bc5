//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (state signals, fetches,
//! submission) and delegates rendering details to `components`.

pub mod analyze;
pub mod dashboard;
pub mod plots;
pub mod reports;
