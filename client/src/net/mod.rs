//! Networking modules for the analysis service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `analyze` submits image pairs, `api` handles endpoint config and the
//! read-only list fetches, and `types` defines the wire schema and decoding.

pub mod analyze;
pub mod api;
pub mod types;
