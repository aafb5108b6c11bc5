//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the shell chrome, upload cards, and result views. They
//! receive their data as props from the owning page and never fetch.

pub mod data_source_notice;
pub mod deviation_table;
pub mod result_summary;
pub mod result_tabs;
pub mod sidebar;
pub mod stat_card;
pub mod upload_card;
