//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`upload`, `analysis`, `results`, `registry`) so
//! the workflow can be driven and tested without a browser, and components
//! only depend on the small model they render.

pub mod analysis;
pub mod registry;
pub mod results;
pub mod upload;
