//! Business logic services for the Crop Advisory server

pub mod advisory;

pub use advisory::{new_shared_store, AdvisoryService, HistorySummary, SharedStore};
