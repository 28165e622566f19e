//! Shared types and the advisory engine for the Crop Advisory Platform
//!
//! This crate holds the yield estimator and advice derivation as pure
//! functions, plus the store and export helpers used by the backend and the
//! browser (via WASM).

pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod types;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use export::*;
pub use models::*;
pub use store::*;
pub use types::*;
pub use validation::*;
