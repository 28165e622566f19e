//! Domain models for the crop advisory engine

mod advisory;
mod farm;
mod history;
mod pest;
mod schedule;
mod soil;
mod yield_estimate;

pub use advisory::*;
pub use farm::*;
pub use history::*;
pub use pest::*;
pub use schedule::*;
pub use soil::*;
pub use yield_estimate::*;
