//! Mortality assumptions: tables, underwriting adjustment, and the
//! init-once table registry

pub mod loader;
mod mortality;
mod registry;

pub use mortality::MortalityTable;
pub use registry::{TableRegistry, DEFAULT_TABLE};
