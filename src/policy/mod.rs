//! Policy data structures and JSON loading

mod data;
pub mod loader;

pub use data::{ExpenseStructure, HealthRating, Policy, ProductType, SmokerStatus};
