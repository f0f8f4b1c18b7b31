//! Actuarial Pricing - transparent premium and reserve calculations
//!
//! This library provides:
//! - Net and gross premium determination for term and whole life products
//! - Prospective reserve schedules at every policy duration
//! - Immediate and deferred annuity valuation
//! - Underwriting adjustments to base mortality tables with risk metadata
//! - Batch, sensitivity, and portfolio evaluation over the pure core

pub mod assumptions;
pub mod batch;
pub mod error;
pub mod policy;
pub mod pricing;

// Re-export commonly used types
pub use assumptions::{MortalityTable, TableRegistry};
pub use error::PricingError;
pub use policy::{ExpenseStructure, Policy, ProductType};
pub use pricing::{PremiumResult, PricingEngine};
