//! The actuarial calculation core
//!
//! Pure, stateless pricing functions plus the product dispatcher:
//! - `discount`: the present-value primitive shared by everything below
//! - `premium`: net premiums (equivalence principle) and the expense-loaded
//!   gross premium fixed-point solve
//! - `reserves`: prospective reserve schedules at every policy duration
//! - `annuity`: immediate and deferred annuity valuation
//! - `engine`: dispatch over the product variants and result assembly

pub mod annuity;
pub mod discount;
pub mod engine;
pub mod premium;
pub mod reserves;

pub use engine::{PremiumResult, PricingEngine, RiskAssessment, UnderwritingInfo};
