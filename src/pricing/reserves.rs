//! Prospective reserve schedules
//!
//! The reserve at duration `t` is the expected present value of future
//! benefits minus the expected present value of future net premiums, valued
//! at attained age `age + t` with the same survival/discount recursion used
//! for pricing.

use super::discount::{discount_factor, present_value};
use crate::assumptions::MortalityTable;
use crate::policy::Policy;

/// Reserve schedule for a term life policy: one entry per duration
/// `t = 0..=term`, with the terminal reserve identically 0.
pub fn term_life_reserves(policy: &Policy, table: &MortalityTable, net_premium: f64) -> Vec<f64> {
    let age = policy.age as usize;
    let term = policy.term as usize;
    let mut reserves = Vec::with_capacity(term + 1);

    for t in 0..term {
        let remaining = term - t;
        reserves.push(prospective_reserve(
            table,
            age + t,
            remaining,
            remaining,
            policy.coverage_amount,
            policy.interest_rate,
            net_premium,
        ));
    }

    // Coverage ends at the terminal duration
    reserves.push(0.0);
    reserves
}

/// Reserve schedule for a whole life policy: one entry per duration
/// `t = 0..=(last tabulated age - issue age)`.
///
/// Benefit valuation runs until the table is exhausted (inclusive of the
/// last tabulated age); premium contributions stop once the paying period
/// has elapsed.
pub fn whole_life_reserves(policy: &Policy, table: &MortalityTable, net_premium: f64) -> Vec<f64> {
    let age = policy.age as usize;
    let term = policy.term as usize;
    let lifetime_years = table.last_age().saturating_sub(age);
    let mut reserves = Vec::with_capacity(lifetime_years + 1);

    for t in 0..=lifetime_years {
        let benefit_years = table.len().saturating_sub(age + t);
        let premium_years = term.saturating_sub(t);
        reserves.push(prospective_reserve(
            table,
            age + t,
            benefit_years,
            premium_years,
            policy.coverage_amount,
            policy.interest_rate,
            net_premium,
        ));
    }

    reserves
}

/// PV(future benefits) - net premium x PV(future premium annuity), valued
/// at `attained_age`. Benefits accrue for `benefit_years`, premiums for
/// `premium_years`; the loop truncates if the table runs out first.
fn prospective_reserve(
    table: &MortalityTable,
    attained_age: usize,
    benefit_years: usize,
    premium_years: usize,
    coverage: f64,
    rate: f64,
    net_premium: f64,
) -> f64 {
    let mut benefit_pv = 0.0;
    let mut annuity_pv = 0.0;
    let mut survival = 1.0;

    for i in 0..benefit_years {
        let Some(qx) = table.qx(attained_age + i) else {
            break;
        };
        benefit_pv += survival * qx * present_value(coverage, rate, i as u32 + 1);
        if i < premium_years {
            annuity_pv += survival * discount_factor(rate, i as u32);
        }
        survival *= 1.0 - qx;
    }

    benefit_pv - net_premium * annuity_pv
}
