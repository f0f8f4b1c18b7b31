//! Net and gross premium calculation for life insurance products
//!
//! Net premiums follow the equivalence principle: the expected present value
//! of premiums equals the expected present value of the death benefit at
//! issue. Gross premiums load expenses and profit on top of the net premium;
//! the renewal expense is a percentage of the gross premium itself, so the
//! loaded premium is solved by fixed-point iteration.

use super::discount::{discount_factor, present_value};
use crate::assumptions::MortalityTable;
use crate::policy::{ExpenseStructure, Policy};

/// Convergence tolerance for the gross premium solve
const GROSS_PREMIUM_TOLERANCE: f64 = 1e-4;

/// Iteration cap for the gross premium solve. The loadings in use converge
/// to cent precision within a handful of iterations; the cap only guards
/// against unusual expense-rate combinations.
const GROSS_PREMIUM_MAX_ITERATIONS: usize = 50;

/// Net annual premium for a term life policy.
///
/// Accumulates survival-weighted benefit and premium-annuity present values
/// over the term, truncating (not erroring) if the table runs out. Returns 0
/// when the premium annuity is degenerate.
pub fn term_life_net_premium(policy: &Policy, table: &MortalityTable) -> f64 {
    let age = policy.age as usize;
    let mut benefit_pv = 0.0;
    let mut annuity_pv = 0.0;
    let mut survival = 1.0;

    for t in 0..policy.term as usize {
        let Some(qx) = table.qx(age + t) else { break };

        // Death benefit paid at the end of year t+1, premium due at the
        // start of year t
        benefit_pv +=
            survival * qx * present_value(policy.coverage_amount, policy.interest_rate, t as u32 + 1);
        annuity_pv += survival * discount_factor(policy.interest_rate, t as u32);

        survival *= 1.0 - qx;
    }

    if annuity_pv == 0.0 {
        return 0.0;
    }
    benefit_pv / annuity_pv
}

/// Net annual premium for a whole life policy.
///
/// The benefit accumulation runs to the end of the mortality table,
/// inclusive of the last tabulated age; premiums are only collected while
/// `t < term` (the premium-paying period).
pub fn whole_life_net_premium(policy: &Policy, table: &MortalityTable) -> f64 {
    let age = policy.age as usize;
    let term = policy.term as usize;
    let mut benefit_pv = 0.0;
    let mut annuity_pv = 0.0;
    let mut survival = 1.0;

    let mut t = 0;
    while let Some(qx) = table.qx(age + t) {
        benefit_pv +=
            survival * qx * present_value(policy.coverage_amount, policy.interest_rate, t as u32 + 1);
        if t < term {
            annuity_pv += survival * discount_factor(policy.interest_rate, t as u32);
        }
        survival *= 1.0 - qx;
        t += 1;
    }

    if annuity_pv == 0.0 {
        return 0.0;
    }
    benefit_pv / annuity_pv
}

/// Expense-loaded gross premium, rounded to cents.
///
/// The acquisition expense is proportional to coverage, maintenance is a
/// flat annual cost, and the renewal expense is a fraction of the gross
/// premium being solved for. The circular renewal term is resolved by
/// iterating `base = net * (1 + profit) + per_year_expense` to convergence.
pub fn gross_premium(net_premium: f64, policy: &Policy, expenses: &ExpenseStructure) -> f64 {
    if policy.term == 0 {
        return round_to_cents(net_premium);
    }

    let initial = expenses.initial_expense_rate * policy.coverage_amount;
    let loaded_net = net_premium + net_premium * expenses.profit_margin;

    let mut base = loaded_net;
    for _ in 0..GROSS_PREMIUM_MAX_ITERATIONS {
        let renewal = base * expenses.renewal_expense_rate;
        let per_year_expense =
            (initial + renewal + expenses.maintenance_expense) / policy.term as f64;
        let next = loaded_net + per_year_expense;

        let converged = (next - base).abs() < GROSS_PREMIUM_TOLERANCE;
        base = next;
        if converged {
            break;
        }
    }

    round_to_cents(base)
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
