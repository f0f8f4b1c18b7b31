//! Annuity valuation
//!
//! Annuities are priced as a single premium cost: the expected present value
//! of survival-weighted annual payouts. Payments follow the annuity-due
//! convention (the first eligible payment is undiscounted). Annuity pricing
//! carries no expense structure; the gross cost is a flat loading on the net
//! cost.

use super::discount::present_value;
use crate::assumptions::MortalityTable;
use crate::policy::Policy;

/// Flat expense loading applied to annuity premium costs
pub const ANNUITY_EXPENSE_LOADING: f64 = 0.10;

/// Net single premium for an immediate annuity paying
/// `policy.coverage_amount` annually for life.
pub fn immediate_annuity_cost(policy: &Policy, table: &MortalityTable) -> f64 {
    annuity_cost_from(policy, table, 0)
}

/// Net single premium for a deferred annuity: payments begin after
/// `policy.deferral_period` years, contingent on surviving the deferral.
pub fn deferred_annuity_cost(policy: &Policy, table: &MortalityTable) -> f64 {
    annuity_cost_from(policy, table, policy.deferral_period as usize)
}

/// Gross annuity cost: net cost plus the flat loading
pub fn annuity_gross_cost(net_cost: f64) -> f64 {
    net_cost * (1.0 + ANNUITY_EXPENSE_LOADING)
}

fn annuity_cost_from(policy: &Policy, table: &MortalityTable, deferral: usize) -> f64 {
    let age = policy.age as usize;
    let mut survival = 1.0;

    // Survival through the deferral span. Running off the table here means
    // payments can never start, so the annuity costs nothing.
    for year in 0..deferral {
        let Some(qx) = table.qx(age + year) else {
            return 0.0;
        };
        survival *= 1.0 - qx;
    }

    let mut cost = 0.0;
    let mut year = deferral;
    while let Some(qx) = table.qx(age + year) {
        cost += survival * present_value(policy.coverage_amount, policy.interest_rate, year as u32);
        survival *= 1.0 - qx;
        year += 1;
    }

    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{HealthRating, ProductType, SmokerStatus};

    fn annuity_policy(age: u32, deferral: u32) -> Policy {
        Policy {
            age,
            term: 1,
            coverage_amount: 12_000.0,
            interest_rate: 0.04,
            table_name: String::new(),
            product_type: ProductType::ImmediateAnnuity,
            smoker_status: SmokerStatus::Unspecified,
            health_rating: HealthRating::Unspecified,
            rating_factor: 0.0,
            deferral_period: deferral,
        }
    }

    fn flat_table(len: usize, qx: f64) -> MortalityTable {
        MortalityTable::new(vec![qx; len])
    }

    #[test]
    fn test_first_payment_is_undiscounted() {
        // Certain death after one year: the only payment is the year-0
        // payout at full value.
        let mut rates = vec![0.0; 66];
        rates[65] = 1.0;
        let table = MortalityTable::new(rates);

        let policy = annuity_policy(65, 0);
        let cost = immediate_annuity_cost(&policy, &table);
        assert!((cost - 12_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_deferral_zero_matches_immediate() {
        let table = flat_table(121, 0.02);
        let policy = annuity_policy(65, 0);

        let immediate = immediate_annuity_cost(&policy, &table);
        let deferred = deferred_annuity_cost(&policy, &table);
        assert!((immediate - deferred).abs() < 1e-12);
    }

    #[test]
    fn test_deferral_reduces_cost() {
        let table = flat_table(121, 0.02);
        let immediate = immediate_annuity_cost(&annuity_policy(65, 0), &table);
        let deferred = deferred_annuity_cost(&annuity_policy(65, 10), &table);

        assert!(deferred > 0.0);
        assert!(deferred < immediate);
    }

    #[test]
    fn test_deferral_past_table_costs_nothing() {
        let table = flat_table(80, 0.02);
        let policy = annuity_policy(65, 20);
        assert_eq!(deferred_annuity_cost(&policy, &table), 0.0);
    }

    #[test]
    fn test_gross_cost_loading() {
        let table = flat_table(121, 0.02);
        let net = immediate_annuity_cost(&annuity_policy(65, 0), &table);
        let gross = annuity_gross_cost(net);
        assert!((gross - net * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_survival_cuts_off_payments() {
        // qx = 1 at the deferral boundary: survival to the payment phase is
        // zero, so every payment is worthless.
        let mut rates = vec![0.0; 90];
        rates[65] = 1.0;
        let table = MortalityTable::new(rates);

        let policy = annuity_policy(65, 1);
        let cost = deferred_annuity_cost(&policy, &table);
        assert_eq!(cost, 0.0);
    }
}
