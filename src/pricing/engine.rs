//! Product dispatch and result assembly
//!
//! `PricingEngine` routes a validated policy to the premium, reserve, or
//! annuity calculators based on product type, and assembles the unified
//! `PremiumResult` record including risk-assessment metadata.

use super::annuity::{annuity_gross_cost, deferred_annuity_cost, immediate_annuity_cost};
use super::premium::{gross_premium, term_life_net_premium, whole_life_net_premium};
use super::reserves::{term_life_reserves, whole_life_reserves};
use crate::assumptions::{MortalityTable, TableRegistry};
use crate::error::PricingError;
use crate::policy::{ExpenseStructure, HealthRating, Policy, ProductType, SmokerStatus};
use serde::{Deserialize, Serialize};

/// Mortality risk metadata attached to every result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// qx at issue age from the unadjusted table
    pub base_mortality_rate: f64,
    /// qx at issue age after underwriting adjustment
    pub adjusted_mortality_rate: f64,
    /// Ratio of adjusted to base rate at issue age
    pub risk_multiplier: f64,
    /// Adjusted probability of death within one year
    pub annual_death_probability: f64,
    /// Crude life expectancy 1/qx under the adjusted rate; 0 when the
    /// adjusted rate is 0 (no tabulated mortality at this age)
    pub expected_lifetime_years: f64,
}

/// Echo of the underwriting inputs that shaped the adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderwritingInfo {
    pub smoker_status: SmokerStatus,
    pub health_rating: HealthRating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_factor: Option<f64>,
    /// The multiplier actually applied to the base table
    pub applied_multiplier: f64,
}

/// Unified calculation result for all product variants
///
/// Serializes to the flat JSON record used by downstream consumers;
/// annuity-only and underwriting fields are omitted when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumResult {
    pub net_premium: f64,
    pub gross_premium: f64,
    pub reserve_schedule: Vec<f64>,
    pub product_type: ProductType,

    /// Expense assumptions used for the gross premium (insurance products)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<ExpenseStructure>,

    /// Annual payout amount (annuity products)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_payout: Option<f64>,

    /// Net single-premium cost (annuity products); the gross premium is
    /// this cost plus the flat annuity loading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_premium_cost: Option<f64>,

    #[serde(rename = "underwriting", skip_serializing_if = "Option::is_none")]
    pub underwriting: Option<UnderwritingInfo>,

    pub risk_assessment: RiskAssessment,
}

/// Stateless pricing dispatcher
///
/// Borrows the init-once table registry; every call is pure and safe to run
/// concurrently across threads.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    registry: &'a TableRegistry,
    expenses: ExpenseStructure,
}

impl<'a> PricingEngine<'a> {
    /// Create an engine with the default expense structure
    pub fn new(registry: &'a TableRegistry) -> Self {
        Self {
            registry,
            expenses: ExpenseStructure::default(),
        }
    }

    /// Create an engine with custom expense assumptions
    pub fn with_expenses(registry: &'a TableRegistry, expenses: ExpenseStructure) -> Self {
        Self { registry, expenses }
    }

    /// Expense assumptions in force for insurance products
    pub fn expenses(&self) -> &ExpenseStructure {
        &self.expenses
    }

    /// Price a single policy: resolve the table, validate, adjust mortality,
    /// dispatch on product type, and assemble the result.
    pub fn price(&self, policy: &Policy) -> Result<PremiumResult, PricingError> {
        let table = self.registry.resolve(&policy.table_name)?;
        policy.validate(table)?;

        let adjusted = table.adjusted_for(policy);
        let multiplier = policy.underwriting_multiplier();

        let mut result = match policy.product_type {
            ProductType::TermLife => {
                let net = term_life_net_premium(policy, &adjusted);
                self.insurance_result(policy, &adjusted, net, |p, t, n| {
                    term_life_reserves(p, t, n)
                })
            }
            ProductType::WholeLife => {
                let net = whole_life_net_premium(policy, &adjusted);
                self.insurance_result(policy, &adjusted, net, |p, t, n| {
                    whole_life_reserves(p, t, n)
                })
            }
            ProductType::ImmediateAnnuity => {
                annuity_result(policy, immediate_annuity_cost(policy, &adjusted))
            }
            ProductType::DeferredAnnuity => {
                annuity_result(policy, deferred_annuity_cost(policy, &adjusted))
            }
        };

        result.risk_assessment = risk_assessment(table, &adjusted, policy.age as usize);
        if policy.has_underwriting_inputs() {
            result.underwriting = Some(UnderwritingInfo {
                smoker_status: policy.smoker_status,
                health_rating: policy.health_rating,
                rating_factor: (policy.rating_factor > 0.0).then_some(policy.rating_factor),
                applied_multiplier: multiplier,
            });
        }

        Ok(result)
    }

    fn insurance_result(
        &self,
        policy: &Policy,
        adjusted: &MortalityTable,
        net: f64,
        schedule: impl Fn(&Policy, &MortalityTable, f64) -> Vec<f64>,
    ) -> PremiumResult {
        PremiumResult {
            net_premium: net,
            gross_premium: gross_premium(net, policy, &self.expenses),
            reserve_schedule: schedule(policy, adjusted, net),
            product_type: policy.product_type,
            expenses: Some(self.expenses),
            annual_payout: None,
            total_premium_cost: None,
            underwriting: None,
            risk_assessment: empty_risk_assessment(),
        }
    }
}

fn annuity_result(policy: &Policy, net_cost: f64) -> PremiumResult {
    PremiumResult {
        net_premium: net_cost,
        gross_premium: annuity_gross_cost(net_cost),
        reserve_schedule: Vec::new(),
        product_type: policy.product_type,
        expenses: None,
        annual_payout: Some(policy.coverage_amount),
        total_premium_cost: Some(net_cost),
        underwriting: None,
        risk_assessment: empty_risk_assessment(),
    }
}

fn risk_assessment(
    base: &MortalityTable,
    adjusted: &MortalityTable,
    age: usize,
) -> RiskAssessment {
    let base_rate = base.qx(age).unwrap_or(0.0);
    let adjusted_rate = adjusted.qx(age).unwrap_or(0.0);
    RiskAssessment {
        base_mortality_rate: base_rate,
        adjusted_mortality_rate: adjusted_rate,
        risk_multiplier: if base_rate > 0.0 {
            adjusted_rate / base_rate
        } else {
            1.0
        },
        annual_death_probability: adjusted_rate,
        expected_lifetime_years: if adjusted_rate > 0.0 {
            1.0 / adjusted_rate
        } else {
            0.0
        },
    }
}

fn empty_risk_assessment() -> RiskAssessment {
    RiskAssessment {
        base_mortality_rate: 0.0,
        adjusted_mortality_rate: 0.0,
        risk_multiplier: 1.0,
        annual_death_probability: 0.0,
        expected_lifetime_years: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_table(len: usize) -> MortalityTable {
        let rates = (0..len).map(|age| 0.0005 + 0.0002 * age as f64).collect();
        MortalityTable::new(rates)
    }

    fn test_registry() -> TableRegistry {
        let mut registry = TableRegistry::new();
        registry.insert("male", linear_table(121));
        registry.insert("female", {
            let rates = (0..121).map(|age| 0.0004 + 0.00018 * age as f64).collect();
            MortalityTable::new(rates)
        });
        registry
    }

    fn term_policy() -> Policy {
        Policy {
            age: 35,
            term: 10,
            coverage_amount: 100_000.0,
            interest_rate: 0.05,
            table_name: "female".to_string(),
            product_type: ProductType::TermLife,
            smoker_status: SmokerStatus::Unspecified,
            health_rating: HealthRating::Unspecified,
            rating_factor: 0.0,
            deferral_period: 0,
        }
    }

    #[test]
    fn test_term_life_end_to_end() {
        let registry = test_registry();
        let engine = PricingEngine::new(&registry);

        let result = engine.price(&term_policy()).unwrap();

        assert!(result.net_premium >= 0.0);
        assert!(result.gross_premium >= result.net_premium);
        assert_eq!(result.reserve_schedule.len(), 11);
        assert_eq!(*result.reserve_schedule.last().unwrap(), 0.0);
        assert_eq!(result.product_type, ProductType::TermLife);
        assert!(result.expenses.is_some());
        assert!(result.annual_payout.is_none());
        assert!(result.underwriting.is_none());
    }

    #[test]
    fn test_immediate_annuity_scenario() {
        let registry = test_registry();
        let engine = PricingEngine::new(&registry);

        let mut policy = term_policy();
        policy.age = 65;
        policy.term = 1;
        policy.coverage_amount = 12_000.0;
        policy.interest_rate = 0.04;
        policy.table_name = String::new();
        policy.product_type = ProductType::ImmediateAnnuity;

        let result = engine.price(&policy).unwrap();

        assert_eq!(result.annual_payout, Some(12_000.0));
        assert!(result.net_premium > 0.0);
        assert!((result.gross_premium - result.net_premium * 1.1).abs() < 1e-9);
        assert_eq!(result.total_premium_cost, Some(result.net_premium));
        assert!(result.reserve_schedule.is_empty());
        assert!(result.expenses.is_none());
    }

    #[test]
    fn test_deferred_annuity_with_zero_deferral_matches_immediate() {
        let registry = test_registry();
        let engine = PricingEngine::new(&registry);

        let mut immediate = term_policy();
        immediate.age = 65;
        immediate.term = 1;
        immediate.product_type = ProductType::ImmediateAnnuity;

        let mut deferred = immediate.clone();
        deferred.product_type = ProductType::DeferredAnnuity;
        deferred.deferral_period = 0;

        let r1 = engine.price(&immediate).unwrap();
        let r2 = engine.price(&deferred).unwrap();
        assert!((r1.net_premium - r2.net_premium).abs() < 1e-9);
    }

    #[test]
    fn test_risk_assessment_reflects_underwriting() {
        let registry = test_registry();
        let engine = PricingEngine::new(&registry);

        let mut policy = term_policy();
        policy.smoker_status = SmokerStatus::Smoker;
        policy.health_rating = HealthRating::Preferred;

        let result = engine.price(&policy).unwrap();
        let risk = &result.risk_assessment;

        assert!((risk.risk_multiplier - 1.5).abs() < 1e-9);
        assert!(
            (risk.adjusted_mortality_rate - risk.base_mortality_rate * 1.5).abs() < 1e-12
        );
        assert!((risk.annual_death_probability - risk.adjusted_mortality_rate).abs() < 1e-12);
        assert!(
            (risk.expected_lifetime_years - 1.0 / risk.adjusted_mortality_rate).abs() < 1e-9
        );

        let info = result.underwriting.expect("underwriting echo expected");
        assert_eq!(info.smoker_status, SmokerStatus::Smoker);
        assert!((info.applied_multiplier - 1.5).abs() < 1e-12);
        assert!(info.rating_factor.is_none());
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        let registry = test_registry();
        let engine = PricingEngine::new(&registry);

        let mut policy = term_policy();
        policy.table_name = "unisex".to_string();

        assert!(matches!(
            engine.price(&policy),
            Err(PricingError::UnknownTable { .. })
        ));
    }

    #[test]
    fn test_result_wire_format() {
        let registry = test_registry();
        let engine = PricingEngine::new(&registry);

        let result = engine.price(&term_policy()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("net_premium").is_some());
        assert!(json.get("gross_premium").is_some());
        assert!(json["reserve_schedule"].is_array());
        assert_eq!(json["product_type"], "term_life");
        assert!(json["expenses"].get("initial_expense_rate").is_some());
        assert!(json["risk_assessment"].get("risk_multiplier").is_some());
        // Annuity-only and underwriting fields are omitted entirely
        assert!(json.get("annual_payout").is_none());
        assert!(json.get("total_premium_cost").is_none());
        assert!(json.get("underwriting").is_none());
    }

    #[test]
    fn test_smoker_pays_more() {
        let registry = test_registry();
        let engine = PricingEngine::new(&registry);

        let standard = engine.price(&term_policy()).unwrap();

        let mut smoker = term_policy();
        smoker.smoker_status = SmokerStatus::Smoker;
        let smoker_result = engine.price(&smoker).unwrap();

        assert!(smoker_result.net_premium > standard.net_premium);
    }
}
