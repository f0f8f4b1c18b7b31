//! Policy data structures matching the quote-request format

use crate::assumptions::MortalityTable;
use crate::error::PricingError;
use serde::{Deserialize, Serialize};

/// Product variant being priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Level-premium term insurance, coverage ends with the term
    TermLife,
    /// Lifetime coverage with a limited premium-paying period
    WholeLife,
    /// Annual payout starting immediately (annuity-due)
    ImmediateAnnuity,
    /// Annual payout starting after a deferral period
    DeferredAnnuity,
}

impl ProductType {
    /// Whether this product is an annuity (priced as a single premium cost)
    pub fn is_annuity(&self) -> bool {
        matches!(
            self,
            ProductType::ImmediateAnnuity | ProductType::DeferredAnnuity
        )
    }

    /// String form matching the JSON wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::TermLife => "term_life",
            ProductType::WholeLife => "whole_life",
            ProductType::ImmediateAnnuity => "immediate_annuity",
            ProductType::DeferredAnnuity => "deferred_annuity",
        }
    }
}

/// Smoker status for underwriting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokerStatus {
    Smoker,
    NonSmoker,
    #[default]
    Unspecified,
}

impl SmokerStatus {
    /// Multiplicative mortality loading for this status
    pub fn factor(&self) -> f64 {
        match self {
            SmokerStatus::Smoker => 2.0,
            SmokerStatus::NonSmoker => 0.8,
            SmokerStatus::Unspecified => 1.0,
        }
    }
}

/// Health rating class for underwriting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    Preferred,
    Standard,
    Substandard,
    #[default]
    Unspecified,
}

impl HealthRating {
    /// Multiplicative mortality loading for this rating
    pub fn factor(&self) -> f64 {
        match self {
            HealthRating::Preferred => 0.75,
            HealthRating::Substandard => 1.5,
            HealthRating::Standard | HealthRating::Unspecified => 1.0,
        }
    }
}

/// A single policy quote request
///
/// Created per request and immutable after construction; the engine never
/// mutates a policy and holds no reference to it after the result is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Issue age of the insured
    pub age: u32,

    /// Premium-paying period / coverage term in years.
    /// Annuities use 1 as a placeholder (no level-premium schedule).
    pub term: u32,

    /// Death benefit for insurance products; annual payout for annuities
    #[serde(alias = "sum_assured")]
    pub coverage_amount: f64,

    /// Flat annual discount rate
    pub interest_rate: f64,

    /// Mortality table selector ("male", "female"); empty string defaults
    /// to "male" at resolution time
    #[serde(default)]
    pub table_name: String,

    /// Product variant to price
    pub product_type: ProductType,

    /// Smoker status (underwriting), unspecified when not supplied
    #[serde(default)]
    pub smoker_status: SmokerStatus,

    /// Health rating class (underwriting), unspecified when not supplied
    #[serde(default)]
    pub health_rating: HealthRating,

    /// Custom mortality rating factor; 0 means unset. When set it replaces
    /// the smoker/health factors entirely.
    #[serde(default)]
    pub rating_factor: f64,

    /// Years before a deferred annuity starts paying (annuities only)
    #[serde(default)]
    pub deferral_period: u32,
}

impl Policy {
    /// Mortality multiplier implied by the underwriting inputs.
    ///
    /// A positive custom rating factor takes precedence over the
    /// smoker/health classification.
    pub fn underwriting_multiplier(&self) -> f64 {
        if self.rating_factor > 0.0 {
            self.rating_factor
        } else {
            self.smoker_status.factor() * self.health_rating.factor()
        }
    }

    /// Whether any underwriting field was supplied on the request
    pub fn has_underwriting_inputs(&self) -> bool {
        self.rating_factor > 0.0
            || self.smoker_status != SmokerStatus::Unspecified
            || self.health_rating != HealthRating::Unspecified
    }

    /// Caller-side validation run before the calculation core is invoked.
    ///
    /// The core assumes these hold and degrades gracefully (zero result,
    /// truncated loops) rather than re-checking them.
    pub fn validate(&self, table: &MortalityTable) -> Result<(), PricingError> {
        if self.term == 0 {
            return Err(PricingError::InvalidPolicy(
                "term must be positive".to_string(),
            ));
        }
        if self.coverage_amount <= 0.0 {
            return Err(PricingError::InvalidPolicy(
                "coverage amount must be positive".to_string(),
            ));
        }
        if self.interest_rate < 0.0 {
            return Err(PricingError::InvalidPolicy(
                "interest rate cannot be negative".to_string(),
            ));
        }
        if self.age as usize >= table.len() {
            return Err(PricingError::InvalidPolicy(format!(
                "age {} is beyond the mortality table (max {})",
                self.age,
                table.last_age()
            )));
        }
        if self.product_type == ProductType::TermLife
            && (self.age + self.term) as usize >= table.len()
        {
            return Err(PricingError::InvalidPolicy(format!(
                "age + term ({}) exceeds the mortality table length ({})",
                self.age + self.term,
                table.len()
            )));
        }
        Ok(())
    }
}

/// Expense assumptions loaded onto the gross premium
///
/// All fields are dimensionless fractions except `maintenance_expense`,
/// which is a flat currency amount per year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpenseStructure {
    /// One-time acquisition expense as a fraction of coverage
    pub initial_expense_rate: f64,
    /// Recurring expense as a fraction of the gross premium
    pub renewal_expense_rate: f64,
    /// Flat annual maintenance cost (currency)
    pub maintenance_expense: f64,
    /// Profit loading as a fraction of the net premium
    pub profit_margin: f64,
}

impl Default for ExpenseStructure {
    fn default() -> Self {
        Self {
            initial_expense_rate: 0.005,
            renewal_expense_rate: 0.03,
            maintenance_expense: 50.0,
            profit_margin: 0.10,
        }
    }
}
