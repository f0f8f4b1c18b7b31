//! Mortality table with underwriting adjustments
//!
//! The mortality model separates:
//! - Base annual rates (qx), loaded from table files and never mutated
//! - A per-policy multiplicative underwriting adjustment
//!
//! The adjustment is a pure function of the policy's underwriting inputs and
//! is recomputed for every request; adjusted tables are never cached across
//! policies.

use crate::policy::Policy;

/// An ordered sequence of annual mortality rates (qx), index = age
#[derive(Debug, Clone, PartialEq)]
pub struct MortalityTable {
    rates: Vec<f64>,
}

impl MortalityTable {
    /// Create a table from raw qx values
    pub fn new(rates: Vec<f64>) -> Self {
        Self { rates }
    }

    /// Number of ages covered by the table
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Highest age the table can be indexed by
    pub fn last_age(&self) -> usize {
        self.rates.len().saturating_sub(1)
    }

    /// Annual mortality rate at `age`, or `None` past the end of the table
    pub fn qx(&self, age: usize) -> Option<f64> {
        self.rates.get(age).copied()
    }

    /// Raw rate slice
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Apply a flat multiplier to every rate, clamping at 1.0.
    /// The result has the same length as the input table.
    pub fn adjusted(&self, multiplier: f64) -> MortalityTable {
        MortalityTable {
            rates: self
                .rates
                .iter()
                .map(|qx| (qx * multiplier).min(1.0))
                .collect(),
        }
    }

    /// Adjust for a policy's underwriting inputs (custom rating factor, or
    /// smoker status x health rating when no factor is set)
    pub fn adjusted_for(&self, policy: &Policy) -> MortalityTable {
        self.adjusted(policy.underwriting_multiplier())
    }
}
