//! Error types for the pricing library

use thiserror::Error;

/// Errors surfaced by the pricing layer and the table loaders.
///
/// Degenerate numeric cases inside the calculation core (zero premium-annuity
/// denominator, table exhaustion mid-recursion) are not errors: the core
/// returns 0 or truncates instead. Everything here is raised before the
/// recursion starts.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Requested mortality table is not in the registry
    #[error("mortality table '{name}' not found")]
    UnknownTable { name: String },

    /// Policy failed caller-side validation
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// A table file parsed to zero usable rows
    #[error("mortality table '{name}' contains no usable rows")]
    EmptyTable { name: String },

    /// I/O failure while reading table or policy files
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse failure in a mortality table file
    #[error("failed to parse mortality table: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse failure in a policy file
    #[error("failed to parse policy input: {0}")]
    Json(#[from] serde_json::Error),
}
