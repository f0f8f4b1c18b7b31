//! Load policy quote requests from JSON files

use super::Policy;
use crate::error::PricingError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a single policy from a JSON file
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<Policy, PricingError> {
    let file = File::open(path)?;
    let policy = serde_json::from_reader(BufReader::new(file))?;
    Ok(policy)
}

/// Load a JSON array of policies from a file
pub fn load_policies<P: AsRef<Path>>(path: P) -> Result<Vec<Policy>, PricingError> {
    let file = File::open(path)?;
    load_policies_from_reader(BufReader::new(file))
}

/// Load a JSON array of policies from any reader (e.g. string buffer)
pub fn load_policies_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<Policy>, PricingError> {
    let policies = serde_json::from_reader(reader)?;
    Ok(policies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{ProductType, SmokerStatus};

    #[test]
    fn test_load_policies_from_json() {
        let json = r#"[
            {
                "age": 35,
                "term": 10,
                "coverage_amount": 100000.0,
                "interest_rate": 0.05,
                "table_name": "female",
                "product_type": "term_life",
                "smoker_status": "non_smoker"
            },
            {
                "age": 65,
                "term": 1,
                "sum_assured": 12000.0,
                "interest_rate": 0.04,
                "product_type": "immediate_annuity"
            }
        ]"#;

        let policies = load_policies_from_reader(json.as_bytes()).unwrap();
        assert_eq!(policies.len(), 2);

        let p1 = &policies[0];
        assert_eq!(p1.age, 35);
        assert_eq!(p1.product_type, ProductType::TermLife);
        assert_eq!(p1.smoker_status, SmokerStatus::NonSmoker);

        // Legacy "sum_assured" alias and omitted optional fields
        let p2 = &policies[1];
        assert!((p2.coverage_amount - 12_000.0).abs() < 1e-12);
        assert_eq!(p2.table_name, "");
        assert_eq!(p2.smoker_status, SmokerStatus::Unspecified);
        assert_eq!(p2.deferral_period, 0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = load_policies_from_reader("not json".as_bytes());
        assert!(result.is_err());
    }
}
