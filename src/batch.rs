//! Batch, sensitivity, and portfolio runners
//!
//! These wrap the pricing core: every policy evaluation is an independent,
//! order-free invocation, so batches run in parallel with rayon. Failures
//! are isolated per item; one malformed policy never aborts the rest.

use crate::policy::{HealthRating, Policy, SmokerStatus};
use crate::pricing::{PremiumResult, PricingEngine};
use crate::error::PricingError;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Outcome for one policy in a batch: a result or an error message
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    /// Position of the policy in the input
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PremiumResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate statistics over the successful items of a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total_policies: usize,
    pub failed_policies: usize,
    pub total_net_premium: f64,
    pub total_gross_premium: f64,
    pub average_net_premium: f64,
    pub average_gross_premium: f64,
    pub product_type_counts: HashMap<String, usize>,
}

/// Full batch response: per-item outcomes plus the summary
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
}

/// Price every policy in parallel, isolating failures per item
pub fn run_batch(engine: &PricingEngine, policies: &[Policy]) -> BatchResponse {
    let results: Vec<BatchItem> = policies
        .par_iter()
        .enumerate()
        .map(|(index, policy)| match engine.price(policy) {
            Ok(result) => BatchItem {
                index,
                result: Some(result),
                error: None,
            },
            Err(err) => {
                log::warn!("policy {index} failed: {err}");
                BatchItem {
                    index,
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    let summary = summarize(&results);
    BatchResponse { results, summary }
}

fn summarize(items: &[BatchItem]) -> BatchSummary {
    let mut total_net = 0.0;
    let mut total_gross = 0.0;
    let mut product_type_counts: HashMap<String, usize> = HashMap::new();
    let mut succeeded = 0usize;

    for item in items {
        if let Some(result) = &item.result {
            succeeded += 1;
            total_net += result.net_premium;
            total_gross += result.gross_premium;
            *product_type_counts
                .entry(result.product_type.as_str().to_string())
                .or_default() += 1;
        }
    }

    let denom = succeeded.max(1) as f64;
    BatchSummary {
        total_policies: items.len(),
        failed_policies: items.len() - succeeded,
        total_net_premium: total_net,
        total_gross_premium: total_gross,
        average_net_premium: total_net / denom,
        average_gross_premium: total_gross / denom,
        product_type_counts,
    }
}

/// One point of a sensitivity sweep
#[derive(Debug, Clone, Serialize)]
pub struct SensitivityPoint {
    pub parameter: String,
    pub value: f64,
    pub result: PremiumResult,
}

/// Sensitivity sweep output: the base result plus per-parameter curves
#[derive(Debug, Clone, Serialize)]
pub struct SensitivityResponse {
    pub base_result: PremiumResult,
    pub analysis: HashMap<String, Vec<SensitivityPoint>>,
}

/// Re-price a base policy across interest-rate, age, and coverage sweeps.
///
/// The base policy must price successfully; individual sweep points that
/// fail validation are skipped rather than failing the analysis.
pub fn sensitivity_analysis(
    engine: &PricingEngine,
    base_policy: &Policy,
    interest_rates: &[f64],
    ages: &[u32],
    coverage_amounts: &[f64],
) -> Result<SensitivityResponse, PricingError> {
    let base_result = engine.price(base_policy)?;
    let mut analysis = HashMap::new();

    let rate_points: Vec<SensitivityPoint> = interest_rates
        .iter()
        .filter_map(|&rate| {
            let mut policy = base_policy.clone();
            policy.interest_rate = rate;
            sweep_point(engine, &policy, "interest_rate", rate)
        })
        .collect();
    if !rate_points.is_empty() {
        analysis.insert("interest_rate".to_string(), rate_points);
    }

    let age_points: Vec<SensitivityPoint> = ages
        .iter()
        .filter_map(|&age| {
            let mut policy = base_policy.clone();
            policy.age = age;
            sweep_point(engine, &policy, "age", age as f64)
        })
        .collect();
    if !age_points.is_empty() {
        analysis.insert("age".to_string(), age_points);
    }

    let coverage_points: Vec<SensitivityPoint> = coverage_amounts
        .iter()
        .filter_map(|&coverage| {
            let mut policy = base_policy.clone();
            policy.coverage_amount = coverage;
            sweep_point(engine, &policy, "coverage_amount", coverage)
        })
        .collect();
    if !coverage_points.is_empty() {
        analysis.insert("coverage_amount".to_string(), coverage_points);
    }

    Ok(SensitivityResponse {
        base_result,
        analysis,
    })
}

fn sweep_point(
    engine: &PricingEngine,
    policy: &Policy,
    parameter: &str,
    value: f64,
) -> Option<SensitivityPoint> {
    match engine.price(policy) {
        Ok(result) => Some(SensitivityPoint {
            parameter: parameter.to_string(),
            value,
            result,
        }),
        Err(err) => {
            log::debug!("sensitivity point {parameter}={value} skipped: {err}");
            None
        }
    }
}

/// Aggregated portfolio statistics across many policies
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioMetrics {
    pub total_policies: usize,
    pub total_net_premium: f64,
    pub total_gross_premium: f64,
    pub average_age: f64,
    pub average_coverage: f64,
    pub product_distribution: HashMap<String, usize>,
    pub table_distribution: HashMap<String, usize>,
    pub risk_distribution: HashMap<String, usize>,
    pub profitability_metrics: HashMap<String, f64>,
}

/// Analyze a portfolio: price every policy in parallel, fold the valid ones
/// into distribution and profitability metrics.
///
/// Errors only if no policy in the portfolio prices successfully.
pub fn portfolio_analysis(
    engine: &PricingEngine,
    policies: &[Policy],
) -> Result<PortfolioMetrics, PricingError> {
    let priced: Vec<(&Policy, PremiumResult)> = policies
        .par_iter()
        .filter_map(|policy| engine.price(policy).ok().map(|result| (policy, result)))
        .collect();

    if priced.is_empty() {
        return Err(PricingError::InvalidPolicy(
            "no valid policies in portfolio".to_string(),
        ));
    }

    let count = priced.len() as f64;
    let mut total_age = 0u64;
    let mut total_coverage = 0.0;
    let mut total_net = 0.0;
    let mut total_gross = 0.0;
    let mut product_distribution: HashMap<String, usize> = HashMap::new();
    let mut table_distribution: HashMap<String, usize> = HashMap::new();
    let mut risk_distribution: HashMap<String, usize> = HashMap::new();

    for (policy, result) in &priced {
        total_age += policy.age as u64;
        total_coverage += policy.coverage_amount;
        total_net += result.net_premium;
        total_gross += result.gross_premium;
        *product_distribution
            .entry(result.product_type.as_str().to_string())
            .or_default() += 1;
        let table = if policy.table_name.is_empty() {
            crate::assumptions::DEFAULT_TABLE
        } else {
            &policy.table_name
        };
        *table_distribution.entry(table.to_lowercase()).or_default() += 1;
        *risk_distribution
            .entry(risk_category(policy).to_string())
            .or_default() += 1;
    }

    Ok(PortfolioMetrics {
        total_policies: priced.len(),
        total_net_premium: total_net,
        total_gross_premium: total_gross,
        average_age: total_age as f64 / count,
        average_coverage: total_coverage / count,
        product_distribution,
        table_distribution,
        risk_distribution,
        profitability_metrics: profitability_metrics(total_net, total_gross, total_coverage),
    })
}

fn risk_category(policy: &Policy) -> &'static str {
    if policy.smoker_status == SmokerStatus::Smoker
        || policy.health_rating == HealthRating::Substandard
    {
        "high_risk"
    } else if policy.health_rating == HealthRating::Preferred
        || policy.smoker_status == SmokerStatus::NonSmoker
    {
        "low_risk"
    } else {
        "standard_risk"
    }
}

fn profitability_metrics(
    total_net: f64,
    total_gross: f64,
    total_coverage: f64,
) -> HashMap<String, f64> {
    let mut metrics = HashMap::new();
    let expected_profit = total_gross - total_net;
    metrics.insert("expected_profit".to_string(), expected_profit);

    if total_gross > 0.0 {
        // Flat 2% claims assumption on total coverage, matching the
        // reporting convention used by the quoting layer
        let expected_payout = total_coverage * 0.02;
        let loss_ratio = expected_payout / total_gross;
        let expense_ratio = expected_profit / total_gross;
        metrics.insert("profit_margin".to_string(), expected_profit / total_gross);
        metrics.insert("loss_ratio".to_string(), loss_ratio);
        metrics.insert("expense_ratio".to_string(), expense_ratio);
        metrics.insert("combined_ratio".to_string(), loss_ratio + expense_ratio);
    }
    if total_net > 0.0 {
        metrics.insert(
            "return_on_premium".to_string(),
            expected_profit / total_net,
        );
    }
    metrics
}
