//! Actuarial Pricing CLI
//!
//! Command-line interface for pricing policies against a directory of
//! mortality tables.

use actuarial_pricing::batch::{portfolio_analysis, run_batch, sensitivity_analysis};
use actuarial_pricing::policy::loader::{load_policies, load_policy};
use actuarial_pricing::{PricingEngine, TableRegistry};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "actuarial_pricing", about = "Life and annuity pricing engine")]
struct Cli {
    /// Directory of mortality table CSV files (tab-delimited, qx in the
    /// third column; file stem becomes the table name)
    #[arg(long, default_value = "data")]
    tables_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a single policy from a JSON file
    Price {
        /// Path to the policy JSON
        policy: PathBuf,
    },
    /// Price a JSON array of policies, with per-item error isolation
    Batch {
        /// Path to the policies JSON array
        policies: PathBuf,
    },
    /// Sweep a base policy across interest rates, ages, or coverages
    Sensitivity {
        /// Path to the base policy JSON
        policy: PathBuf,
        /// Interest rates to sweep
        #[arg(long, value_delimiter = ',')]
        rates: Vec<f64>,
        /// Issue ages to sweep
        #[arg(long, value_delimiter = ',')]
        ages: Vec<u32>,
        /// Coverage amounts to sweep
        #[arg(long, value_delimiter = ',')]
        coverages: Vec<f64>,
    },
    /// Aggregate portfolio metrics over a JSON array of policies
    Portfolio {
        /// Path to the policies JSON array
        policies: PathBuf,
    },
    /// List the loaded mortality tables
    Tables,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let registry = TableRegistry::from_dir(&cli.tables_dir).with_context(|| {
        format!(
            "failed to load mortality tables from {}",
            cli.tables_dir.display()
        )
    })?;
    log::info!("{} mortality tables loaded", registry.len());

    let engine = PricingEngine::new(&registry);

    match cli.command {
        Command::Price { policy } => {
            let policy = load_policy(&policy)
                .with_context(|| format!("failed to load policy from {}", policy.display()))?;
            let result = engine.price(&policy)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Batch { policies } => {
            let policies = load_policies(&policies)?;
            let response = run_batch(&engine, &policies);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Sensitivity {
            policy,
            rates,
            ages,
            coverages,
        } => {
            let policy = load_policy(&policy)?;
            let response = sensitivity_analysis(&engine, &policy, &rates, &ages, &coverages)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Portfolio { policies } => {
            let policies = load_policies(&policies)?;
            let metrics = portfolio_analysis(&engine, &policies)?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        Command::Tables => {
            for name in registry.names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
