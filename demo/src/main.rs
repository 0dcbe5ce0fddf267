//! FIDES Reference Workflows — Demo CLI
//!
//! Runs one or all of the three domain scenarios.  Each scenario uses real
//! FIDES components (directory resolver, credential registry, delegation
//! policy engine, workflow runner, trail writer) wired together with canned
//! domain data.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- fraud-detection
//!   cargo run -p demo -- diagnostic-chain
//!   cargo run -p demo -- escalation

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fides_ref_workflows::scenarios::{diagnostic_chain, escalation, fraud_detection};

// ── CLI definition ────────────────────────────────────────────────────────────

/// FIDES — delegation-gated agent workflow demo.
///
/// Each subcommand runs one or all of the three domain scenarios,
/// demonstrating name resolution, credential verification, delegation
/// checking, approval gating, and trail integrity.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "FIDES reference workflow demo",
    long_about = "Runs FIDES domain scenarios showing agent resolution, credential\n\
                  verification, delegation policy enforcement, human approval gating,\n\
                  and workflow trail integrity."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three domain scenarios in sequence.
    RunAll,
    /// Scenario 1: Banking Fraud Detection (rule-based risk scoring).
    FraudDetection,
    /// Scenario 2: Healthcare Diagnostic Chain (approval-gated referral).
    DiagnosticChain,
    /// Scenario 3: Customer Service Escalation (tiered hand-off).
    Escalation,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all().await,
        Command::FraudDetection => fraud_detection::run_scenario().await,
        Command::DiagnosticChain => diagnostic_chain::run_scenario().await,
        Command::Escalation => escalation::run_scenario().await,
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

async fn run_all() -> fides_contracts::error::FidesResult<()> {
    fraud_detection::run_scenario().await?;
    diagnostic_chain::run_scenario().await?;
    escalation::run_scenario().await?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("FIDES — Delegation-Gated Agent Workflows");
    println!("Reference Domain Demo");
    println!("========================================");
    println!();
    println!("FIDES pipeline per workflow:");
    println!("  [1] Resolve source and target agent identities by logical name");
    println!("  [2] Verify both credentials — a failed check stops the workflow");
    println!("  [3] Delegation checker decides (from, to, action) → policy or denial");
    println!("  [4] Human approval obtained when the policy demands it");
    println!("  [5] Downstream endpoint invoked — ONLY after every gate passes");
    println!("  [6] Structured result assembled; trail sealed in a SHA-256 chain");
    println!();
}
