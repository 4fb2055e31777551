//! MEDICALL storefront simulation: demo CLI
//!
//! Runs one or all of the storefront scenarios against the simulated
//! services. Every scenario prints its outcome and the notices it raised.
//!
//! Usage:
//!   cargo run -p demo -- run-all --fast
//!   cargo run -p demo -- checkout --seed 7
//!   cargo run -p demo -- heart-rate --config medicall.toml
//!   cargo run -p demo -- catalog --catalog products.json

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medicall_contracts::error::MedicallResult;

mod scenarios;

use scenarios::{DemoEnv, DemoOptions};

// ── CLI definition ────────────────────────────────────────────────────────────

/// MEDICALL: simulated healthcare storefront.
///
/// Each subcommand drives one part of the storefront (catalog, cart and
/// checkout, order cancellation, vitals, prescription scan) through the
/// simulated services with their latency and injected failures.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "MEDICALL storefront simulation demo",
    long_about = "Runs MEDICALL storefront scenarios: product listing, cart and checkout,\n\
                  order tracking and cancellation, heart-rate monitoring, Google Fit,\n\
                  and prescription scanning."
)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON product catalogue to use instead of the bundled one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Seed for injected failures and simulated readings.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Skip all simulated latency.
    #[arg(long, global = true)]
    fast: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario in sequence.
    RunAll,
    /// List the product catalogue.
    Catalog,
    /// Fill a cart and place an order.
    Checkout,
    /// Place an order, cancel it, then try to cancel it again.
    Cancel,
    /// Poll the simulated heart-rate sensor for a few cycles.
    HeartRate,
    /// Connect to Google Fit, fetch recent samples, disconnect.
    GoogleFit,
    /// Analyze a prescription image.
    Scan,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let options = DemoOptions {
        config: cli.config,
        catalog: cli.catalog,
        seed: cli.seed,
        fast: cli.fast,
    };

    let result = DemoEnv::load(&options).and_then(|env| run(&env, &cli.command));

    match result {
        Ok(()) => {
            println!("All selected scenarios completed.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run(env: &DemoEnv, command: &Command) -> MedicallResult<()> {
    match command {
        Command::RunAll => run_all(env),
        Command::Catalog => scenarios::storefront::run_catalog(env),
        Command::Checkout => scenarios::storefront::run_checkout(env),
        Command::Cancel => scenarios::storefront::run_cancel(env),
        Command::HeartRate => scenarios::vitals::run_heart_rate(env),
        Command::GoogleFit => scenarios::vitals::run_google_fit(env),
        Command::Scan => scenarios::scan::run_scan(env),
    }
}

fn run_all(env: &DemoEnv) -> MedicallResult<()> {
    scenarios::storefront::run_catalog(env)?;
    scenarios::storefront::run_checkout(env)?;
    scenarios::storefront::run_cancel(env)?;
    scenarios::vitals::run_heart_rate(env)?;
    scenarios::vitals::run_google_fit(env)?;
    scenarios::scan::run_scan(env)?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("MEDICALL: Healthcare Storefront Simulation");
    println!("==========================================");
    println!();
    println!("Every back-end call is simulated:");
    println!("  [1] a fixed latency, abandoned if the caller goes away");
    println!("  [2] a per-service failure probability (see [faults] in the config)");
    println!("  [3] fixture data on success, a notice on failure");
    println!();
}
