//! Development automation tasks for the Momentum client workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! intentionally used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::{anyhow, Context};

/// Variables a live run needs before it can talk to a real tenant.
const LIVE_ENV: &[&str] = &[
    "MOMENTUM_BASE_URL",
    "MOMENTUM_API_KEY",
    "MOMENTUM_CLIENT_ID",
    "MOMENTUM_CLIENT_SECRET",
    "MOMENTUM_RESOURCE",
];

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("test-live") => run_test_live(),
        Some("deny") => run_deny(),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Momentum Client Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci         Run all CI checks (fmt, clippy, test)");
    println!("    fmt        Check Rust code formatting");
    println!("    clippy     Run Clippy lints");
    println!("    test       Run all offline tests");
    println!("    test-live  Run the ignored tests against a real tenant (needs MOMENTUM_* env)");
    println!("    deny       Check dependencies with cargo-deny");
    println!("    help       Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...\n");

    println!("==> Step 1/3: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/3: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/3: Running tests...");
    run_test()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

fn cargo(args: &[&str]) -> anyhow::Result<bool> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;
    Ok(status.success())
}

/// Check Rust code formatting
fn run_fmt() -> anyhow::Result<()> {
    if !cargo(&["fmt", "--all", "--", "--check"])? {
        anyhow::bail!("Format check failed. Run 'cargo fmt --all' to fix.");
    }
    Ok(())
}

/// Run Clippy lints
fn run_clippy() -> anyhow::Result<()> {
    if cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])? {
        Ok(())
    } else {
        Err(anyhow!("Clippy run failed. See output above."))
    }
}

/// Run all workspace tests; live tests stay ignored
fn run_test() -> anyhow::Result<()> {
    if !cargo(&["test", "--workspace"])? {
        anyhow::bail!("Tests failed");
    }
    Ok(())
}

/// Run the ignored live tests against the tenant named in the environment
fn run_test_live() -> anyhow::Result<()> {
    // Existing variables win over .env entries.
    let _ = dotenvy::dotenv();
    let missing: Vec<&str> =
        LIVE_ENV.iter().copied().filter(|key| env::var_os(key).is_none()).collect();
    if !missing.is_empty() {
        anyhow::bail!("Live tests need these variables: {}", missing.join(", "));
    }

    if !cargo(&["test", "-p", "momentum-infra", "--test", "live", "--", "--ignored", "--test-threads=1"])?
    {
        anyhow::bail!("Live tests failed");
    }
    Ok(())
}

/// Check dependencies with cargo-deny
fn run_deny() -> anyhow::Result<()> {
    let check_installed = Command::new("cargo").args(["deny", "--version"]).output();

    if check_installed.is_err() || !check_installed.as_ref().is_ok_and(|o| o.status.success()) {
        eprintln!("cargo-deny is not installed.");
        eprintln!("Install it with: cargo install cargo-deny");
        anyhow::bail!("cargo-deny not found");
    }

    if !cargo(&["deny", "check"])? {
        anyhow::bail!("cargo-deny found issues");
    }
    Ok(())
}
