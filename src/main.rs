//! Pre-build verification for the firmware's PlatformIO environments.
//!
//! Run from the project root before kicking off a real build. Checks, in
//! order: project marker, pio availability, pin configuration, environment
//! discovery, then a dry-run compile of every declared environment. Exits 1
//! on the first gate failure or if any environment fails its compile check.

mod command;
mod environments;
mod pin_config;
mod verify;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

#[derive(Parser)]
#[command(name = "pio-precheck")]
#[command(about = "Verify PlatformIO environment and pin configuration", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root containing platformio.ini (defaults to the current directory)
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli.project_dir)
}

fn run(project_dir: &Path) -> Result<()> {
    println!();
    println!(
        "{}",
        "=== PlatformIO environment verification ===".cyan().bold()
    );
    println!();

    // Gate 1: project root marker
    if !is_project_root(project_dir) {
        println!(
            "{}",
            "✗ Not a PlatformIO project root (no platformio.ini)"
                .red()
                .bold()
        );
        println!("  {}", "Run this from the project root directory".dimmed());
        anyhow::bail!("not a PlatformIO project root");
    }
    println!("{}", "✓ In a PlatformIO project directory".green());

    // Gate 2: pio must be invocable
    if !check_platformio(project_dir) {
        println!();
        println!("{}", "Install PlatformIO first:".dimmed());
        println!("  {}", "pip install platformio".dimmed());
        anyhow::bail!("PlatformIO CLI not available");
    }

    // Gate 3: pin configuration
    if !pin_config::check_pin_configuration(&project_dir.join("include/config.h")) {
        anyhow::bail!("pin configuration check failed, review include/config.h");
    }

    // Gate 4: pin conflicts are left to the compile-time asserts
    report_pin_conflicts();

    // Gate 5: at least one environment must be declared
    let environments = environments::list_environments(project_dir);
    if environments.is_empty() {
        anyhow::bail!("no PlatformIO environments found");
    }
    println!();
    println!(
        "{}",
        format!(
            "✓ Found {} environments: {}",
            environments.len(),
            environments.join(", ")
        )
        .green()
    );

    // Verify every environment; failures are collected, not short-circuited.
    let failed = collect_failures(&environments, |env| verify::verify(env, project_dir));

    println!();
    println!("{}", "=== Verification result ===".cyan().bold());
    if !failed.is_empty() {
        println!(
            "{}",
            format!(
                "✗ {} environment(s) failed verification: {}",
                failed.len(),
                failed.join(", ")
            )
            .red()
            .bold()
        );
        anyhow::bail!("environment verification failed");
    }

    println!(
        "{}",
        format!("✓ All {} environments verified", environments.len())
            .green()
            .bold()
    );
    print_followup_commands();

    Ok(())
}

/// Run `verifier` over every environment in order, returning the ones that
/// failed. A failure never stops iteration over the remaining environments.
fn collect_failures<'a>(
    environments: &'a [String],
    verifier: impl Fn(&str) -> bool,
) -> Vec<&'a str> {
    environments
        .iter()
        .map(String::as_str)
        .filter(|env| !verifier(env))
        .collect()
}

fn is_project_root(dir: &Path) -> bool {
    dir.join("platformio.ini").exists()
}

fn check_platformio(cwd: &Path) -> bool {
    let result = command::run_shell("pio --version", cwd);
    if result.succeeded {
        println!(
            "{}",
            format!("✓ PlatformIO installed: {}", result.stdout.trim()).green()
        );
        true
    } else {
        println!(
            "{}",
            format!(
                "✗ PlatformIO not installed or not runnable: {}",
                result.stderr.trim()
            )
            .red()
        );
        false
    }
}

/// Always passes. Actual conflict detection lives in the compile-time asserts
/// in config.h; this just states the expected per-board assignments.
fn report_pin_conflicts() {
    println!();
    println!("{}", "--- Checking pin conflicts ---".cyan().bold());
    println!("{}", "✓ Pin conflicts are verified at compile time".green());
    println!(
        "  {}",
        "ESP32-C3: button(3) ≠ LED(2) ≠ I2C(8,9) ≠ buzzer(4)".dimmed()
    );
    println!(
        "  {}",
        "ESP32:    button(2) ≠ LED(4) ≠ I2C(21,22) ≠ buzzer(15)".dimmed()
    );
}

fn print_followup_commands() {
    println!();
    println!("{}", "Recommended build commands:".cyan());
    println!("  {}", "# ESP32-C3 SuperMini (debug)".dimmed());
    println!("  pio run -e esp32-c3-devkitm-1 --target upload");
    println!();
    println!("  {}", "# ESP32 DevKit (debug)".dimmed());
    println!("  pio run -e esp32dev --target upload");
    println!();
    println!("  {}", "# Release builds (no debug output)".dimmed());
    println!("  pio run -e esp32-c3-release --target upload");
    println!("  pio run -e esp32dev-release --target upload");
    println!();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn project_root_requires_platformio_ini() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_project_root(tmp.path()));

        fs::write(tmp.path().join("platformio.ini"), "[env:esp32dev]\n").unwrap();
        assert!(is_project_root(tmp.path()));
    }

    #[test]
    fn missing_marker_fails_the_run() {
        let tmp = TempDir::new().unwrap();
        assert!(run(tmp.path()).is_err());
    }

    #[test]
    fn failed_environments_are_named_exactly() {
        let envs: Vec<String> = ["esp32dev", "esp32-c3-devkitm-1"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let failed = collect_failures(&envs, |env| env != "esp32dev");
        assert_eq!(failed, vec!["esp32dev"]);
    }

    #[test]
    fn a_failure_does_not_stop_the_remaining_checks() {
        use std::cell::RefCell;

        let envs: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();
        let visited = RefCell::new(Vec::new());
        let failed = collect_failures(&envs, |env| {
            visited.borrow_mut().push(env.to_string());
            env != "a"
        });
        assert_eq!(failed, vec!["a"]);
        assert_eq!(visited.into_inner(), vec!["a", "b", "c"]);
    }

    #[test]
    fn no_failures_yields_an_empty_list() {
        let envs = vec!["esp32dev".to_string()];
        assert!(collect_failures(&envs, |_| true).is_empty());
    }
}
