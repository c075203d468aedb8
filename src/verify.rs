//! Per-environment verification.
//!
//! The dry-run compile is the authoritative pass/fail signal; the library
//! dependency listing is best-effort and only ever warns.

use colored::Colorize;
use std::path::Path;

use crate::command::{run_shell, CommandResult};

/// Verify one build environment. Stateless — nothing is cached between calls.
pub fn verify(env: &str, cwd: &Path) -> bool {
    verify_with(env, |cmd| run_shell(cmd, cwd))
}

fn verify_with(env: &str, runner: impl Fn(&str) -> CommandResult) -> bool {
    println!();
    println!(
        "{}",
        format!("--- Verifying environment: {env} ---").cyan().bold()
    );

    println!("Checking {env} compile configuration...");
    let compile = runner(&format!("pio run -e {env} --dry-run"));
    if !compile.succeeded {
        println!(
            "{}",
            format!("✗ {env} compile configuration is broken:").red()
        );
        for line in compile.stderr.trim_end().lines() {
            println!("  {line}");
        }
        return false;
    }
    println!("{}", format!("✓ {env} compile configuration ok").green());

    println!("Checking {env} library dependencies...");
    let libs = runner(&format!("pio lib list -e {env}"));
    if libs.succeeded {
        println!("{}", format!("✓ {env} library dependencies ok").green());
    } else {
        println!(
            "{}",
            format!(
                "⚠ {env} library dependency check failed: {}",
                libs.stderr.trim()
            )
            .yellow()
        );
    }

    true
}
