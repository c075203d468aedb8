//! Build-environment discovery via `pio project config --json-output`.

use colored::Colorize;
use std::path::Path;

use crate::command::run_shell;

const ENV_PREFIX: &str = "env:";

/// Ask `pio` for the project config and extract the declared environments.
///
/// Any failure — pio not runnable, non-zero exit, malformed JSON — prints a
/// diagnostic and yields an empty list, which the caller treats as terminal.
pub fn list_environments(cwd: &Path) -> Vec<String> {
    let result = run_shell("pio project config --json-output", cwd);
    if !result.succeeded {
        println!(
            "{}",
            format!("✗ Failed to read project config: {}", result.stderr.trim()).red()
        );
        return Vec::new();
    }

    match environments_from_json(&result.stdout) {
        Some(envs) => envs,
        None => {
            println!("{}", "✗ Could not parse PlatformIO config output".red());
            Vec::new()
        }
    }
}

/// Pull every `env:`-prefixed section name out of a config dump, preserving
/// the JSON object's key order. `None` when the input is not a JSON object.
fn environments_from_json(json: &str) -> Option<Vec<String>> {
    let config: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json).ok()?;
    Some(
        config
            .keys()
            .filter_map(|section| section.strip_prefix(ENV_PREFIX))
            .map(str::to_string)
            .collect(),
    )
}
