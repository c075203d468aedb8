//! Pin configuration smoke test.
//!
//! Scans `include/config.h` for required macro definitions by substring —
//! deliberately not a preprocessor parser. A macro counts as present when it
//! appears as either `#define NAME` or a `#ifndef NAME` default guard. The
//! real validation happens at compile time; this only catches a config.h that
//! is obviously incomplete before a long build is kicked off.

use colored::Colorize;
use std::fs;
use std::path::Path;

/// Pin macros every board variant must define (or guard) in config.h.
const REQUIRED_MACROS: &[&str] = &[
    "I2C_SDA_PIN",
    "I2C_SCL_PIN",
    "BUTTON_PIN",
    "BUZZER_PIN",
    "LED_PIN",
    "BUTTON_PRESSED_STATE",
    "BUTTON_RELEASED_STATE",
    "BUTTON_PIN_MODE",
];

/// Board-specific sections and the compile-time pin-conflict assert marker.
/// Informational only — absence is a warning, never a failure.
const OPTIONAL_MARKERS: &[(&str, &str)] = &[
    ("BOARD_ESP32_C3_SUPERMINI", "ESP32-C3 SuperMini configuration"),
    ("BOARD_ESP32_DEVKIT", "ESP32 DevKit configuration"),
    ("TEST_ASSERT_NOT_EQUAL_MESSAGE", "compile-time pin-conflict checks"),
];

/// Check that `path` exists and defines every required pin macro.
pub fn check_pin_configuration(path: &Path) -> bool {
    if !path.exists() {
        println!(
            "{}",
            format!("✗ {} does not exist", path.display()).red()
        );
        return false;
    }

    println!();
    println!("{}", "--- Checking pin configuration ---".cyan().bold());

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            println!(
                "{}",
                format!("✗ Failed to read {}: {err}", path.display()).red()
            );
            return false;
        }
    };

    let missing = missing_macros(&content);
    if !missing.is_empty() {
        println!(
            "{}",
            format!("✗ Missing required macro definitions: {}", missing.join(", ")).red()
        );
        return false;
    }
    println!("{}", "✓ All required pin macros are defined".green());

    for (marker, description) in OPTIONAL_MARKERS {
        if content.contains(marker) {
            println!("{}", format!("✓ Contains {description}").green());
        } else {
            println!("{}", format!("⚠ Missing {description}").yellow());
        }
    }

    true
}

/// Every required macro that appears in neither definition nor guard form.
fn missing_macros(content: &str) -> Vec<&'static str> {
    REQUIRED_MACROS
        .iter()
        .copied()
        .filter(|name| {
            !content.contains(&format!("#define {name}"))
                && !content.contains(&format!("#ifndef {name}"))
        })
        .collect()
}
