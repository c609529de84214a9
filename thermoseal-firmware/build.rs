//! Build script for thermoseal-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates thermoseal.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// UICR customer registers, the only valid commit targets
const UICR_CUSTOMER_START: i64 = 0x1000_1080;
const UICR_CUSTOMER_END: i64 = 0x1000_1100;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate thermoseal.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=thermoseal.toml");

    let config_path = Path::new("thermoseal.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: thermoseal.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds its commit configuration at build time.     ║\n\
            ║  Please create one in the thermoseal-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read thermoseal.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in thermoseal.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    report("Missing required sections", validate_required_sections(&config));
    report("Invalid calibration", validate_calibration(&config));
    report("Invalid region", validate_region(&config));
    report("Invalid writer/trigger/greeting", validate_tuning(&config));

    println!("cargo:warning=thermoseal.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list if any errors were collected
fn report(title: &str, errors: Vec<String>) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn validate_required_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();
    if config.get("calibration").is_none() {
        errors.push("Missing [calibration] section".to_string());
    }
    for (name, value) in config.as_table().into_iter().flatten() {
        if !matches!(
            name.as_str(),
            "calibration" | "region" | "writer" | "trigger" | "greeting"
        ) {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
    errors
}

/// Check an optional integer key against an inclusive range
fn check_range(
    errors: &mut Vec<String>,
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        None => None,
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => Some(*v),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {:#X}-{:#X}", section, key, min, max));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn check_bool(errors: &mut Vec<String>, config: &toml::Value, section: &str, key: &str) {
    if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
        if !value.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
        }
    }
}

/// Field widths of the packed word: 8, 2, 2 and 10 bits
fn validate_calibration(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();
    check_range(&mut errors, config, "calibration", "offset", 0, 0xFF);
    check_range(&mut errors, config, "calibration", "mode", 0, 0x3);
    check_range(&mut errors, config, "calibration", "status", 0, 0x3);
    check_range(&mut errors, config, "calibration", "setpoint", 0, 0x3FF);
    errors
}

fn validate_region(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let address = check_range(
        &mut errors,
        config,
        "region",
        "address",
        UICR_CUSTOMER_START,
        UICR_CUSTOMER_END - 4,
    );
    if let Some(address) = address {
        if address % 4 != 0 {
            errors.push(format!("[region] address {:#X} must be word-aligned", address));
        }
    }
    errors
}

fn validate_tuning(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();
    check_range(&mut errors, config, "writer", "ready_poll_limit", 1, u32::MAX as i64);
    check_bool(&mut errors, config, "trigger", "active_low");
    check_range(&mut errors, config, "trigger", "poll_interval_ms", 1, 1000);
    check_range(&mut errors, config, "greeting", "blinks", 0, u8::MAX as i64);
    check_range(&mut errors, config, "greeting", "period_ms", 0, 10_000);
    errors
}
