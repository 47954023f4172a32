//! Build script for petitcat-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates machine.toml at compile time
//! - Generates the constant head configuration from machine.toml

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One integer setting: key, default, accepted range
struct Field {
    key: &'static str,
    default: i64,
    min: i64,
    max: i64,
}

const HEAD_FIELDS: &[Field] = &[
    Field { key: "saccade_span_deg", default: 10, min: 1, max: 90 },
    Field { key: "saccade_period_ms", default: 150, min: 20, max: 10_000 },
    Field { key: "monitor_period_ms", default: 500, min: 20, max: 60_000 },
    Field { key: "monitor_variation_mm", default: 50, min: 1, max: 5_000 },
    Field { key: "head_x_mm", default: 80, min: -1_000, max: 1_000 },
    Field { key: "poll_interval_ms", default: 10, min: 1, max: 1_000 },
];

const SERVO_FIELDS: &[Field] = &[
    Field { key: "min_pulse_us", default: 544, min: 100, max: 3_000 },
    Field { key: "max_pulse_us", default: 2_400, min: 100, max: 3_000 },
    Field { key: "period_us", default: 20_000, min: 3_000, max: 65_535 },
];

const RANGER_FIELDS: &[Field] = &[
    Field { key: "timeout_us", default: 10_000, min: 1_000, max: 60_000 },
];

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
fn validate_config() -> toml::Value {
    // Re-run if machine.toml changes
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a machine.toml configuration file.        ║\n\
            ║  Please create one in the petitcat-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in machine.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);

    validate_section(&config, "head", HEAD_FIELDS);
    validate_section(&config, "servo", SERVO_FIELDS);
    validate_section(&config, "ranger", RANGER_FIELDS);
    validate_servo_pulses(&config);

    println!("cargo:warning=machine.toml validated successfully");
    config
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

/// Abort the build with a list of configuration errors
fn fail(title: &str, errors: &[String]) -> ! {
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

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let mut errors = Vec::new();

    for section in ["head", "servo", "ranger"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }

    if !errors.is_empty() {
        fail("Missing required sections in machine.toml", &errors);
    }
}

/// Validate the integer fields of one section
fn validate_section(config: &toml::Value, section: &str, fields: &[Field]) {
    let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
        return;
    };

    let mut errors = Vec::new();

    for key in table.keys() {
        if !fields.iter().any(|f| f.key == key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }

    for field in fields {
        match table.get(field.key) {
            None => {}
            Some(toml::Value::Integer(value)) => {
                if *value < field.min || *value > field.max {
                    errors.push(format!(
                        "[{}] {} must be {}-{}",
                        section, field.key, field.min, field.max
                    ));
                }
            }
            Some(_) => errors.push(format!("[{}] {} must be an integer", section, field.key)),
        }
    }

    if !errors.is_empty() {
        fail(&format!("Invalid [{}] configuration", section), &errors);
    }
}

/// Validate that the servo pulse range fits its frame
fn validate_servo_pulses(config: &toml::Value) {
    let min = setting(config, "servo", &SERVO_FIELDS[0]);
    let max = setting(config, "servo", &SERVO_FIELDS[1]);
    let period = setting(config, "servo", &SERVO_FIELDS[2]);

    let mut errors = Vec::new();
    if min >= max {
        errors.push("[servo] min_pulse_us must be below max_pulse_us".to_string());
    }
    if max >= period {
        errors.push("[servo] max_pulse_us must be below period_us".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid [servo] configuration", &errors);
    }
}

/// Read a validated setting, falling back to its default
fn setting(config: &toml::Value, section: &str, field: &Field) -> i64 {
    config
        .get(section)
        .and_then(|s| s.get(field.key))
        .and_then(|v| v.as_integer())
        .unwrap_or(field.default)
}

/// Write the constant configuration included by `src/config.rs`
fn generate_config(config: &toml::Value) {
    let head = |key: &str| {
        let field = HEAD_FIELDS.iter().find(|f| f.key == key).unwrap();
        setting(config, "head", field)
    };
    let servo = |key: &str| {
        let field = SERVO_FIELDS.iter().find(|f| f.key == key).unwrap();
        setting(config, "servo", field)
    };
    let ranger = |key: &str| {
        let field = RANGER_FIELDS.iter().find(|f| f.key == key).unwrap();
        setting(config, "ranger", field)
    };

    let generated = format!(
        "/// Head timing and geometry\n\
         pub const HEAD_CONFIG: HeadConfig = HeadConfig {{\n    \
             saccade_span_deg: {},\n    \
             saccade_period_ms: {},\n    \
             monitor_period_ms: {},\n    \
             monitor_variation_mm: {},\n    \
             head_x_mm: {},\n\
         }};\n\n\
         /// Servo pulse timing\n\
         pub const SERVO_CONFIG: ServoConfig = ServoConfig {{\n    \
             min_pulse_us: {},\n    \
             max_pulse_us: {},\n    \
             period_us: {},\n\
         }};\n\n\
         /// Ranger timing\n\
         pub const RANGER_CONFIG: HcSr04Config = HcSr04Config {{\n    \
             timeout_us: {},\n\
         }};\n\n\
         /// Interval between aligner polls (ms)\n\
         pub const POLL_INTERVAL_MS: u32 = {};\n",
        head("saccade_span_deg"),
        head("saccade_period_ms"),
        head("monitor_period_ms"),
        head("monitor_variation_mm"),
        head("head_x_mm"),
        servo("min_pulse_us"),
        servo("max_pulse_us"),
        servo("period_us"),
        ranger("timeout_us"),
        head("poll_interval_ms"),
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("head_config.rs"), generated).unwrap();
}
