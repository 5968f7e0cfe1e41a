// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration source precedence.

use std::env;
use std::io::Write;
use tempfile::NamedTempFile;
use varcfg::prelude::*;

/// Helper to set and clean up environment variables
struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

fn ini_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
#[cfg(all(feature = "env", feature = "cli"))]
fn test_precedence_cli_over_env_over_file() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("VARCFG_PREC1_LEVEL", "env");
    env_guard.set("VARCFG_PREC1_MODE", "env");

    let file = ini_file("level = file\nmode = file\nname = file\n");

    // Sources are added in reverse order of priority on purpose
    let service = ConfigService::builder()
        .with_cli_args(vec!["--level=cli"])
        .with_env_prefix("VARCFG_PREC1_")
        .with_ini_file(file.path())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(service.get("", "level").as_str(), Some("cli"));
    assert_eq!(service.get("", "mode").as_str(), Some("env"));
    assert_eq!(service.get("", "name").as_str(), Some("file"));
}

#[test]
#[cfg(feature = "env")]
fn test_precedence_env_over_file() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("VARCFG_PREC2_PORT", "9000");

    let file = ini_file("port = 8000\n");

    let service = ConfigService::builder()
        .with_env_prefix("VARCFG_PREC2_")
        .with_ini_file(file.path())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(service.get("", "port").as_u32("port").unwrap(), 9000);
}

#[test]
#[cfg(feature = "cli")]
fn test_precedence_cli_reaches_named_sections() {
    let file = ini_file("[database]\nhost = file-host\nport = 5432\n");

    let service = ConfigService::builder()
        .with_ini_file(file.path())
        .unwrap()
        .with_cli_args(vec!["--database:host=cli-host"])
        .build()
        .unwrap();

    assert_eq!(service.get("database", "host").as_str(), Some("cli-host"));
    assert_eq!(service.get("database", "port").as_str(), Some("5432"));
}

#[test]
#[cfg(feature = "cli")]
fn test_precedence_short_flags_over_file() {
    let file = ini_file("verbose = no\nport = 1\n");

    let service = ConfigService::builder()
        .with_ini_file(file.path())
        .unwrap()
        .with_parameter('p', "port", true)
        .with_parameter('v', "verbose", false)
        .with_cli_args(vec!["-v", "-p", "2"])
        .build()
        .unwrap();

    // A flag without a value leaves the file's setting alone
    assert_eq!(service.get("", "verbose").as_str(), Some("no"));
    assert_eq!(service.get("", "port").as_str(), Some("2"));
}

#[test]
#[cfg(feature = "env")]
fn test_env_only_reaches_default_section() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("VARCFG_PREC3_HOST", "env-host");

    let file = ini_file("[server]\nhost = file-host\n");

    let service = ConfigService::builder()
        .with_ini_file(file.path())
        .unwrap()
        .with_env_prefix("VARCFG_PREC3_")
        .build()
        .unwrap();

    assert_eq!(service.get("server", "host").as_str(), Some("file-host"));
    assert_eq!(service.get("", "host").as_str(), Some("env-host"));
}

#[test]
#[cfg(all(feature = "env", feature = "cli"))]
fn test_manual_loading_last_write_wins() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("VARCFG_PREC4_COLOR", "blue");

    // Without the builder, whatever loads last wins regardless of source kind
    let mut service = ConfigService::new();
    service.get_cmdline(vec!["--color=red"]).unwrap();
    service.get_env("VARCFG_PREC4_").unwrap();

    assert_eq!(service.get("", "color").as_str(), Some("blue"));

    service.parse_str("color = green").unwrap();
    assert_eq!(service.get("", "color").as_str(), Some("green"));
}
