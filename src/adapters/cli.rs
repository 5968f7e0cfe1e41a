// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument configuration source adapter.
//!
//! This module provides an adapter that stores items given as command-line
//! arguments.

use crate::domain::{ConfigStore, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;

/// A registered short flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Item name the flag writes to, in the default section
    pub name: String,
    /// Whether the flag consumes the following argument as its value
    pub needs_value: bool,
}

/// Maps single-character flags to the items they set.
///
/// # Examples
///
/// ```rust
/// use varcfg::adapters::ParameterLookup;
///
/// let mut lookup = ParameterLookup::new();
/// lookup.register('p', "port", true);
/// assert_eq!(lookup.get('p').unwrap().name, "port");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterLookup {
    parameters: HashMap<char, Parameter>,
}

impl ParameterLookup {
    /// Creates an empty lookup table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the meaning of `-short`.
    pub fn register(&mut self, short: char, name: impl Into<String>, needs_value: bool) {
        self.parameters.insert(
            short,
            Parameter {
                name: name.into(),
                needs_value,
            },
        );
    }

    /// Looks up a short flag.
    pub fn get(&self, short: char) -> Option<&Parameter> {
        self.parameters.get(&short)
    }

    /// Returns the number of registered flags.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if no flag is registered.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Configuration source adapter for command-line arguments.
///
/// Supported argument forms:
/// - `--section:name=value`: item in a named section
/// - `--name=value`: item in the default section
/// - `--section:name` and `--name`: item with an empty value
/// - `-x value`: short flag resolved through a [`ParameterLookup`]
///
/// Arguments that are not flags, short flags that are not registered, and
/// registered flags that take no value are ignored. A long argument with no item name (such as `--` or `--=v`) fails
/// with [`ConfigError::InvalidItem`](crate::domain::ConfigError::InvalidItem).
///
/// # Priority
///
/// Command-line arguments have the highest priority (3), which means they override
/// both environment variables (priority 2) and configuration files (priority 1).
///
/// # Examples
///
/// ```rust
/// use varcfg::adapters::CommandLineAdapter;
/// use varcfg::domain::ConfigStore;
/// use varcfg::ports::ConfigSource;
///
/// let adapter = CommandLineAdapter::from_args(vec!["--db:host=localhost", "-p", "8080"])
///     .with_parameter('p', "port", true);
///
/// let mut store = ConfigStore::new();
/// adapter.load_into(&mut store).unwrap();
/// assert_eq!(store.get("db", "host").as_str(), Some("localhost"));
/// assert_eq!(store.get("", "port").as_str(), Some("8080"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    /// Arguments, without the program name
    args: Vec<String>,
    parameters: ParameterLookup,
}

impl CommandLineAdapter {
    /// Creates a new command-line adapter with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new command-line adapter from arguments, excluding the program name.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        Self {
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
            parameters: ParameterLookup::new(),
        }
    }

    /// Creates a new command-line adapter from the process's command-line arguments.
    ///
    /// This skips the first argument (the program name).
    pub fn from_env_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(args)
    }

    /// Registers a short flag.
    pub fn with_parameter(mut self, short: char, name: impl Into<String>, needs_value: bool) -> Self {
        self.parameters.register(short, name, needs_value);
        self
    }

    /// Replaces the short flag table.
    pub fn with_lookup(mut self, parameters: ParameterLookup) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the short flag table.
    pub fn parameters(&self) -> &ParameterLookup {
        &self.parameters
    }

    /// Splits the body of a long argument (after `--`) into `(section, name, value)`.
    fn split_long(body: &str) -> (&str, &str, &str) {
        let (key, value) = body.split_once('=').unwrap_or((body, ""));
        match key.split_once(':') {
            // `--sec:=v` keeps the colon in a default-section name
            Some((_, "")) if body.contains('=') => ("", key, value),
            Some((section, name)) => (section, name, value),
            None => ("", key, value),
        }
    }
}

impl ConfigSource for CommandLineAdapter {
    fn name(&self) -> &str {
        "cli"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn load_into(&self, store: &mut ConfigStore) -> Result<()> {
        let mut i = 0;
        while i < self.args.len() {
            let arg = self.args[i].as_str();

            if let Some(body) = arg.strip_prefix("--") {
                let (section, name, value) = Self::split_long(body);
                store.set_item(section, name, value)?;
            } else if let Some(short) = arg.strip_prefix('-').and_then(|s| s.chars().next()) {
                match self.parameters.get(short) {
                    Some(param) if param.needs_value => {
                        match self.args.get(i + 1) {
                            Some(next) if !next.starts_with('-') => {
                                store.set_item("", &param.name, next.as_str())?;
                                i += 1;
                            }
                            _ => tracing::debug!("Flag -{} is missing its value", short),
                        }
                    }
                    Some(param) => tracing::debug!(
                        "Flag -{} ({}) takes no value, nothing stored",
                        short,
                        param.name
                    ),
                    None => tracing::debug!("Ignoring unknown flag -{}", short),
                }
            }
            i += 1;
        }
        Ok(())
    }
}
