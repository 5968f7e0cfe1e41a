// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! This module provides an adapter that stores prefixed environment variables as
//! items of the default section.

use crate::domain::{ConfigError, ConfigStore, Result};
use crate::ports::ConfigSource;
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source adapter for environment variables.
///
/// Every variable whose name starts with the prefix becomes an item of the
/// default section, named by whatever follows the prefix. Names are normalized
/// by the store, so `APP_Log.Level` with prefix `APP_` is stored as `log_level`.
/// A variable named exactly like the prefix has no item name and aborts the
/// scan with [`ConfigError::InvalidEnvironment`].
///
/// # Priority
///
/// Environment variables have a priority of 2, which means they override configuration
/// files (priority 1) but are overridden by command-line arguments (priority 3).
///
/// # Examples
///
/// ```rust
/// use varcfg::adapters::EnvVarAdapter;
/// use varcfg::domain::ConfigStore;
/// use varcfg::ports::ConfigSource;
///
/// let adapter = EnvVarAdapter::with_values("APP_", vec![
///     ("APP_PORT".to_string(), "8080".to_string()),
///     ("HOME".to_string(), "/root".to_string()),
/// ]);
///
/// let mut store = ConfigStore::new();
/// adapter.load_into(&mut store).unwrap();
/// assert_eq!(store.get("", "port").as_str(), Some("8080"));
/// assert!(!store.has_item("", "home"));
/// ```
#[derive(Debug, Clone)]
pub struct EnvVarAdapter {
    /// Prefix selecting the variables to ingest
    prefix: String,
    /// Fixed entries used instead of the process environment
    values: Option<Vec<(String, String)>>,
}

impl EnvVarAdapter {
    /// Creates an adapter reading the process environment.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The prefix to filter environment variables (e.g., "APP_")
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            values: None,
        }
    }

    /// Creates an adapter over fixed `(name, value)` entries instead of the
    /// process environment.
    ///
    /// **Note**: This method is primarily intended for testing.
    pub fn with_values(prefix: impl Into<String>, values: Vec<(String, String)>) -> Self {
        Self {
            prefix: prefix.into(),
            values: Some(values),
        }
    }

    /// Returns the prefix this adapter filters on.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn entries(&self) -> Vec<(String, String)> {
        if let Some(values) = &self.values {
            return values.clone();
        }

        env::vars_os()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    tracing::debug!("Skipping non UTF-8 environment variable: {:?}", key);
                    None
                }
            })
            .collect()
    }

    fn ingest(&self, key: &str, value: &str, store: &mut ConfigStore) -> Result<bool> {
        let Some(name) = key.strip_prefix(self.prefix.as_str()) else {
            return Ok(false);
        };

        if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
            tracing::debug!(
                "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                key.len(),
                value.len(),
                MAX_ENV_KEY_LEN,
                MAX_ENV_VALUE_LEN
            );
            return Ok(false);
        }

        if name.is_empty() {
            return Err(ConfigError::InvalidEnvironment {
                variable: key.to_string(),
            });
        }

        store.set_item("", name, value)?;
        Ok(true)
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn load_into(&self, store: &mut ConfigStore) -> Result<()> {
        let mut loaded = 0;
        for (key, value) in self.entries() {
            if self.ingest(&key, &value, store)? {
                loaded += 1;
            }
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?})",
            loaded,
            self.prefix
        );
        Ok(())
    }
}
