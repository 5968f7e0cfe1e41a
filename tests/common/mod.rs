// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

use std::sync::{Mutex, Once};
use varcfg::domain::{ConfigKey, Result};
use varcfg::ports::ConfigObserver;

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// An observer recording every notification it receives.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct RecordingObserver {
    /// Number of `config_changed` calls
    pub changes: Mutex<usize>,
    /// `(section, name)` of every `item_changed` call, in order
    pub items: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl RecordingObserver {
    /// Returns the number of `config_changed` calls so far.
    pub fn change_count(&self) -> usize {
        *self.changes.lock().unwrap()
    }

    /// Returns a copy of the recorded items.
    pub fn items(&self) -> Vec<(String, String)> {
        self.items.lock().unwrap().clone()
    }
}

impl ConfigObserver for RecordingObserver {
    fn config_changed(&self) -> Result<()> {
        *self.changes.lock().unwrap() += 1;
        Ok(())
    }

    fn item_changed(&self, section: &ConfigKey, name: &ConfigKey) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .push((section.to_string(), name.to_string()));
        Ok(())
    }
}
