// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI file configuration source adapter.

use super::{IniParser, IniWriter};
use crate::domain::{ConfigError, ConfigStore, Result};
use crate::ports::{ConfigParser, ConfigSource, ConfigWriter};
use directories::ProjectDirs;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Maximum allowed file size for INI configuration files (10MB)
const MAX_INI_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "ini-file";

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

/// Configuration source adapter for INI files.
///
/// The file is located and validated when the adapter is created and read each
/// time it is loaded into a store. A structural error in the file is returned
/// from [`load_into`](ConfigSource::load_into); items before the error have
/// already been stored.
///
/// # Priority
///
/// INI files have a priority of 1, which means they are overridden by both
/// environment variables (priority 2) and command-line arguments (priority 3).
///
/// # Examples
///
/// ```rust,no_run
/// use varcfg::adapters::ini::IniFileAdapter;
/// use varcfg::domain::ConfigStore;
/// use varcfg::ports::ConfigSource;
///
/// let adapter = IniFileAdapter::from_file("/etc/myapp/config.ini").unwrap();
/// let mut store = ConfigStore::new();
/// adapter.load_into(&mut store).unwrap();
///
/// // Or from the OS configuration directory
/// let adapter = IniFileAdapter::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct IniFileAdapter {
    /// Path to the INI file
    file_path: PathBuf,
    parser: IniParser,
}

impl IniFileAdapter {
    /// Creates an adapter for an existing file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref();

        let canonical_path = file_path
            .canonicalize()
            .map_err(|e| ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: format!(
                    "Invalid or inaccessible path: {}",
                    display_name(file_path)
                ),
                source: Some(Box::new(e)),
            })?;

        let adapter = Self {
            file_path: canonical_path,
            parser: IniParser::new(),
        };
        adapter.check_size()?;
        Ok(adapter)
    }

    /// Creates an adapter for `config.ini` in the OS configuration directory.
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.ini")
    }

    /// Creates an adapter for a custom file name in the OS configuration directory.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        Self::from_file(default_config_dir(app_name, qualifier)?.join(filename))
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn check_size(&self) -> Result<()> {
        let metadata = fs::metadata(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Failed to read file metadata: {}",
                display_name(&self.file_path)
            ),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_INI_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_INI_FILE_SIZE
                ),
                source: None,
            });
        }
        Ok(())
    }
}

impl ConfigSource for IniFileAdapter {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn priority(&self) -> u8 {
        1
    }

    fn load_into(&self, store: &mut ConfigStore) -> Result<()> {
        self.check_size()?;

        let content = fs::read(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Failed to read configuration file: {}",
                display_name(&self.file_path)
            ),
            source: Some(Box::new(e)),
        })?;

        tracing::debug!(
            "Loading {} bytes of configuration from {}",
            content.len(),
            self.file_path.display()
        );
        self.parser.parse_bytes(&content, store)
    }
}

/// Resolves the OS configuration directory for an application.
pub fn default_config_dir(app_name: &str, qualifier: &str) -> Result<PathBuf> {
    ProjectDirs::from(qualifier, "", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: "Failed to determine project directories".to_string(),
            source: None,
        })
}

/// Serializes `store` into the file at `path`, creating or truncating it.
///
/// Nothing is written if the file cannot be opened.
pub fn write_file<P: AsRef<Path>>(store: &ConfigStore, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Could not open {} for output", display_name(path)),
        source: Some(Box::new(e)),
    })?;

    let mut out = BufWriter::new(file);
    IniWriter::new().write(store, &mut out)?;
    out.flush()?;
    Ok(())
}
