// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service implementation.
//!
//! This module provides `ConfigService`, which owns a [`ConfigStore`] and wires it
//! to the INI format and the external sources: files, environment variables and
//! command-line arguments.

use crate::adapters::ini::{self, IniFileAdapter, IniParser, IniWriter};
#[cfg(feature = "cli")]
use crate::adapters::{CommandLineAdapter, ParameterLookup};
#[cfg(feature = "env")]
use crate::adapters::EnvVarAdapter;
use crate::domain::{ConfigError, ConfigStore, ConfigValue, Result};
use crate::ports::{ConfigObserver, ConfigParser, ConfigSource, ConfigWriter, ObserverId};
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

/// The configuration service.
///
/// A `ConfigService` is created by the caller and passed to whatever needs it;
/// there is no global instance. All writes, whatever their origin, go through
/// the store's item-writing path.
///
/// # Examples
///
/// ```rust
/// use varcfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let mut service = ConfigService::builder()
///     .with_cli_args(vec!["--server:port=8080"])
///     .build()?;
///
/// service.parse_str("[server]\nhost = localhost\n")?;
/// assert_eq!(service.get("server", "host").as_str(), Some("localhost"));
/// assert_eq!(service.get("server", "port").as_u32("server.port")?, 8080);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigService {
    store: ConfigStore,
    parser: IniParser,
    writer: IniWriter,
    #[cfg(feature = "cli")]
    parameters: ParameterLookup,
}

impl ConfigService {
    /// Creates a new service with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new configuration service builder.
    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    /// Consumes the service and returns its store.
    pub fn into_store(self) -> ConfigStore {
        self.store
    }

    /// Returns the stored value, or an empty value if absent.
    pub fn get(&self, section: &str, name: &str) -> ConfigValue {
        self.store.get(section, name)
    }

    /// Returns true if the item has been stored.
    pub fn has_item(&self, section: &str, name: &str) -> bool {
        self.store.has_item(section, name)
    }

    /// Stores an item. See [`ConfigStore::set_item`].
    pub fn set_item(
        &mut self,
        section: &str,
        name: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<()> {
        self.store.set_item(section, name, value)
    }

    /// Registers a change observer on the store.
    pub fn register_observer(&mut self, observer: Arc<dyn ConfigObserver>) -> ObserverId {
        self.store.register_observer(observer)
    }

    /// Removes a change observer.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.store.remove_observer(id)
    }

    /// Parses INI text from a stream into the store.
    ///
    /// Structural errors are returned to the caller; items before the error stay.
    pub fn parse(&mut self, reader: &mut dyn Read) -> Result<()> {
        self.parser.parse_reader(reader, &mut self.store)
    }

    /// Parses INI text into the store.
    pub fn parse_str(&mut self, content: &str) -> Result<()> {
        self.parser.parse(content, &mut self.store)
    }

    /// Reads an INI file into the store.
    ///
    /// Failing to open, validate or read the file is an error and leaves the
    /// store unchanged. Content is parsed as bytes, so it need not be UTF-8. A
    /// structural error inside the file is logged and otherwise ignored: items
    /// before it are kept and the call still succeeds. Use [`load_source`]
    /// with an [`IniFileAdapter`] to have parse errors returned instead.
    ///
    /// [`load_source`]: Self::load_source
    pub fn read_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let result = IniFileAdapter::from_file(path).and_then(|adapter| adapter.load_into(&mut self.store));

        match result {
            Err(ConfigError::Parse(err)) => {
                tracing::error!(
                    "While parsing {}: line {}, column {}: expected {}",
                    path.display(),
                    err.line(),
                    err.column(),
                    err.expected()
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!("Could not read {}: {}", path.display(), e);
                Err(e)
            }
            Ok(()) => Ok(()),
        }
    }

    /// Writes the store to an INI file, creating or truncating it.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        ini::write_file(&self.store, path).inspect_err(|e| {
            tracing::error!("Could not write {}: {}", path.display(), e);
        })
    }

    /// Writes the store as INI text to a stream.
    pub fn write_to_stream(&self, out: &mut dyn Write) -> Result<()> {
        self.writer.write(&self.store, out)
    }

    /// Loads any configuration source into the store.
    pub fn load_source(&mut self, source: &dyn ConfigSource) -> Result<()> {
        tracing::debug!("Loading configuration source '{}'", source.name());
        source.load_into(&mut self.store)
    }

    /// Registers a short command-line flag used by [`get_cmdline`](Self::get_cmdline).
    #[cfg(feature = "cli")]
    pub fn set_parameter_lookup(&mut self, short: char, name: impl Into<String>, needs_value: bool) {
        self.parameters.register(short, name, needs_value);
    }

    /// Stores items given as command-line arguments (without the program name).
    #[cfg(feature = "cli")]
    pub fn get_cmdline<S: AsRef<str>>(&mut self, args: Vec<S>) -> Result<()> {
        let adapter = CommandLineAdapter::from_args(args).with_lookup(self.parameters.clone());
        self.load_source(&adapter)
    }

    /// Stores every environment variable starting with `prefix`.
    #[cfg(feature = "env")]
    pub fn get_env(&mut self, prefix: &str) -> Result<()> {
        self.load_source(&EnvVarAdapter::with_prefix(prefix))
    }
}

/// Builder for constructing a `ConfigService`.
///
/// Sources are loaded by [`build`](Self::build) in ascending priority, so files
/// are read first, then environment variables, then command-line arguments, and
/// the last writer of an item wins. Sources with equal priority load in the
/// order they were added.
///
/// # Examples
///
/// ```rust
/// use varcfg::service::ConfigServiceBuilder;
///
/// # fn main() -> varcfg::domain::Result<()> {
/// let service = ConfigServiceBuilder::new()
///     .with_parameter('p', "port", true)
///     .with_cli_args(vec!["-p", "8080"])
///     .build()?;
/// assert_eq!(service.get("", "port").as_str(), Some("8080"));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigServiceBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
    observers: Vec<Arc<dyn ConfigObserver>>,
    #[cfg(feature = "cli")]
    cli_args: Vec<Vec<String>>,
    #[cfg(feature = "cli")]
    parameters: ParameterLookup,
}

impl ConfigServiceBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration source to the builder.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds an INI file as a configuration source.
    ///
    /// Fails immediately if the file cannot be opened; parse errors surface from
    /// [`build`](Self::build).
    pub fn with_ini_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let adapter = IniFileAdapter::from_file(path)?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Adds `config.ini` from the OS configuration directory, if it exists.
    pub fn with_default_ini(self, app_name: &str, qualifier: &str) -> Self {
        match IniFileAdapter::from_default_location(app_name, qualifier) {
            Ok(adapter) => self.with_source(Box::new(adapter)),
            Err(e) => {
                tracing::debug!("No default configuration file for '{}': {}", app_name, e);
                self
            }
        }
    }

    /// Adds environment variables with a prefix as a configuration source.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        self.with_source(Box::new(EnvVarAdapter::with_prefix(prefix)))
    }

    /// Adds command-line arguments (without the program name) as a configuration source.
    #[cfg(feature = "cli")]
    pub fn with_cli_args<S: AsRef<str>>(mut self, args: Vec<S>) -> Self {
        self.cli_args
            .push(args.iter().map(|a| a.as_ref().to_string()).collect());
        self
    }

    /// Registers a short command-line flag for every command-line source.
    #[cfg(feature = "cli")]
    pub fn with_parameter(mut self, short: char, name: impl Into<String>, needs_value: bool) -> Self {
        self.parameters.register(short, name, needs_value);
        self
    }

    /// Registers an observer before any source is loaded.
    pub fn with_observer(mut self, observer: Arc<dyn ConfigObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Builds the service and loads every source into it.
    pub fn build(self) -> Result<ConfigService> {
        let mut service = ConfigService::new();
        let mut sources = self.sources;

        #[cfg(feature = "cli")]
        {
            for args in self.cli_args {
                sources.push(Box::new(
                    CommandLineAdapter::from_args(args).with_lookup(self.parameters.clone()),
                ));
            }
            service.parameters = self.parameters;
        }

        for observer in self.observers {
            service.register_observer(observer);
        }

        sources.sort_by_key(|source| source.priority());
        for source in &sources {
            service.load_source(source.as_ref())?;
        }

        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigKey;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mock source for testing
    struct MockSource {
        name: String,
        priority: u8,
        values: Vec<(String, String)>,
    }

    impl MockSource {
        fn new(name: &str, priority: u8) -> Self {
            Self {
                name: name.to_string(),
                priority,
                values: Vec::new(),
            }
        }

        fn with_value(mut self, key: &str, value: &str) -> Self {
            self.values.push((key.to_string(), value.to_string()));
            self
        }
    }

    impl ConfigSource for MockSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn load_into(&self, store: &mut ConfigStore) -> Result<()> {
            for (key, value) in &self.values {
                store.set_item("", key, value.as_str())?;
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct NameLog(Mutex<Vec<String>>);

    impl ConfigObserver for NameLog {
        fn item_changed(&self, _section: &ConfigKey, name: &ConfigKey) -> Result<()> {
            self.0.lock().unwrap().push(name.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_service_new_is_empty() {
        let service = ConfigService::new();
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_service_set_and_get() {
        let mut service = ConfigService::new();
        service.set_item("App", "Name", "demo").unwrap();

        assert!(service.has_item("app", "name"));
        assert_eq!(service.get("app", "name").as_str(), Some("demo"));
        assert!(service.get("app", "missing").is_empty());
    }

    #[test]
    fn test_service_parse_stream() {
        let mut service = ConfigService::new();
        let mut input: &[u8] = b"[s]\nk = v\n";
        service.parse(&mut input).unwrap();
        assert_eq!(service.get("s", "k").as_str(), Some("v"));
    }

    #[test]
    fn test_service_parse_stream_error_propagates() {
        let mut service = ConfigService::new();
        let mut input: &[u8] = b"k = \"open";
        let err = service.parse(&mut input).unwrap_err();
        assert_eq!(err.as_parse_error().unwrap().expected(), "\"");
    }

    #[test]
    fn test_read_from_file_swallows_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a = 1\n[x y]\nb = 2\n").unwrap();

        let mut service = ConfigService::new();
        assert!(service.read_from_file(file.path()).is_ok());
        assert!(service.has_item("", "a"));
        assert!(!service.has_item("", "b"));
    }

    #[test]
    fn test_service_parse_stream_non_utf8() {
        let mut service = ConfigService::new();
        let mut input: &[u8] = b"# caf\xe9\nkey = value\n";
        service.parse(&mut input).unwrap();
        assert_eq!(service.get("", "key").as_str(), Some("value"));
    }

    #[test]
    fn test_read_from_file_non_utf8() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"a = 1\nmotd = \"caf\xe9\"\n").unwrap();

        let mut service = ConfigService::new();
        service.read_from_file(file.path()).unwrap();
        assert_eq!(service.get("", "a").as_str(), Some("1"));
        assert_eq!(service.get("", "motd").as_str(), Some("caf\u{FFFD}"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_read_failure_is_logged_as_read_error() {
        // A directory opens and passes the size check but cannot be read
        let dir = tempfile::TempDir::new().unwrap();
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let mut service = ConfigService::new();
        let result = tracing::subscriber::with_default(subscriber, || {
            service.read_from_file(dir.path())
        });

        assert!(matches!(result, Err(ConfigError::SourceError { .. })));
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Could not read"), "unexpected log: {}", output);
        assert!(output.contains("Failed to read configuration file"));
        assert!(!output.contains("for input"));
    }

    #[test]
    fn test_read_from_missing_file_fails() {
        let mut service = ConfigService::new();
        assert!(service.read_from_file("/nonexistent/varcfg.ini").is_err());
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_write_to_stream() {
        let mut service = ConfigService::new();
        service.set_item("s", "k", "v").unwrap();

        let mut out = Vec::new();
        service.write_to_stream(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n[s]\n\nk = \"v\"\n");
    }

    #[test]
    fn test_load_source() {
        let mut service = ConfigService::new();
        service
            .load_source(&MockSource::new("mock", 1).with_value("key", "value"))
            .unwrap();
        assert_eq!(service.get("", "key").as_str(), Some("value"));
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_get_cmdline_uses_registered_parameters() {
        let mut service = ConfigService::new();
        service.set_parameter_lookup('p', "port", true);
        service.get_cmdline(vec!["-p", "80", "--log:level=warn"]).unwrap();

        assert_eq!(service.get("", "port").as_str(), Some("80"));
        assert_eq!(service.get("log", "level").as_str(), Some("warn"));
    }

    #[test]
    fn test_builder_priority_order() {
        let service = ConfigServiceBuilder::new()
            .with_source(Box::new(MockSource::new("high", 3).with_value("key", "high")))
            .with_source(Box::new(MockSource::new("low", 1).with_value("key", "low")))
            .with_source(Box::new(MockSource::new("medium", 2).with_value("key", "medium")))
            .build()
            .unwrap();

        assert_eq!(service.get("", "key").as_str(), Some("high"));
    }

    #[test]
    fn test_builder_equal_priority_keeps_order() {
        let service = ConfigServiceBuilder::new()
            .with_source(Box::new(MockSource::new("first", 1).with_value("key", "first")))
            .with_source(Box::new(MockSource::new("second", 1).with_value("key", "second")))
            .build()
            .unwrap();

        assert_eq!(service.get("", "key").as_str(), Some("second"));
    }

    #[test]
    fn test_builder_observers_see_loads() {
        let log = Arc::new(NameLog::default());
        ConfigServiceBuilder::new()
            .with_observer(log.clone())
            .with_source(Box::new(
                MockSource::new("mock", 1)
                    .with_value("a", "1")
                    .with_value("b", "2"),
            ))
            .build()
            .unwrap();

        assert_eq!(*log.0.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_builder_source_error_propagates() {
        let result = ConfigServiceBuilder::new()
            .with_source(Box::new(MockSource::new("bad", 1).with_value("", "x")))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidItem { .. })));
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_get_cmdline_flag_without_value_is_ignored() {
        let mut service = ConfigService::new();
        service.set_parameter_lookup('v', "verbose", false);
        service.get_cmdline(vec!["-v"]).unwrap();
        assert!(!service.has_item("", "verbose"));
        assert!(service.store().is_empty());
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_builder_parameters_registered_after_args() {
        let service = ConfigServiceBuilder::new()
            .with_cli_args(vec!["-n", "demo"])
            .with_parameter('n', "name", true)
            .build()
            .unwrap();

        assert_eq!(service.get("", "name").as_str(), Some("demo"));
    }

    #[test]
    fn test_builder_with_ini_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[db]\nport = 5432").unwrap();

        let service = ConfigServiceBuilder::new()
            .with_ini_file(file.path())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(service.get("db", "port").as_str(), Some("5432"));
    }

    #[test]
    fn test_builder_default() {
        let service = ConfigServiceBuilder::default().build().unwrap();
        assert!(service.store().is_empty());
    }
}
