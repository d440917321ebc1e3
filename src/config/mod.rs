use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;

use crate::store::Record;

/// The single put/get round trip performed by the demo binary.
#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_set")]
    pub set: String,
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default = "default_record")]
    pub record: Record,
}

/// Concurrent put/get phase of the demo binary.
#[derive(Debug, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_keys_per_worker")]
    pub keys_per_worker: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            set: default_set(),
            key: default_key(),
            record: default_record(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            keys_per_worker: default_keys_per_worker(),
        }
    }
}

fn default_namespace() -> String {
    "myNamespace".to_string()
}

fn default_set() -> String {
    "mySet".to_string()
}

fn default_key() -> String {
    "myKey".to_string()
}

fn default_record() -> Record {
    Record::new().with_bin("bin1", "value1")
}

fn default_workers() -> usize {
    4
}

fn default_keys_per_worker() -> usize {
    100
}

/// Loads `recordstore.toml` (optional) overlaid with `RECORDSTORE__*`
/// environment variables, e.g. `RECORDSTORE__LOAD__WORKERS=8`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("recordstore.toml").required(false))
        .add_source(Environment::with_prefix("RECORDSTORE").separator("__").try_parsing(true));

    build(builder)
}

/// Parses a TOML document, filling defaults for anything it leaves out.
pub fn parse_config(toml: &str) -> Result<AppConfig, ConfigError> {
    build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.load.workers == 0 {
        return Err(ConfigError::Message("load.workers must be at least 1".to_string()));
    }
    Ok(())
}
