//! Loading column configuration from YAML
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use skein_cc::ColumnConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IoError: {0}")]
    Io(#[from] io::Error),
    #[error("YamlError: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse a `ColumnConfig` from a YAML string. Omitted fields take their
/// defaults.
///
/// # Example
///
/// ```
/// # use skein::config::column_config_from_yaml;
/// let config = column_config_from_yaml("alpha: 0.5\nn_grid: 12").unwrap();
///
/// assert_eq!(config.alpha, 0.5);
/// assert_eq!(config.n_grid, 12);
/// assert!(!config.crosscat);
/// ```
pub fn column_config_from_yaml(yaml: &str) -> Result<ColumnConfig, ConfigError> {
    serde_yaml::from_str(yaml).map_err(ConfigError::Yaml)
}

/// Load a `ColumnConfig` from a YAML file
pub fn load_column_config<P: AsRef<Path>>(
    path: P,
) -> Result<ColumnConfig, ConfigError> {
    let mut file = io::BufReader::new(fs::File::open(path)?);
    let mut ser = String::new();
    file.read_to_string(&mut ser)?;
    column_config_from_yaml(ser.as_str())
}

/// Write a `ColumnConfig` to a YAML file
pub fn save_column_config<P: AsRef<Path>>(
    config: &ColumnConfig,
    path: P,
) -> Result<(), ConfigError> {
    let ser = serde_yaml::to_string(config)?;
    fs::write(path, ser)?;
    Ok(())
}
