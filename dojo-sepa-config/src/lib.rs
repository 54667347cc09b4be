use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use v1::creditor::CreditorConfig;

mod v1 {
    /// Creditor (dojo) profile
    pub mod creditor;
}

pub const CURRENT_VERSION: usize = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "current_version")]
    version: usize,
    #[serde(default)]
    creditor: v1::creditor::CreditorConfig,
}

fn current_version() -> usize {
    CURRENT_VERSION
}

impl Config {
    pub fn new(creditor: CreditorConfig) -> Self {
        Self {
            creditor,
            version: CURRENT_VERSION,
        }
    }

    pub fn creditor(&self) -> &v1::creditor::CreditorConfig {
        &self.creditor
    }

    pub fn creditor_mut(&mut self) -> &mut v1::creditor::CreditorConfig {
        &mut self.creditor
    }

    pub fn version(&self) -> usize {
        self.version
    }

    pub fn from_toml(toml: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Reads the config at `path`. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml(&config)?)
    }

    /// Reads the config from [`config_location`], falling back to the
    /// default config when nothing was saved there yet.
    pub fn load_from_file() -> Result<Self, ConfigError> {
        let path = config_location()?;
        if !path.exists() {
            return Ok(Default::default());
        }
        Self::load(&path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = self.to_toml()?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let config_file = std::fs::File::create(path).map_err(io_err)?;
        let mut buf = BufWriter::new(config_file);
        buf.write_all(toml.as_bytes()).map_err(io_err)?;
        buf.flush().map_err(io_err)?;
        Ok(())
    }

    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        self.save(&config_location()?)
    }

    /// get a list of all things potentially wrong with the config
    pub fn config_errors(&self) -> Vec<&str> {
        let mut errors = Vec::new();
        let creditor = self.creditor();
        if creditor.name.trim().is_empty() {
            errors.push("Creditor name is empty");
        }
        if creditor.creditor_id.trim().is_empty() {
            errors.push("Creditor identifier is empty");
        }
        if creditor.iban.trim().is_empty() {
            errors.push("Creditor IBAN is empty");
        }
        if creditor.city.trim().is_empty() {
            errors.push("Creditor city is empty");
        }
        if self.version > CURRENT_VERSION {
            errors.push("Config was written by a newer version");
        }
        errors
    }
}

/// `<config dir>/dojo-sepa/config.toml`, or `dojo-sepa.toml` in the working
/// directory when the platform has no config dir.
pub fn config_location() -> Result<PathBuf, ConfigError> {
    if let Some(config_dir) = dirs::config_dir() {
        let dir = config_dir.join("dojo-sepa");
        std::fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(dir.join("config.toml"))
    } else {
        Ok(PathBuf::from("dojo-sepa.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(CreditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version = 1

[creditor]
name = "Budo Dojo e.V."
street = "Hauptstr. 1"
postal_code = "10115"
city = "Berlin"
country = "DE"
creditor_id = "DE98ZZZ09999999999"
iban = "DE89370400440532013000"
"#;

    #[test]
    fn reads_creditor_section() {
        let config = Config::from_toml(SAMPLE).unwrap();
        let creditor = config.creditor();
        assert_eq!(creditor.name, "Budo Dojo e.V.");
        assert_eq!(creditor.country.as_deref(), Some("DE"));
        assert_eq!(creditor.bic, None);
        assert!(config.config_errors().is_empty());
    }

    #[test]
    fn toml_round_trip_keeps_creditor() {
        let config = Config::from_toml(SAMPLE).unwrap();
        let again = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, again);
    }

    #[test]
    fn empty_config_lists_problems() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.version(), CURRENT_VERSION);
        let errors = config.config_errors();
        assert!(errors.contains(&"Creditor identifier is empty"));
        assert!(errors.contains(&"Creditor IBAN is empty"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("dojo-sepa-does-not-exist.tmol");
        match Config::load(&path) {
            Err(ConfigError::Io { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected a not-found error, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("dojo-sepa-{}.toml", std::process::id()));
        let mut config = Config::default();
        config.creditor_mut().name = "Karate Club".to_string();
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.creditor().name, "Karate Club");
    }
}
