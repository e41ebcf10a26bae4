// src/core/config.rs

use crate::core::common::ArborError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the census database facade.
///
/// Only the facade and the ingest loader consult it; the core index and
/// query engine take no configuration at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// CSV file loaded on open; `None` starts an empty collection.
    pub data_file: Option<PathBuf>,
    /// Whether the data file's first line is a header row.
    pub has_header: bool,
    /// Abort the load on the first malformed line instead of skipping it.
    pub strict_ingest: bool,
    /// Radius used by the demo's nearby search when none is given, in km.
    pub default_radius_km: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            has_header: true,
            strict_ingest: false,
            default_radius_km: 1.0,
        }
    }
}

/// Builder for [`Config`] instances.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    data_file: Option<PathBuf>,
    has_header: Option<bool>,
    strict_ingest: Option<bool>,
    default_radius_km: Option<f64>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CSV file to load on open.
    #[must_use]
    pub fn data_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_file = Some(path.into());
        self
    }

    /// Sets whether the data file carries a header row.
    #[must_use]
    pub const fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    /// Enables or disables strict ingest.
    #[must_use]
    pub const fn strict_ingest(mut self, strict: bool) -> Self {
        self.strict_ingest = Some(strict);
        self
    }

    /// Sets the default nearby-search radius in kilometres.
    #[must_use]
    pub const fn default_radius_km(mut self, radius: f64) -> Self {
        self.default_radius_km = Some(radius);
        self
    }

    /// Builds the [`Config`], validating the result.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::Configuration` when validation fails.
    pub fn build(self) -> Result<Config, ArborError> {
        let defaults = Config::default();
        let config = Config {
            data_file: self.data_file,
            has_header: self.has_header.unwrap_or(defaults.has_header),
            strict_ingest: self.strict_ingest.unwrap_or(defaults.strict_ingest),
            default_radius_km: self.default_radius_km.unwrap_or(defaults.default_radius_km),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Creates a new [`ConfigBuilder`] for fluent configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::Configuration` when a field is out of range.
    pub fn validate(&self) -> Result<(), ArborError> {
        if !self.default_radius_km.is_finite() || self.default_radius_km <= 0.0 {
            return Err(ArborError::Configuration(
                "default_radius_km must be a positive, finite number".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads configuration from a TOML file. A missing file yields the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::Configuration` if parsing or validation fails,
    /// or `ArborError::Io` for any other read failure.
    pub fn load_from_file(path: &Path) -> Result<Self, ArborError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents).map_err(|e| {
                    ArborError::Configuration(format!(
                        "Failed to parse config file '{}': {e}",
                        path.display()
                    ))
                })?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ArborError::Io(e)),
        }
    }

    /// Loads configuration from an optional TOML file path; `None` and a
    /// missing file both yield the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::Configuration` if the file exists but cannot be
    /// parsed or fails validation.
    pub fn load_or_default(optional_path: Option<&Path>) -> Result<Self, ArborError> {
        match optional_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Configuration used by file-free tests: no data file, no header,
    /// strict ingest so silent skips cannot mask a bad fixture.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            data_file: None,
            has_header: false,
            strict_ingest: true,
            default_radius_km: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.data_file.is_none());
        assert!(config.has_header);
        assert!(!config.strict_ingest);
    }

    #[test]
    fn builder_applies_overrides_and_defaults() {
        let config = Config::builder()
            .data_file("trees.csv")
            .has_header(false)
            .strict_ingest(true)
            .build()
            .expect("builder output should validate");
        assert_eq!(config.data_file.as_deref().and_then(|p| p.to_str()), Some("trees.csv"));
        assert!(!config.has_header);
        assert!(config.strict_ingest);
        assert!((config.default_radius_km - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validation_rejects_bad_radius() {
        assert!(Config::builder().default_radius_km(0.0).build().is_err());
        assert!(Config::builder().default_radius_km(-2.5).build().is_err());
        assert!(Config::builder().default_radius_km(f64::NAN).build().is_err());
        assert!(Config::builder().default_radius_km(0.5).build().is_ok());
    }

    #[test]
    fn load_from_file_round_trips_toml() {
        let config = Config::builder()
            .data_file("census.csv")
            .default_radius_km(3.5)
            .build()
            .expect("config should validate");
        let toml_text = toml::to_string(&config).expect("config serializes to TOML");

        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(toml_text.as_bytes()).expect("Failed to write temp file");

        let loaded = Config::load_from_file(file.path()).expect("round-trip load should succeed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let loaded = Config::load_from_file(std::path::Path::new("/no/such/config.toml"))
            .expect("missing file is not an error");
        assert_eq!(loaded, Config::default());
        let loaded = Config::load_or_default(None).expect("None is not an error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn malformed_file_is_a_configuration_error() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"default_radius_km = \"not a number\"")
            .expect("Failed to write temp file");
        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"strict_ingest = true\n").expect("Failed to write temp file");
        let loaded = Config::load_from_file(file.path()).expect("partial file should load");
        assert!(loaded.strict_ingest);
        assert!(loaded.has_header);
        assert!(loaded.data_file.is_none());
    }
}
