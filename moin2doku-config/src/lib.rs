//! Configuration loader for moin2doku.
//!
//! `defaults/moin2doku.default.toml` is embedded into the binary so that the documented defaults
//! and the runtime behavior stay in sync. Callers layer a user file and command line overrides
//! on top of those defaults via [`Loader`] before deserializing into [`ConverterConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/moin2doku.default.toml");

/// Top-level configuration of a conversion run.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub transliteration: TransliterationConfig,
    pub report: ReportConfig,
}

/// Where the MoinMoin pages are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub pages_dir: PathBuf,
    pub charset: String,
}

/// Where and how DokuWiki pages are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pages_dir: PathBuf,
    pub fixme_banner: bool,
    pub clean_tags: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransliterationConfig {
    #[serde(default)]
    pub mapping_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub write_report: bool,
    #[serde(default)]
    pub incompatibilities_file: Option<PathBuf>,
}

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub charset: Option<String>,
    pub mapping_file: Option<PathBuf>,
    pub incompatibilities_file: Option<PathBuf>,
    pub fixme_banner: bool,
    pub clean_tags: bool,
    pub no_report: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply an override only if a value is given.
    pub fn set_override_option<I>(self, key: &str, value: Option<I>) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        match value {
            Some(value) => self.set_override(key, value),
            None => Ok(self),
        }
    }

    /// Layer the command line settings. Unset values keep what the defaults and the config
    /// file say; switches only ever turn their feature on (or the report off).
    pub fn with_overrides(self, overrides: &Overrides) -> Result<Self, ConfigError> {
        let paths = [
            ("input.pages_dir", &overrides.input_dir),
            ("output.pages_dir", &overrides.output_dir),
            ("transliteration.mapping_file", &overrides.mapping_file),
            ("report.incompatibilities_file", &overrides.incompatibilities_file),
        ];
        let mut loader = self;
        for (key, path) in paths {
            let value = path.as_ref().map(|path| path.to_string_lossy().into_owned());
            loader = loader.set_override_option(key, value)?;
        }
        loader
            .set_override_option("input.charset", overrides.charset.clone())?
            .set_override_option("output.fixme_banner", overrides.fixme_banner.then_some(true))?
            .set_override_option("output.clean_tags", overrides.clean_tags.then_some(true))?
            .set_override_option("report.write_report", overrides.no_report.then_some(false))
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ConverterConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}
