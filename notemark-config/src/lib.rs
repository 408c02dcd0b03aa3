//! Shared configuration loader for the notemark toolchain.
//!
//! `defaults/notemark.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`NotemarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use notemark_babel::{ContentLengthSplitter, ConvertOptions, MarkdownConverter, RuleRegistry};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/notemark.default.toml");

/// Top-level configuration consumed by notemark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NotemarkConfig {
    pub convert: ConvertConfig,
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

impl NotemarkConfig {
    /// A converter built from the `convert` section.
    pub fn converter(&self) -> MarkdownConverter {
        MarkdownConverter::new(self.convert.registry.into()).with_options((&self.convert).into())
    }

    pub fn splitter(&self) -> ContentLengthSplitter {
        (&self.limits).into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub spacing: bool,
    pub registry: RegistryPreset,
}

/// Which set of element rules a converter starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RegistryPreset {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "minimal")]
    Minimal,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            spacing: config.spacing,
        }
    }
}

impl From<RegistryPreset> for RuleRegistry {
    fn from(preset: RegistryPreset) -> Self {
        match preset {
            RegistryPreset::Standard => RuleRegistry::standard(),
            RegistryPreset::Minimal => RuleRegistry::minimal(),
        }
    }
}

/// Size limits of the remote side.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_text_length: usize,
}

impl From<&LimitsConfig> for ContentLengthSplitter {
    fn from(config: &LimitsConfig) -> Self {
        ContentLengthSplitter::new(config.max_text_length)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty_json: bool,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<NotemarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NotemarkConfig, ConfigError> {
    Loader::new().build()
}
