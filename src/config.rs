use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};

// Embedded default config (validated at compile time by build.rs)
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

const MAX_HOVER_DELAY_MS: u64 = 10_000;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub separator: String,
    pub render: RenderOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: crate::flatten::DEFAULT_SEPARATOR.to_string(),
            render: RenderOptions::default(),
        }
    }
}

/// How a collapsed span is opened
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExpandMode {
    #[default]
    Click,
    Hover,
}

impl ExpandMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpandMode::Click => "click",
            ExpandMode::Hover => "hover",
        }
    }
}

/// How bullet text is interpreted when rendered
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    /// Escaped, shown literally
    #[default]
    Text,
    /// Trusted markup, emitted verbatim
    Html,
    /// Inline markdown: emphasis, code, links
    Markdown,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub expand: ExpandMode,
    pub text_mode: TextMode,
    pub wrapper_tag: String,
    pub hover_delay_ms: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            expand: ExpandMode::Click,
            text_mode: TextMode::Text,
            wrapper_tag: "div".to_string(),
            hover_delay_ms: 300,
        }
    }
}

impl RenderOptions {
    /// Reject option values that would produce broken markup.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.wrapper_tag.is_empty() {
            return Err(ConfigError::IllegalConfiguration(
                "wrapper_tag must not be empty".to_string(),
            ));
        }
        if !self.wrapper_tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::IllegalConfiguration(format!(
                "wrapper_tag {:?} must be ASCII letters and digits",
                self.wrapper_tag
            )));
        }
        if self.hover_delay_ms > MAX_HOVER_DELAY_MS {
            return Err(ConfigError::IllegalConfiguration(format!(
                "hover_delay_ms {} exceeds {}",
                self.hover_delay_ms, MAX_HOVER_DELAY_MS
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Get the compiled-in default config.
    pub fn compiled_default() -> Self {
        match toml::from_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                warn!("embedded default config is invalid, using built-in defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::compiled_default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.render.validate()
    }
}
