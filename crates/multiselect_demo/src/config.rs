//! Runtime configuration for the demo.
//!
//! [`Config`] is resolved from an optional options file and the CLI, with
//! CLI flags taking precedence. Tests build it directly.
//!
//! # File format
//!
//! ```toml
//! label = "Languages"
//! empty_label = "None"
//! selected = ["rust"]
//!
//! [[options]]
//! value = "rust"
//! display_name = "Rust"
//! ```
//!
//! JSON files use the same keys. The format is chosen by file extension.

use std::fs;
use std::path::{Path, PathBuf};

use multiselect::summary::render_summary;
use multiselect::{DropdownError, DropdownOption, OptionSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cli::Cli;

/// Label used when neither the file nor the CLI sets one.
pub const DEFAULT_LABEL: &str = "Options";

/// Empty summary used when neither the file nor the CLI sets one.
pub const DEFAULT_EMPTY_LABEL: &str = "None selected";

/// Errors loading or validating the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The options file is not valid TOML.
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// The options file is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported options file format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    /// The options or selection break the dropdown's contract.
    #[error(transparent)]
    Dropdown(#[from] DropdownError),
}

/// Contents of an options file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Label shown above the dropdown.
    pub label: Option<String>,
    /// Summary shown when nothing is selected.
    pub empty_label: Option<String>,
    /// Initially selected values.
    pub selected: Vec<String>,
    /// Menu options.
    pub options: Vec<DropdownOption>,
}

impl FileConfig {
    /// Load a TOML or JSON file, picking the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&Path, &str) -> Result<Self, ConfigError> = match ext.as_deref() {
            Some("toml") => Self::parse_toml,
            Some("json") => Self::parse_json,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded options file");
        parse(path, &text)
    }

    fn parse_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Label shown above the dropdown.
    pub label: String,
    /// Summary shown when nothing is selected.
    pub empty_label: String,
    /// Initially selected values.
    pub selected: Vec<String>,
    /// Menu options.
    pub options: Vec<DropdownOption>,
    /// Whether mouse capture is enabled.
    pub mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            empty_label: DEFAULT_EMPTY_LABEL.to_string(),
            selected: Vec::new(),
            options: sample_options(),
            mouse: true,
        }
    }
}

impl Config {
    /// Resolve the configuration from CLI arguments and the options file
    /// they point at.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be loaded or the result
    /// fails [`validate`](Self::validate).
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.options {
            Some(path) => Some(FileConfig::load(path)?),
            None => None,
        };
        let config = Self::merge(cli, file);
        config.validate()?;
        Ok(config)
    }

    /// Layer CLI flags over file values over defaults.
    pub fn merge(cli: &Cli, file: Option<FileConfig>) -> Self {
        let defaults = Self::default();
        let file = file.unwrap_or_default();

        let options = if file.options.is_empty() {
            defaults.options
        } else {
            file.options
        };
        let selected = if cli.select.is_empty() {
            file.selected
        } else {
            cli.select.clone()
        };

        Self {
            label: cli.label.clone().or(file.label).unwrap_or(defaults.label),
            empty_label: cli
                .empty_label
                .clone()
                .or(file.empty_label)
                .unwrap_or(defaults.empty_label),
            selected,
            options,
            mouse: !cli.no_mouse,
        }
    }

    /// Check the options and selection against the dropdown's contract.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Dropdown`] for duplicate option values or selected
    /// values without an option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let set = OptionSet::new(self.options.clone())?;
        set.validate_selection(&self.selected)?;
        Ok(())
    }

    /// The trigger summary the dropdown would start with.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Dropdown`] for duplicate option values.
    pub fn summary(&self) -> Result<String, ConfigError> {
        let set = OptionSet::new(self.options.clone())?;
        Ok(render_summary(&self.selected, &set, &self.empty_label))
    }

    /// One line per setting, for `--check`.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Label: {}", self.label));
        lines.push(format!("Empty label: {}", self.empty_label));
        lines.push(format!("Options: {}", self.options.len()));
        lines.push(format!("Selected: {}", self.selected.join(", ")));
        lines.push(format!("Mouse: {}", if self.mouse { "on" } else { "off" }));
        lines.join("\n")
    }
}

/// Options used when no file is given.
pub fn sample_options() -> Vec<DropdownOption> {
    [
        ("rust", "Rust"),
        ("go", "Go"),
        ("python", "Python"),
        ("typescript", "TypeScript"),
        ("haskell", "Haskell"),
        ("ocaml", "OCaml"),
        ("zig", "Zig"),
    ]
    .into_iter()
    .map(|(value, name)| DropdownOption::new(value, name))
    .collect()
}
