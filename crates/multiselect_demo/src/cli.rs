//! Command-line interface for `multiselect-demo`.
//!
//! # Examples
//!
//! ```bash
//! # Built-in sample options
//! multiselect-demo
//!
//! # Options from a file, with two preselected values
//! multiselect-demo --options langs.toml --select rust --select go
//!
//! # Validate a file and print the summary without opening the UI
//! multiselect-demo --options langs.json --check
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Interactive multiselect dropdown in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "multiselect-demo",
    author,
    version,
    about = "Interactive multiselect dropdown in the terminal"
)]
pub struct Cli {
    /// TOML or JSON file with options, label and initial selection
    #[arg(long, env = "MULTISELECT_OPTIONS")]
    pub options: Option<PathBuf>,

    /// Label shown above the dropdown
    #[arg(long)]
    pub label: Option<String>,

    /// Summary shown when nothing is selected
    #[arg(long)]
    pub empty_label: Option<String>,

    /// Initially selected value (repeatable)
    #[arg(long = "select", value_name = "VALUE")]
    pub select: Vec<String>,

    /// Write logs to this file
    #[arg(long, env = "MULTISELECT_LOG")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Validate the configuration, print the summary and exit
    #[arg(long)]
    pub check: bool,

    /// Disable mouse support
    #[arg(long)]
    pub no_mouse: bool,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Log level directive for the verbosity count.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["multiselect-demo"]).unwrap();
        assert!(cli.options.is_none());
        assert!(cli.select.is_empty());
        assert!(!cli.check);
        assert!(!cli.no_mouse);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_repeatable_select() {
        let cli =
            Cli::try_parse_from(["multiselect-demo", "--select", "a", "--select", "b"]).unwrap();
        assert_eq!(cli.select, vec!["a", "b"]);
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["multiselect-demo", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["multiselect-demo", "-vvvv"]).unwrap();
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["multiselect-demo", "--bogus"]).is_err());
    }
}
