#![forbid(unsafe_code)]

//! # Multiselect Demo
//!
//! Terminal host for the multiselect dropdown: loads options from a file or
//! the built-in sample, mounts one dropdown, and drives it with crossterm
//! input.
//!
//! - **cli** - Command-line flags
//! - **config** - Options file loading and flag precedence
//! - **app** - The owning model that holds the selection
//! - **terminal** - Raw-mode host loop

pub mod app;
pub mod cli;
pub mod config;
pub mod terminal;

pub use app::App;
pub use cli::Cli;
pub use config::{Config, ConfigError, FileConfig};
