#![forbid(unsafe_code)]

//! # multiselect-demo
//!
//! ```bash
//! multiselect-demo --options langs.toml --log-file demo.log -vv
//! multiselect-demo --options langs.toml --check
//! ```

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use multiselect_demo::terminal::{self, TerminalOptions};
use multiselect_demo::{App, Cli, Config};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.log_file.as_deref(), cli.log_level(), cli.check)?;

    let config = Config::from_cli(&cli).context("invalid configuration")?;

    if cli.check {
        println!("{}", config.to_diagnostic_string());
        println!("Summary: {}", config.summary()?);
        return Ok(());
    }

    let app = App::from_config(&config)?;
    let app = terminal::run(app, TerminalOptions { mouse: config.mouse })
        .context("terminal session failed")?;

    println!("{}", app.selection().join(", "));
    Ok(())
}

/// Install the subscriber. The UI owns the terminal, so logs go to the log
/// file; `--check` falls back to stderr.
fn init_tracing(log_file: Option<&Path>, level: &str, check: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Arc::new(file)).init();
        }
        None if check => builder.with_writer(std::io::stderr).init(),
        None => {}
    }
    Ok(())
}
