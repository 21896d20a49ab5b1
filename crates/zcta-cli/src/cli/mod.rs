//! CLI for the ZCTA archive fetcher.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use zcta_core::config::{self, ZctaConfig};

use commands::{run_completions, run_config, run_fetch};

/// Top-level CLI. Without a subcommand it behaves like `fetch`.
#[derive(Debug, Parser)]
#[command(name = "zcta-fetch", version)]
#[command(about = "Download and unpack the census ZCTA boundary archive", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/zcta/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Per-run overrides; take precedence over the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Directory to extract into. Its existence alone skips the fetch.
    #[arg(long, global = true, env = "ZCTA_TARGET_DIR", value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// URL of the ZIP archive.
    #[arg(long, global = true, env = "ZCTA_SOURCE_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Abort the download after this many seconds (0 = no limit).
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Overrides {
    /// Applies the set fields on top of `cfg`.
    pub fn apply(&self, mut cfg: ZctaConfig) -> ZctaConfig {
        if let Some(dir) = &self.target_dir {
            cfg.target_dir = dir.clone();
        }
        if let Some(url) = &self.url {
            cfg.source_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.http.timeout_secs = (secs > 0).then_some(secs);
        }
        cfg
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download and extract the archive unless the target directory exists (default).
    Fetch,

    /// Print the effective configuration as TOML.
    Config,

    /// Print shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command.unwrap_or(CliCommand::Fetch) {
            CliCommand::Fetch => {
                let cfg = effective_config(cli.config.as_deref(), &cli.overrides)?;
                run_fetch(&cfg)?;
            }
            CliCommand::Config => {
                let cfg = effective_config(cli.config.as_deref(), &cli.overrides)?;
                run_config(&cfg)?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
        }

        Ok(())
    }
}

/// Config file (explicit path, or the XDG default created on first use) with
/// command-line and environment overrides applied.
fn effective_config(path: Option<&Path>, overrides: &Overrides) -> Result<ZctaConfig> {
    let file_cfg = match path {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    let cfg = overrides.apply(file_cfg);
    tracing::debug!("effective config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
