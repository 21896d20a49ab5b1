//! `zcta-fetch fetch` – download and extract unless already present.

use anyhow::{Context, Result};
use zcta_core::config::ZctaConfig;
use zcta_core::{FetchOutcome, Fetcher};

pub fn run_fetch(cfg: &ZctaConfig) -> Result<()> {
    let fetcher = Fetcher::new(cfg.http_options());
    let outcome = fetcher
        .ensure_fetched(&cfg.target_dir, &cfg.source_url)
        .with_context(|| format!("fetch {} into {}", cfg.source_url, cfg.target_dir.display()))?;

    match outcome {
        FetchOutcome::AlreadyPresent => {
            println!("Already present: {}", cfg.target_dir.display());
        }
        FetchOutcome::Fetched(report) => {
            println!(
                "Extracted {} files ({} bytes) into {}",
                report.files,
                report.bytes,
                cfg.target_dir.display()
            );
        }
    }
    Ok(())
}
