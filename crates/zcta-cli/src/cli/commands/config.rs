//! `zcta-fetch config` – print the effective configuration.

use anyhow::Result;
use zcta_core::config::ZctaConfig;

pub fn run_config(cfg: &ZctaConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
