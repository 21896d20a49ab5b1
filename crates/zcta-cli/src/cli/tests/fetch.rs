//! Tests for the default/fetch invocation and its overrides.

use super::parse;
use crate::cli::{CliCommand, Overrides};
use std::path::Path;
use zcta_core::config::{ZctaConfig, DEFAULT_SOURCE_URL};

#[test]
fn cli_parse_no_subcommand_defaults_to_fetch() {
    let cli = parse(&["zcta-fetch"]);
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
    // --target-dir and --url also read ZCTA_* env vars, so only --timeout is
    // guaranteed unset here.
    assert!(cli.overrides.timeout.is_none());
}

#[test]
fn cli_parse_fetch() {
    match parse(&["zcta-fetch", "fetch"]).command {
        Some(CliCommand::Fetch) => {}
        other => panic!("expected Fetch, got {:?}", other),
    }
}

#[test]
fn cli_parse_fetch_with_overrides() {
    let cli = parse(&[
        "zcta-fetch",
        "fetch",
        "--target-dir",
        "/srv/gis/zcta",
        "--url",
        "https://mirror.example.org/zcta.zip",
        "--timeout",
        "120",
    ]);
    assert!(matches!(cli.command, Some(CliCommand::Fetch)));
    assert_eq!(
        cli.overrides.target_dir.as_deref(),
        Some(Path::new("/srv/gis/zcta"))
    );
    assert_eq!(
        cli.overrides.url.as_deref(),
        Some("https://mirror.example.org/zcta.zip")
    );
    assert_eq!(cli.overrides.timeout, Some(120));
}

#[test]
fn cli_parse_overrides_before_subcommand() {
    let cli = parse(&["zcta-fetch", "--target-dir", "out", "fetch"]);
    assert_eq!(cli.overrides.target_dir.as_deref(), Some(Path::new("out")));
}

#[test]
fn overrides_replace_only_given_fields() {
    let overrides = Overrides {
        target_dir: Some("out".into()),
        timeout: Some(0),
        ..Overrides::default()
    };
    let cfg = overrides.apply(ZctaConfig::default());
    assert_eq!(cfg.target_dir, Path::new("out"));
    assert_eq!(cfg.source_url, DEFAULT_SOURCE_URL);
    assert_eq!(cfg.http.timeout_secs, None);
}

#[test]
fn overrides_without_flags_keep_config() {
    let mut base = ZctaConfig::default();
    base.source_url = "https://mirror.example.org/zcta.zip".to_string();
    let cfg = Overrides::default().apply(base.clone());
    assert_eq!(cfg, base);
}
