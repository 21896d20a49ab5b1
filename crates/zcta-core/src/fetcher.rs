//! Conditional fetch-and-unpack.
//!
//! `check → fetch → extract → place`, gated only by whether the target path
//! exists. Because the target is created solely by the final rename out of a
//! staging directory, an existing target was always fully extracted by
//! whichever run created it.

use crate::download::{fetch_bytes, HttpOptions};
use crate::error::FetchError;
use crate::extract::{extract_all, open_archive, ExtractReport};
use crate::staging::{CommitOutcome, StagingDir};
use std::path::Path;

/// What [`Fetcher::ensure_fetched`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The target already existed; no request was made.
    AlreadyPresent,
    /// The archive was downloaded and extracted into the target.
    Fetched(ExtractReport),
}

#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    http: HttpOptions,
}

impl Fetcher {
    pub fn new(http: HttpOptions) -> Self {
        Self { http }
    }

    /// Ensures `target_dir` exists, populating it from the ZIP at `source_url`
    /// if it does not.
    ///
    /// An existing path (empty, partial or unrelated) is left alone. Any
    /// failure aborts before `target_dir` is created.
    pub fn ensure_fetched(
        &self,
        target_dir: &Path,
        source_url: &str,
    ) -> Result<FetchOutcome, FetchError> {
        if target_dir.exists() {
            tracing::info!("{} already exists, skipping fetch", target_dir.display());
            return Ok(FetchOutcome::AlreadyPresent);
        }
        // The target is created by renaming a sibling staging dir, so it needs
        // a name of its own: `""`, `/` and `x/..` cannot be placed.
        if target_dir.file_name().is_none() {
            return Err(FetchError::InvalidTarget {
                path: target_dir.to_path_buf(),
            });
        }

        url::Url::parse(source_url).map_err(|source| FetchError::InvalidUrl {
            url: source_url.to_string(),
            source,
        })?;

        tracing::info!("fetching {} into {}", source_url, target_dir.display());
        let body = fetch_bytes(source_url, &self.http)?;
        tracing::info!("received {} bytes from {}", body.len(), source_url);

        let mut archive = open_archive(body)?;
        let staging = StagingDir::create(target_dir)?;
        let report = extract_all(&mut archive, staging.path())?;

        match staging.commit()? {
            CommitOutcome::Placed => {
                tracing::info!(
                    "extracted {} files, {} directories ({} bytes) into {}",
                    report.files,
                    report.directories,
                    report.bytes,
                    target_dir.display()
                );
                Ok(FetchOutcome::Fetched(report))
            }
            CommitOutcome::LostRace => Ok(FetchOutcome::AlreadyPresent),
        }
    }
}

/// [`Fetcher::ensure_fetched`] with default HTTP options.
pub fn ensure_fetched(target_dir: &Path, source_url: &str) -> Result<FetchOutcome, FetchError> {
    Fetcher::default().ensure_fetched(target_dir, source_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn existing_directory_short_circuits_before_url_check() {
        let dir = tempfile::tempdir().unwrap();
        // Not even a valid URL: proves nothing past the existence gate runs.
        let outcome = ensure_fetched(dir.path(), "not a url").unwrap();
        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
    }

    #[test]
    fn existing_file_also_counts_as_present() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let outcome = ensure_fetched(file.path(), "http://127.0.0.1:1/never").unwrap();
        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
    }

    #[test]
    fn invalid_url_fails_without_creating_target() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("gis");
        let err = ensure_fetched(&target, "::not a url::").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn unnamed_target_is_rejected_before_any_io() {
        let err = ensure_fetched(Path::new(""), "http://127.0.0.1:1/never").unwrap_err();
        assert!(matches!(err, FetchError::InvalidTarget { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn parent_component_target_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        // `<root>/missing/..` does not exist, and has no file name to stage under.
        let target = root.path().join("missing").join("..");
        assert!(!target.exists());
        let err = ensure_fetched(&target, "http://127.0.0.1:1/never").unwrap_err();
        assert!(matches!(err, FetchError::InvalidTarget { .. }));
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }
}
