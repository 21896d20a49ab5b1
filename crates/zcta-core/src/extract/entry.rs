//! Mapping archive entries onto paths under the destination.

use crate::error::FetchError;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Resolves a ZIP entry to its output path under `dest`.
///
/// `enclosed` is the entry's `enclosed_name()`: zip returns `None` for names
/// that are absolute, contain NUL or climb above the archive root. On top of
/// that, a file entry must name something below `dest`; a directory entry may
/// collapse to `dest` itself.
pub fn resolve_entry(
    name: &str,
    enclosed: Option<&Path>,
    is_dir: bool,
    dest: &Path,
) -> Result<(PathBuf, EntryKind), FetchError> {
    let unsafe_path = || FetchError::UnsafeEntryPath {
        name: name.to_string(),
    };
    let relative = enclosed.ok_or_else(unsafe_path)?;

    let kind = if is_dir || name.ends_with('/') {
        EntryKind::Directory
    } else {
        EntryKind::File
    };
    let names_something = relative
        .components()
        .any(|c| matches!(c, Component::Normal(_)));
    if kind == EntryKind::File && !names_something {
        return Err(unsafe_path());
    }
    Ok((dest.join(relative), kind))
}
