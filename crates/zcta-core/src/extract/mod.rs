//! ZIP extraction from an in-memory buffer.
//!
//! Every entry is written under the destination directory, recreating the
//! archive's internal layout. Entry names that zip's `enclosed_name` refuses
//! (absolute, NUL, escaping the root) are rejected rather than skipped.

mod entry;

use crate::error::FetchError;
use std::fs::{self, File};
use std::io::{self, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::ZipArchive;

pub use entry::{resolve_entry, EntryKind};

/// What a completed extraction wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub files: usize,
    pub directories: usize,
    /// Uncompressed bytes written across all files.
    pub bytes: u64,
}

/// Opens the retrieved body as a ZIP archive. Fails if the central directory
/// cannot be found or parsed (e.g. an HTML error page).
pub fn open_archive(bytes: Vec<u8>) -> Result<ZipArchive<Cursor<Vec<u8>>>, FetchError> {
    let archive = ZipArchive::new(Cursor::new(bytes))?;
    tracing::debug!("archive opened: {} entries", archive.len());
    Ok(archive)
}

/// Extracts all entries of `archive` into `dest`, creating `dest` and any
/// intermediate directories as needed.
pub fn extract_all<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    dest: &Path,
) -> Result<ExtractReport, FetchError> {
    fs::create_dir_all(dest).map_err(|e| FetchError::fs(dest, e))?;

    let mut report = ExtractReport::default();
    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let enclosed = file.enclosed_name();
        let (out_path, kind) =
            resolve_entry(file.name(), enclosed.as_deref(), file.is_dir(), dest)?;

        match kind {
            EntryKind::Directory => {
                fs::create_dir_all(&out_path).map_err(|e| FetchError::fs(&out_path, e))?;
                report.directories += 1;
            }
            EntryKind::File => {
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent).map_err(|e| FetchError::fs(parent, e))?;
                }
                let mut out = File::create(&out_path).map_err(|e| FetchError::fs(&out_path, e))?;
                let written = copy_entry(&mut file, &mut out, &out_path)?;
                apply_mode(&out_path, file.unix_mode())?;
                tracing::debug!("extracted {} ({} bytes)", out_path.display(), written);
                report.files += 1;
                report.bytes += written;
            }
        }
    }
    Ok(report)
}

const BUF_SIZE: usize = 64 * 1024;

/// Copies one entry to disk. Read errors come from the decoder (bad CRC,
/// corrupt deflate stream) and are archive errors; write errors are the disk's.
fn copy_entry<R: Read, W: Write>(
    entry: &mut R,
    out: &mut W,
    path: &Path,
) -> Result<u64, FetchError> {
    let mut buf = vec![0u8; BUF_SIZE];
    let mut written = 0u64;
    loop {
        let n = match entry.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FetchError::ArchiveFormat(zip::result::ZipError::Io(e))),
        };
        out.write_all(&buf[..n]).map_err(|e| FetchError::fs(path, e))?;
        written += n as u64;
    }
    out.flush().map_err(|e| FetchError::fs(path, e))?;
    Ok(written)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<(), FetchError> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        let perms = fs::Permissions::from_mode(mode & 0o777);
        fs::set_permissions(path, perms).map_err(|e| FetchError::fs(path, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<(), FetchError> {
    Ok(())
}
