//! Snapshot Writer
//!
//! Rewrites the whole collection via temp file + rename. With
//! `SnapshotSync::EveryWrite` both the temp file and the containing
//! directory are fsynced.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::SnapshotSync;
use crate::error::{Result, RosterError};
use crate::model::Employee;

/// Sibling temp file used while rewriting `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Serialize `records` as pretty JSON and atomically replace `path`.
///
/// On failure the previous snapshot is left untouched and the temp file is
/// removed.
pub fn write_snapshot(path: &Path, records: &[Employee], sync: SnapshotSync) -> Result<()> {
    let tmp = temp_path(path);

    if let Err(e) = write_temp(&tmp, records, sync) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    if sync == SnapshotSync::EveryWrite {
        // The new file is already in place, so a failure here is only logged
        if let Err(e) = sync_parent_dir(path) {
            tracing::warn!("Failed to sync directory of {}: {}", path.display(), e);
        }
    }

    tracing::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn write_temp(tmp: &Path, records: &[Employee], sync: SnapshotSync) -> Result<()> {
    let mut writer = BufWriter::new(File::create(tmp)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;

    let file = writer
        .into_inner()
        .map_err(|e| RosterError::Io(e.into_error()))?;

    if sync == SnapshotSync::EveryWrite {
        file.sync_all()?;
    }
    Ok(())
}

/// Directory holding `path`; a bare file name lives in `.`
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Fsync the directory entry so the rename survives a crash
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<()> {
    File::open(parent_dir(path))?.sync_all()?;
    Ok(())
}

// Directories cannot be opened as files here
#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}
