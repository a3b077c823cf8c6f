//! Atomic file writes
//!
//! The store persists its whole data file on every mutation, so a crash
//! mid-write must never leave a truncated file behind. Content goes to a
//! `.tmp` sibling, is synced, then renamed over the final path; the final
//! file is always either the old version or the new one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Atomically replace the file at `path` with `content`
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("tmp");

    {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(content.as_bytes())?;
        tmp.sync_all()?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        // Leave no stray temp file behind on a failed rename
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    Ok(())
}
