//! Atomic file write operations.
//!
//! Storage documents are replaced wholesale, so a reader must never observe a
//! half-written file. Writes go to a temp file in the same directory and are
//! renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Hidden sibling of `final_path` to stage a write in.
/// Format: {dir}/.{filename}.tmp-{random}
pub fn temp_path(final_path: &Path) -> PathBuf {
    let filename = final_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    final_path.with_file_name(format!(".{}.tmp-{:016x}", filename, rand::random::<u64>()))
}

/// Atomically rename temp file over the final path.
pub fn rename_into_place(temp_path: &Path, final_path: &Path) -> io::Result<()> {
    match fs::rename(temp_path, final_path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(temp_path);
            Err(e)
        }
    }
}

/// Write content to file atomically, replacing any previous content.
///
/// No temp file is left behind on failure.
pub fn write_file(final_path: &Path, content: &[u8]) -> io::Result<()> {
    let temp = temp_path(final_path);
    if let Err(e) = fs::write(&temp, content) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    rename_into_place(&temp, final_path)
}
