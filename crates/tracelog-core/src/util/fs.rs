//! Filesystem utilities.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

/// Create `path`, or truncate it if it exists, and open it for appending.
///
/// `OpenOptions` rejects `append` together with `truncate`, so the length is
/// reset after opening.
pub fn open_truncated(path: impl AsRef<Path>) -> io::Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(expand_path(path))?;
    file.set_len(0)?;
    Ok(file)
}
