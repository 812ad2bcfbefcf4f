//! Write-once secret files.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use tracing::warn;

/// Creates `path`, which must not exist yet, lets `fill` write it and syncs it to disk.
///
/// On Unix the file is created with `mode`. If `fill` or the sync fails the file is removed
/// again, so `path` is left either absent or complete.
///
/// # Errors
/// Any I/O error from creating, filling or syncing the file. An existing `path` is
/// [`io::ErrorKind::AlreadyExists`] and is left untouched.
pub fn create_exclusive<F>(path: &Path, mode: u32, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path)?;
    let written = fill(&mut file).and_then(|()| file.sync_all());
    drop(file);

    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "Partial file left behind");
        }
        return Err(err);
    }

    Ok(())
}
