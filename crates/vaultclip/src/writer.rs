//! Note writer

use crate::error::ClipError;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `content` to `folder/filename`, replacing any existing file
///
/// The note is staged in a temporary file inside `folder` and renamed over
/// the target, so a failed write leaves any previous note untouched.
/// The folder must already exist. Returns the full path written.
pub async fn write_note(
    folder: &Path,
    filename: &str,
    content: &str,
) -> Result<PathBuf, ClipError> {
    if folder.as_os_str().is_empty() {
        return Err(ClipError::MissingFolder);
    }

    let path = folder.join(filename);
    let staged_folder = folder.to_path_buf();
    let target = path.clone();
    let body = content.to_string();

    tokio::task::spawn_blocking(move || {
        replace_atomically(&staged_folder, &target, |file| {
            file.write_all(body.as_bytes())?;
            file.sync_all()
        })
    })
    .await
    .map_err(io::Error::other)
    .and_then(|result| result)
    .map_err(|source| ClipError::Filesystem {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote note");
    Ok(path)
}

/// Fill a temp file in `folder` and rename it onto `target`
///
/// The temp file is removed if `fill` or the rename fails.
fn replace_atomically<F>(folder: &Path, target: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut staged = tempfile::Builder::new()
        .prefix(".vaultclip-")
        .suffix(".tmp")
        .tempfile_in(folder)?;
    fill(staged.as_file_mut())?;
    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}
