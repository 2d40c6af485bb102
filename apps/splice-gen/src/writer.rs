//! Atomic replacement of the output file.

use std::fs::{self, Permissions};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{GenError, GenResult};

/// Replaces `path` with `contents`.
///
/// The bytes go to a temp file in the same directory first and are renamed
/// over `path`, so a failed write leaves any previous file intact. The
/// destination directory must already exist.
pub fn write_atomic(path: &Path, contents: &str) -> GenResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| {
        GenError::io(
            format!("Failed to create temp file in {}", dir.display()),
            e,
        )
    })?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| GenError::io("Failed to write output", e))?;

    // Temp files are created owner-only; keep the mode a plain file would get.
    if let Some(permissions) = target_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(|e| GenError::io("Failed to set output permissions", e))?;
    }

    file.persist(path).map_err(|e| {
        GenError::io(format!("Failed to replace {}", path.display()), e.error)
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "Output written");
    Ok(())
}

/// Permissions of the file being replaced, or `0644` for a new one.
fn target_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(Permissions::from_mode(0o644))
    }

    #[cfg(not(unix))]
    {
        None
    }
}
