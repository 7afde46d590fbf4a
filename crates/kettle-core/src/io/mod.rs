//! IO modules - side effects (network, filesystem)

pub mod download;
pub mod extract;

use std::path::Path;

use crate::error::{KettleError, Result};

/// Mark `path` executable (`0o755`). A no-op on non-Unix hosts.
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .map_err(|e| KettleError::fs("chmod", path, e))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Move `from` to `to`, replacing `to` if it exists.
pub fn rename(from: &Path, to: &Path) -> Result<()> {
    std::fs::rename(from, to).map_err(|e| KettleError::fs("rename", from, e))
}
