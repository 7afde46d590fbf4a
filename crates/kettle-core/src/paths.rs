use std::env;
use std::path::{Path, PathBuf};

use crate::error::{KettleError, Result};

/// Tool name used for the config directory and generated profiles.
pub const TOOL_NAME: &str = "kettle";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(KettleError::NoHomeDirectory)
}

/// Default configuration directory: `~/.config/kettle`.
pub fn default_config_dir(home: &Path) -> PathBuf {
    home.join(".config").join(TOOL_NAME)
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| KettleError::fs("create directory", dir, e))
}

/// Completion scripts directory: `<config>/completions`
pub fn completions_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("completions")
}

/// `~/.local/bin`, the preferred per-user install target.
pub fn local_bin(home: &Path) -> PathBuf {
    home.join(".local").join("bin")
}

/// System-wide fallback install target.
pub const SYSTEM_BIN: &str = "/usr/local/bin";

/// Whether `dir` is one of the entries of `path_var` (a `PATH`-style list).
///
/// Entries are compared as paths, so `/home/u/.local/bin/` matches
/// `/home/u/.local/bin` but `/home/u/.local/bin2` does not.
pub fn path_contains(path_var: &std::ffi::OsStr, dir: &Path) -> bool {
    env::split_paths(path_var).any(|entry| entry == dir)
}

/// Install target: `~/.local/bin` if it exists and is on `PATH`, else
/// `/usr/local/bin`.
pub fn install_dir(home: &Path, path_var: Option<&std::ffi::OsStr>) -> PathBuf {
    let local = local_bin(home);
    if local.is_dir() && path_var.is_some_and(|p| path_contains(p, &local)) {
        return local;
    }
    PathBuf::from(SYSTEM_BIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_path_contains_exact_entries() {
        let joined: OsString =
            env::join_paths(["/usr/bin", "/home/u/.local/bin2"]).unwrap();
        assert!(path_contains(&joined, Path::new("/usr/bin")));
        assert!(!path_contains(&joined, Path::new("/home/u/.local/bin")));
    }

    #[test]
    fn test_install_dir_prefers_local_bin_on_path() {
        let home = tempfile::tempdir().unwrap();
        let local = local_bin(home.path());

        let path_var = env::join_paths([local.as_path(), Path::new("/usr/bin")]).unwrap();
        // Not created yet: fall back.
        assert_eq!(
            install_dir(home.path(), Some(path_var.as_os_str())),
            PathBuf::from(SYSTEM_BIN)
        );

        std::fs::create_dir_all(&local).unwrap();
        assert_eq!(install_dir(home.path(), Some(path_var.as_os_str())), local);

        // Exists but not on PATH.
        let other = env::join_paths(["/usr/bin"]).unwrap();
        assert_eq!(install_dir(home.path(), Some(other.as_os_str())), PathBuf::from(SYSTEM_BIN));
        assert_eq!(install_dir(home.path(), None), PathBuf::from(SYSTEM_BIN));
    }
}
