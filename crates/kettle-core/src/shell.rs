//! Idempotent shell profile editing.
//!
//! Two tiers: the user's main profile (`~/.bashrc`, `~/.zshrc`,
//! `~/.config/fish/config.fish`) only ever gains a single `source` line
//! pointing at kettle's own tool profile (`<config>/kettle.<shell>rc`),
//! where every other line kettle manages lives.
//!
//! Presence is a substring test per line, so a line already written by hand
//! (or embedded in a longer line) is never appended again. Concurrent
//! writers are not coordinated.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use kettle_schema::ShellType;

use crate::error::{KettleError, Result};
use crate::paths;

/// Resolved profile locations for the user's shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellProfile {
    /// Shell dialect.
    pub shell: ShellType,
    /// The raw `SHELL` value.
    pub shell_bin: String,
    /// The user's own rc file.
    pub main_profile: PathBuf,
    /// kettle's generated rc file.
    pub tool_profile: PathBuf,
    /// kettle's config directory.
    pub config_dir: PathBuf,
}

impl ShellProfile {
    /// Resolve profile paths from a `SHELL` value.
    ///
    /// Creates `config_dir` if it does not exist.
    pub fn resolve(shell_var: Option<&str>, home: &Path, config_dir: &Path) -> Result<Self> {
        let shell_bin = shell_var
            .filter(|s| !s.is_empty())
            .ok_or(KettleError::ShellNotSet)?;
        let shell = ShellType::from_shell_path(shell_bin)?;

        let main_profile = match shell {
            ShellType::Bash => home.join(".bashrc"),
            ShellType::Zsh => home.join(".zshrc"),
            ShellType::Fish => home.join(".config").join("fish").join("config.fish"),
        };
        let tool_profile = config_dir.join(format!("{}.{shell}rc", paths::TOOL_NAME));

        paths::ensure_dir(config_dir)?;

        Ok(Self {
            shell,
            shell_bin: shell_bin.to_string(),
            main_profile,
            tool_profile,
            config_dir: config_dir.to_path_buf(),
        })
    }

    /// Completion script for this shell: `<config>/completions/kettle.<shell>`.
    pub fn completions_file(&self) -> PathBuf {
        paths::completions_dir(&self.config_dir).join(format!("{}.{}", paths::TOOL_NAME, self.shell))
    }

    /// Append `line` to the main profile unless present.
    pub fn add_line_to_shell_profile(&self, line: &str) -> Result<bool> {
        append_line_if_absent(&self.main_profile, line)
    }

    /// Append `line` to the tool profile unless it is already in either the
    /// main profile or the tool profile.
    pub fn add_line_to_tool_profile(&self, line: &str) -> Result<bool> {
        if line_exists(&self.main_profile, line)? {
            tracing::debug!(line, "already in main profile");
            return Ok(false);
        }
        append_line_if_absent(&self.tool_profile, line)
    }

    /// Make the main profile source the tool profile.
    pub fn ensure_profile_sourced(&self) -> Result<bool> {
        let line = self.shell.source_line(&self.tool_profile);
        self.add_line_to_shell_profile(&line)
    }

    /// Add `line` to the tool profile, guarded so it only runs when
    /// `command` is on `PATH`.
    pub fn conditional_append(&self, line: &str, command: &str) -> Result<bool> {
        let guarded = self.shell.guard_line(command, line);
        self.add_line_to_tool_profile(&guarded)
    }

    /// Make the tool profile source kettle's completion script.
    pub fn ensure_completions_sourced(&self) -> Result<bool> {
        let line = self.shell.source_line(&self.completions_file());
        append_line_if_absent(&self.tool_profile, &line)
    }
}

/// Whether any line of `path` contains `content`. A missing file has no lines.
///
/// Bytes that are not valid UTF-8 are replaced before matching.
pub fn line_exists(path: &Path, content: &str) -> Result<bool> {
    Ok(read_profile(path)?.is_some_and(|bytes| contains_line(&bytes, content)))
}

fn read_profile(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(KettleError::fs("read", path, e)),
    }
}

fn contains_line(bytes: &[u8], content: &str) -> bool {
    bytes
        .split(|b| *b == b'\n')
        .any(|l| String::from_utf8_lossy(l).contains(content))
}

/// Append `line` and a newline to `path` unless [`line_exists`].
///
/// Creates the file (mode `0o644`) and its parent directory as needed. A
/// file whose last line is unterminated gets a newline first. Returns
/// whether anything was written.
pub fn append_line_if_absent(path: &Path, line: &str) -> Result<bool> {
    let existing = read_profile(path)?;
    if existing
        .as_deref()
        .is_some_and(|bytes| contains_line(bytes, line))
    {
        return Ok(false);
    }
    let needs_newline = existing
        .as_deref()
        .and_then(<[u8]>::last)
        .is_some_and(|b| *b != b'\n');

    if let Some(parent) = path.parent() {
        paths::ensure_dir(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options
        .open(path)
        .map_err(|e| KettleError::fs("open", path, e))?;
    let separator = if needs_newline { "\n" } else { "" };
    writeln!(file, "{separator}{line}").map_err(|e| KettleError::fs("write", path, e))?;

    tracing::debug!(path = %path.display(), line, "appended profile line");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(shell: &str) -> (tempfile::TempDir, ShellProfile) {
        let home = tempfile::tempdir().unwrap();
        let config = home.path().join(".config").join("kettle");
        let profile = ShellProfile::resolve(Some(shell), home.path(), &config).unwrap();
        (home, profile)
    }

    #[test]
    fn test_resolve_paths() {
        let (home, p) = profile("/usr/bin/zsh");
        assert_eq!(p.shell, ShellType::Zsh);
        assert_eq!(p.main_profile, home.path().join(".zshrc"));
        assert_eq!(p.tool_profile, p.config_dir.join("kettle.zshrc"));
        assert!(p.config_dir.is_dir());

        let (home, p) = profile("/usr/bin/fish");
        assert_eq!(
            p.main_profile,
            home.path().join(".config/fish/config.fish")
        );
        assert_eq!(p.completions_file(), p.config_dir.join("completions/kettle.fish"));
    }

    #[test]
    fn test_resolve_errors() {
        let home = tempfile::tempdir().unwrap();
        let err = ShellProfile::resolve(None, home.path(), home.path()).unwrap_err();
        assert!(matches!(err, KettleError::ShellNotSet));

        let err = ShellProfile::resolve(Some("/bin/tcsh"), home.path(), home.path()).unwrap_err();
        assert_eq!(err.to_string(), "unsupported shell type: tcsh");
    }

    #[test]
    fn test_append_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rc");

        assert!(!line_exists(&path, "export A=1").unwrap());
        assert!(append_line_if_absent(&path, "export A=1").unwrap());
        assert!(!append_line_if_absent(&path, "export A=1").unwrap());
        assert!(!append_line_if_absent(&path, "A=1").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "export A=1\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            // umask may only clear bits
            assert_eq!(mode & !0o644, 0);
        }
    }

    #[test]
    fn test_append_after_unterminated_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bashrc");
        fs::write(&path, "alias ll='ls -l'").unwrap();

        assert!(append_line_if_absent(&path, "export A=1").unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "alias ll='ls -l'\nexport A=1\n"
        );
    }

    #[test]
    fn test_profile_with_non_utf8_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".zshrc");
        fs::write(&path, b"# caf\xe9\nexport A=1\n").unwrap();

        assert!(line_exists(&path, "export A=1").unwrap());
        assert!(!append_line_if_absent(&path, "export A=1").unwrap());
        assert!(append_line_if_absent(&path, "export B=2").unwrap());
        assert_eq!(
            fs::read(&path).unwrap(),
            b"# caf\xe9\nexport A=1\nexport B=2\n"
        );
    }

    #[test]
    fn test_tool_profile_respects_main_profile() {
        let (_home, p) = profile("/bin/bash");
        fs::write(&p.main_profile, "export PATH=\"$HOME/go/bin:$PATH\"\n").unwrap();

        assert!(!p.add_line_to_tool_profile("export PATH=\"$HOME/go/bin:$PATH\"").unwrap());
        assert!(!p.tool_profile.exists());

        assert!(p.add_line_to_tool_profile("export EDITOR=nvim").unwrap());
        assert!(!p.add_line_to_tool_profile("export EDITOR=nvim").unwrap());
        assert_eq!(fs::read_to_string(&p.tool_profile).unwrap(), "export EDITOR=nvim\n");
        assert!(!line_exists(&p.main_profile, "EDITOR").unwrap());
    }

    #[test]
    fn test_ensure_profile_sourced_once() {
        let (_home, p) = profile("/bin/zsh");
        assert!(p.ensure_profile_sourced().unwrap());
        assert!(!p.ensure_profile_sourced().unwrap());

        let text = fs::read_to_string(&p.main_profile).unwrap();
        let expected = format!("source {}", p.tool_profile.display());
        assert_eq!(text.lines().filter(|l| *l == expected).count(), 1);
    }

    #[test]
    fn test_conditional_append_guards_by_dialect() {
        let (_home, p) = profile("/bin/bash");
        p.conditional_append(r#"eval "$(zoxide init bash)""#, "zoxide").unwrap();
        assert_eq!(
            fs::read_to_string(&p.tool_profile).unwrap(),
            "if command -v zoxide >/dev/null 2>&1; then eval \"$(zoxide init bash)\"; fi\n"
        );

        let (_home, p) = profile("/usr/bin/fish");
        p.conditional_append("zoxide init fish | source", "zoxide").unwrap();
        assert!(!p.conditional_append("zoxide init fish | source", "zoxide").unwrap());
        assert_eq!(
            fs::read_to_string(&p.tool_profile).unwrap(),
            "if command -v zoxide >/dev/null 2>&1; zoxide init fish | source; end\n"
        );
    }

    #[test]
    fn test_completions_sourced_in_tool_profile() {
        let (_home, p) = profile("/bin/zsh");
        assert!(p.ensure_completions_sourced().unwrap());
        assert!(!p.ensure_completions_sourced().unwrap());
        let text = fs::read_to_string(&p.tool_profile).unwrap();
        assert_eq!(text, format!("source {}\n", p.completions_file().display()));
    }
}
