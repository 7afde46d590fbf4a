//! Pulls a single executable out of a downloaded release artifact.
//!
//! Every container is scanned in stream order and the first regular file
//! whose path ends with the requested binary name wins, even when a later
//! entry would match more precisely.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use kettle_schema::ArchiveKind;
use zip::ZipArchive;

use crate::error::{KettleError, Result};
use crate::io::{make_executable, rename};

/// Produce `dest_dir/binary_name` from `archive`, whatever its container.
///
/// The destination directory is created if missing. The resulting file is
/// always mode `0o755`.
pub fn extract_binary(archive: &Path, dest_dir: &Path, binary_name: &str) -> Result<PathBuf> {
    let filename = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = ArchiveKind::from_filename(&filename);

    fs::create_dir_all(dest_dir).map_err(|e| KettleError::fs("create directory", dest_dir, e))?;
    let dest = dest_dir.join(binary_name);

    tracing::debug!(archive = %archive.display(), ?kind, binary_name, "extracting");

    match kind {
        ArchiveKind::TarGz => {
            let reader = flate2::read::GzDecoder::new(open(archive)?);
            extract_from_tar(reader, archive, binary_name, &dest)?;
        }
        ArchiveKind::Tar => extract_from_tar(open(archive)?, archive, binary_name, &dest)?,
        ArchiveKind::Gzip => {
            let mut reader = flate2::read::GzDecoder::new(open(archive)?);
            write_to(&mut reader, archive, &dest)?;
        }
        ArchiveKind::Zip => extract_from_zip(archive, binary_name, &dest)?,
        ArchiveKind::Deb | ArchiveKind::Rpm | ArchiveKind::Dmg => {
            return Err(KettleError::UnsupportedArchiveFormat(filename));
        }
        ArchiveKind::RawBinary => rename(archive, &dest)?,
    }

    make_executable(&dest)?;
    Ok(dest)
}

fn open(archive: &Path) -> Result<BufReader<File>> {
    File::open(archive)
        .map(BufReader::new)
        .map_err(|e| KettleError::fs("open", archive, e))
}

fn archive_error(archive: &Path, err: impl ToString) -> KettleError {
    KettleError::Archive {
        archive: archive.to_path_buf(),
        message: err.to_string(),
    }
}

fn not_found(archive: &Path, binary_name: &str) -> KettleError {
    KettleError::BinaryNotFoundInArchive {
        archive: archive.to_path_buf(),
        binary: binary_name.to_string(),
    }
}

/// Copy `reader` into a temp file beside `dest`, then move it into place.
/// An existing `dest` survives a failed copy.
fn write_to(reader: &mut impl Read, archive: &Path, dest: &Path) -> Result<()> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut out = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| KettleError::fs("create temp file", dir, e))?;
    io::copy(reader, &mut out).map_err(|e| archive_error(archive, e))?;
    out.persist(dest)
        .map_err(|e| KettleError::fs("rename", dest, e.error))?;
    Ok(())
}

fn extract_from_tar<R: Read>(
    reader: R,
    archive: &Path,
    binary_name: &str,
    dest: &Path,
) -> Result<()> {
    let mut tar = tar::Archive::new(reader);

    for entry in tar.entries().map_err(|e| archive_error(archive, e))? {
        let mut entry = entry.map_err(|e| archive_error(archive, e))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .map_err(|e| archive_error(archive, e))?
            .to_string_lossy()
            .ends_with(binary_name);
        if matches {
            tracing::debug!(entry = ?entry.path().ok(), "matched tar entry");
            return write_to(&mut entry, archive, dest);
        }
    }

    Err(not_found(archive, binary_name))
}

fn extract_from_zip(archive: &Path, binary_name: &str, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| KettleError::fs("open", archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| archive_error(archive, e))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| archive_error(archive, e))?;
        if entry.is_dir() || !entry.name().ends_with(binary_name) {
            continue;
        }
        tracing::debug!(entry = entry.name(), "matched zip entry");
        return write_to(&mut entry, archive, dest);
    }

    Err(not_found(archive, binary_name))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_tar_gz_first_match_wins() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("tool-1.0-linux-amd64.tar.gz");
        fixtures::tar_gz(
            &archive,
            &[
                ("tool-1.0/README.md", b"docs"),
                ("tool-1.0/bin/tool", b"first"),
                ("tool-1.0/extra/tool", b"second"),
            ],
        );

        let out = dir.path().join("out");
        let path = extract_binary(&archive, &out, "tool").unwrap();

        assert_eq!(path, out.join("tool"));
        assert_eq!(fs::read(&path).unwrap(), b"first");
        #[cfg(unix)]
        assert_eq!(mode(&path), 0o755);
    }

    #[test]
    fn test_tar_gz_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("tool.tar.gz");
        fixtures::tar_gz(&archive, &[("LICENSE", b"mit")]);

        let err = extract_binary(&archive, dir.path(), "tool").unwrap_err();
        assert!(matches!(err, KettleError::BinaryNotFoundInArchive { ref binary, .. } if binary == "tool"));
    }

    #[test]
    fn test_zip_skips_directories_and_keeps_stored_order() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("tool-windows-amd64.zip");
        fixtures::zip(
            &archive,
            &[
                ("tool/", b""),
                ("a/tool", b"stored-first"),
                ("b/tool", b"stored-second"),
            ],
        );

        let path = extract_binary(&archive, &dir.path().join("bin"), "tool").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"stored-first");
    }

    #[test]
    fn test_gzip_single_stream() {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("tool-linux-amd64.gz");
        let mut enc = GzEncoder::new(File::create(&archive).unwrap(), Compression::default());
        enc.write_all(b"#!/bin/sh\necho hi\n").unwrap();
        enc.finish().unwrap();

        let path = extract_binary(&archive, &dir.path().join("bin"), "tool").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"#!/bin/sh\necho hi\n");
    }

    #[test]
    fn test_truncated_archive_keeps_existing_binary() {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir(&bin).unwrap();
        fs::write(bin.join("tool"), b"working v1").unwrap();

        // Incompressible payload so the cut lands inside the deflate body.
        let mut seed = 0x2545_f491_u32;
        let payload: Vec<u8> = (0..64 * 1024)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                seed.to_le_bytes()[0]
            })
            .collect();
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&payload).unwrap();
        let compressed = enc.finish().unwrap();

        let archive = dir.path().join("tool-linux-amd64.gz");
        fs::write(&archive, &compressed[..compressed.len() / 2]).unwrap();

        let err = extract_binary(&archive, &bin, "tool").unwrap_err();
        assert!(matches!(err, KettleError::Archive { .. }));
        assert_eq!(fs::read(bin.join("tool")).unwrap(), b"working v1");
        assert_eq!(fs::read_dir(&bin).unwrap().count(), 1);
    }

    #[test]
    fn test_raw_binary_is_moved() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("tool-linux-amd64");
        fs::write(&raw, b"elf").unwrap();

        let path = extract_binary(&raw, &dir.path().join("bin"), "tool").unwrap();
        assert!(!raw.exists());
        assert_eq!(fs::read(&path).unwrap(), b"elf");
        #[cfg(unix)]
        assert_eq!(mode(&path), 0o755);
    }

    #[test]
    fn test_packages_are_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["tool_1.0_amd64.deb", "tool-1.0.x86_64.rpm", "tool.dmg"] {
            let pkg = dir.path().join(name);
            fs::write(&pkg, b"pkg").unwrap();
            let err = extract_binary(&pkg, dir.path(), "tool").unwrap_err();
            assert!(matches!(err, KettleError::UnsupportedArchiveFormat(ref f) if f == name));
            assert!(pkg.exists());
        }
    }
}
