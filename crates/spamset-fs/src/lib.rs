//! Filesystem primitives shared by the spamset crates.
//!
//! - [`atomic_write`] places a file through a sibling temp file and a rename, so
//!   readers never observe a half-written file.
//! - [`find_by_name`] locates a file by exact name, checking the direct child
//!   before walking the tree.

mod error;

pub use error::{Error, Result, from_io};

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

#[cfg(unix)]
const DEFAULT_PERMISSIONS: u32 = 0o644;

#[cfg(not(unix))]
const DEFAULT_PERMISSIONS: u32 = 0;

#[derive(Clone, Copy, Debug)]
pub struct AtomicWriteOptions {
    permissions: u32,
    prefix:      &'static str,
    suffix:      &'static str,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self { Self::new() }
}

impl AtomicWriteOptions {
    pub fn new() -> Self {
        Self {
            permissions: DEFAULT_PERMISSIONS,
            prefix:      ".",
            suffix:      ".tmp",
        }
    }

    #[cfg(unix)]
    pub fn permissions(mut self, permissions: u32) -> Self {
        self.permissions = permissions;
        self
    }

    #[cfg(not(unix))]
    pub fn permissions(self, _permissions: u32) -> Self { self }

    #[cfg(unix)]
    pub fn into_permissions(self) -> Option<std::fs::Permissions> {
        use std::os::unix::fs::PermissionsExt;
        Some(std::fs::Permissions::from_mode(self.permissions))
    }

    #[cfg(not(unix))]
    pub fn into_permissions(self) -> Option<std::fs::Permissions> { None }
}

/// Directory that holds `path`, `.` for bare file names.
pub fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Create `dir` and its parents. Succeeds if it already exists.
pub fn ensure_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| from_io(dir, e))
}

/// Write `content` to `path` through a temp file in the same directory.
///
/// The temp file is removed if anything fails before the final rename.
pub fn atomic_write(
    path: impl AsRef<Path>,
    content: &[u8],
    options: AtomicWriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let parent = parent_dir(path);
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::NoFileName { path: path.to_path_buf() })?
        .to_string_lossy();
    let prefix = format!("{}{}", options.prefix, file_name);

    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(options.suffix)
        .tempfile_in(parent)
        .map_err(|e| from_io(parent, e))?;

    tmp.write_all(content).map_err(|e| from_io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| from_io(tmp.path(), e))?;

    if let Some(perms) = options.into_permissions() {
        std::fs::set_permissions(tmp.path(), perms).map_err(|e| from_io(tmp.path(), e))?;
    }

    tmp.persist(path).map_err(|e| from_io(path, e.error))?;
    debug!(path = %path.display(), bytes = content.len(), "atomic write committed");

    Ok(())
}

/// Remove `path` if it is present. Returns whether a file was removed.
pub fn remove_file_if_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(from_io(path, e)),
    }
}

/// Locate a regular file called `name` under `root`.
///
/// `root/name` wins if it exists. Otherwise the tree is walked depth-first in
/// file-name order and the first match is returned. A missing `root` yields
/// `Ok(None)`.
pub fn find_by_name(root: impl AsRef<Path>, name: &str) -> Result<Option<PathBuf>> {
    let root = root.as_ref();
    let direct = root.join(name);
    if direct.is_file() {
        return Ok(Some(direct));
    }
    if !root.is_dir() {
        return Ok(None);
    }

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && entry.file_name() == OsStr::new(name) {
            debug!(found = %entry.path().display(), "located file by name");
            return Ok(Some(entry.into_path()));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() -> Result<()> {
        let dir = tempdir().map_err(|e| from_io("tempdir", e))?;
        let path = dir.path().join("test.txt");
        atomic_write(&path, b"data", AtomicWriteOptions::new())?;
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
        Ok(())
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        atomic_write(&path, b"a,b\n", AtomicWriteOptions::new()).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.csv")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_applies_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("perm.txt");
        atomic_write(&path, b"x", AtomicWriteOptions::new().permissions(0o640)).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_atomic_write_without_file_name() {
        let result = atomic_write("/", b"x", AtomicWriteOptions::new());
        assert!(matches!(result, Err(Error::NoFileName { .. })));
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("file.txt")), Path::new("."));
        assert_eq!(parent_dir(Path::new("data/file.txt")), Path::new("data"));
    }

    #[test]
    fn test_remove_file_if_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.zip");
        std::fs::write(&path, b"zip").unwrap();

        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!remove_file_if_exists(&path).unwrap());
    }

    #[test]
    fn test_find_by_name_missing_root() {
        let dir = tempdir().unwrap();
        let found = find_by_name(dir.path().join("nope"), "payload").unwrap();
        assert!(found.is_none());
    }
}
