use std::path::{Component, Path, PathBuf};

use crate::error::{ArchiveError, Result};

/// Result of sanitizing an archive entry path.
#[derive(Clone, Debug)]
pub struct SanitizedPath {
    pub original: PathBuf,
    pub resolved: PathBuf,
}

/// Resolve an entry path against `base`, refusing anything that lands outside it.
pub fn sanitize_path<P: AsRef<Path>, B: AsRef<Path>>(entry_path: P, base: B) -> Result<SanitizedPath> {
    let entry_path = entry_path.as_ref();
    let base = normalize_path(base.as_ref());
    let normalized = normalize_path(entry_path);

    // Reject absolute paths (zip-slip protection)
    if normalized.has_root() {
        return Err(ArchiveError::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved: normalized,
        });
    }

    let resolved = normalize_path(&base.join(entry_path));

    if !resolved.starts_with(&base) {
        return Err(ArchiveError::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved,
        });
    }

    Ok(SanitizedPath {
        original: entry_path.to_path_buf(),
        resolved,
    })
}

/// Resolve `.` and `..` lexically. Backslashes count as separators.
///
/// `..` components that cannot be resolved against a preceding name are kept,
/// so `../data` stays `../data`.
fn normalize_path(path: &Path) -> PathBuf {
    let unified = path.to_string_lossy().replace('\\', "/");
    let mut result = PathBuf::new();

    for component in Path::new(&unified).components() {
        match component {
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                // `..` at the root stays at the root.
                Some(Component::RootDir | Component::Prefix(_)) => {}
                // Leading `..` of a relative path is kept.
                _ => result.push(".."),
            },
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push("/"),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
