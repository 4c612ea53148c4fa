//! Project root discovery: marker detection, the upward walk and the
//! workspace-wide fallback search.

pub mod marker;
pub mod resolver;
pub mod search;

use std::path::{Component, Path, PathBuf};

/// Absolute, symlink-free form of `path`. Components that do not exist yet are
/// cleaned lexically and appended to the deepest existing ancestor.
pub fn normalize(path: &Path) -> PathBuf {
    let cleaned = lexical_absolute(path);
    for ancestor in cleaned.ancestors() {
        let Ok(canonical) = dunce::canonicalize(ancestor) else {
            continue;
        };
        return match cleaned.strip_prefix(ancestor) {
            Ok(rest) if !rest.as_os_str().is_empty() => canonical.join(rest),
            _ => canonical,
        };
    }
    cleaned
}

/// Absolute form of `path` with `.` and `..` removed; symlinks are kept.
pub fn lexical_absolute(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// True when `candidate` is `root` or lies underneath it.
pub fn is_within(candidate: &Path, root: &Path) -> bool {
    normalize(candidate).starts_with(normalize(root))
}
