use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Strip `prefix` from an archive entry name.
///
/// Returns `None` for names outside the prefix and for the prefix entry
/// itself (the root directory marker).
pub fn strip_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    match name.strip_prefix(prefix) {
        Some("") | None => None,
        Some(rest) => Some(rest),
    }
}

/// Turn a prefix-relative entry name into a path relative to the destination.
///
/// The name is split on `/` only. Empty and `.` segments are dropped, `..`
/// pops a previously pushed segment. Absolute names, `..` above the root, and
/// segments that the host platform would read as more than one path
/// component are rejected.
pub fn relative_path(entry: &str, relative: &str) -> Result<PathBuf> {
    let unsafe_path = || Error::UnsafePath {
        entry: entry.to_string(),
    };

    if relative.starts_with('/') || Path::new(relative).has_root() {
        return Err(unsafe_path());
    }

    let mut result = PathBuf::new();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if !result.pop() {
                    return Err(unsafe_path());
                }
            }
            part => {
                let mut components = Path::new(part).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(_)), None) => result.push(part),
                    _ => return Err(unsafe_path()),
                }
            }
        }
    }

    Ok(result)
}
