//! Filesystem primitives used while materializing the transformer toolchain.
//!
//! # Architecture
//!
//! - `lib.rs` - Directory creation, file creation and bounded copies
//! - `lock.rs` - Exclusive advisory lock over a destination directory
//! - `error.rs` - Path-carrying error type

mod error;
mod lock;

pub use error::{Error, Result};
pub use lock::DirLock;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Size of the buffer used by [`copy_buffered`].
pub const COPY_BUFFER_SIZE: usize = 0x4000;

/// Create `path` and every missing parent.
///
/// An already existing directory is not an error. A failed creation is only
/// reported when the directory still does not exist afterwards, so a racing
/// creator does not fail the caller.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match std::fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(_) if path.is_dir() => Ok(()),
        Err(e) => Err(Error::CreateDir {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Create (or truncate) the file at `path`, creating parent directories first.
pub fn create_file(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            ensure_dir(parent)?;
        }
    }

    File::create(path).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `reader` into `writer` through a fixed [`COPY_BUFFER_SIZE`] buffer.
///
/// Memory use does not depend on the amount of data copied. Returns the
/// number of bytes written.
pub fn copy_buffered<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut written = 0u64;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer[..n])?;
        written += n as u64;
    }

    writer.flush()?;
    Ok(written)
}

/// Apply a stored unix mode to `path` when it grants execute permission.
///
/// Only permission bits are kept and the owner can always read and write, so
/// a later extraction can overwrite the file. Modes without execute bits are
/// left to the process umask. No-op off unix.
#[cfg(unix)]
pub fn apply_executable_mode(path: impl AsRef<Path>, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let path = path.as_ref();
    match mode {
        Some(mode) if mode & 0o111 != 0 => {
            let perms = std::fs::Permissions::from_mode((mode & 0o777) | 0o600);
            std::fs::set_permissions(path, perms).map_err(|e| Error::Permissions {
                path: path.to_path_buf(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(not(unix))]
pub fn apply_executable_mode(_path: impl AsRef<Path>, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
