//! Extraction of the prefixed subtree of an archive onto disk.

use std::io::Read;
use std::path::Path;

use crate::entry::{ArchiveEntry, EntryKind, ExtractReport};
use crate::error::{Error, Result};
use crate::location::ArchiveLocation;
use crate::options::ExtractOptions;
use crate::sanitize;

mod zip;

pub use zip::ZipSource;

/// Archive-specific entry source.
///
/// Entries are lent one at a time: an entry's reader borrows the source and
/// must be dropped before the next entry is requested.
pub trait EntrySource {
    type Reader<'a>: Read
    where
        Self: 'a;

    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<Self::Reader<'_>>>>;
}

/// Extract every entry below `options.prefix` into `destination`.
///
/// Entries are processed in the source's native order. Parent directories
/// are created when a file is written, so a directory entry may follow the
/// files placed beneath it. Any failure aborts the whole run; files already
/// written are left in place.
pub fn extract<S: EntrySource>(
    source: &mut S,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let destination = destination.as_ref();
    let mut report = ExtractReport::default();

    jsxt_fs::ensure_dir(destination)?;

    while let Some(entry) = source.next_entry() {
        let entry = entry?;

        let Some(relative) = sanitize::strip_prefix(&entry.name, &options.prefix) else {
            report.skipped += 1;
            continue;
        };
        let relative = sanitize::relative_path(&entry.name, relative)?;
        let target = destination.join(&relative);

        tracing::debug!(
            entry = %entry.name,
            target = %target.display(),
            "extracting archive entry"
        );

        let ArchiveEntry { name, mode, kind } = entry;
        match kind {
            EntryKind::Directory => {
                jsxt_fs::ensure_dir(&target)?;
                report.directories += 1;
            }
            EntryKind::File(mut content) => {
                if relative.as_os_str().is_empty() {
                    return Err(Error::UnsafePath { entry: name });
                }
                report.total_bytes += write_file(&name, &mut content, &target)?;
                if options.preserve_executable {
                    jsxt_fs::apply_executable_mode(&target, mode)
                        .map_err(|e| Error::from_fs(&name, e))?;
                }
                report.files += 1;
            }
        }
    }

    Ok(report)
}

fn write_file<R: Read + ?Sized>(entry: &str, content: &mut R, target: &Path) -> Result<u64> {
    let mut file = jsxt_fs::create_file(target).map_err(|e| Error::from_fs(entry, e))?;
    jsxt_fs::copy_buffered(content, &mut file).map_err(|e| Error::EntryCopy {
        entry: entry.to_string(),
        target: target.to_path_buf(),
        source: e,
    })
}

/// Open the archive at `location` and extract its toolchain subtree.
pub fn extract_archive(
    location: &ArchiveLocation,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let destination = destination.as_ref();
    let mut source = location.open()?;
    tracing::debug!(
        archive = %location.path().display(),
        destination = %destination.display(),
        entries = source.len(),
        "opened toolchain archive"
    );
    extract(&mut source, destination, options)
}
