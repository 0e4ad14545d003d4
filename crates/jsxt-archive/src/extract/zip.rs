use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::extract::EntrySource;

/// Zip archive enumerated in central-directory order.
///
/// Archives with leading data (an executable with a zip payload appended)
/// are accepted.
pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    path: PathBuf,
    index: usize,
}

impl<R: Read + Seek> ZipSource<R> {
    /// `path` only labels errors; the archive is read from `reader`.
    pub fn new(reader: R, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let archive = zip::ZipArchive::new(reader).map_err(|e| Error::ArchiveUnreadable {
            path: path.clone(),
            source: e,
        })?;
        Ok(Self {
            archive,
            path,
            index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    type Reader<'a>
        = Box<dyn Read + 'a>
    where
        Self: 'a;

    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<Self::Reader<'_>>>> {
        if self.index >= self.archive.len() {
            return None;
        }

        let index = self.index;
        self.index += 1;

        let file = match self.archive.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                return Some(Err(Error::ArchiveUnreadable {
                    path: self.path.clone(),
                    source: e,
                }));
            }
        };

        let name = file.name().to_string();
        let mode = file.unix_mode();

        let entry = if file.is_dir() {
            ArchiveEntry::directory(name)
        } else {
            ArchiveEntry::file(name, Box::new(file) as Box<dyn Read + '_>)
        };

        Some(Ok(entry.with_mode(mode)))
    }
}
