use std::io::Read;

/// An entry read from the archive, alive only while it is being extracted.
pub struct ArchiveEntry<R> {
    /// Archive-internal path, `/`-separated.
    pub name: String,
    /// Unix mode bits stored with the entry, if any.
    pub mode: Option<u32>,
    pub kind: EntryKind<R>,
}

pub enum EntryKind<R> {
    Directory,
    File(R),
}

impl<R: Read> ArchiveEntry<R> {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: None,
            kind: EntryKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>, content: R) -> Self {
        Self {
            name: name.into(),
            mode: None,
            kind: EntryKind::File(content),
        }
    }

    pub fn with_mode(mut self, mode: Option<u32>) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }
}

/// Summary of one extraction run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub directories: usize,
    pub files: usize,
    /// Entries outside the extraction prefix, plus the prefix entry itself.
    pub skipped: usize,
    pub total_bytes: u64,
}

impl ExtractReport {
    pub fn extracted(&self) -> usize {
        self.directories + self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn entry_kinds() {
        let dir = ArchiveEntry::<Cursor<Vec<u8>>>::directory("META-INF/node_modules/a/");
        assert!(dir.is_directory());

        let file = ArchiveEntry::file("META-INF/node_modules/a/b.js", Cursor::new(vec![1u8]))
            .with_mode(Some(0o755));
        assert!(!file.is_directory());
        assert_eq!(file.mode, Some(0o755));
    }

    #[test]
    fn report_counts_extracted_entries() {
        let report = ExtractReport {
            directories: 2,
            files: 3,
            skipped: 7,
            total_bytes: 42,
        };
        assert_eq!(report.extracted(), 5);
    }
}
