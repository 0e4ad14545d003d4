//! Extraction of the transformer toolchain embedded in the program's own archive.
//!
//! # Architecture
//!
//! - `location.rs` - Resolving which archive carries the toolchain
//! - `extract/` - Entry sources and the extraction loop
//! - `sanitize.rs` - Prefix stripping and destination containment
//! - `entry.rs` - Entry and report types
//! - `options.rs` - Extraction prefix and behaviour switches

pub use entry::{ArchiveEntry, EntryKind, ExtractReport};
pub use error::{Error, Result};
pub use extract::{EntrySource, ZipSource, extract, extract_archive};
pub use location::ArchiveLocation;
pub use options::{EXTRACTION_PREFIX, ExtractOptions};

pub mod entry;
mod error;
pub mod extract;
mod location;
pub mod options;
mod sanitize;
