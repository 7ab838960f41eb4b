//! ZIP container access with tolerant entry lookup.
//!
//! Descriptor-declared paths do not always agree with the real archive
//! layout: case differs, or a base directory is missing from the href. Entry
//! lookup therefore accepts either a case-insensitive exact match or a match
//! on a trailing path suffix. The first entry in central-directory order
//! wins; two entries sharing a suffix (`a/ch1.xhtml`, `b/ch1.xhtml`) cannot
//! be told apart by a bare `ch1.xhtml` query.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use percent_encoding::percent_decode_str;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// An open ebook container.
///
/// The underlying reader is released when the archive is dropped, which
/// also invalidates every [`EntryHandle`] taken from it.
pub struct Archive<R = File> {
    zip: ZipArchive<R>,
}

/// A located archive entry, consumed by [`Archive::read`].
#[derive(Debug, PartialEq, Eq)]
pub struct EntryHandle {
    index: usize,
    name: String,
}

impl EntryHandle {
    /// The entry name as stored in the archive.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Archive<File> {
    /// Open an archive file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Open an archive from any [`Read`] + [`Seek`] source.
    pub fn from_reader(reader: R) -> Result<Self> {
        Ok(Self {
            zip: ZipArchive::new(reader)?,
        })
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.zip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zip.len() == 0
    }

    /// Entry names in central-directory order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        (0..self.zip.len()).filter_map(|i| self.zip.name_for_index(i))
    }

    /// Locate an entry by name.
    ///
    /// Falls back to the percent-decoded form of `name` (manifests of some
    /// malformed EPUBs escape characters the archive stores literally).
    pub fn find_entry(&self, name: &str) -> Result<EntryHandle> {
        if let Some(handle) = self.lookup(name) {
            return Ok(handle);
        }

        if let Ok(decoded) = percent_decode_str(name).decode_utf8()
            && decoded != name
            && let Some(handle) = self.lookup(&decoded)
        {
            return Ok(handle);
        }

        Err(Error::NotFound(name.to_string()))
    }

    /// Read the full contents of a located entry.
    pub fn read(&mut self, entry: EntryHandle) -> Result<Vec<u8>> {
        let mut file = self.zip.by_index(entry.index)?;
        let mut contents = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Locate and read an entry in one step.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let entry = self.find_entry(name)?;
        self.read(entry)
    }

    fn lookup(&self, name: &str) -> Option<EntryHandle> {
        let query = name.trim_start_matches('/').to_lowercase();
        if query.is_empty() {
            return None;
        }

        (0..self.zip.len()).find_map(|index| {
            let stored = self.zip.name_for_index(index)?;
            entry_matches(&stored.to_lowercase(), &query).then(|| EntryHandle {
                index,
                name: stored.to_string(),
            })
        })
    }
}

/// Both arguments must already be lowercased.
fn entry_matches(stored: &str, query: &str) -> bool {
    if stored == query {
        return true;
    }
    stored
        .strip_suffix(query)
        .is_some_and(|prefix| prefix.ends_with('/'))
}
