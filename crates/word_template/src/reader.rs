//! ZIP archive access for template packages

use crate::encoding::into_utf8;
use crate::error::{Result, TemplateError};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::{ZipError, ZipResult};
use zip::ZipArchive;

/// A wrapper around a ZIP archive for reading template parts
pub struct PackageReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl PackageReader<BufReader<File>> {
    /// Open a package from disk.
    ///
    /// Both a missing file and a file that is not a readable ZIP archive are
    /// reported as [`TemplateError::FileOpen`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TemplateError::file_open(path, ZipError::Io(e)))?;
        Self::new(BufReader::new(file)).map_err(|e| TemplateError::file_open(path, e))
    }
}

impl<R: Read + Seek> PackageReader<R> {
    /// Create a new package reader from a source that implements Read + Seek
    pub fn new(reader: R) -> ZipResult<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Check if an entry exists in the archive
    pub fn contains(&self, name: &str) -> bool {
        self.archive.file_names().any(|entry| entry == name)
    }

    /// Read an entry as text.
    ///
    /// Returns `Ok(None)` when the entry does not exist. Content that is not
    /// valid UTF-8 is re-encoded rather than rejected.
    pub fn read_entry(&mut self, name: &str) -> ZipResult<Option<String>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(Some(into_utf8(contents)))
    }

    pub(crate) fn archive_mut(&mut self) -> &mut ZipArchive<R> {
        &mut self.archive
    }
}
