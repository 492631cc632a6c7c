//! Writing a filled template back to a DOCX package
//!
//! The output is a copy of the template archive in which every part held by
//! the [`TemplateDocument`] is replaced by its current text. All other
//! entries (styles, media, relationships, ...) are copied without being
//! recompressed.

use crate::document::TemplateDocument;
use crate::error::{Result, TemplateError};
use crate::reader::PackageReader;
use std::collections::HashMap;
use std::io::{Read, Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

impl TemplateDocument {
    /// Write the document as a new package, using `template` for every part
    /// this document does not hold. Returns the inner writer.
    pub fn write_to<R, W>(&self, template: R, output: W) -> Result<W>
    where
        R: Read + Seek,
        W: Write + Seek,
    {
        let mut reader = PackageReader::new(template).map_err(TemplateError::PackageOpen)?;
        self.write_package(&mut reader, output)
    }

    /// Write the document to `output`, copying untouched entries from the
    /// package at `template`.
    ///
    /// The package is assembled in a temporary file next to `output` and
    /// moved into place once complete, so `output` may be the template itself.
    pub fn save(&self, template: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
        let output = output.as_ref();
        let mut reader = PackageReader::open(template)?;

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }

        let mut staged = NamedTempFile::new_in(dir)?;
        self.write_package(&mut reader, staged.as_file_mut())?;
        drop(reader);

        staged.persist(output).map_err(|e| e.error)?;

        tracing::debug!("Saved filled template to {}", output.display());
        Ok(())
    }

    fn write_package<R, W>(&self, reader: &mut PackageReader<R>, output: W) -> Result<W>
    where
        R: Read + Seek,
        W: Write + Seek,
    {
        let replacements: HashMap<String, &str> = self
            .parts()
            .map(|(kind, text)| (kind.entry_name(), text))
            .collect();

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(output);
        let archive = reader.archive_mut();

        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i)?;
            match replacements.get(entry.name()) {
                Some(text) => {
                    let name = entry.name().to_string();
                    drop(entry);
                    zip.start_file(name, options)?;
                    zip.write_all(text.as_bytes())?;
                }
                None => zip.raw_copy_file(entry)?,
            }
        }

        Ok(zip.finish()?)
    }
}
