//! In-memory template document
//!
//! Holds the text of every part that may contain variables: the main
//! document, each header and each footer. Parts are repaired as they are
//! loaded so split variables are visible to the rest of the API.

use crate::encoding::to_utf8;
use crate::error::{Result, TemplateError};
use crate::parts::PartKind;
use crate::reader::PackageReader;
use crate::tokens::{clean_string, full_tag, repair, replace_tag, variable_names};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Seek};
use std::path::Path;

/// The variable-bearing parts of a DOCX package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDocument {
    /// Headers keyed by their 1-based index
    headers: BTreeMap<u32, String>,
    /// Footers keyed by their 1-based index
    footers: BTreeMap<u32, String>,
    /// `word/document.xml`, if the package has one
    main_part: Option<String>,
}

impl TemplateDocument {
    /// Open a DOCX package from disk and load its parts
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = PackageReader::open(path)?;
        let document = Self::load(&mut reader);

        tracing::debug!(
            "Opened template {} ({} headers, {} footers, main part: {})",
            path.display(),
            document.headers.len(),
            document.footers.len(),
            document.main_part.is_some()
        );
        Ok(document)
    }

    /// Load a DOCX package from any seekable source
    pub fn open_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut reader = PackageReader::new(reader).map_err(TemplateError::PackageOpen)?;
        Ok(Self::load(&mut reader))
    }

    /// Build a document from already extracted part text.
    ///
    /// Each part is repaired exactly as if it had been read from a package.
    pub fn from_parts(
        main_part: Option<String>,
        headers: impl IntoIterator<Item = (u32, String)>,
        footers: impl IntoIterator<Item = (u32, String)>,
    ) -> Self {
        Self {
            headers: headers.into_iter().map(|(i, text)| (i, repair(&text))).collect(),
            footers: footers.into_iter().map(|(i, text)| (i, repair(&text))).collect(),
            main_part: main_part.map(|text| repair(&text)),
        }
    }

    fn load<R: Read + Seek>(reader: &mut PackageReader<R>) -> Self {
        let headers = load_indexed(reader, PartKind::Header);
        let footers = load_indexed(reader, PartKind::Footer);
        let main_part = load_part(reader, PartKind::Main);

        Self {
            headers,
            footers,
            main_part,
        }
    }

    /// Text of the main document part
    pub fn main_part(&self) -> Option<&str> {
        self.main_part.as_deref()
    }

    /// Header parts keyed by index
    pub fn headers(&self) -> &BTreeMap<u32, String> {
        &self.headers
    }

    /// Footer parts keyed by index
    pub fn footers(&self) -> &BTreeMap<u32, String> {
        &self.footers
    }

    /// Text of a single part
    pub fn part(&self, kind: PartKind) -> Option<&str> {
        match kind {
            PartKind::Header(index) => self.headers.get(&index).map(String::as_str),
            PartKind::Footer(index) => self.footers.get(&index).map(String::as_str),
            PartKind::Main => self.main_part(),
        }
    }

    /// Every loaded part, headers first, then footers, then the main part
    pub fn parts(&self) -> impl Iterator<Item = (PartKind, &str)> + '_ {
        let headers = self
            .headers
            .iter()
            .map(|(i, text)| (PartKind::Header(*i), text.as_str()));
        let footers = self
            .footers
            .iter()
            .map(|(i, text)| (PartKind::Footer(*i), text.as_str()));
        let main = self.main_part.as_deref().map(|text| (PartKind::Main, text));

        headers.chain(footers).chain(main)
    }

    /// Names of the variables used in the main document part.
    ///
    /// Headers and footers are not scanned, although [`set_variable`]
    /// does replace variables in them.
    ///
    /// [`set_variable`]: TemplateDocument::set_variable
    pub fn variable_names(&self) -> BTreeSet<String> {
        self.main_part
            .as_deref()
            .map(variable_names)
            .unwrap_or_default()
    }

    /// Replace every occurrence of a variable with `value` in all parts.
    ///
    /// `name` may be given bare (`client`) or in full (`${client}`). The
    /// value is XML-escaped and its line breaks become `<w:br/>`. Unknown
    /// names leave the document unchanged.
    pub fn set_variable(&mut self, name: &str, value: &str) {
        let tag = full_tag(name);
        let value = clean_string(value);

        let mut replaced = 0;
        for part in self.parts_mut() {
            replaced += replace_tag(part, &tag, &value);
        }

        tracing::trace!("Replaced {} occurrence(s) of {}", replaced, tag);
    }

    /// Same as [`set_variable`](TemplateDocument::set_variable) for a value
    /// that may not be UTF-8
    pub fn set_variable_bytes(&mut self, name: &str, value: &[u8]) {
        self.set_variable(name, &to_utf8(value));
    }

    /// Apply several variables in order
    pub fn set_variables<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in values {
            self.set_variable(name.as_ref(), value.as_ref());
        }
    }

    fn parts_mut(&mut self) -> impl Iterator<Item = &mut String> + '_ {
        self.headers
            .values_mut()
            .chain(self.main_part.as_mut())
            .chain(self.footers.values_mut())
    }
}

/// Read `kind(1)`, `kind(2)`, ... until an index is missing from the archive
fn load_indexed<R, F>(reader: &mut PackageReader<R>, kind: F) -> BTreeMap<u32, String>
where
    R: Read + Seek,
    F: Fn(u32) -> PartKind,
{
    let mut parts = BTreeMap::new();
    let mut index = 1;

    loop {
        let part = kind(index);
        if !reader.contains(&part.entry_name()) {
            break;
        }
        if let Some(text) = load_part(reader, part) {
            parts.insert(index, text);
        }
        index += 1;
    }

    parts
}

fn load_part<R: Read + Seek>(reader: &mut PackageReader<R>, part: PartKind) -> Option<String> {
    match reader.read_entry(&part.entry_name()) {
        Ok(Some(text)) => {
            tracing::debug!("Loaded part {} ({} bytes)", part, text.len());
            Some(repair(&text))
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Skipping unreadable part {}: {}", part, e);
            None
        }
    }
}
