//! Names of the WordprocessingML parts that can carry template variables

use std::fmt;

/// Main document part
pub const MAIN_PART_NAME: &str = "word/document.xml";

/// Entry name of the header part with the given 1-based index
pub fn header_name(index: u32) -> String {
    format!("word/header{}.xml", index)
}

/// Entry name of the footer part with the given 1-based index
pub fn footer_name(index: u32) -> String {
    format!("word/footer{}.xml", index)
}

/// A part of the package that the template engine reads and rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartKind {
    Header(u32),
    Footer(u32),
    Main,
}

impl PartKind {
    /// Entry name of this part inside the archive
    pub fn entry_name(&self) -> String {
        match self {
            PartKind::Header(index) => header_name(*index),
            PartKind::Footer(index) => footer_name(*index),
            PartKind::Main => MAIN_PART_NAME.to_string(),
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entry_name())
    }
}
