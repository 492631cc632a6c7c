//! Word Template - variable substitution in DOCX packages
//!
//! This crate fills `${name}` placeholders in the main document, headers and
//! footers of a Word package.
//!
//! # Features
//!
//! - Loading of `word/document.xml`, `word/header{N}.xml` and `word/footer{N}.xml`
//! - Repair of variables that Word split across several runs
//! - Listing of the variables used in the main document
//! - XML-escaped substitution, with line breaks turned into `<w:br/>`
//! - Writing the filled document back to a new package
//!
//! # Example
//!
//! ```no_run
//! use word_template::TemplateDocument;
//!
//! let mut doc = TemplateDocument::open("letter.docx")?;
//! for name in doc.variable_names() {
//!     println!("{}", name);
//! }
//! doc.set_variable("client", "ACME & Co");
//! doc.save("letter.docx", "letter-acme.docx")?;
//! # Ok::<(), word_template::TemplateError>(())
//! ```

mod document;
mod encoding;
mod error;
mod parts;
mod reader;
pub mod tokens;
mod writer;

pub use document::TemplateDocument;
pub use encoding::{into_utf8, to_utf8};
pub use error::{Result, TemplateError};
pub use parts::{footer_name, header_name, PartKind, MAIN_PART_NAME};
pub use reader::PackageReader;
