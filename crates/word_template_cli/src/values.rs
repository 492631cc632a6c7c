//! Variable values loaded from a JSON file and the command line

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use word_template::to_utf8;

/// A scalar value as it may appear in the values file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueEntry {
    Text(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
}

impl ValueEntry {
    /// Text inserted in the document for this value
    pub fn to_text(&self) -> String {
        match self {
            ValueEntry::Text(s) => s.clone(),
            ValueEntry::Number(n) => n.to_string(),
            ValueEntry::Boolean(b) => b.to_string(),
            ValueEntry::Null => String::new(),
        }
    }
}

/// Resolved variable values, later sources overriding earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    entries: BTreeMap<String, String>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `name: value` pairs
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, ValueEntry> =
            serde_json::from_str(content).context("Values file must be a JSON object of scalars")?;

        Ok(Self {
            entries: raw.into_iter().map(|(k, v)| (k, v.to_text())).collect(),
        })
    }

    /// Load a values file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read values file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid values file {}", path.display()))
    }

    /// Set a single value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Set a value from the raw bytes of a file
    pub fn set_from_file(&mut self, name: impl Into<String>, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read value file {}", path.display()))?;
        self.set(name, to_utf8(&bytes));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fail if any of `names` has no value
    pub fn ensure_complete<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> Result<()> {
        let missing: Vec<&str> = names
            .into_iter()
            .filter(|name| self.get(name).is_none())
            .map(String::as_str)
            .collect();

        if !missing.is_empty() {
            bail!("No value for variable(s): {}", missing.join(", "));
        }
        Ok(())
    }
}
