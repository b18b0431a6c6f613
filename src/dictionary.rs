//! Dictionary entries and exact-match lookup.
//!
//! The search only needs one operation from a dictionary: "is this exact form
//! a headword, and if so which entry". [`Lookup`] is that seam. [`Dictionary`]
//! is the in-memory implementation, optionally filled from JMdict XML
//! (see `jmdict.rs`).

#[path = "dictionary/jmdict.rs"]
mod jmdict;

use crate::error::DictionaryError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

/// One sense of an entry: its POS tags and English glosses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sense {
    pub pos: Vec<String>,
    pub glosses: Vec<String>,
}

/// A dictionary entry. Only `writings` (and `readings` for kana-only entries)
/// are used as lookup keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Kanji (or mixed) spellings.
    pub writings: Vec<String>,
    /// Kana readings.
    pub readings: Vec<String>,
    pub senses: Vec<Sense>,
}

impl DictionaryEntry {
    pub fn with_writing(writing: impl Into<String>) -> Self {
        DictionaryEntry { writings: vec![writing.into()], ..Default::default() }
    }

    pub fn reading(mut self, reading: impl Into<String>) -> Self {
        self.readings.push(reading.into());
        self
    }

    pub fn sense(mut self, pos: &[&str], glosses: &[&str]) -> Self {
        self.senses.push(Sense {
            pos: pos.iter().map(|s| s.to_string()).collect(),
            glosses: glosses.iter().map(|s| s.to_string()).collect(),
        });
        self
    }
}

/// Exact-match lookup of a surface form.
///
/// No normalisation: `かく` and `書く` are different keys.
pub trait Lookup {
    fn lookup(&self, form: &str) -> Option<&DictionaryEntry>;
}

impl<T: Lookup + ?Sized> Lookup for &T {
    fn lookup(&self, form: &str) -> Option<&DictionaryEntry> {
        (**self).lookup(form)
    }
}

/// Owns its entries plus a hash index over their keys.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    /// Index `entries` by every writing; the first entry registered for a
    /// writing wins. Entries without any writing are indexed by reading, unless
    /// that key is already taken.
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        let mut index = HashMap::new();
        for (id, entry) in entries.iter().enumerate() {
            for writing in &entry.writings {
                index.entry(writing.clone()).or_insert(id);
            }
        }
        for (id, entry) in entries.iter().enumerate().filter(|(_, e)| e.writings.is_empty()) {
            for reading in &entry.readings {
                if let Entry::Vacant(slot) = index.entry(reading.clone()) {
                    slot.insert(id);
                }
            }
        }
        tracing::debug!(entries = entries.len(), keys = index.len(), "indexed dictionary");
        Dictionary { entries, index }
    }

    /// Parse JMdict XML text.
    pub fn from_jmdict_str(xml: &str) -> Result<Self, DictionaryError> {
        Ok(Self::from_entries(jmdict::parse(xml)?))
    }

    /// Read and parse an (uncompressed) JMdict XML file.
    pub fn from_jmdict_path(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path)
            .map_err(|source| DictionaryError::Io { path: path.to_path_buf(), source })?;
        Self::from_jmdict_str(&xml)
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Give the entries back, e.g. to merge with more before re-indexing.
    pub fn into_entries(self) -> Vec<DictionaryEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lookup for Dictionary {
    fn lookup(&self, form: &str) -> Option<&DictionaryEntry> {
        self.index.get(form).map(|&id| &self.entries[id])
    }
}

impl std::fmt::Display for Sense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) {}", self.pos.join(" "), self.glosses.join(", "))
    }
}

impl std::fmt::Display for DictionaryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.writings.is_empty() {
            write!(f, "{} ", self.writings.join(" "))?;
        }
        write!(f, "[{}]: ", self.readings.join(" "))?;
        for (i, sense) in self.senses.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{sense}")?;
        }
        Ok(())
    }
}
