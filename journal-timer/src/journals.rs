use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Journal display name to spreadsheet id, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JournalMapping {
    entries: Vec<(String, String)>,
}

impl JournalMapping {
    /// Read the mapping from a JSON object file. A missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read journal mapping at {}", path.display()))?;
        let mapping: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse journal mapping at {}", path.display()))?;
        tracing::info!(journals = mapping.len(), path = %path.display(), "loaded journal mapping");
        Ok(mapping)
    }

    pub fn sheet_id(&self, journal: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == journal)
            .map(|(_, id)| id.as_str())
    }

    pub fn journals(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, journal: String, sheet_id: String) {
        match self.entries.iter_mut().find(|(name, _)| *name == journal) {
            Some(entry) => entry.1 = sheet_id,
            None => self.entries.push((journal, sheet_id)),
        }
    }
}

impl<J: Into<String>, S: Into<String>> FromIterator<(J, S)> for JournalMapping {
    fn from_iter<I: IntoIterator<Item = (J, S)>>(iter: I) -> Self {
        let mut mapping = Self::default();
        for (journal, sheet_id) in iter {
            mapping.insert(journal.into(), sheet_id.into());
        }
        mapping
    }
}

impl<'de> Deserialize<'de> for JournalMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = JournalMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of journal name to spreadsheet id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = JournalMapping::default();
                while let Some((journal, sheet_id)) = access.next_entry::<String, String>()? {
                    mapping.insert(journal, sheet_id);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
