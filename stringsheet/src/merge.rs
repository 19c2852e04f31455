//! Merging per-language resource files into the canonical table.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{Entry, Table};

/// What happened while merging one language file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub language: String,
    /// Translations written into the table.
    pub applied: usize,
    /// Keys that are not defined in the canonical file, in file order.
    pub unknown_keys: Vec<String>,
    /// Keys defined more than once in the language file. The last one won.
    pub duplicate_keys: Vec<String>,
    /// Entries with empty text, which count as untranslated.
    pub empty: usize,
}

impl MergeReport {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    pub fn skipped(&self) -> usize {
        self.unknown_keys.len() + self.empty
    }

    pub fn is_clean(&self) -> bool {
        self.unknown_keys.is_empty() && self.duplicate_keys.is_empty()
    }
}

impl Table {
    /// Writes the text of every string in `entries` into the `language` slot
    /// of the row with the same key. Only that slot is touched, so merges of
    /// different languages are independent of each other.
    pub fn merge_language(
        &mut self,
        language: &str,
        entries: impl IntoIterator<Item = Entry>,
    ) -> MergeReport {
        self.add_language(language);

        let mut report = MergeReport::new(language);
        let mut seen = HashSet::new();
        for entry in entries {
            let Entry::String(string) = entry else {
                continue;
            };
            if !seen.insert(string.key.clone()) {
                report.duplicate_keys.push(string.key.clone());
            }
            if string.default.is_empty() {
                report.empty += 1;
                continue;
            }
            match self.get_mut(&string.key) {
                Some(row) => {
                    row.set_translation(language, string.default);
                    report.applied += 1;
                }
                None => report.unknown_keys.push(string.key),
            }
        }

        if !report.unknown_keys.is_empty() {
            tracing::warn!(
                "{}: ignored {} key(s) missing from the default resource: {}",
                language,
                report.unknown_keys.len(),
                report.unknown_keys.join(", ")
            );
        }
        if !report.duplicate_keys.is_empty() {
            tracing::warn!(
                "{}: key(s) defined more than once, the last definition wins: {}",
                language,
                report.duplicate_keys.join(", ")
            );
        }
        tracing::debug!(
            "{}: applied {} translation(s), {} empty",
            language,
            report.applied,
            report.empty
        );

        report
    }
}
