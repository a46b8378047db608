//! Help-link catalog schema: `code -> lang -> { url, label }`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// A localized help entry.
pub struct LinkEntry {
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
/// Catalog loaded from `[links.<code>.<lang>]` plus the fallback language.
pub struct HelpCatalog {
    pub entries: BTreeMap<String, BTreeMap<String, LinkEntry>>,
    pub fallback_lang: String,
}

impl HelpCatalog {
    /// Find the entry for `code` in `lang`, falling back to `fallback_lang`.
    pub fn lookup(&self, code: &str, lang: &str) -> Option<&LinkEntry> {
        let by_lang = self.entries.get(code)?;
        by_lang
            .get(lang)
            .or_else(|| by_lang.get(&self.fallback_lang))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A resolved help link ready for presentation.
pub struct HelpLink {
    pub code: String,
    pub url: String,
    pub label: String,
}
