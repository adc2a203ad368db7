//! Activity name normalization.
//!
//! Activity names have been renamed over time; stored records may still carry
//! a retired name. The alias table maps every retired name to the canonical
//! name used as a key in the weight tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Historical name to canonical name mapping.
///
/// Chains (`A -> B`, `B -> C`) are followed to their end point when the table
/// is built, so every lookup lands on a name that is not itself an alias.
/// Aliases caught in a cycle are dropped and pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct AliasTable {
    aliases: HashMap<String, String>,
    /// Authored (alias, target) pairs whose target was itself an alias.
    chained: Vec<(String, String)>,
}

impl AliasTable {
    pub fn new(raw: HashMap<String, String>) -> Self {
        let mut chained: Vec<(String, String)> = raw
            .iter()
            .filter(|(_, target)| raw.contains_key(*target))
            .map(|(alias, target)| (alias.clone(), target.clone()))
            .collect();
        chained.sort();

        let mut aliases = HashMap::with_capacity(raw.len());
        for (alias, target) in &raw {
            let mut end = target;
            let mut hops = 0;
            while let Some(next) = raw.get(end) {
                hops += 1;
                if hops > raw.len() {
                    break;
                }
                end = next;
            }
            if hops > raw.len() {
                tracing::warn!("alias '{}' is part of a cycle, ignoring it", alias);
                continue;
            }
            aliases.insert(alias.clone(), end.clone());
        }

        Self { aliases, chained }
    }

    /// Map `name` to its canonical form. Unknown names pass through unchanged.
    ///
    /// Idempotent: targets are resolved to the end of any alias chain.
    pub fn normalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Authored aliases whose target was itself an alias, sorted.
    pub fn chained(&self) -> Vec<(&str, &str)> {
        self.chained
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
            .collect()
    }
}

impl From<HashMap<String, String>> for AliasTable {
    fn from(raw: HashMap<String, String>) -> Self {
        Self::new(raw)
    }
}

impl From<AliasTable> for HashMap<String, String> {
    fn from(table: AliasTable) -> Self {
        table.aliases
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
