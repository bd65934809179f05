use crate::store::model::RegistryEntry;
use serde::Serialize;
use std::collections::HashMap;

/// Ownership registry indexed by (asset_type, asset_name).
///
/// Duplicate keys keep the first row for lookups, matching a first-match scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    #[serde(skip)]
    index: HashMap<(String, String), usize>,
}

impl Registry {
    pub fn from_entries(entries: Vec<RegistryEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            let key = (entry.asset_type.clone(), entry.asset_name.clone());
            if index.contains_key(&key) {
                log::warn!(
                    "duplicate registry entry for {} {}; keeping the first row",
                    entry.asset_type,
                    entry.asset_name
                );
                continue;
            }
            index.insert(key, pos);
        }
        Self { entries, index }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, asset_type: &str, asset_name: &str) -> Option<&RegistryEntry> {
        self.index
            .get(&(asset_type.to_string(), asset_name.to_string()))
            .map(|&pos| &self.entries[pos])
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
