//! The catalog index consumed by the browsing page.
//!
//! Serialized as a JSON object mapping each category to its ordered entries.
//! Categories keep table order (first appearance), so the object is written
//! and read through a map visitor rather than a sorted map.

use std::fmt;

use bkb_core::{BiomarkerRecord, DocumentKey};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::url::document_url;

/// One record as the page sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub index: u32,
    pub name_foreign: String,
    pub name_local: String,
    /// Document path relative to the output directory.
    pub path: String,
    /// Percent-encoded fetch URL relative to the page.
    pub url: String,
}

impl CatalogEntry {
    fn matches(&self, needle: &str) -> bool {
        self.name_foreign.to_lowercase().contains(needle)
            || self.name_local.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: String,
    pub entries: Vec<CatalogEntry>,
}

/// Category -> ordered entries, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<CategoryGroup>,
}

impl Catalog {
    /// Build the catalog from the record table.
    ///
    /// Records are grouped under their category directory name, the same
    /// name the builder writes to.
    #[must_use]
    pub fn from_records(records: &[BiomarkerRecord], asset_prefix: &str) -> Self {
        let mut catalog = Self::default();
        for record in records {
            let key = record.key();
            let entry = CatalogEntry {
                index: record.index,
                name_foreign: record.name_foreign.clone(),
                name_local: record.name_local.clone(),
                path: key.relative_path(),
                url: document_url(asset_prefix, &key),
            };
            catalog.push(key.category_dir, entry);
        }
        catalog
    }

    fn push(&mut self, category: String, entry: CatalogEntry) {
        match self.groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.entries.push(entry),
            None => self.groups.push(CategoryGroup {
                category,
                entries: vec![entry],
            }),
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Total number of entries across categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Case-insensitive substring search over both names.
    ///
    /// Keeps only matching entries and drops categories left empty. A blank
    /// query returns the whole catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Self {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }

        let groups = self
            .groups
            .iter()
            .filter_map(|group| {
                let entries: Vec<_> = group
                    .entries
                    .iter()
                    .filter(|entry| entry.matches(&needle))
                    .cloned()
                    .collect();
                (!entries.is_empty()).then(|| CategoryGroup {
                    category: group.category.clone(),
                    entries,
                })
            })
            .collect();
        Self { groups }
    }

    /// Look up an entry by record index.
    #[must_use]
    pub fn find(&self, index: u32) -> Option<(&str, &CatalogEntry)> {
        self.groups.iter().find_map(|group| {
            group
                .entries
                .iter()
                .find(|entry| entry.index == index)
                .map(|entry| (group.category.as_str(), entry))
        })
    }

    /// Storage key for an entry found in this catalog.
    #[must_use]
    pub fn key_of(category: &str, entry: &CatalogEntry) -> DocumentKey {
        let filename = entry
            .path
            .rsplit_once('/')
            .map_or(entry.path.as_str(), |(_, name)| name);
        DocumentKey {
            category_dir: category.to_string(),
            filename: filename.to_string(),
        }
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.category, &group.entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to entry lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
                let mut catalog = Catalog::default();
                while let Some((category, entries)) =
                    access.next_entry::<String, Vec<CatalogEntry>>()?
                {
                    for entry in entries {
                        catalog.push(category.clone(), entry);
                    }
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// The `index.json` document written next to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIndex {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub asset_prefix: String,
    pub total: usize,
    pub categories: Catalog,
}

impl SiteIndex {
    #[must_use]
    pub fn new(records: &[BiomarkerRecord], asset_prefix: &str) -> Self {
        let categories = Catalog::from_records(records, asset_prefix);
        Self {
            generated_at: chrono::Utc::now(),
            asset_prefix: asset_prefix.to_string(),
            total: categories.len(),
            categories,
        }
    }
}
