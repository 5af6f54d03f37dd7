//! Built icons, indexed by slug.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::core::IconSlug;
use crate::util::fs::walk_files;

/// The icons present in the build output, keyed by slug.
///
/// Slugs are kept in ascending order; when several icons belong to the same
/// line the first one in that order wins.
#[derive(Debug, Clone, Default)]
pub struct IconInventory {
    entries: BTreeMap<IconSlug, String>,
}

impl IconInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the icon files directly inside `icons_dir`.
    ///
    /// The slug of a file is its name without extension. A missing directory
    /// gives an empty inventory.
    pub fn from_dir(icons_dir: &Path) -> Result<Self> {
        let mut inventory = IconInventory::new();
        for path in walk_files(icons_dir, |p| p.parent() == Some(icons_dir))? {
            let (Some(stem), Some(name)) = (path.file_stem(), path.file_name()) else {
                continue;
            };
            inventory.insert(
                IconSlug::new(stem.to_string_lossy()),
                name.to_string_lossy().into_owned(),
            );
        }
        tracing::debug!(
            "Indexed {} icons in {}",
            inventory.len(),
            icons_dir.display()
        );
        Ok(inventory)
    }

    /// Record a built icon. The first file registered for a slug is kept.
    pub fn insert(&mut self, slug: IconSlug, file_name: String) {
        self.entries.entry(slug).or_insert(file_name);
    }

    /// Find the icon of a line: the first slug, in ascending order, that
    /// starts with `key`. An exact match sorts before any longer slug.
    pub fn lookup(&self, key: &IconSlug) -> Option<&str> {
        self.entries
            .range(key.clone()..)
            .next()
            .filter(|(slug, _)| slug.belongs_to(key))
            .map(|(_, file)| file.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(slug, file name)` pairs in slug order.
    pub fn iter(&self) -> impl Iterator<Item = (&IconSlug, &str)> {
        self.entries.iter().map(|(slug, file)| (slug, file.as_str()))
    }
}
