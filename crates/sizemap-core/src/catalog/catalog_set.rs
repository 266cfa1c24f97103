//! Named catalogs

use super::SizeCatalog;
use crate::error::Result;
use crate::types::MergePolicy;

/// Ordered collection of named catalogs.
///
/// Names usually come from the catalog file stem (`home.json` → `home`).
/// Insertion order is the merge order.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: Vec<(String, SizeCatalog)>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog, replacing any catalog of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, catalog: SizeCatalog) {
        let name = name.into();
        match self.catalogs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = catalog,
            None => self.catalogs.push((name, catalog)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SizeCatalog> {
        self.catalogs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Catalog names in merge order
    pub fn names(&self) -> Vec<&str> {
        self.catalogs.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SizeCatalog)> {
        self.catalogs.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Merge every catalog, in order, into one
    pub fn merged(&self, policy: MergePolicy) -> Result<SizeCatalog> {
        SizeCatalog::merge(self.catalogs.iter().map(|(_, c)| c), policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{Dimensions, SizeMap, ORIGINAL};

    fn single(image: &str, width: u32, height: u32) -> SizeCatalog {
        let mut map = SizeMap::new();
        map.entry(image.to_string())
            .or_default()
            .insert(ORIGINAL.to_string(), Dimensions::new(width, height));
        SizeCatalog::load(map).unwrap()
    }

    #[test]
    fn test_insert_keeps_order_and_replaces_by_name() {
        let mut set = CatalogSet::new();
        set.insert("test", single("god", 2912, 2047));
        set.insert("home", single("image_name", 1200, 1200));
        set.insert("test", single("god", 100, 100));

        assert_eq!(set.names(), vec!["test", "home"]);
        assert_eq!(
            set.get("test").unwrap().get_variant("god", ORIGINAL).unwrap(),
            Dimensions::new(100, 100)
        );
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn test_merged_combines_images() {
        let mut set = CatalogSet::new();
        set.insert("test", single("god", 2912, 2047));
        set.insert("home", single("image_name", 1200, 1200));

        let merged = set.merged(MergePolicy::RejectConflicts).unwrap();
        assert_eq!(
            merged.list_images().into_iter().collect::<Vec<_>>(),
            vec!["god", "image_name"]
        );
    }

    #[test]
    fn test_merged_conflict() {
        let mut set = CatalogSet::new();
        set.insert("a", single("god", 10, 10));
        set.insert("b", single("god", 20, 20));

        assert!(matches!(
            set.merged(MergePolicy::RejectConflicts),
            Err(Error::DuplicateImage { .. })
        ));
        let merged = set.merged(MergePolicy::LastWriteWins).unwrap();
        assert_eq!(
            merged.get_variant("god", ORIGINAL).unwrap(),
            Dimensions::new(20, 20)
        );
    }
}
