use atomicwrites::{AtomicFile, OverwriteBehavior};
use gemmatch_core::{CatalogFilter, CatalogItem, CatalogQuery, Error, Filter, Result};
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::path::Path;

struct Entry {
    /// Insertion order; breaks `created_at` ties
    seq: u64,
    item: CatalogItem,
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    next_seq: u64,
}

/// In-memory catalog backed by a JSON file
pub struct CatalogStore {
    inner: RwLock<Inner>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let store = Self::new();
        for item in items {
            store.upsert(item);
        }
        store
    }

    /// Load a catalog file containing a JSON array of items
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let items: Vec<CatalogItem> = serde_json::from_str(&contents)
            .map_err(|e| Error::Serialization(format!("{}: {}", path.display(), e)))?;

        let store = Self::from_items(items);
        tracing::info!(path = %path.display(), items = store.len(), "catalog loaded");
        Ok(store)
    }

    /// Atomically write the catalog as a JSON array, oldest first
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let items = self.items();
        AtomicFile::new(path.as_ref(), OverwriteBehavior::AllowOverwrite)
            .write(|f| serde_json::to_writer_pretty(f, &items))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(io) => Error::Io(io),
                atomicwrites::Error::User(json) => Error::Serialization(json.to_string()),
            })?;
        tracing::debug!(path = %path.as_ref().display(), items = items.len(), "catalog snapshot written");
        Ok(())
    }

    /// Insert an item, or replace the item with the same id in place
    pub fn upsert(&self, item: CatalogItem) {
        let mut inner = self.inner.write();
        if let Some(entry) = inner.entries.iter_mut().find(|e| e.item.id == item.id) {
            entry.item = item;
            return;
        }

        let seq = inner.next_seq;
        inner.entries.push(Entry { seq, item });
        inner.next_seq += 1;
    }

    pub fn get(&self, id: &str) -> Option<CatalogItem> {
        self.inner
            .read()
            .entries
            .iter()
            .find(|e| e.item.id == id)
            .map(|e| e.item.clone())
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        let before = inner.entries.len();
        inner.entries.retain(|e| e.item.id != id);
        inner.entries.len() != before
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// All items in insertion order
    pub fn items(&self) -> Vec<CatalogItem> {
        self.inner.read().entries.iter().map(|e| e.item.clone()).collect()
    }
}

impl CatalogQuery for CatalogStore {
    fn query(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CatalogItem>> {
        let inner = self.inner.read();
        let mut matched: Vec<&Entry> = inner
            .entries
            .iter()
            .filter(|e| filter.matches(&e.item))
            .collect();
        matched.sort_by_key(|e| Reverse((e.item.created_at, e.seq)));

        Ok(matched
            .into_iter()
            .take(limit)
            .map(|e| e.item.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gemmatch_core::{CatalogFilterBuilder, Category, PreferenceVector, Style};

    fn item(id: &str, day: u32) -> CatalogItem {
        CatalogItem::new(id, format!("Item {}", id), 1_000.0, Category::Ring)
            .with_styles([Style::Modern])
            .with_created_at(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_query_newest_first() {
        let store = CatalogStore::from_items([item("a", 1), item("b", 3), item("c", 2)]);
        let ids: Vec<_> = store
            .query(&CatalogFilter::in_stock(), 10)
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_same_timestamp_later_insert_first() {
        let store = CatalogStore::from_items([item("a", 1), item("b", 1)]);
        let items = store.query(&CatalogFilter::in_stock(), 10).unwrap();
        assert_eq!(items[0].id, "b");
    }

    #[test]
    fn test_query_filters_and_limits() {
        let store = CatalogStore::new();
        for day in 1..=9 {
            store.upsert(item(&format!("m{}", day), day));
        }
        store.upsert(item("t", 10).with_styles([Style::Traditional]));
        store.upsert(item("gone", 11).with_in_stock(false));

        let filter = CatalogFilterBuilder::build(&PreferenceVector::new().with_style(Style::Modern));
        let items = store.query(&filter, 5).unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].id, "m9");
        assert!(items.iter().all(|i| i.in_stock && i.has_style(Style::Modern)));
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let store = CatalogStore::from_items([item("a", 1)]);
        let mut updated = item("a", 1);
        updated.price = 5.0;
        store.upsert(updated);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().price, 5.0);
        assert!(store.delete("a"));
        assert!(!store.delete("a"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let store = CatalogStore::from_items([item("a", 1), item("b", 2)]);
        store.save(&path).unwrap();

        let restored = CatalogStore::load(&path).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.items(), store.items());
    }

    #[test]
    fn test_load_rejects_unknown_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","name":"A","price":1,"category":"crown","style":"modern"}]"#,
        )
        .unwrap();

        assert!(matches!(CatalogStore::load(&path), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_shared_between_threads() {
        let store = std::sync::Arc::new(CatalogStore::new());

        std::thread::scope(|s| {
            for t in 0..4u32 {
                let store = store.clone();
                s.spawn(move || {
                    for day in 1..=5 {
                        store.upsert(item(&format!("t{}-{}", t, day), day));
                        store.query(&CatalogFilter::in_stock(), 3).unwrap();
                    }
                });
            }
        });

        assert_eq!(store.len(), 20);
        assert_eq!(store.query(&CatalogFilter::in_stock(), 3).unwrap().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            CatalogStore::load("/nonexistent/catalog.json"),
            Err(Error::Io(_))
        ));
    }
}
