use crate::error::Result;
use crate::filter::CatalogFilter;
use crate::item::CatalogItem;
use std::sync::Arc;

/// Read-only access to the catalog.
///
/// Implementations return items matching `filter`, most recently added
/// first, capped at `limit`. A failure to reach the catalog is an error,
/// never an empty result.
pub trait CatalogQuery: Send + Sync {
    fn query(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CatalogItem>>;
}

impl<T: CatalogQuery + ?Sized> CatalogQuery for Arc<T> {
    fn query(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CatalogItem>> {
        (**self).query(filter, limit)
    }
}

impl<T: CatalogQuery + ?Sized> CatalogQuery for &T {
    fn query(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CatalogItem>> {
        (**self).query(filter, limit)
    }
}
