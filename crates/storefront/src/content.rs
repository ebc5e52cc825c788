//! Read access to the JSON content files published by the admin.
//!
//! The admin overwrites one file per content type; the storefront reads them
//! through short-TTL caches so edits become visible without a restart while
//! page renders stay off the filesystem. Orders are the exception: checkout
//! appends to `orders.json` through the store directly (never cached).

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use atelier_core::content::{
    AboutContent, Catalog, ContentStores, HomepageContent, Order, StoreError,
};

use crate::error::{AppError, Result};

/// How long a published content file may be served from cache.
const CONTENT_TTL: Duration = Duration::from_secs(5);

/// Cached, typed access to the content directory.
#[derive(Clone)]
pub struct ContentService {
    stores: ContentStores,
    catalog: Cache<&'static str, Arc<Catalog>>,
    homepage: Cache<&'static str, Arc<HomepageContent>>,
    about: Cache<&'static str, Arc<AboutContent>>,
}

impl ContentService {
    /// Create a service over the given content directory.
    #[must_use]
    pub fn new(content_dir: &Path) -> Self {
        fn cache<T: Send + Sync + 'static>() -> Cache<&'static str, Arc<T>> {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(CONTENT_TTL)
                .build()
        }

        Self {
            stores: ContentStores::new(content_dir),
            catalog: cache(),
            homepage: cache(),
            about: cache(),
        }
    }

    /// The underlying stores (used by checkout to append orders).
    #[must_use]
    pub const fn stores(&self) -> &ContentStores {
        &self.stores
    }

    /// The product catalog. An absent file is served as an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub async fn catalog(&self) -> Result<Arc<Catalog>> {
        let stores = self.stores.clone();
        self.catalog
            .try_get_with("catalog", async move {
                stores.catalog().load_or_default().map(Arc::new)
            })
            .await
            .map_err(unwrap_cached)
    }

    /// The homepage content.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is absent, unreadable, or invalid.
    pub async fn homepage(&self) -> Result<Arc<HomepageContent>> {
        let stores = self.stores.clone();
        self.homepage
            .try_get_with("homepage", async move { stores.homepage().load().map(Arc::new) })
            .await
            .map_err(unwrap_cached)
    }

    /// The about-page content.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is absent, unreadable, or invalid.
    pub async fn about(&self) -> Result<Arc<AboutContent>> {
        let stores = self.stores.clone();
        self.about
            .try_get_with("about", async move { stores.about().load().map(Arc::new) })
            .await
            .map_err(unwrap_cached)
    }

    /// Append a new order to the order book.
    ///
    /// Loads the current list, appends, and saves (validate-then-overwrite,
    /// same as the admin editors). Single-file atomicity only.
    ///
    /// # Errors
    ///
    /// Returns an error when the order book cannot be read or written, or
    /// when the appended order fails validation.
    pub fn append_order(&self, order: Order) -> Result<()> {
        let store = self.stores.orders();
        let mut orders = store.load_or_default()?;
        orders.push(order);
        store.save(&orders)?;
        Ok(())
    }

    /// The order numbers already in use (for uniqueness checks at checkout).
    ///
    /// # Errors
    ///
    /// Returns an error when the order book cannot be read.
    pub fn existing_order_numbers(&self) -> Result<Vec<String>> {
        let orders = self.stores.orders().load_or_default()?;
        Ok(orders.into_iter().map(|o| o.number).collect())
    }
}

/// Map a cache-wrapped store error back onto `AppError`.
///
/// `moka` wraps the loader error in an `Arc`; the inner `StoreError` is not
/// `Clone`, so reconstruct the interesting cases by inspection.
fn unwrap_cached(err: Arc<StoreError>) -> AppError {
    match &*err {
        StoreError::Missing(path) => AppError::NotFound(path.display().to_string()),
        other => AppError::Internal(other.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use atelier_core::content::{Product, Validate as _};
    use atelier_core::types::ProductId;

    fn write_catalog(dir: &Path) {
        let catalog = Catalog {
            products: vec![Product {
                id: ProductId::new("p1"),
                name: "Linen Shirt".to_owned(),
                category: "Shirts".to_owned(),
                price: dec!(49.50),
                description: "A shirt".to_owned(),
                image_url: "/static/images/p1.jpg".to_owned(),
                image_hint: "linen shirt".to_owned(),
                sizes: vec!["M".to_owned()],
                colors: vec!["White".to_owned()],
            }],
        };
        catalog.validate().unwrap();
        ContentStores::new(dir).catalog().save(&catalog).unwrap();
    }

    #[tokio::test]
    async fn test_catalog_absent_file_serves_empty() {
        let dir = tempfile::tempdir().unwrap();
        let service = ContentService::new(dir.path());
        let catalog = service.catalog().await.unwrap();
        assert!(catalog.products.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_served_from_file() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path());
        let service = ContentService::new(dir.path());
        let catalog = service.catalog().await.unwrap();
        assert_eq!(catalog.products.len(), 1);
    }

    #[tokio::test]
    async fn test_homepage_absent_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let service = ContentService::new(dir.path());
        assert!(matches!(
            service.homepage().await,
            Err(AppError::NotFound(_))
        ));
    }
}
