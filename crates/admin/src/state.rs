//! Application state shared across request handlers.

use std::sync::Arc;

use atelier_core::content::ContentStores;

use crate::config::AdminConfig;
use crate::db::{AboutRepository, HomepageRepository, OrderRepository, ProductRepository};

/// Shared application state.
///
/// Cheap to clone; all fields live behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    products: ProductRepository,
    homepage: HomepageRepository,
    about: AboutRepository,
    orders: OrderRepository,
}

impl AppState {
    /// Build state from configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let stores = ContentStores::new(&config.content_dir);
        Self {
            inner: Arc::new(AppStateInner {
                products: ProductRepository::new(&stores),
                homepage: HomepageRepository::new(&stores),
                about: AboutRepository::new(&stores),
                orders: OrderRepository::new(&stores),
                config,
            }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Product catalog repository.
    #[must_use]
    pub fn products(&self) -> &ProductRepository {
        &self.inner.products
    }

    /// Homepage content repository.
    #[must_use]
    pub fn homepage(&self) -> &HomepageRepository {
        &self.inner.homepage
    }

    /// About-page content repository.
    #[must_use]
    pub fn about(&self) -> &AboutRepository {
        &self.inner.about
    }

    /// Order book repository.
    #[must_use]
    pub fn orders(&self) -> &OrderRepository {
        &self.inner.orders
    }
}
