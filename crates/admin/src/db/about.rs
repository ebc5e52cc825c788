//! About-page content repository.

use atelier_core::content::{AboutContent, ContentStores, JsonFileStore, StoreError};

use super::RepositoryError;

/// Repository over the about-page content file.
#[derive(Debug, Clone)]
pub struct AboutRepository {
    store: JsonFileStore<AboutContent>,
}

impl AboutRepository {
    /// Create a repository over the about store.
    #[must_use]
    pub fn new(stores: &ContentStores) -> Self {
        Self {
            store: stores.about(),
        }
    }

    /// The current about-page content.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when the file has not been
    /// published yet.
    pub fn get(&self) -> Result<AboutContent, RepositoryError> {
        match self.store.load() {
            Err(StoreError::Missing(path)) => Err(RepositoryError::NotFound(format!(
                "about content ({})",
                path.display()
            ))),
            other => Ok(other?),
        }
    }

    /// Validate and publish new about-page content.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` on validation or write failure.
    pub fn save(&self, content: &AboutContent) -> Result<(), RepositoryError> {
        self.store.save(content)?;
        Ok(())
    }
}
