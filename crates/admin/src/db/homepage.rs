//! Homepage content repository.

use atelier_core::content::{ContentStores, HomepageContent, JsonFileStore, StoreError};

use super::RepositoryError;

/// Repository over the homepage content file.
#[derive(Debug, Clone)]
pub struct HomepageRepository {
    store: JsonFileStore<HomepageContent>,
}

impl HomepageRepository {
    /// Create a repository over the homepage store.
    #[must_use]
    pub fn new(stores: &ContentStores) -> Self {
        Self {
            store: stores.homepage(),
        }
    }

    /// The current homepage content.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when the file has not been
    /// published yet.
    pub fn get(&self) -> Result<HomepageContent, RepositoryError> {
        match self.store.load() {
            Err(StoreError::Missing(path)) => Err(RepositoryError::NotFound(format!(
                "homepage content ({})",
                path.display()
            ))),
            other => Ok(other?),
        }
    }

    /// Validate and publish new homepage content.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` on validation or write failure.
    pub fn save(&self, content: &HomepageContent) -> Result<(), RepositoryError> {
        self.store.save(content)?;
        Ok(())
    }
}
