//! JSON-file-backed content stores.
//!
//! Each content type lives in its own file under the content directory. A
//! store validates before every overwrite and writes through a temp file +
//! rename, so a single file is never left half-written. There is no
//! cross-file transaction and no reconciliation of concurrent writers; the
//! last save wins.

use std::fs;
use std::io::Write as _;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{AboutContent, Catalog, HomepageContent, Order, Validate, ValidationError};

/// Errors raised by the content stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file does not exist yet.
    #[error("content file not found: {0}")]
    Missing(PathBuf),

    /// Filesystem failure reading or writing the backing file.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not valid JSON for the content type.
    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The value failed its write-time checks; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A single JSON file holding one content type.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Validate,
{
    /// Create a store over the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and deserialize the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] when the file does not exist,
    /// [`StoreError::Io`] on read failure, or [`StoreError::Parse`] when the
    /// file is not valid JSON for `T`.
    pub fn load(&self) -> Result<T, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Like [`Self::load`], but an absent file yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Propagates read and parse failures for a present file.
    pub fn load_or_default(&self) -> Result<T, StoreError>
    where
        T: Default,
    {
        match self.load() {
            Err(StoreError::Missing(_)) => Ok(T::default()),
            other => other,
        }
    }

    /// Validate and overwrite the backing file.
    ///
    /// The value is serialized as pretty JSON and written via a temp file in
    /// the same directory, then renamed over the target.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] (nothing written) when the value
    /// fails its checks, or [`StoreError::Io`] on filesystem failure.
    pub fn save(&self, value: &T) -> Result<(), StoreError> {
        value.validate()?;

        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            path: tmp.clone(),
            source,
        };
        {
            let mut file = fs::File::create(&tmp).map_err(io_err)?;
            file.write_all(json.as_bytes()).map_err(io_err)?;
            file.write_all(b"\n").map_err(io_err)?;
            file.sync_all().map_err(io_err)?;
        }
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(path = %self.path.display(), "content file saved");
        Ok(())
    }
}

/// Factory for the four content stores under one content directory.
#[derive(Debug, Clone)]
pub struct ContentStores {
    dir: PathBuf,
}

impl ContentStores {
    /// Create stores rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The content directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The product catalog store (`products.json`).
    #[must_use]
    pub fn catalog(&self) -> JsonFileStore<Catalog> {
        JsonFileStore::new(self.dir.join("products.json"))
    }

    /// The homepage content store (`homepage.json`).
    #[must_use]
    pub fn homepage(&self) -> JsonFileStore<HomepageContent> {
        JsonFileStore::new(self.dir.join("homepage.json"))
    }

    /// The about-page content store (`about.json`).
    #[must_use]
    pub fn about(&self) -> JsonFileStore<AboutContent> {
        JsonFileStore::new(self.dir.join("about.json"))
    }

    /// The order book store (`orders.json`).
    #[must_use]
    pub fn orders(&self) -> JsonFileStore<Vec<Order>> {
        JsonFileStore::new(self.dir.join("orders.json"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::content::Product;
    use crate::types::ProductId;

    fn catalog() -> Catalog {
        Catalog {
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
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let stores = ContentStores::new(dir.path());
        let store = stores.catalog();

        store.save(&catalog()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, catalog());
        // No temp file left behind.
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStores::new(dir.path()).catalog();
        assert!(matches!(store.load(), Err(StoreError::Missing(_))));
        assert_eq!(store.load_or_default().unwrap(), Catalog::default());
    }

    #[test]
    fn test_load_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStores::new(dir.path()).catalog();
        fs::write(store.path(), "{oops").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_save_rejects_invalid_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStores::new(dir.path()).catalog();
        store.save(&catalog()).unwrap();

        let mut bad = catalog();
        bad.products.push(bad.products[0].clone()); // duplicate id
        assert!(matches!(
            store.save(&bad),
            Err(StoreError::Validation(_))
        ));

        // The previous content is untouched.
        assert_eq!(store.load().unwrap(), catalog());
    }

    #[test]
    fn test_orders_store_defaults_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStores::new(dir.path()).orders();
        assert!(store.load_or_default().unwrap().is_empty());
    }
}
