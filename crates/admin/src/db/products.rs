//! Product catalog repository.

use atelier_core::content::{Catalog, ContentStores, JsonFileStore, Product};
use atelier_core::types::ProductId;

use super::RepositoryError;

/// Repository over the product catalog file.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: JsonFileStore<Catalog>,
}

impl ProductRepository {
    /// Create a repository over the catalog store.
    #[must_use]
    pub fn new(stores: &ContentStores) -> Self {
        Self {
            store: stores.catalog(),
        }
    }

    /// All products, in catalog order. An absent file is an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` when the file cannot be read.
    pub fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.store.load_or_default()?.products)
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no product has that id.
    pub fn get(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        self.store
            .load_or_default()?
            .products
            .into_iter()
            .find(|p| p.id == *id)
            .ok_or_else(|| RepositoryError::NotFound(format!("product {id}")))
    }

    /// Add a new product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the id is already taken, or
    /// `RepositoryError::Store` when the new catalog fails validation or
    /// cannot be written.
    pub fn create(&self, product: Product) -> Result<(), RepositoryError> {
        let mut catalog = self.store.load_or_default()?;
        if catalog.get(&product.id).is_some() {
            return Err(RepositoryError::Conflict(format!(
                "product id {} already exists",
                product.id
            )));
        }
        catalog.products.push(product);
        self.store.save(&catalog)?;
        Ok(())
    }

    /// Replace an existing product, matched by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no product has that id, or
    /// `RepositoryError::Store` on validation or write failure.
    pub fn update(&self, product: Product) -> Result<(), RepositoryError> {
        let mut catalog = self.store.load_or_default()?;
        let slot = catalog
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("product {}", product.id)))?;
        *slot = product;
        self.store.save(&catalog)?;
        Ok(())
    }

    /// Remove a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no product has that id.
    pub fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut catalog = self.store.load_or_default()?;
        let before = catalog.products.len();
        catalog.products.retain(|p| p.id != *id);
        if catalog.products.len() == before {
            return Err(RepositoryError::NotFound(format!("product {id}")));
        }
        self.store.save(&catalog)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Wool Coat".to_owned(),
            category: "Outerwear".to_owned(),
            price: dec!(180.00),
            description: "A coat".to_owned(),
            image_url: "/static/images/coat.jpg".to_owned(),
            image_hint: "wool coat".to_owned(),
            sizes: vec!["M".to_owned(), "L".to_owned()],
            colors: vec!["Camel".to_owned()],
        }
    }

    fn repo(dir: &std::path::Path) -> ProductRepository {
        ProductRepository::new(&ContentStores::new(dir))
    }

    #[test]
    fn test_create_get_update_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(dir.path());

        repo.create(product("p1")).unwrap();
        assert_eq!(repo.get(&ProductId::new("p1")).unwrap().name, "Wool Coat");

        let mut changed = product("p1");
        changed.name = "Winter Coat".to_owned();
        repo.update(changed).unwrap();
        assert_eq!(repo.get(&ProductId::new("p1")).unwrap().name, "Winter Coat");

        repo.delete(&ProductId::new("p1")).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_duplicate_id_is_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(dir.path());

        repo.create(product("p1")).unwrap();
        assert!(matches!(
            repo.create(product("p1")),
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(dir.path());
        assert!(matches!(
            repo.update(product("ghost")),
            Err(RepositoryError::NotFound(_))
        ));
    }
}
