//! Starter content for a fresh installation.
//!
//! Writes a small catalog and placeholder page copy so both sites render
//! something real on first boot. Existing files are left alone unless
//! `--force` is passed; the order book is never seeded.

use std::path::Path;

use rust_decimal::dec;
use tracing::info;

use atelier_core::content::{
    AboutContent, Catalog, ContentSection, ContentStores, HeroSection, HomepageContent, Product,
    StoreError,
};
use atelier_core::types::ProductId;

/// Write the starter content files into `dir`.
///
/// # Errors
///
/// Returns an error when a file cannot be written.
pub fn run(dir: &Path, force: bool) -> Result<(), StoreError> {
    let stores = ContentStores::new(dir);

    let catalog_store = stores.catalog();
    if force || !catalog_store.exists() {
        catalog_store.save(&starter_catalog())?;
        info!(path = %catalog_store.path().display(), "seeded catalog");
    } else {
        info!(path = %catalog_store.path().display(), "catalog exists, skipping");
    }

    let homepage_store = stores.homepage();
    if force || !homepage_store.exists() {
        homepage_store.save(&starter_homepage())?;
        info!(path = %homepage_store.path().display(), "seeded homepage");
    } else {
        info!(path = %homepage_store.path().display(), "homepage exists, skipping");
    }

    let about_store = stores.about();
    if force || !about_store.exists() {
        about_store.save(&starter_about())?;
        info!(path = %about_store.path().display(), "seeded about page");
    } else {
        info!(path = %about_store.path().display(), "about page exists, skipping");
    }

    Ok(())
}

fn starter_catalog() -> Catalog {
    Catalog {
        products: vec![
            Product {
                id: ProductId::new("linen-shirt"),
                name: "Linen Shirt".to_owned(),
                category: "Shirts".to_owned(),
                price: dec!(49.50),
                description: "A relaxed linen shirt for warm days.".to_owned(),
                image_url: "/static/images/linen-shirt.jpg".to_owned(),
                image_hint: "white linen shirt on a hanger".to_owned(),
                sizes: vec!["S".to_owned(), "M".to_owned(), "L".to_owned()],
                colors: vec!["White".to_owned(), "Sand".to_owned()],
            },
            Product {
                id: ProductId::new("wool-coat"),
                name: "Wool Coat".to_owned(),
                category: "Outerwear".to_owned(),
                price: dec!(180.00),
                description: "A structured wool coat that holds its shape.".to_owned(),
                image_url: "/static/images/wool-coat.jpg".to_owned(),
                image_hint: "camel wool coat".to_owned(),
                sizes: vec!["M".to_owned(), "L".to_owned()],
                colors: vec!["Camel".to_owned(), "Charcoal".to_owned()],
            },
            Product {
                id: ProductId::new("canvas-tote"),
                name: "Canvas Tote".to_owned(),
                category: "Accessories".to_owned(),
                price: dec!(28.00),
                description: "A heavy canvas tote with an inner pocket.".to_owned(),
                image_url: "/static/images/canvas-tote.jpg".to_owned(),
                image_hint: "natural canvas tote bag".to_owned(),
                sizes: vec!["One size".to_owned()],
                colors: vec!["Natural".to_owned(), "Black".to_owned()],
            },
        ],
    }
}

fn starter_homepage() -> HomepageContent {
    HomepageContent {
        hero: HeroSection {
            title: "Clothes that last".to_owned(),
            subtitle: "Small-batch pieces, made to be worn for years.".to_owned(),
            image_url: "/static/images/hero.jpg".to_owned(),
            image_hint: "folded garments on a wooden table".to_owned(),
            cta_label: "Shop the collection".to_owned(),
            cta_href: "/products".to_owned(),
        },
        sections: vec![ContentSection {
            title: "Made responsibly".to_owned(),
            body: "Every piece is cut and sewn in a single workshop we visit often."
                .to_owned(),
            image_url: None,
            image_hint: None,
        }],
        featured_product_ids: vec![ProductId::new("linen-shirt"), ProductId::new("wool-coat")],
    }
}

fn starter_about() -> AboutContent {
    AboutContent {
        title: "About Atelier".to_owned(),
        intro: "We are a small studio making a short list of garments well.".to_owned(),
        sections: vec![ContentSection {
            title: "The workshop".to_owned(),
            body: "One room, four machines, and fabric we choose by hand.".to_owned(),
            image_url: None,
            image_hint: None,
        }],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_writes_all_three_files() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), false).unwrap();

        let stores = ContentStores::new(dir.path());
        assert!(stores.catalog().load().is_ok());
        assert!(stores.homepage().load().is_ok());
        assert!(stores.about().load().is_ok());
        // The order book is never seeded.
        assert!(!stores.orders().exists());
    }

    #[test]
    fn test_seed_skips_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let stores = ContentStores::new(dir.path());

        let mut custom = starter_about();
        custom.title = "Hand-written".to_owned();
        stores.about().save(&custom).unwrap();

        run(dir.path(), false).unwrap();
        assert_eq!(stores.about().load().unwrap().title, "Hand-written");

        run(dir.path(), true).unwrap();
        assert_eq!(stores.about().load().unwrap().title, "About Atelier");
    }
}
