//! Admin writes, storefront reads.
//!
//! The two sites share nothing but the content directory; these tests drive
//! the admin repositories and assert what the storefront's content service
//! serves afterwards.

#![allow(clippy::unwrap_used)]

use rust_decimal::dec;

use atelier_admin::db::{OrderRepository, ProductRepository, RepositoryError};
use atelier_core::types::{OrderStatus, ProductId};
use atelier_integration_tests::{TestContent, sample_order, sample_product};
use atelier_storefront::content::ContentService;

#[tokio::test]
async fn test_product_created_in_admin_is_served_to_storefront() {
    let content = TestContent::empty();
    let repo = ProductRepository::new(&content.stores());
    let service = ContentService::new(content.path());

    // Before any write the catalog is served empty, not as an error.
    assert!(service.catalog().await.unwrap().products.is_empty());

    repo.create(sample_product("canvas-tote", "Accessories", dec!(28.00)))
        .unwrap();

    // A fresh service sees the write immediately (no stale cache entry).
    let service = ContentService::new(content.path());
    let catalog = service.catalog().await.unwrap();
    assert_eq!(catalog.products.len(), 1);
    assert_eq!(
        catalog.get(&ProductId::new("canvas-tote")).unwrap().price,
        dec!(28.00)
    );
}

#[tokio::test]
async fn test_invalid_product_never_reaches_the_storefront() {
    let content = TestContent::with_catalog();
    let repo = ProductRepository::new(&content.stores());

    let mut bad = sample_product("negative", "Shirts", dec!(-1.00));
    bad.name = "Bad".to_owned();
    assert!(matches!(
        repo.create(bad),
        Err(RepositoryError::Store(_))
    ));

    let service = ContentService::new(content.path());
    assert_eq!(service.catalog().await.unwrap().products.len(), 2);
}

#[tokio::test]
async fn test_checkout_append_then_admin_processes_order() {
    let content = TestContent::with_catalog();
    let service = ContentService::new(content.path());

    // Checkout appends through the storefront service.
    let order = sample_order("ATL-TEST01");
    let id = order.id;
    service.append_order(order).unwrap();
    assert_eq!(
        service.existing_order_numbers().unwrap(),
        vec!["ATL-TEST01".to_owned()]
    );

    // The admin sees it and walks it through its lifecycle.
    let repo = OrderRepository::new(&content.stores());
    assert_eq!(repo.list().unwrap().len(), 1);
    repo.set_status(id, OrderStatus::Paid).unwrap();
    let shipped = repo.set_status(id, OrderStatus::Shipped).unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);

    // Terminal state: nothing further is allowed.
    assert!(matches!(
        repo.set_status(id, OrderStatus::Cancelled),
        Err(RepositoryError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn test_duplicate_order_numbers_are_rejected_at_the_file() {
    let content = TestContent::empty();
    let service = ContentService::new(content.path());

    service.append_order(sample_order("ATL-SAME")).unwrap();
    let second = sample_order("ATL-SAME");
    assert!(service.append_order(second).is_err());
}
