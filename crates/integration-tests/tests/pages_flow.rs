//! Page editors publishing to the storefront.

#![allow(clippy::unwrap_used)]

use atelier_admin::db::{AboutRepository, HomepageRepository, RepositoryError};
use atelier_core::content::{AboutContent, ContentSection, HeroSection, HomepageContent};
use atelier_core::types::ProductId;
use atelier_integration_tests::TestContent;
use atelier_storefront::content::ContentService;

fn homepage() -> HomepageContent {
    HomepageContent {
        hero: HeroSection {
            title: "Clothes that last".to_owned(),
            subtitle: "Small-batch pieces.".to_owned(),
            image_url: "/static/images/hero.jpg".to_owned(),
            image_hint: "garments on a table".to_owned(),
            cta_label: "Shop".to_owned(),
            cta_href: "/products".to_owned(),
        },
        sections: Vec::new(),
        featured_product_ids: vec![ProductId::new("linen-shirt")],
    }
}

#[tokio::test]
async fn test_published_homepage_is_served() {
    let content = TestContent::empty();
    let repo = HomepageRepository::new(&content.stores());

    repo.save(&homepage()).unwrap();

    let service = ContentService::new(content.path());
    let served = service.homepage().await.unwrap();
    assert_eq!(served.hero.title, "Clothes that last");
    assert_eq!(served.featured_product_ids.len(), 1);
}

#[tokio::test]
async fn test_unpublished_about_page_is_an_editor_blank_but_a_storefront_miss() {
    let content = TestContent::empty();

    // The admin editor treats the missing file as a blank slate.
    let repo = AboutRepository::new(&content.stores());
    assert!(matches!(repo.get(), Err(RepositoryError::NotFound(_))));

    // The storefront has nothing to render.
    let service = ContentService::new(content.path());
    assert!(service.about().await.is_err());
}

#[tokio::test]
async fn test_empty_section_title_is_rejected_on_publish() {
    let content = TestContent::empty();
    let repo = AboutRepository::new(&content.stores());

    let bad = AboutContent {
        title: "About".to_owned(),
        intro: String::new(),
        sections: vec![ContentSection {
            title: "   ".to_owned(),
            body: "text".to_owned(),
            image_url: None,
            image_hint: None,
        }],
    };
    assert!(repo.save(&bad).is_err());
    assert!(matches!(repo.get(), Err(RepositoryError::NotFound(_))));
}
