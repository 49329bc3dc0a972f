mod common;

use catalog::{
    abstract_trait::product::service::{ProductCommandServiceTrait, ProductQueryServiceTrait},
    domain::requests::product::FindAllProducts,
};
use common::{TestCatalog, create_request, update_request};
use shared::errors::ServiceError;

#[tokio::test]
async fn created_products_are_available() {
    let catalog = TestCatalog::new();

    let product = catalog
        .command
        .create_product(&create_request("Widget", 9.99))
        .await
        .unwrap();

    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.price, 9.99);
    assert!(product.available);
    assert!(product.created_at.is_some());
}

#[tokio::test]
async fn duplicate_names_are_allowed() {
    let catalog = TestCatalog::new();

    let first = catalog
        .command
        .create_product(&create_request("Widget", 1.0))
        .await
        .unwrap();
    let second = catalog
        .command
        .create_product(&create_request("Widget", 2.0))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn widget_lifecycle() {
    let catalog = TestCatalog::new();

    let created = catalog
        .command
        .create_product(&create_request("Widget", 9.99))
        .await
        .unwrap();

    let found = catalog.query.find_by_id(created.id).await.unwrap();
    assert_eq!(found, created);

    let removed = catalog.command.trash_product(created.id).await.unwrap();
    assert_eq!(removed.id, created.id);
    assert!(!removed.available);

    let err = catalog.query.find_by_id(created.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Product with id 1 doesn't exist");
}

#[tokio::test]
async fn soft_deleted_product_reads_like_a_missing_one() {
    let catalog = TestCatalog::new();
    let id = catalog.seed("Gadget", 5.0).await;
    catalog.command.trash_product(id).await.unwrap();

    let removed = catalog.query.find_by_id(id).await.unwrap_err();
    let missing = catalog.query.find_by_id(42).await.unwrap_err();

    assert!(matches!(removed, ServiceError::NotFound(_)));
    assert!(matches!(missing, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn find_all_reports_last_page() {
    let catalog = TestCatalog::new();
    for i in 0..21 {
        catalog.seed(&format!("Product {i}"), 1.0).await;
    }

    let page = catalog
        .query
        .find_all(&FindAllProducts { page: 3, limit: 10 })
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, 21);
    assert_eq!(page.meta.total, 21);
    assert_eq!(page.meta.page, 3);
    assert_eq!(page.meta.last_page, 3);
}

#[tokio::test]
async fn find_all_past_the_end_is_empty() {
    let catalog = TestCatalog::new();
    catalog.seed("Only", 1.0).await;

    let page = catalog
        .query
        .find_all(&FindAllProducts { page: 5, limit: 10 })
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.meta.last_page, 1);
}

#[tokio::test]
async fn find_all_on_empty_catalog_has_no_pages() {
    let catalog = TestCatalog::new();

    let page = catalog
        .query
        .find_all(&FindAllProducts::default())
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0);
    assert_eq!(page.meta.last_page, 0);
}

#[tokio::test]
async fn find_all_skips_removed_products() {
    let catalog = TestCatalog::new();
    let first = catalog.seed("First", 1.0).await;
    catalog.seed("Second", 2.0).await;
    catalog.command.trash_product(first).await.unwrap();

    let page = catalog
        .query
        .find_all(&FindAllProducts::default())
        .await
        .unwrap();

    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].name, "Second");
}

#[tokio::test]
async fn update_without_fields_does_not_write() {
    let catalog = TestCatalog::new();
    let id = catalog.seed("Widget", 9.99).await;
    let before = catalog.query.find_by_id(id).await.unwrap();

    let after = catalog
        .command
        .update_product(&update_request(id, None, None))
        .await
        .unwrap();

    assert_eq!(after, before);
    assert_eq!(catalog.store.update_calls(), 0);
}

#[tokio::test]
async fn update_writes_only_present_fields() {
    let catalog = TestCatalog::new();
    let id = catalog.seed("Widget", 9.99).await;

    let updated = catalog
        .command
        .update_product(&update_request(id, None, Some(12.5)))
        .await
        .unwrap();

    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.price, 12.5);
    assert!(updated.available);
}

#[tokio::test]
async fn update_of_removed_product_is_not_found() {
    let catalog = TestCatalog::new();
    let id = catalog.seed("Widget", 9.99).await;
    catalog.command.trash_product(id).await.unwrap();

    let err = catalog
        .command
        .update_product(&update_request(id, Some("Renamed"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(catalog.store.update_calls(), 0);
}

#[tokio::test]
async fn second_remove_is_not_found() {
    let catalog = TestCatalog::new();
    let id = catalog.seed("Widget", 9.99).await;

    catalog.command.trash_product(id).await.unwrap();
    let err = catalog.command.trash_product(id).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));

    let rows = catalog.store.rows().await;
    assert!(!rows[0].available);
}

#[tokio::test]
async fn validate_products_deduplicates_ids() {
    let catalog = TestCatalog::new();
    catalog.seed("One", 1.0).await;
    catalog.seed("Two", 2.0).await;

    let products = catalog.query.validate_products(&[1, 1, 2]).await.unwrap();

    let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn validate_products_fails_on_unknown_id() {
    let catalog = TestCatalog::new();
    catalog.seed("One", 1.0).await;

    let err = catalog.query.validate_products(&[1, 99]).await.unwrap_err();

    match err {
        ServiceError::ValidationFailed(msg) => assert_eq!(msg, "Some products were not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn validate_products_includes_removed_rows() {
    let catalog = TestCatalog::new();
    let id = catalog.seed("One", 1.0).await;
    catalog.command.trash_product(id).await.unwrap();

    let products = catalog.query.validate_products(&[id]).await.unwrap();

    assert_eq!(products.len(), 1);
    assert!(!products[0].available);
}

#[tokio::test]
async fn find_all_with_maximum_limit_returns_everything() {
    let catalog = TestCatalog::new();
    catalog.seed("One", 1.0).await;
    catalog.seed("Two", 2.0).await;

    let page = catalog
        .query
        .find_all(&FindAllProducts {
            page: 1,
            limit: i64::MAX,
        })
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.meta.last_page, 1);
}

#[tokio::test]
async fn find_all_with_maximum_page_is_empty() {
    let catalog = TestCatalog::new();
    catalog.seed("One", 1.0).await;

    let page = catalog
        .query
        .find_all(&FindAllProducts {
            page: i64::MAX,
            limit: 2,
        })
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.meta.page, i64::MAX);
    assert_eq!(page.meta.last_page, 1);
}
