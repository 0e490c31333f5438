//! Service scenarios against the in-memory store
//!
//! These exercise the full create → search → update → delete lifecycle
//! without a database.

use domain_products::*;
use rust_decimal::Decimal;
use test_utils::TestDataBuilder;
use test_utils::assertions::assert_id_eq;

fn service() -> ProductService<InMemoryProductRepository> {
    ProductService::new(InMemoryProductRepository::new())
}

fn input(name: &str, cents: i64, description: &str, quantity: i32) -> ProductInput {
    ProductInput::new(name, Decimal::new(cents, 2), description, quantity)
}

#[tokio::test]
async fn test_widget_gadget_lifecycle() {
    let service = service();

    let widget = service
        .create(input("Widget", 999, "A useful widget", 5))
        .await
        .unwrap();
    let gadget = service
        .create(input("Gadget", 1999, "A shiny gadget", 2))
        .await
        .unwrap();
    assert!(widget.id.is_some());
    assert_ne!(widget.id, gadget.id);

    let found = service
        .list_or_search(Some("widg"), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(found.total_elements, 1);
    assert_eq!(found.content, vec![widget.clone()]);

    let widget_id = widget.id.unwrap();
    let updated = service
        .update(widget_id, input("Widget Pro", 1999, "An even better widget", 3))
        .await
        .unwrap();
    assert_id_eq(updated.id, Some(widget_id), "update keeps id");
    assert_eq!(updated.name, "Widget Pro");

    let fetched = service.get_by_id(widget_id).await.unwrap();
    assert_eq!(fetched, updated);

    service.delete(widget_id).await.unwrap();
    let result = service.get_by_id(widget_id).await;
    assert!(matches!(result, Err(ProductError::NotFound(id)) if id == widget_id));

    let remaining = service
        .list_or_search(None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(remaining.content, vec![gadget]);
}

#[tokio::test]
async fn test_invalid_product_reports_every_field_and_persists_nothing() {
    let service = service();

    let result = service.create(input("A", 0, "short", -1)).await;
    let Err(ProductError::Validation(errors)) = result else {
        panic!("expected validation error, got {:?}", result);
    };

    let fields = errors.field_errors();
    for field in ["name", "price", "description", "quantity"] {
        assert!(fields.contains_key(field), "missing violation for {}", field);
    }

    let all = service
        .list_or_search(None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total_elements, 0);
}

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    let service = service();
    let builder = TestDataBuilder::from_test_name("create_then_get");

    let created = service
        .create(input(
            &builder.name("product", "main"),
            12345,
            &builder.description("create then get"),
            builder.quantity(),
        ))
        .await
        .unwrap();

    let fetched = service.get_by_id(created.id.unwrap()).await.unwrap();
    assert_eq!(fetched.name, builder.name("product", "main"));
    assert_eq!(fetched.price, Decimal::new(12345, 2));
    assert_eq!(fetched.description, builder.description("create then get"));
    assert_eq!(fetched.quantity, builder.quantity());
}

#[tokio::test]
async fn test_blank_search_terms_match_full_listing() {
    let service = service();
    for (name, cents) in [("Widget", 999), ("Gadget", 1999), ("Gizmo", 499)] {
        service
            .create(input(name, cents, "Catalog fixture item", 1))
            .await
            .unwrap();
    }

    let request = PageRequest::of(0, 2);
    let none = service.list_or_search(None, request).await.unwrap();
    let empty = service.list_or_search(Some(""), request).await.unwrap();
    let spaces = service.list_or_search(Some("   "), request).await.unwrap();

    assert_eq!(none, empty);
    assert_eq!(none, spaces);
    assert_eq!(none.total_elements, 3);
    assert_eq!(none.total_pages, 2);
}

#[tokio::test]
async fn test_search_finds_every_match_across_pages() {
    let service = service();
    for name in ["Red Widget", "Gadget", "widget blue", "WIDGET XL", "Gizmo"] {
        service
            .create(input(name, 100, "Catalog fixture item", 1))
            .await
            .unwrap();
    }

    let mut names = Vec::new();
    let mut page = 0;
    loop {
        let result = service
            .list_or_search(Some("Widget"), PageRequest::of(page, 2))
            .await
            .unwrap();
        names.extend(result.content.into_iter().map(|p| p.name));
        if result.last {
            break;
        }
        page += 1;
    }

    assert_eq!(names, vec!["Red Widget", "widget blue", "WIDGET XL"]);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let service = service();

    assert!(matches!(
        service.get_by_id(404).await,
        Err(ProductError::NotFound(404))
    ));
    assert!(matches!(
        service
            .update(404, input("Widget", 999, "A useful widget", 5))
            .await,
        Err(ProductError::NotFound(404))
    ));
    assert!(matches!(
        service.delete(404).await,
        Err(ProductError::NotFound(404))
    ));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let service = service();

    let creates = (0..20).map(|i| {
        let service = service.clone();
        async move {
            service
                .create(input(&format!("Item {}", i), 100, "Concurrent fixture", i))
                .await
        }
    });
    let results = futures::future::join_all(creates).await;

    let mut ids: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().id.unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}
