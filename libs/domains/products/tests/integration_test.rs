//! PostgreSQL integration tests for the Products domain
//!
//! Each test starts its own container through `TestDatabase`, so Docker must
//! be available. Run with `cargo test -p domain_products -- --ignored`.

use domain_products::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use test_utils::assertions::assert_some;
use test_utils::{TestDataBuilder, TestDatabase};

fn input(name: &str, price: &str, description: &str, quantity: i32) -> ProductInput {
    ProductInput::new(
        name,
        Decimal::from_str(price).unwrap(),
        description,
        quantity,
    )
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_lifecycle() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let widget = service
        .create(input("Widget", "9.99", "A useful widget", 5))
        .await
        .unwrap();
    let gadget = service
        .create(input("Gadget", "19.99", "A shiny gadget", 2))
        .await
        .unwrap();
    let widget_id = assert_some(widget.id, "widget id");
    assert!(gadget.id > widget.id);

    let found = service
        .list_or_search(Some("WIDG"), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(found.total_elements, 1);
    assert_eq!(found.content[0].id, Some(widget_id));

    let updated = service
        .update(widget_id, input("Widget Pro", "19.99", "An even better widget", 3))
        .await
        .unwrap();
    assert_eq!(updated.id, Some(widget_id));
    assert_eq!(service.get_by_id(widget_id).await.unwrap(), updated);

    service.delete(widget_id).await.unwrap();
    assert!(matches!(
        service.get_by_id(widget_id).await,
        Err(ProductError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_preserves_price_scale() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("price_scale");

    let saved = repo
        .save(
            input(
                &builder.name("product", "precise"),
                "1234.5678",
                &builder.description("price scale"),
                builder.quantity(),
            )
            .into_product()
            .unwrap(),
        )
        .await
        .unwrap();

    let fetched = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(fetched.price, Decimal::from_str("1234.5678").unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_search_treats_wildcards_literally() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    for name in ["50% off", "500 units", "snake_case", "snakeXcase"] {
        service
            .create(input(name, "1.00", "Wildcard fixture", 1))
            .await
            .unwrap();
    }

    let percent = service
        .list_or_search(Some("0%"), PageRequest::default())
        .await
        .unwrap();
    let names: Vec<_> = percent.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["50% off"]);

    let underscore = service
        .list_or_search(Some("e_c"), PageRequest::default())
        .await
        .unwrap();
    let names: Vec<_> = underscore.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["snake_case"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_paging_and_sorting() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    for (name, price) in [("Delta", "4.00"), ("Alpha", "2.00"), ("Charlie", "2.00"), ("Bravo", "8.00")] {
        service
            .create(input(name, price, "Paging fixture", 1))
            .await
            .unwrap();
    }

    let by_name = service
        .list_or_search(None, PageRequest::of(0, 3).with_sort(Sort::asc(SortField::Name)))
        .await
        .unwrap();
    let names: Vec<_> = by_name.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    assert_eq!(by_name.total_elements, 4);
    assert_eq!(by_name.total_pages, 2);
    assert!(!by_name.last);

    // equal prices fall back to id order
    let by_price = service
        .list_or_search(None, PageRequest::of(0, 10).with_sort(Sort::asc(SortField::Price)))
        .await
        .unwrap();
    let names: Vec<_> = by_price.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Charlie", "Delta", "Bravo"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_missing_ids_are_not_found() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    assert!(matches!(
        service.get_by_id(12345).await,
        Err(ProductError::NotFound(12345))
    ));
    assert!(matches!(
        service.delete(12345).await,
        Err(ProductError::NotFound(12345))
    ));
}
