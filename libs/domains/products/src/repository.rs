use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Page, PageRequest, Product, ProductId, Sort, SortDirection, SortField};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert when `product.id` is absent, otherwise overwrite the stored row.
    ///
    /// Overwriting an id that is not stored fails with `NotFound`.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    async fn find_by_id(&self, id: ProductId) -> ProductResult<Option<Product>>;

    /// One page over every product
    async fn find_all(&self, page: PageRequest) -> ProductResult<Page<Product>>;

    /// One page over products whose name contains `term`, ignoring case
    async fn find_by_name_containing(
        &self,
        term: &str,
        page: PageRequest,
    ) -> ProductResult<Page<Product>>;

    /// Remove a stored product
    async fn delete(&self, product: &Product) -> ProductResult<()>;
}

/// Order two products by `sort`, then by id ascending.
pub(crate) fn compare(a: &Product, b: &Product, sort: Sort) -> Ordering {
    let primary = match sort.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
    };

    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };

    primary.then_with(|| a.id.cmp(&b.id))
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<ProductId, Product>>>,
    last_id: Arc<RwLock<ProductId>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn page_of(
        &self,
        page: PageRequest,
        keep: impl Fn(&Product) -> bool,
    ) -> ProductResult<Page<Product>> {
        let products = self.products.read().await;

        let mut matching: Vec<Product> = products.values().filter(|p| keep(p)).cloned().collect();
        matching.sort_by(|a, b| compare(a, b, page.sort));

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.size).unwrap_or(usize::MAX))
            .collect();

        Ok(Page::new(content, total, &page))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        match product.id {
            Some(id) => {
                let stored = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
                *stored = product.clone();
                tracing::info!(product_id = %id, "Updated product");
            }
            None => {
                let mut last_id = self.last_id.write().await;
                *last_id += 1;
                let id = *last_id;
                product.id = Some(id);
                products.insert(id, product.clone());
                tracing::info!(product_id = %id, "Created product");
            }
        }

        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> ProductResult<Page<Product>> {
        self.page_of(page, |_| true).await
    }

    async fn find_by_name_containing(
        &self,
        term: &str,
        page: PageRequest,
    ) -> ProductResult<Page<Product>> {
        let needle = term.to_lowercase();
        self.page_of(page, |p| p.name.to_lowercase().contains(&needle))
            .await
    }

    async fn delete(&self, product: &Product) -> ProductResult<()> {
        let Some(id) = product.id else {
            return Ok(());
        };

        let mut products = self.products.write().await;
        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(())
    }
}
