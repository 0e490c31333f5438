use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{ProductError, ProductResult};
use crate::models::{Page, PageRequest, Product, ProductId, ProductInput};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Search by name when a non-blank term is given, otherwise list everything.
    #[instrument(skip(self))]
    pub async fn list_or_search(
        &self,
        search_term: Option<&str>,
        page: PageRequest,
    ) -> ProductResult<Page<Product>> {
        match search_term.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => {
                debug!(term, "Searching products by name");
                self.repository.find_by_name_containing(term, page).await
            }
            None => {
                debug!("Listing all products");
                self.repository.find_all(page).await
            }
        }
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: ProductId) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Validate and persist a new product. The store assigns the id.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let product = input.into_product()?;
        self.repository.save(product).await
    }

    /// Replace every field of an existing product.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ProductId, input: ProductInput) -> ProductResult<Product> {
        let replacement = input.into_product()?;

        let mut product = self.get_by_id(id).await?;
        product.overwrite_with(replacement);

        debug!(product_id = id, "Overwriting product");
        self.repository.save(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> ProductResult<()> {
        let product = self.get_by_id(id).await?;
        self.repository.delete(&product).await
    }
}
