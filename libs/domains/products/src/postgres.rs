use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Page, PageRequest, Product, ProductId, SortDirection, SortField},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<entity::Entity>,
        page: PageRequest,
    ) -> ProductResult<Page<Product>> {
        let direction = match page.sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let mut query = query.order_by(sort_column(page.sort.field), direction);
        if page.sort.field != SortField::Id {
            query = query.order_by(entity::Column::Id, Order::Asc);
        }

        let total = query.clone().count(&self.db).await?;
        let models = query
            .offset(page.offset())
            .limit(page.size)
            .all(&self.db)
            .await?;

        Ok(Page::new(
            models.into_iter().map(Product::from).collect(),
            total,
            &page,
        ))
    }
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::Id => entity::Column::Id,
        SortField::Name => entity::Column::Name,
        SortField::Price => entity::Column::Price,
        SortField::Quantity => entity::Column::Quantity,
    }
}

/// `%`, `_` and `\` in a search term match themselves.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();

        let model = match id {
            None => {
                let model = active_model.insert(&self.db).await?;
                tracing::info!(product_id = %model.id, "Created product");
                model
            }
            Some(id) => {
                let model = active_model.update(&self.db).await.map_err(|e| match e {
                    DbErr::RecordNotUpdated => ProductError::NotFound(id),
                    other => other.into(),
                })?;
                tracing::info!(product_id = %id, "Updated product");
                model
            }
        };

        Ok(model.into())
    }

    async fn find_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn find_all(&self, page: PageRequest) -> ProductResult<Page<Product>> {
        self.fetch_page(entity::Entity::find(), page).await
    }

    async fn find_by_name_containing(
        &self,
        term: &str,
        page: PageRequest,
    ) -> ProductResult<Page<Product>> {
        // backslash is the default LIKE escape in PostgreSQL
        let query = entity::Entity::find()
            .filter(Expr::cust_with_values("LOWER(name) LIKE $1", [like_pattern(term)]));
        self.fetch_page(query, page).await
    }

    async fn delete(&self, product: &Product) -> ProductResult<()> {
        let Some(id) = product.id else {
            return Ok(());
        };

        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(())
    }
}
