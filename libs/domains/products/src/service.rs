use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
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

    /// Create a product; the name must not be taken yet.
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        if self.repository.get_by_name(&input.name).await?.is_some() {
            return Err(ProductError::DuplicateName(input.name));
        }

        let product = self.repository.create(Product::new(input)).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Replace all fields of a product. Keeping its own name is allowed;
    /// taking another product's name is a conflict.
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let mut product = self.get_product(id).await?;

        if let Some(existing) = self.repository.get_by_name(&input.name).await?
            && existing.id != id
        {
            return Err(ProductError::DuplicateName(input.name));
        }

        product.apply_update(input);
        let product = self.repository.update(product).await?;
        tracing::info!(product_id = %id, "Updated product");
        Ok(product)
    }

    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }
}
