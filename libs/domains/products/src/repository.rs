use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Repository trait for Product persistence
///
/// Implementations enforce name uniqueness themselves so that two concurrent
/// creates cannot both succeed after passing the service-level check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Get a product by its exact name
    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// All products, oldest first
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Save every field of an existing product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID; `false` when nothing was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if products.values().any(|p| p.name == product.name) {
            return Err(ProductError::DuplicateName(product.name));
        }

        products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.values().find(|p| p.name == name).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&product.id) {
            return Err(ProductError::NotFound(product.id));
        }

        let name_taken = products
            .values()
            .any(|p| p.id != product.id && p.name == product.name);

        if name_taken {
            return Err(ProductError::DuplicateName(product.name));
        }

        products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        Ok(products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;
    use rust_decimal::Decimal;

    fn product(name: &str) -> Product {
        Product::new(CreateProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::new(999, 2),
            quantity: 5,
        })
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let repo = InMemoryProductRepository::new();
        let first = repo.create(product("Widget")).await.unwrap();

        let result = repo.create(product("Widget")).await;
        assert!(matches!(result, Err(ProductError::DuplicateName(_))));

        let stored = repo.get_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(stored, first);
    }

    #[tokio::test]
    async fn test_update_allows_keeping_own_name() {
        let repo = InMemoryProductRepository::new();
        let mut widget = repo.create(product("Widget")).await.unwrap();

        widget.quantity = 42;
        let updated = repo.update(widget).await.unwrap();
        assert_eq!(updated.quantity, 42);
    }

    #[tokio::test]
    async fn test_update_rejects_name_of_other_product() {
        let repo = InMemoryProductRepository::new();
        repo.create(product("Widget")).await.unwrap();
        let mut gadget = repo.create(product("Gadget")).await.unwrap();

        gadget.name = "Widget".to_string();
        let result = repo.update(gadget).await;
        assert!(matches!(result, Err(ProductError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let result = repo.update(product("Ghost")).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryProductRepository::new();
        let widget = repo.create(product("Widget")).await.unwrap();

        assert!(repo.delete(widget.id).await.unwrap());
        assert!(!repo.delete(widget.id).await.unwrap());
        assert!(repo.get_by_name("Widget").await.unwrap().is_none());
    }
}
