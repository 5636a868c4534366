use async_trait::async_trait;

use shelfwise_core::{DomainResult, Product, ProductId};

/// Data access for [`Product`] rows.
///
/// `remove` cascades to the product's aisle mappings; removal use cases do
/// not reassign anything (unlike aisle removal).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get(&self, id: ProductId) -> DomainResult<Option<Product>>;

    /// Exact-name lookup. Product names are globally unique, so at most one
    /// row matches.
    async fn get_by_name(&self, name: &str) -> DomainResult<Option<Product>>;

    async fn get_all(&self) -> DomainResult<Vec<Product>>;

    async fn add(&self, product: Product) -> DomainResult<Product>;

    async fn update(&self, product: Product) -> DomainResult<()>;

    async fn remove(&self, id: ProductId) -> DomainResult<()>;
}
