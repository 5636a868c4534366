use async_trait::async_trait;

use shelfwise_core::{AisleId, AisleProduct, AisleProductId, DomainResult, ProductId};

/// Data access for [`AisleProduct`] join rows.
#[async_trait]
pub trait AisleProductRepository: Send + Sync {
    async fn get_all(&self) -> DomainResult<Vec<AisleProduct>>;

    /// Every aisle mapping of one product (at most one per location).
    async fn get_product_aisles(&self, product_id: ProductId) -> DomainResult<Vec<AisleProduct>>;

    async fn add(&self, item: AisleProduct) -> DomainResult<AisleProduct>;

    async fn update(&self, item: AisleProduct) -> DomainResult<()>;

    /// Persist only the rank of a mapping (the rank engine's write path).
    async fn update_rank(&self, item: &AisleProduct) -> DomainResult<()>;

    async fn remove(&self, id: AisleProductId) -> DomainResult<()>;

    /// Drop every mapping of one aisle. Used when the default aisle is
    /// stripped during location removal (no reassignment target remains).
    async fn remove_products_from_aisle(&self, aisle_id: AisleId) -> DomainResult<()>;
}
