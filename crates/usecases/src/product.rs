//! Product lifecycle and placement use cases.

use std::sync::Arc;

use tracing::debug;

use shelfwise_core::{
    rank, AisleId, AisleProduct, AisleProductId, DomainError, DomainResult, Product, ProductId,
};
use shelfwise_repository::{
    AisleProductRepository, AisleRepository, LocationRepository, NoteRepository,
    ProductRepository, TransactionRunner,
};

/// Create a product and map it into every default aisle at rank 0, so it
/// surfaces, unassigned, in every location's list.
#[derive(Clone)]
pub struct AddProduct {
    products: Arc<dyn ProductRepository>,
    locations: Arc<dyn LocationRepository>,
    aisles: Arc<dyn AisleRepository>,
    aisle_products: Arc<dyn AisleProductRepository>,
}

impl AddProduct {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        locations: Arc<dyn LocationRepository>,
        aisles: Arc<dyn AisleRepository>,
        aisle_products: Arc<dyn AisleProductRepository>,
    ) -> Self {
        Self {
            products,
            locations,
            aisles,
            aisle_products,
        }
    }

    pub async fn execute(&self, product: Product) -> DomainResult<Product> {
        // Double-submission guard: a caller-supplied id must be fresh.
        if product.id.is_assigned() && self.products.get(product.id).await?.is_some() {
            return Err(DomainError::DuplicateProduct { id: product.id });
        }
        if self.products.get_by_name(&product.name).await?.is_some() {
            return Err(DomainError::duplicate_product_name(&product.name));
        }

        let stored = self.products.add(product).await?;

        for location in self.locations.get_all().await? {
            let Some(default) = self.aisles.get_default_for(location.id).await? else {
                continue;
            };
            let landing = self
                .aisles
                .get_with_products(default.id)
                .await?
                .ok_or_else(|| DomainError::not_found(format!("default aisle {}", default.id)))?;
            // Insert at rank 0; existing rows shift up so ranks stay distinct.
            for changed in rank::reorder(&landing.products, AisleProductId::UNASSIGNED, 0) {
                self.aisle_products.update_rank(&changed).await?;
            }
            self.aisle_products
                .add(AisleProduct::new(default.id, stored.id, 0))
                .await?;
        }

        debug!(product = %stored.id, "product added and mapped into default aisles");
        Ok(stored)
    }
}

/// Rename or reconfigure a product, re-validating global name uniqueness.
/// Renaming a product to its own name is allowed.
pub struct UpdateProduct {
    products: Arc<dyn ProductRepository>,
}

impl UpdateProduct {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn execute(&self, product: Product) -> DomainResult<()> {
        if let Some(other) = self.products.get_by_name(&product.name).await? {
            if other.id != product.id {
                return Err(DomainError::duplicate_product_name(&product.name));
            }
        }
        self.products.update(product).await
    }
}

/// Flip a product's stock status. Unknown ids are a benign no-op (`None`),
/// not an error.
pub struct UpdateProductStatus {
    products: Arc<dyn ProductRepository>,
}

impl UpdateProductStatus {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn execute(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let Some(mut product) = self.products.get(id).await? else {
            return Ok(None);
        };
        product.in_stock = !product.in_stock;
        self.products.update(product.clone()).await?;
        Ok(Some(product))
    }
}

/// Remove a product. Its aisle mappings cascade at the storage layer; its
/// note (if any) is deleted so no orphan remains.
pub struct RemoveProduct {
    products: Arc<dyn ProductRepository>,
    notes: Arc<dyn NoteRepository>,
}

impl RemoveProduct {
    pub fn new(products: Arc<dyn ProductRepository>, notes: Arc<dyn NoteRepository>) -> Self {
        Self { products, notes }
    }

    pub async fn execute(&self, id: ProductId) -> DomainResult<()> {
        let Some(product) = self.products.get(id).await? else {
            return Ok(());
        };
        if let Some(note_id) = product.note_id {
            self.notes.remove(note_id).await?;
        }
        debug!(product = %id, "product removed");
        self.products.remove(id).await
    }
}

/// Move one product between two aisles of the same location.
///
/// The product is appended to the end of the destination aisle
/// (`max rank + 1`). Cross-location moves fail; moving an aisle onto itself
/// short-circuits without any lookup beyond the equality check.
#[derive(Clone)]
pub struct ChangeProductAisle {
    aisles: Arc<dyn AisleRepository>,
    aisle_products: Arc<dyn AisleProductRepository>,
}

impl ChangeProductAisle {
    pub fn new(
        aisles: Arc<dyn AisleRepository>,
        aisle_products: Arc<dyn AisleProductRepository>,
    ) -> Self {
        Self {
            aisles,
            aisle_products,
        }
    }

    pub async fn execute(
        &self,
        product_id: ProductId,
        from: AisleId,
        to: AisleId,
    ) -> DomainResult<()> {
        if from == to {
            return Ok(());
        }

        let source = self
            .aisles
            .get_with_products(from)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("aisle {from}")))?;
        let destination = self
            .aisles
            .get_with_products(to)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("aisle {to}")))?;

        if source.aisle.location_id != destination.aisle.location_id {
            return Err(DomainError::AisleMove { from, to });
        }

        let Some(mut item) = source
            .products
            .into_iter()
            .find(|p| p.product_id == product_id)
        else {
            return Err(DomainError::not_found(format!(
                "product {product_id} in aisle {from}"
            )));
        };

        item.aisle_id = to;
        item.rank = destination.next_rank();
        self.aisle_products.update(item).await
    }
}

/// Move a product to a new rank within its aisle.
pub struct MoveAisleProduct {
    aisles: Arc<dyn AisleRepository>,
    aisle_products: Arc<dyn AisleProductRepository>,
    tx: Arc<dyn TransactionRunner>,
}

impl MoveAisleProduct {
    pub fn new(
        aisles: Arc<dyn AisleRepository>,
        aisle_products: Arc<dyn AisleProductRepository>,
        tx: Arc<dyn TransactionRunner>,
    ) -> Self {
        Self {
            aisles,
            aisle_products,
            tx,
        }
    }

    pub async fn execute(
        &self,
        aisle_id: AisleId,
        item_id: AisleProductId,
        new_rank: i64,
    ) -> DomainResult<()> {
        self.tx
            .run(Box::pin(async move {
                let Some(with_products) = self.aisles.get_with_products(aisle_id).await? else {
                    return Err(DomainError::not_found(format!("aisle {aisle_id}")));
                };
                for changed in rank::reorder(&with_products.products, item_id, new_rank) {
                    self.aisle_products.update_rank(&changed).await?;
                }
                Ok(())
            }))
            .await
    }
}
