//! In-memory arena store.
//!
//! A growable set of tables keyed by integer id with a monotonic id
//! allocator, implementing every repository contract. Intended as the
//! reference backend for tests and prototyping; not optimized for
//! performance. Locks are never held across an `await`.
//!
//! Writes made inside a transactional block land on a staging copy of the
//! tables (routed through a task-local marker), so readers on other tasks
//! only ever observe committed state. Commit swaps the copy in with a
//! single revision bump.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tokio::task_local;

use shelfwise_core::{
    Aisle, AisleId, AisleProduct, AisleProductId, AisleWithProducts, DomainError, DomainResult,
    Location, LocationId, LocationType, LocationWithAisles, LoyaltyCard, LoyaltyCardId, Note,
    NoteId, Product, ProductId,
};
use shelfwise_repository::{
    AisleProductRepository, AisleRepository, ChangeStream, LocationRepository,
    LoyaltyCardRepository, NoteRepository, ProductRepository,
};

task_local! {
    /// Marks the task currently executing a transactional block; the store
    /// routes that task's reads and writes to the staging tables.
    pub(crate) static TX_SCOPE: ();
}

fn in_transaction() -> bool {
    TX_SCOPE.try_with(|_| ()).is_ok()
}

#[derive(Debug, Clone, Default)]
struct Tables {
    locations: BTreeMap<i64, Location>,
    aisles: BTreeMap<i64, Aisle>,
    aisle_products: BTreeMap<i64, AisleProduct>,
    products: BTreeMap<i64, Product>,
    notes: BTreeMap<i64, Note>,
    cards: BTreeMap<i64, LoyaltyCard>,
    /// Card↔location association rows.
    card_locations: Vec<(LoyaltyCardId, LocationId)>,
    next_id: i64,
}

impl Tables {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn aisles_of(&self, location_id: LocationId) -> Vec<Aisle> {
        let mut aisles: Vec<Aisle> = self
            .aisles
            .values()
            .filter(|a| a.location_id == location_id)
            .cloned()
            .collect();
        aisles.sort_by_key(|a| a.rank);
        aisles
    }

    fn aisle_with_products(&self, aisle: Aisle) -> AisleWithProducts {
        let mut products: Vec<AisleProduct> = self
            .aisle_products
            .values()
            .filter(|ap| ap.aisle_id == aisle.id)
            .cloned()
            .collect();
        products.sort_by_key(|ap| ap.rank);
        AisleWithProducts { aisle, products }
    }

    fn drop_aisle_rows(&mut self, aisle_id: AisleId) {
        self.aisle_products.retain(|_, ap| ap.aisle_id != aisle_id);
        self.aisles.remove(&aisle_id.raw());
    }
}

/// Shared in-memory backend implementing all repository traits.
///
/// Mutations bump a revision counter; [`ChangeStream`] subscribers use it to
/// recompute derived views. The write gate serializes transactional blocks
/// (see [`InMemoryTransactionRunner`](crate::InMemoryTransactionRunner)).
#[derive(Debug)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    /// Private copy the active transactional block works against; `None`
    /// outside a transaction.
    staging: RwLock<Option<Tables>>,
    revision: watch::Sender<u64>,
    write_gate: Mutex<()>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            tables: RwLock::new(Tables::default()),
            staging: RwLock::new(None),
            revision,
            write_gate: Mutex::new(()),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_read<R>(&self, f: impl FnOnce(&Tables) -> DomainResult<R>) -> DomainResult<R> {
        if in_transaction() {
            let staging = self
                .staging
                .read()
                .map_err(|_| DomainError::repository("lock poisoned"))?;
            if let Some(tables) = staging.as_ref() {
                return f(tables);
            }
        }
        let tables = self
            .tables
            .read()
            .map_err(|_| DomainError::repository("lock poisoned"))?;
        f(&tables)
    }

    /// Apply a mutation. Staged when the calling task runs a transactional
    /// block; otherwise applied to the committed tables with a revision
    /// bump (skipped when `f` rejects the mutation).
    fn with_write<R>(&self, f: impl FnOnce(&mut Tables) -> DomainResult<R>) -> DomainResult<R> {
        if in_transaction() {
            let mut staging = self
                .staging
                .write()
                .map_err(|_| DomainError::repository("lock poisoned"))?;
            if let Some(tables) = staging.as_mut() {
                return f(tables);
            }
        }
        let out = {
            let mut tables = self
                .tables
                .write()
                .map_err(|_| DomainError::repository("lock poisoned"))?;
            f(&mut tables)
        };
        if out.is_ok() {
            self.touch();
        }
        out
    }

    fn touch(&self) {
        self.revision.send_modify(|r| *r += 1);
    }

    pub(crate) fn write_gate(&self) -> &Mutex<()> {
        &self.write_gate
    }

    /// Clone the committed tables into the staging area.
    pub(crate) fn begin_transaction(&self) -> DomainResult<()> {
        let snapshot = self
            .tables
            .read()
            .map_err(|_| DomainError::repository("lock poisoned"))?
            .clone();
        *self
            .staging
            .write()
            .map_err(|_| DomainError::repository("lock poisoned"))? = Some(snapshot);
        Ok(())
    }

    /// Publish the staged tables as the committed state, as one revision.
    pub(crate) fn commit_transaction(&self) -> DomainResult<()> {
        let staged = self
            .staging
            .write()
            .map_err(|_| DomainError::repository("lock poisoned"))?
            .take();
        if let Some(tables) = staged {
            {
                let mut committed = self
                    .tables
                    .write()
                    .map_err(|_| DomainError::repository("lock poisoned"))?;
                *committed = tables;
            }
            self.touch();
        }
        Ok(())
    }

    /// Throw the staged tables away. Nothing was published, so no revision
    /// is emitted.
    pub(crate) fn discard_transaction(&self) {
        if let Ok(mut staging) = self.staging.write() {
            *staging = None;
        }
    }

    /// Row counts per table, for idempotence assertions in tests.
    pub fn row_counts(&self) -> DomainResult<[usize; 6]> {
        self.with_read(|t| {
            Ok([
                t.locations.len(),
                t.aisles.len(),
                t.aisle_products.len(),
                t.products.len(),
                t.notes.len(),
                t.cards.len(),
            ])
        })
    }
}

impl ChangeStream for InMemoryStore {
    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn get(&self, id: LocationId) -> DomainResult<Option<Location>> {
        self.with_read(|t| Ok(t.locations.get(&id.raw()).cloned()))
    }

    async fn get_all(&self) -> DomainResult<Vec<Location>> {
        self.with_read(|t| Ok(t.locations.values().cloned().collect()))
    }

    async fn get_by_type(&self, location_type: LocationType) -> DomainResult<Vec<Location>> {
        self.with_read(|t| {
            Ok(t.locations
                .values()
                .filter(|l| l.location_type == location_type)
                .cloned()
                .collect())
        })
    }

    async fn get_by_name(&self, name: &str) -> DomainResult<Vec<Location>> {
        self.with_read(|t| {
            Ok(t.locations
                .values()
                .filter(|l| l.name == name)
                .cloned()
                .collect())
        })
    }

    async fn get_with_aisles(&self, id: LocationId) -> DomainResult<Option<LocationWithAisles>> {
        self.with_read(|t| {
            let Some(location) = t.locations.get(&id.raw()).cloned() else {
                return Ok(None);
            };
            let aisles = t
                .aisles_of(id)
                .into_iter()
                .map(|a| t.aisle_with_products(a))
                .collect();
            Ok(Some(LocationWithAisles { location, aisles }))
        })
    }

    async fn add(&self, mut location: Location) -> DomainResult<Location> {
        self.with_write(|t| {
            if !location.id.is_assigned() {
                location.id = LocationId::new(t.allocate());
            } else if t.locations.contains_key(&location.id.raw()) {
                return Err(DomainError::repository(format!(
                    "location id {} already in use",
                    location.id
                )));
            }
            t.locations.insert(location.id.raw(), location.clone());
            Ok(())
        })?;
        Ok(location)
    }

    async fn update(&self, location: Location) -> DomainResult<()> {
        self.with_write(|t| {
            if !t.locations.contains_key(&location.id.raw()) {
                return Err(DomainError::not_found(format!("location {}", location.id)));
            }
            t.locations.insert(location.id.raw(), location);
            Ok(())
        })
    }

    async fn remove(&self, id: LocationId) -> DomainResult<()> {
        self.with_write(|t| {
            // Foreign-key style cascade: aisles, their mappings, card links.
            let owned: Vec<AisleId> = t
                .aisles
                .values()
                .filter(|a| a.location_id == id)
                .map(|a| a.id)
                .collect();
            for aisle_id in owned {
                t.drop_aisle_rows(aisle_id);
            }
            t.card_locations.retain(|(_, l)| *l != id);
            t.locations.remove(&id.raw());
            Ok(())
        })
    }
}

#[async_trait]
impl AisleRepository for InMemoryStore {
    async fn get_for_location(&self, location_id: LocationId) -> DomainResult<Vec<Aisle>> {
        self.with_read(|t| Ok(t.aisles_of(location_id)))
    }

    async fn get_default_for(&self, location_id: LocationId) -> DomainResult<Option<Aisle>> {
        self.with_read(|t| {
            Ok(t.aisles
                .values()
                .find(|a| a.location_id == location_id && a.is_default)
                .cloned())
        })
    }

    async fn get_with_products(&self, id: AisleId) -> DomainResult<Option<AisleWithProducts>> {
        self.with_read(|t| {
            Ok(t.aisles
                .get(&id.raw())
                .cloned()
                .map(|a| t.aisle_with_products(a)))
        })
    }

    async fn add(&self, mut aisle: Aisle) -> DomainResult<Aisle> {
        self.with_write(|t| {
            if !aisle.id.is_assigned() {
                aisle.id = AisleId::new(t.allocate());
            } else if t.aisles.contains_key(&aisle.id.raw()) {
                return Err(DomainError::repository(format!(
                    "aisle id {} already in use",
                    aisle.id
                )));
            }
            t.aisles.insert(aisle.id.raw(), aisle.clone());
            Ok(())
        })?;
        Ok(aisle)
    }

    async fn update(&self, aisle: Aisle) -> DomainResult<()> {
        self.with_write(|t| {
            if !t.aisles.contains_key(&aisle.id.raw()) {
                return Err(DomainError::not_found(format!("aisle {}", aisle.id)));
            }
            t.aisles.insert(aisle.id.raw(), aisle);
            Ok(())
        })
    }

    async fn update_rank(&self, aisle: &Aisle) -> DomainResult<()> {
        self.with_write(|t| {
            let Some(row) = t.aisles.get_mut(&aisle.id.raw()) else {
                return Err(DomainError::not_found(format!("aisle {}", aisle.id)));
            };
            row.rank = aisle.rank;
            Ok(())
        })
    }

    async fn remove(&self, id: AisleId) -> DomainResult<()> {
        self.with_write(|t| {
            t.drop_aisle_rows(id);
            Ok(())
        })
    }
}

#[async_trait]
impl AisleProductRepository for InMemoryStore {
    async fn get_all(&self) -> DomainResult<Vec<AisleProduct>> {
        self.with_read(|t| Ok(t.aisle_products.values().cloned().collect()))
    }

    async fn get_product_aisles(&self, product_id: ProductId) -> DomainResult<Vec<AisleProduct>> {
        self.with_read(|t| {
            Ok(t.aisle_products
                .values()
                .filter(|ap| ap.product_id == product_id)
                .cloned()
                .collect())
        })
    }

    async fn add(&self, mut item: AisleProduct) -> DomainResult<AisleProduct> {
        self.with_write(|t| {
            if !item.id.is_assigned() {
                item.id = AisleProductId::new(t.allocate());
            } else if t.aisle_products.contains_key(&item.id.raw()) {
                return Err(DomainError::repository(format!(
                    "aisle product id {} already in use",
                    item.id
                )));
            }
            t.aisle_products.insert(item.id.raw(), item.clone());
            Ok(())
        })?;
        Ok(item)
    }

    async fn update(&self, item: AisleProduct) -> DomainResult<()> {
        self.with_write(|t| {
            if !t.aisle_products.contains_key(&item.id.raw()) {
                return Err(DomainError::not_found(format!("aisle product {}", item.id)));
            }
            t.aisle_products.insert(item.id.raw(), item);
            Ok(())
        })
    }

    async fn update_rank(&self, item: &AisleProduct) -> DomainResult<()> {
        self.with_write(|t| {
            let Some(row) = t.aisle_products.get_mut(&item.id.raw()) else {
                return Err(DomainError::not_found(format!("aisle product {}", item.id)));
            };
            row.rank = item.rank;
            Ok(())
        })
    }

    async fn remove(&self, id: AisleProductId) -> DomainResult<()> {
        self.with_write(|t| {
            t.aisle_products.remove(&id.raw());
            Ok(())
        })
    }

    async fn remove_products_from_aisle(&self, aisle_id: AisleId) -> DomainResult<()> {
        self.with_write(|t| {
            t.aisle_products.retain(|_, ap| ap.aisle_id != aisle_id);
            Ok(())
        })
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn get(&self, id: ProductId) -> DomainResult<Option<Product>> {
        self.with_read(|t| Ok(t.products.get(&id.raw()).cloned()))
    }

    async fn get_by_name(&self, name: &str) -> DomainResult<Option<Product>> {
        self.with_read(|t| Ok(t.products.values().find(|p| p.name == name).cloned()))
    }

    async fn get_all(&self) -> DomainResult<Vec<Product>> {
        self.with_read(|t| Ok(t.products.values().cloned().collect()))
    }

    async fn add(&self, mut product: Product) -> DomainResult<Product> {
        self.with_write(|t| {
            if !product.id.is_assigned() {
                product.id = ProductId::new(t.allocate());
            } else if t.products.contains_key(&product.id.raw()) {
                return Err(DomainError::repository(format!(
                    "product id {} already in use",
                    product.id
                )));
            }
            t.products.insert(product.id.raw(), product.clone());
            Ok(())
        })?;
        Ok(product)
    }

    async fn update(&self, product: Product) -> DomainResult<()> {
        self.with_write(|t| {
            if !t.products.contains_key(&product.id.raw()) {
                return Err(DomainError::not_found(format!("product {}", product.id)));
            }
            t.products.insert(product.id.raw(), product);
            Ok(())
        })
    }

    async fn remove(&self, id: ProductId) -> DomainResult<()> {
        self.with_write(|t| {
            t.aisle_products.retain(|_, ap| ap.product_id != id);
            t.products.remove(&id.raw());
            Ok(())
        })
    }
}

#[async_trait]
impl NoteRepository for InMemoryStore {
    async fn get(&self, id: NoteId) -> DomainResult<Option<Note>> {
        self.with_read(|t| Ok(t.notes.get(&id.raw()).cloned()))
    }

    async fn add(&self, mut note: Note) -> DomainResult<Note> {
        self.with_write(|t| {
            if !note.id.is_assigned() {
                note.id = NoteId::new(t.allocate());
            } else if t.notes.contains_key(&note.id.raw()) {
                return Err(DomainError::repository(format!(
                    "note id {} already in use",
                    note.id
                )));
            }
            t.notes.insert(note.id.raw(), note.clone());
            Ok(())
        })?;
        Ok(note)
    }

    async fn update(&self, note: Note) -> DomainResult<()> {
        self.with_write(|t| {
            if !t.notes.contains_key(&note.id.raw()) {
                return Err(DomainError::not_found(format!("note {}", note.id)));
            }
            t.notes.insert(note.id.raw(), note);
            Ok(())
        })
    }

    async fn remove(&self, id: NoteId) -> DomainResult<()> {
        self.with_write(|t| {
            t.notes.remove(&id.raw());
            Ok(())
        })
    }
}

#[async_trait]
impl LoyaltyCardRepository for InMemoryStore {
    async fn get(&self, id: LoyaltyCardId) -> DomainResult<Option<LoyaltyCard>> {
        self.with_read(|t| Ok(t.cards.get(&id.raw()).cloned()))
    }

    async fn get_for_location(&self, location_id: LocationId) -> DomainResult<Vec<LoyaltyCard>> {
        self.with_read(|t| {
            Ok(t.card_locations
                .iter()
                .filter(|(_, l)| *l == location_id)
                .filter_map(|(c, _)| t.cards.get(&c.raw()).cloned())
                .collect())
        })
    }

    async fn add(&self, mut card: LoyaltyCard) -> DomainResult<LoyaltyCard> {
        self.with_write(|t| {
            if !card.id.is_assigned() {
                card.id = LoyaltyCardId::new(t.allocate());
            } else if t.cards.contains_key(&card.id.raw()) {
                return Err(DomainError::repository(format!(
                    "loyalty card id {} already in use",
                    card.id
                )));
            }
            t.cards.insert(card.id.raw(), card.clone());
            Ok(())
        })?;
        Ok(card)
    }

    async fn remove(&self, id: LoyaltyCardId) -> DomainResult<()> {
        self.with_write(|t| {
            t.card_locations.retain(|(c, _)| *c != id);
            t.cards.remove(&id.raw());
            Ok(())
        })
    }

    async fn add_to_location(
        &self,
        card_id: LoyaltyCardId,
        location_id: LocationId,
    ) -> DomainResult<()> {
        self.with_write(|t| {
            // A card links to at most one location.
            t.card_locations.retain(|(c, _)| *c != card_id);
            t.card_locations.push((card_id, location_id));
            Ok(())
        })
    }

    async fn remove_from_location(
        &self,
        card_id: LoyaltyCardId,
        location_id: LocationId,
    ) -> DomainResult<()> {
        self.with_write(|t| {
            t.card_locations
                .retain(|(c, l)| !(*c == card_id && *l == location_id));
            Ok(())
        })
    }
}
