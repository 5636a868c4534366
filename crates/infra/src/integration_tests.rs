//! Integration tests for the full stack: use cases over the in-memory
//! store, transactional moves, and the live list view.
//!
//! Verifies:
//! - Bootstrap creates the standing home location with its default aisle
//! - Name uniqueness and rank discipline hold across whole flows
//! - Cascades (aisle removal, location removal) leave no orphans
//! - Sample data seeding is guarded and all-or-nothing
//! - `observe` re-emits a recomposed view after every mutation
//! - Transactions roll back on error and on cancellation, and their
//!   staged writes stay invisible to other tasks until commit

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use shelfwise_core::{
        Aisle, CardProvider, DomainError, Location, LocationId, LocationType, LoyaltyCard,
        NoteParent, Product, ProductFilter, ProductId,
    };
    use shelfwise_listing::{Grouping, ListFilter, ListItem};
    use shelfwise_repository::{
        AisleProductRepository, AisleRepository, ChangeStream, LocationRepository,
        LoyaltyCardRepository, NoteRepository, ProductRepository, TransactionRunner,
    };

    use crate::{bootstrap, App, InMemoryTransactionRunner};

    async fn setup() -> App {
        bootstrap().await.expect("bootstrap")
    }

    // Several repository traits share method names (`get`, `get_all`,
    // `get_by_name`, `get_for_location`) and the store implements them all.
    // Narrowing to one trait object per call site keeps method resolution
    // unambiguous.
    fn locations(app: &App) -> Arc<dyn LocationRepository> {
        app.store.clone()
    }

    fn aisles(app: &App) -> Arc<dyn AisleRepository> {
        app.store.clone()
    }

    fn aisle_products(app: &App) -> Arc<dyn AisleProductRepository> {
        app.store.clone()
    }

    fn products(app: &App) -> Arc<dyn ProductRepository> {
        app.store.clone()
    }

    fn notes(app: &App) -> Arc<dyn NoteRepository> {
        app.store.clone()
    }

    fn cards(app: &App) -> Arc<dyn LoyaltyCardRepository> {
        app.store.clone()
    }

    async fn home(app: &App) -> Location {
        locations(app)
            .get_by_type(LocationType::Home)
            .await
            .unwrap()
            .into_iter()
            .next()
            .expect("home location")
    }

    async fn default_aisle_of(app: &App, location: &Location) -> Aisle {
        aisles(app)
            .get_default_for(location.id)
            .await
            .unwrap()
            .expect("default aisle")
    }

    fn entry_names(items: &[ListItem]) -> Vec<String> {
        items
            .iter()
            .filter_map(|i| match i {
                ListItem::Entry(p) => Some(p.name.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn bootstrap_creates_home_with_default_aisle() {
        let app = setup().await;

        let homes = locations(&app).get_by_type(LocationType::Home).await.unwrap();
        assert_eq!(homes.len(), 1);
        assert_eq!(homes[0].name, "Home");

        let default = default_aisle_of(&app, &homes[0]).await;
        assert!(default.is_default);
        assert!(default.expanded);
    }

    #[tokio::test]
    async fn new_products_land_in_every_default_aisle_at_the_front() {
        let app = setup().await;
        let shop = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();

        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        let bread = app
            .add_product
            .execute(Product::new("Bread"))
            .await
            .unwrap();

        for location in [home(&app).await, shop] {
            let default = default_aisle_of(&app, &location).await;
            let with_products = aisles(&app)
                .get_with_products(default.id)
                .await
                .unwrap()
                .unwrap();
            // Latest addition sits first; the earlier row was shifted up.
            let ordered: Vec<ProductId> =
                with_products.products.iter().map(|p| p.product_id).collect();
            assert_eq!(ordered, vec![bread.id, milk.id]);

            let ranks: HashSet<i64> = with_products.products.iter().map(|p| p.rank).collect();
            assert_eq!(ranks.len(), with_products.products.len());
        }
    }

    #[tokio::test]
    async fn product_names_are_globally_unique() {
        let app = setup().await;
        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        let bread = app
            .add_product
            .execute(Product::new("Bread"))
            .await
            .unwrap();

        let duplicate = app.add_product.execute(Product::new("Milk")).await;
        assert!(matches!(
            duplicate,
            Err(DomainError::DuplicateProductName { .. })
        ));

        let mut renamed = bread;
        renamed.name = "Milk".to_string();
        assert!(matches!(
            app.update_product.execute(renamed).await,
            Err(DomainError::DuplicateProductName { .. })
        ));

        // Renaming to the currently held name is not a clash.
        app.update_product.execute(milk).await.unwrap();
    }

    #[tokio::test]
    async fn location_names_are_unique_within_a_type() {
        let app = setup().await;
        app.add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();
        let lidl = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Lidl"))
            .await
            .unwrap();

        assert!(matches!(
            app.add_location
                .execute(Location::new(LocationType::Shop, "Spar"))
                .await,
            Err(DomainError::DuplicateLocationName { .. })
        ));

        // A shop may share the home's name; only same-type names clash.
        app.add_location
            .execute(Location::new(LocationType::Shop, "Home"))
            .await
            .unwrap();

        let mut renamed = lidl;
        renamed.name = "Spar".to_string();
        assert!(matches!(
            app.update_location.execute(renamed).await,
            Err(DomainError::DuplicateLocationName { .. })
        ));
    }

    #[tokio::test]
    async fn removing_an_aisle_drains_its_products_into_the_default() {
        let app = setup().await;
        let shop = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();
        let dairy = app
            .add_aisle
            .execute(Aisle::new(shop.id, "Dairy", 0))
            .await
            .unwrap();

        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        let bread = app
            .add_product
            .execute(Product::new("Bread"))
            .await
            .unwrap();

        let default = default_aisle_of(&app, &shop).await;
        app.change_product_aisle
            .execute(milk.id, default.id, dairy.id)
            .await
            .unwrap();
        app.change_product_aisle
            .execute(bread.id, default.id, dairy.id)
            .await
            .unwrap();

        app.remove_aisle.execute(dairy.id).await.unwrap();

        assert!(aisles(&app)
            .get_with_products(dairy.id)
            .await
            .unwrap()
            .is_none());

        let landing = aisles(&app)
            .get_with_products(default.id)
            .await
            .unwrap()
            .unwrap();
        let ordered: Vec<ProductId> = landing.products.iter().map(|p| p.product_id).collect();
        // Both drained rows arrive in their old order, appended to the end.
        assert_eq!(ordered, vec![milk.id, bread.id]);
        let ranks: HashSet<i64> = landing.products.iter().map(|p| p.rank).collect();
        assert_eq!(ranks.len(), landing.products.len());
    }

    #[tokio::test]
    async fn the_default_aisle_cannot_be_removed() {
        let app = setup().await;
        let home = home(&app).await;
        let default = default_aisle_of(&app, &home).await;

        let before = app.store.row_counts().unwrap();
        let result = app.remove_aisle.execute(default.id).await;
        assert!(matches!(
            result,
            Err(DomainError::DeleteDefaultAisle { location_id }) if location_id == home.id
        ));

        // Nothing was torn down.
        assert_eq!(app.store.row_counts().unwrap(), before);
        assert!(aisles(&app)
            .get_with_products(default.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn every_location_keeps_exactly_one_default_aisle() {
        let app = setup().await;

        async fn default_count(app: &App, location_id: LocationId) -> usize {
            aisles(app)
                .get_for_location(location_id)
                .await
                .unwrap()
                .into_iter()
                .filter(|a| a.is_default)
                .count()
        }

        let home = home(&app).await;
        assert_eq!(default_count(&app, home.id).await, 1);

        let shop = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();
        assert_eq!(default_count(&app, shop.id).await, 1);

        let dairy = app
            .add_aisle
            .execute(Aisle::new(shop.id, "Dairy", 0))
            .await
            .unwrap();
        assert_eq!(default_count(&app, shop.id).await, 1);

        app.remove_aisle.execute(dairy.id).await.unwrap();
        assert_eq!(default_count(&app, shop.id).await, 1);

        app.remove_location.execute(shop.id).await.unwrap();
        assert!(aisles(&app)
            .get_for_location(shop.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(default_count(&app, home.id).await, 1);
    }

    #[tokio::test]
    async fn removing_a_location_tears_down_everything_under_it() {
        let app = setup().await;
        let shop = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();
        let dairy = app
            .add_aisle
            .execute(Aisle::new(shop.id, "Dairy", 0))
            .await
            .unwrap();
        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        let default = default_aisle_of(&app, &shop).await;
        app.change_product_aisle
            .execute(milk.id, default.id, dairy.id)
            .await
            .unwrap();
        let note = app
            .save_note
            .execute(NoteParent::Location(shop.id), "open late on fridays")
            .await
            .unwrap();

        app.remove_location.execute(shop.id).await.unwrap();

        assert!(locations(&app).get(shop.id).await.unwrap().is_none());
        assert!(aisles(&app)
            .get_for_location(shop.id)
            .await
            .unwrap()
            .is_empty());
        assert!(notes(&app).get(note.id).await.unwrap().is_none());

        // The product itself is global and survives; only this location's
        // mapping rows are gone.
        assert!(products(&app).get(milk.id).await.unwrap().is_some());
        let home = home(&app).await;
        let home_default = default_aisle_of(&app, &home).await;
        let remaining = aisle_products(&app).get_product_aisles(milk.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].aisle_id, home_default.id);

        // Removing again is a benign no-op.
        app.remove_location.execute(shop.id).await.unwrap();
    }

    #[tokio::test]
    async fn products_cannot_move_between_locations() {
        let app = setup().await;
        let shop = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();
        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();

        let home = home(&app).await;
        let home_default = default_aisle_of(&app, &home).await;
        let shop_default = default_aisle_of(&app, &shop).await;

        let result = app
            .change_product_aisle
            .execute(milk.id, home_default.id, shop_default.id)
            .await;
        assert!(matches!(result, Err(DomainError::AisleMove { .. })));

        // The mapping stayed where it was.
        let mappings = aisle_products(&app).get_product_aisles(milk.id).await.unwrap();
        assert!(mappings.iter().any(|m| m.aisle_id == home_default.id));
    }

    #[tokio::test]
    async fn moving_a_product_within_a_location_appends_to_the_target() {
        let app = setup().await;
        let home = home(&app).await;
        let default = default_aisle_of(&app, &home).await;
        let pantry = app
            .add_aisle
            .execute(Aisle::new(home.id, "Pantry", 0))
            .await
            .unwrap();

        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        let bread = app
            .add_product
            .execute(Product::new("Bread"))
            .await
            .unwrap();

        app.change_product_aisle
            .execute(bread.id, default.id, pantry.id)
            .await
            .unwrap();
        app.change_product_aisle
            .execute(milk.id, default.id, pantry.id)
            .await
            .unwrap();

        let target = aisles(&app)
            .get_with_products(pantry.id)
            .await
            .unwrap()
            .unwrap();
        let milk_row = target
            .products
            .iter()
            .find(|p| p.product_id == milk.id)
            .unwrap();
        let bread_row = target
            .products
            .iter()
            .find(|p| p.product_id == bread.id)
            .unwrap();
        // Appended behind the occupant: one past the highest existing rank.
        assert_eq!(milk_row.rank, bread_row.rank + 1);
    }

    #[tokio::test]
    async fn moving_a_product_reorders_its_aisle() {
        let app = setup().await;
        let home = home(&app).await;
        let default = default_aisle_of(&app, &home).await;

        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        app.add_product.execute(Product::new("Bread")).await.unwrap();
        app.add_product.execute(Product::new("Eggs")).await.unwrap();

        // Additions stack at the front, so Milk currently sits last.
        let before = aisles(&app)
            .get_with_products(default.id)
            .await
            .unwrap()
            .unwrap();
        let milk_row = before
            .products
            .iter()
            .find(|p| p.product_id == milk.id)
            .unwrap()
            .clone();
        assert_eq!(milk_row.rank, 2);

        app.move_aisle_product
            .execute(default.id, milk_row.id, 0)
            .await
            .unwrap();

        let after = aisles(&app)
            .get_with_products(default.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.products[0].product_id, milk.id);
        let ranks: HashSet<i64> = after.products.iter().map(|p| p.rank).collect();
        assert_eq!(ranks.len(), after.products.len());
    }

    #[tokio::test]
    async fn moving_an_aisle_shifts_its_siblings() {
        let app = setup().await;
        let shop = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();
        let dairy = app
            .add_aisle
            .execute(Aisle::new(shop.id, "Dairy", 0))
            .await
            .unwrap();
        let bakery = app
            .add_aisle
            .execute(Aisle::new(shop.id, "Bakery", 1))
            .await
            .unwrap();

        app.move_aisle.execute(bakery.id, 0).await.unwrap();

        let default = default_aisle_of(&app, &shop).await;
        let ordered: Vec<_> = aisles(&app)
            .get_for_location(shop.id)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ordered, vec![bakery.id, dairy.id, default.id]);
    }

    #[tokio::test]
    async fn sorting_by_name_reranks_but_spares_the_default_aisle() {
        let app = setup().await;
        let zebra = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Zebra Market"))
            .await
            .unwrap();
        let acme = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Acme Foods"))
            .await
            .unwrap();
        app.add_aisle
            .execute(Aisle::new(zebra.id, "Pantry", 0))
            .await
            .unwrap();
        app.add_aisle
            .execute(Aisle::new(zebra.id, "Bakery", 1))
            .await
            .unwrap();

        app.sort_locations_by_name
            .execute(LocationType::Shop, true)
            .await
            .unwrap();

        let shops = locations(&app).get_by_type(LocationType::Shop).await.unwrap();
        let rank_of = |id| shops.iter().find(|l| l.id == id).unwrap().rank;
        assert!(rank_of(acme.id) < rank_of(zebra.id));

        let names: Vec<String> = aisles(&app)
            .get_for_location(zebra.id)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        // Alphabetical among user aisles; the default keeps its high rank
        // and stays last.
        assert_eq!(names, vec!["Bakery", "Pantry", "Default"]);
    }

    #[tokio::test]
    async fn sample_data_populates_an_empty_system() {
        let app = setup().await;
        app.generate_sample_data.execute().await.unwrap();

        assert_eq!(products(&app).get_all().await.unwrap().len(), 18);

        let shops = locations(&app).get_by_type(LocationType::Shop).await.unwrap();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].name, "Corner Market");

        let home = home(&app).await;
        // Six sample aisles plus the default.
        assert_eq!(
            aisles(&app).get_for_location(home.id).await.unwrap().len(),
            7
        );

        // Every seeded product left the landing zone for its named aisle.
        let milk = products(&app).get_by_name("Milk").await.unwrap().unwrap();
        let mappings = aisle_products(&app).get_product_aisles(milk.id).await.unwrap();
        assert_eq!(mappings.len(), 2);
        for mapping in mappings {
            let named = aisles(&app)
                .get_with_products(mapping.aisle_id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(named.aisle.name, "Dairy");
        }

        // A second run hits the guard.
        assert!(matches!(
            app.generate_sample_data.execute().await,
            Err(DomainError::SampleDataCreation)
        ));
    }

    #[tokio::test]
    async fn sample_data_refuses_a_dirty_system_without_writing() {
        let app = setup().await;
        app.add_product.execute(Product::new("Test")).await.unwrap();

        let before = app.store.row_counts().unwrap();
        let err = app.generate_sample_data.execute().await.unwrap_err();
        assert_eq!(err.code().as_str(), "sample-data-creation");
        assert!(matches!(err, DomainError::SampleDataCreation));
        assert_eq!(app.store.row_counts().unwrap(), before);
    }

    #[tokio::test]
    async fn observe_reemits_after_each_mutation() {
        let app = setup().await;
        let home = home(&app).await;

        let mut rx = app
            .shopping_list
            .observe(
                Grouping::ByAisle {
                    location_id: home.id,
                },
                ListFilter::default(),
            )
            .await
            .unwrap();

        // An empty home composes to the sentinel row.
        assert_eq!(*rx.borrow(), vec![ListItem::Empty]);

        app.add_product.execute(Product::new("Milk")).await.unwrap();

        // The addition touches several rows; wait until the view settles on
        // the final recomposition.
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                rx.changed().await.expect("view task alive");
                let names = entry_names(&rx.borrow_and_update());
                if names == ["Milk"] {
                    break;
                }
            }
        })
        .await
        .expect("recomposed view arrives");
    }

    #[tokio::test]
    async fn list_view_applies_status_and_name_filters() {
        let app = setup().await;
        let home = home(&app).await;
        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        app.add_product.execute(Product::new("Bread")).await.unwrap();
        // Milk is now in stock, Bread still needed.
        app.update_product_status.execute(milk.id).await.unwrap();

        let grouping = Grouping::ByAisle {
            location_id: home.id,
        };

        let needed = app
            .shopping_list
            .compose_once(
                &grouping,
                &ListFilter {
                    product_filter: ProductFilter::Needed,
                    ..ListFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(entry_names(&needed), vec!["Bread"]);

        let queried = app
            .shopping_list
            .compose_once(
                &grouping,
                &ListFilter {
                    name_query: "mi".to_string(),
                    ..ListFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(entry_names(&queried), vec!["Milk"]);
    }

    #[tokio::test]
    async fn transactions_roll_back_on_error() {
        let app = setup().await;
        let runner = InMemoryTransactionRunner::new(app.store.clone());

        let writer = locations(&app);
        let result = runner
            .run(Box::pin(async move {
                writer
                    .add(Location::new(LocationType::Shop, "Doomed"))
                    .await?;
                Err(DomainError::repository("induced failure"))
            }))
            .await;

        assert!(result.is_err());
        assert!(locations(&app)
            .get_by_name("Doomed")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn transactions_roll_back_on_cancellation() {
        let app = setup().await;
        let runner = InMemoryTransactionRunner::new(app.store.clone());

        {
            let writer = locations(&app);
            let fut = runner.run(Box::pin(async move {
                writer
                    .add(Location::new(LocationType::Shop, "Doomed"))
                    .await?;
                std::future::pending::<()>().await;
                Ok(())
            }));
            tokio::pin!(fut);
            tokio::select! {
                _ = &mut fut => panic!("the block never completes"),
                () = tokio::time::sleep(Duration::from_millis(50)) => {}
            }
            // Dropping the suspended future must discard the write.
        }

        assert!(locations(&app)
            .get_by_name("Doomed")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn transactions_hide_staged_writes_until_commit() {
        let app = setup().await;
        let runner = Arc::new(InMemoryTransactionRunner::new(app.store.clone()));
        let revisions = app.store.subscribe();

        let (staged_tx, staged_rx) = tokio::sync::oneshot::channel::<()>();
        let (resume_tx, resume_rx) = tokio::sync::oneshot::channel::<()>();

        let writer = locations(&app);
        let handle = tokio::spawn(async move {
            runner
                .run(Box::pin(async move {
                    writer
                        .add(Location::new(LocationType::Shop, "Staged"))
                        .await?;
                    let _ = staged_tx.send(());
                    let _ = resume_rx.await;
                    Ok(())
                }))
                .await
        });

        staged_rx.await.expect("block reaches its first write");

        // The block is suspended mid-transaction. Its insert must not be
        // visible to any other task, and no revision may have been
        // announced for it.
        assert!(locations(&app)
            .get_by_name("Staged")
            .await
            .unwrap()
            .is_empty());
        assert!(!revisions.has_changed().unwrap());

        let _ = resume_tx.send(());
        handle.await.unwrap().unwrap();

        // Commit publishes the write and bumps the revision.
        assert_eq!(
            locations(&app).get_by_name("Staged").await.unwrap().len(),
            1
        );
        assert!(revisions.has_changed().unwrap());
    }

    #[tokio::test]
    async fn toggling_expansion_expands_all_only_when_none_are_expanded() {
        let app = setup().await;
        let spar = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();
        app.add_location
            .execute(Location::new(LocationType::Shop, "Lidl"))
            .await
            .unwrap();

        // New locations start expanded, so the first toggle collapses all.
        app.toggle_locations_expanded
            .execute(LocationType::Shop)
            .await
            .unwrap();
        let shops = locations(&app).get_by_type(LocationType::Shop).await.unwrap();
        assert!(shops.iter().all(|l| !l.expanded));

        app.toggle_locations_expanded
            .execute(LocationType::Shop)
            .await
            .unwrap();
        let shops = locations(&app).get_by_type(LocationType::Shop).await.unwrap();
        assert!(shops.iter().all(|l| l.expanded));

        // Same rule for the aisles of one location.
        app.add_aisle
            .execute(Aisle::new(spar.id, "Dairy", 0))
            .await
            .unwrap();
        app.toggle_aisles_expanded.execute(spar.id).await.unwrap();
        let spar_aisles = aisles(&app).get_for_location(spar.id).await.unwrap();
        assert!(spar_aisles.iter().all(|a| !a.expanded));
    }

    #[tokio::test]
    async fn update_product_status_flips_and_skips_unknown_ids() {
        let app = setup().await;
        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        assert!(!milk.in_stock);

        let flipped = app
            .update_product_status
            .execute(milk.id)
            .await
            .unwrap()
            .unwrap();
        assert!(flipped.in_stock);

        assert!(app
            .update_product_status
            .execute(ProductId::new(9999))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn notes_stay_consistent_with_their_parent() {
        let app = setup().await;
        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();

        let note = app
            .save_note
            .execute(NoteParent::Product(milk.id), "lactose free")
            .await
            .unwrap();
        let stored = products(&app).get(milk.id).await.unwrap().unwrap();
        assert_eq!(stored.note_id, Some(note.id));

        // Saving again edits in place rather than allocating a second note.
        let edited = app
            .save_note
            .execute(NoteParent::Product(milk.id), "semi skimmed")
            .await
            .unwrap();
        assert_eq!(edited.id, note.id);
        assert_eq!(edited.text, "semi skimmed");

        app.remove_note
            .execute(NoteParent::Product(milk.id))
            .await
            .unwrap();
        let stored = products(&app).get(milk.id).await.unwrap().unwrap();
        assert_eq!(stored.note_id, None);
        assert!(notes(&app).get(note.id).await.unwrap().is_none());

        // Removing a note from a note-less parent is a benign no-op.
        app.remove_note
            .execute(NoteParent::Product(milk.id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn loyalty_cards_link_to_a_single_location() {
        let app = setup().await;
        let spar = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Spar"))
            .await
            .unwrap();
        let lidl = app
            .add_location
            .execute(Location::new(LocationType::Shop, "Lidl"))
            .await
            .unwrap();

        let card = app
            .add_loyalty_card
            .execute(
                LoyaltyCard::new("Spar Club", CardProvider::Barcode, "4006381333931"),
                spar.id,
            )
            .await
            .unwrap();
        assert!(card.id.is_assigned());

        // Re-linking an existing card moves it; it never appears twice.
        app.add_loyalty_card
            .execute(card.clone(), lidl.id)
            .await
            .unwrap();
        assert!(cards(&app).get_for_location(spar.id).await.unwrap().is_empty());
        assert_eq!(cards(&app).get_for_location(lidl.id).await.unwrap().len(), 1);

        app.remove_loyalty_card
            .execute(card.id, lidl.id)
            .await
            .unwrap();
        assert!(cards(&app).get_for_location(lidl.id).await.unwrap().is_empty());
        assert!(cards(&app).get(card.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn removing_a_product_cleans_up_its_mappings_and_note() {
        let app = setup().await;
        let milk = app.add_product.execute(Product::new("Milk")).await.unwrap();
        let note = app
            .save_note
            .execute(NoteParent::Product(milk.id), "organic only")
            .await
            .unwrap();

        app.remove_product.execute(milk.id).await.unwrap();

        assert!(products(&app).get(milk.id).await.unwrap().is_none());
        assert!(aisle_products(&app)
            .get_product_aisles(milk.id)
            .await
            .unwrap()
            .is_empty());
        assert!(notes(&app).get(note.id).await.unwrap().is_none());
    }
}
