//! Demo entrypoint: bootstrap an in-memory app, seed the sample data, and
//! print the home shopping list as JSON.

use anyhow::Context;

use shelfwise_core::{LocationType, ProductFilter};
use shelfwise_listing::{Grouping, ListFilter};
use shelfwise_repository::LocationRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shelfwise_observability::init();

    let app = shelfwise_infra::bootstrap().await?;
    app.generate_sample_data.execute().await?;

    let home = app
        .store
        .get_by_type(LocationType::Home)
        .await?
        .into_iter()
        .next()
        .context("home location missing after bootstrap")?;

    let view = app
        .shopping_list
        .compose_once(
            &Grouping::ByAisle {
                location_id: home.id,
            },
            &ListFilter {
                product_filter: ProductFilter::Needed,
                ..ListFilter::default()
            },
        )
        .await?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
