//! Leadboard demo
//!
//! Opens the configured lead store, seeds the sample leads and logs what a
//! dashboard would render.

use leadboard::config::Config;
use leadboard::geo::{bounds_for, lead_markers, MapOptions};
use leadboard::routes::Route;
use leadboard::seed::add_sample_leads;
use leadboard::store::LeadStore;

fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    leadboard::logging::init(&config.logging);

    tracing::info!("Leadboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {:?}", config.store.data_dir);

    let mut store = LeadStore::from_config(&config.store);
    if store.is_empty() {
        add_sample_leads(&mut store);
    }

    for lead in &store {
        tracing::info!(
            "{} [stage {}] -> {}",
            lead.name,
            lead.stage.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
            Route::for_lead(lead).path()
        );
    }

    let markers = lead_markers(&store);
    let map = MapOptions::centered_on(&bounds_for(&store));
    tracing::info!(
        "Map: {} markers, center {:?}",
        markers.len(),
        map.center
    );

    tracing::info!("Store stats: {}", store.stats());
    Ok(())
}
