//! # Leadboard
//!
//! Lead-management core for an outreach dashboard: an in-memory, optionally
//! persisted list of lead records, the routes that address them, sample data
//! and map scaffolding.
//!
//! ## Modules
//!
//! - [`store`]: Lead records, the store, slug derivation and persistence
//! - [`routes`]: Dashboard route table
//! - [`seed`]: Sample leads
//! - [`geo`]: Map positions, bounds and widget options
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leadboard::store::*;
//!
//! // Open the store; this loads whatever was saved last time
//! let mut store = LeadStore::open(Persistence::file("./leadboard_data", DEFAULT_SLOT_KEY));
//!
//! // Create a lead, then merge more data into it later
//! store.add(LeadInput::new("lead-1", "Tech Startup NYC").outreach(OutreachMethod::Email));
//! store.add(LeadInput::new("lead-1", "Tech Startup NYC").stage(2));
//!
//! // Every mutation above was written to ./leadboard_data/leads.json
//! let lead = store.get("tech-startup-nyc").unwrap();
//! println!("{} is at stage {:?}", lead.name, lead.stage);
//! ```

pub mod config;
pub mod geo;
pub mod logging;
pub mod routes;
pub mod seed;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    slugify, Coordinates, FileSlot, Icon, Lead, LeadInput, LeadStore, LeadUpdate, MemorySlot,
    OutreachMethod, Persistence, Slot, StoreError, StoreResult, StoreStats,
};

pub use routes::{Resolution, Route};

pub use seed::{add_sample_leads, sample_leads};

pub use geo::{
    bounds_for, lead_markers, InfoWindowOptions, LatLngBounds, LatLngLiteral, MapOptions,
    MarkerOptions,
};

pub use config::{Config, ConfigError, LoggingConfig, StoreConfig};
