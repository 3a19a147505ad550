//! Leadboard Lead Store
//!
//! This module provides the lead collection and its persistence:
//!
//! - **types**: Core data structures (Lead, LeadInput, LeadUpdate)
//! - **slug**: Name → URL-safe identifier
//! - **persistence**: Durable slot mirroring (FileSlot, MemorySlot)
//! - **engine**: The store orchestrating all of the above
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Startup:
//!   Slot → load (icons reset) → LeadStore
//!
//! Mutation:
//!   add / remove / update / edit → Vec<Lead> → save (full rewrite) → Slot
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use leadboard::store::{LeadInput, LeadStore, LeadUpdate, Persistence};
//!
//! let mut store = LeadStore::open(Persistence::file("./data", "leads"));
//!
//! store.add(LeadInput::new("lead-1", "Tech Startup NYC").stage(2));
//! store.update("tech-startup-nyc", LeadUpdate {
//!     notes: Some(Some("Call back Monday".to_string())),
//!     ..LeadUpdate::new()
//! });
//! store.remove("lead-1");
//! ```

pub mod engine;
pub mod error;
pub mod persistence;
pub mod slug;
pub mod types;

// Re-export commonly used types
pub use engine::{LeadStore, StoreStats};
pub use error::{StoreError, StoreResult};
pub use persistence::{
    FileSlot, MemorySlot, PersistState, Persistence, PersistenceStats, Slot, DEFAULT_SLOT_KEY,
    ICON_PLACEHOLDER,
};
pub use slug::slugify;
pub use types::{
    default_url, Coordinates, Icon, Lead, LeadInput, LeadUpdate, OutreachMethod, DEFAULT_STAGE,
};
