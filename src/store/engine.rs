//! Lead Store
//!
//! Sole owner of the lead collection. Every mutating operation ends by
//! handing the full collection to the persistence adapter, when one is
//! attached:
//! - Create/merge path: `add` → find by id → create or selective merge → persist
//! - Edit path: `update`/`edit` → find by id or slug → assign → persist
//!
//! Single-threaded: operations take `&mut self` and run to completion.

use crate::config::StoreConfig;
use crate::store::persistence::{Persistence, PersistenceStats};
use crate::store::types::{Lead, LeadInput, LeadUpdate};

/// Store statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Leads in the collection
    pub lead_count: usize,
    /// Leads carrying coordinates
    pub mapped_count: usize,
    /// Whether mutations are mirrored to a slot
    pub persistent: bool,
    /// Persistence counters (zero when not persistent)
    pub persistence: PersistenceStats,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Leads: {}, Mapped: {}, Persistent: {}, Writes: {}, Failed writes: {}",
            self.lead_count,
            self.mapped_count,
            self.persistent,
            self.persistence.writes,
            self.persistence.failed_writes
        )
    }
}

/// The lead collection and the operations that mutate it
#[derive(Debug, Default)]
pub struct LeadStore {
    /// Leads in insertion order
    leads: Vec<Lead>,
    /// Mirror target, `None` for a memory-only store
    persistence: Option<Persistence>,
}

impl LeadStore {
    /// Create a memory-only store
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a store that loads from and mirrors to `persistence`
    pub fn open(persistence: Persistence) -> Self {
        let leads = persistence.load();
        Self {
            leads,
            persistence: Some(persistence),
        }
    }

    /// Create a store as described by configuration
    pub fn from_config(config: &StoreConfig) -> Self {
        if config.persist {
            tracing::info!(
                "Opening lead store at {:?} (slot {:?})",
                config.data_dir,
                config.slot
            );
            Self::open(Persistence::file(&config.data_dir, config.slot.as_str()))
        } else {
            tracing::info!("Opening memory-only lead store");
            Self::in_memory()
        }
    }

    /// Create a lead, or selectively merge into the one with the same id
    ///
    /// Fields absent from `input` are left untouched on an existing lead;
    /// explicit nulls clear. The slug is only ever derived here, on create.
    pub fn add(&mut self, input: LeadInput) {
        if let Some(existing) = self.leads.iter_mut().find(|l| l.id == input.id) {
            tracing::debug!("Merging into lead {:?}", existing.id);
            existing.merge(input);
        } else {
            let lead = Lead::from_input(input);
            tracing::debug!("Created lead {:?} with slug {:?}", lead.id, lead.slug);
            self.leads.push(lead);
        }

        self.persist();
    }

    /// Remove the first lead whose id or slug equals `id_or_slug`
    pub fn remove(&mut self, id_or_slug: &str) -> Option<Lead> {
        let index = self.position(id_or_slug)?;
        let removed = self.leads.remove(index);
        tracing::debug!("Removed lead {:?}", removed.id);

        self.persist();
        Some(removed)
    }

    /// Assign every key present in `updates` onto the matching lead
    ///
    /// Returns whether a lead matched.
    pub fn update(&mut self, id_or_slug: &str, updates: LeadUpdate) -> bool {
        let Some(index) = self.position(id_or_slug) else {
            return false;
        };
        self.leads[index].apply(updates);
        tracing::debug!("Updated lead {:?}", self.leads[index].id);

        self.persist();
        true
    }

    /// Edit the matching lead in place
    ///
    /// Returns whether a lead matched.
    pub fn edit<F>(&mut self, id_or_slug: &str, f: F) -> bool
    where
        F: FnOnce(&mut Lead),
    {
        let Some(index) = self.position(id_or_slug) else {
            return false;
        };
        f(&mut self.leads[index]);
        tracing::debug!("Edited lead {:?}", self.leads[index].id);

        self.persist();
        true
    }

    /// Get lead by id or slug
    pub fn get(&self, id_or_slug: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.matches(id_or_slug))
    }

    /// Get all leads in insertion order
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lead> {
        self.leads.iter()
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Get leads that can be placed on a map
    pub fn with_coordinates(&self) -> Vec<&Lead> {
        self.leads
            .iter()
            .filter(|l| l.coordinates.is_some())
            .collect()
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            lead_count: self.leads.len(),
            mapped_count: self.leads.iter().filter(|l| l.coordinates.is_some()).count(),
            persistent: self.persistence.is_some(),
            persistence: self
                .persistence
                .as_ref()
                .map(Persistence::stats)
                .unwrap_or_default(),
        }
    }

    fn position(&self, id_or_slug: &str) -> Option<usize> {
        self.leads.iter().position(|l| l.matches(id_or_slug))
    }

    fn persist(&mut self) {
        if let Some(persistence) = self.persistence.as_mut() {
            persistence.save(&self.leads);
        }
    }
}

impl<'a> IntoIterator for &'a LeadStore {
    type Item = &'a Lead;
    type IntoIter = std::slice::Iter<'a, Lead>;

    fn into_iter(self) -> Self::IntoIter {
        self.leads.iter()
    }
}
