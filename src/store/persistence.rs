//! Persistence adapter
//!
//! Mirrors the whole lead collection into a single durable slot.
//!
//! # Design Notes
//! - One slot, one key, one JSON array; no version field
//! - `icon` is written as a fixed placeholder and comes back as the default glyph
//! - Best-effort: read and write failures are logged, never returned
//! - Every save is a full rewrite; nothing is queued or coalesced

use crate::store::error::{StoreError, StoreResult};
use crate::store::types::Lead;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Slot key used when none is configured
pub const DEFAULT_SLOT_KEY: &str = "leads";

/// Value written in place of every lead's icon
pub const ICON_PLACEHOLDER: &str = "icon";

/// A named location in durable key-value storage
pub trait Slot: Send {
    /// Read the contents stored under `key`, `None` if nothing was ever written
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the contents stored under `key`
    fn write(&mut self, key: &str, contents: &str) -> StoreResult<()>;
}

/// Slot backed by one JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Slot for FileSlot {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, contents: &str) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so a crash never leaves half a file
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process slot
///
/// Clones share the same entries, so a test can keep a handle after
/// giving one to the store.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with raw contents
    pub fn with_contents(key: &str, contents: impl Into<String>) -> Self {
        let slot = Self::new();
        if let Ok(mut entries) = slot.entries.lock() {
            entries.insert(key.to_string(), contents.into());
        }
        slot
    }

    /// Make every following write fail (or succeed again)
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Get raw contents under `key`
    pub fn contents(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

impl Slot for MemorySlot {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Slot(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Slot("write rejected".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Slot(e.to_string()))?;
        entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Adapter state; a save goes `Idle → Writing → Idle` before returning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistState {
    Idle,
    Writing,
}

/// Write counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistenceStats {
    /// Saves that reached the slot
    pub writes: u64,
    /// Saves the slot rejected
    pub failed_writes: u64,
}

/// Mirrors the lead collection into a durable slot
pub struct Persistence {
    slot: Box<dyn Slot>,
    key: String,
    state: PersistState,
    stats: PersistenceStats,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Persistence {
    pub fn new(slot: impl Slot + 'static, key: impl Into<String>) -> Self {
        Self {
            slot: Box::new(slot),
            key: key.into(),
            state: PersistState::Idle,
            stats: PersistenceStats::default(),
        }
    }

    /// File-backed adapter rooted at `dir`
    pub fn file(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self::new(FileSlot::new(dir), key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> PersistState {
        self.state
    }

    pub fn stats(&self) -> PersistenceStats {
        self.stats
    }

    /// Read the collection from the slot
    ///
    /// Never fails: a missing slot is an empty collection, an unreadable or
    /// malformed one is logged and treated the same way.
    pub fn load(&self) -> Vec<Lead> {
        let contents = match self.slot.read(&self.key) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::debug!("Slot {:?} is empty, starting with no leads", self.key);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read slot {:?}: {}", self.key, e);
                return Vec::new();
            }
        };

        match decode(&contents) {
            Ok(leads) => {
                tracing::info!("Loaded {} leads from slot {:?}", leads.len(), self.key);
                leads
            }
            Err(e) => {
                tracing::warn!("Discarding malformed slot {:?}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with the full collection
    ///
    /// Failures are logged and counted, never retried.
    pub fn save(&mut self, leads: &[Lead]) {
        self.state = PersistState::Writing;

        let result = encode(leads).and_then(|contents| self.slot.write(&self.key, &contents));
        match result {
            Ok(()) => {
                self.stats.writes += 1;
                tracing::debug!("Saved {} leads to slot {:?}", leads.len(), self.key);
            }
            Err(e) => {
                self.stats.failed_writes += 1;
                tracing::error!("Failed to save leads to slot {:?}: {}", self.key, e);
            }
        }

        self.state = PersistState::Idle;
    }
}

/// Serialize leads with every icon replaced by the placeholder
fn encode(leads: &[Lead]) -> StoreResult<String> {
    let records = leads
        .iter()
        .map(|lead| -> StoreResult<Value> {
            let mut value = serde_json::to_value(lead)?;
            if let Some(record) = value.as_object_mut() {
                record.insert("icon".to_string(), Value::from(ICON_PLACEHOLDER));
            }
            Ok(value)
        })
        .collect::<StoreResult<Vec<_>>>()?;

    Ok(serde_json::to_string(&records)?)
}

/// Deserialize leads, ignoring whatever was stored as icon
fn decode(contents: &str) -> StoreResult<Vec<Lead>> {
    let records: Vec<Map<String, Value>> = serde_json::from_str(contents)?;

    records
        .into_iter()
        .map(|mut record| -> StoreResult<Lead> {
            record.remove("icon");
            Ok(serde_json::from_value(Value::Object(record))?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{Icon, LeadInput, OutreachMethod};
    use tempfile::tempdir;

    fn sample_leads() -> Vec<Lead> {
        vec![
            Lead::from_input(
                LeadInput::new("lead-1", "Tech Startup NYC")
                    .icon(Icon::Building2)
                    .outreach(OutreachMethod::Email)
                    .coordinates(40.7589, -73.9851),
            ),
            Lead::from_input(LeadInput::new("lead-2", "Coffee Shop Brooklyn").icon(Icon::Store)),
        ]
    }

    #[test]
    fn test_load_missing_slot_is_empty() {
        let persistence = Persistence::new(MemorySlot::new(), DEFAULT_SLOT_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_malformed_slot_is_empty() {
        let slot = MemorySlot::with_contents(DEFAULT_SLOT_KEY, "{not json");
        let persistence = Persistence::new(slot, DEFAULT_SLOT_KEY);
        assert!(persistence.load().is_empty());

        let slot = MemorySlot::with_contents(DEFAULT_SLOT_KEY, r#"[{"id": "x"}]"#);
        let persistence = Persistence::new(slot, DEFAULT_SLOT_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_replaces_icon_with_placeholder() {
        let slot = MemorySlot::new();
        let mut persistence = Persistence::new(slot.clone(), DEFAULT_SLOT_KEY);
        persistence.save(&sample_leads());

        let raw = slot.contents(DEFAULT_SLOT_KEY).unwrap();
        let records: Vec<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record["icon"], ICON_PLACEHOLDER);
        }
        assert_eq!(records[0]["outreachMethod"], "email");
        assert_eq!(records[0]["coordinates"][0], 40.7589);
        assert_eq!(persistence.stats().writes, 1);
        assert_eq!(persistence.state(), PersistState::Idle);
    }

    #[test]
    fn test_round_trip_resets_icons() {
        let slot = MemorySlot::new();
        let mut persistence = Persistence::new(slot, DEFAULT_SLOT_KEY);
        let leads = sample_leads();
        persistence.save(&leads);

        let loaded = persistence.load();
        assert_eq!(loaded.len(), leads.len());
        for (before, after) in leads.iter().zip(&loaded) {
            assert_eq!(after.icon, Icon::Frame);
            let mut expected = before.clone();
            expected.icon = Icon::Frame;
            assert_eq!(after, &expected);
        }

        // Saving what was loaded reproduces the same slot contents
        persistence.save(&loaded);
        assert_eq!(persistence.load(), loaded);
    }

    #[test]
    fn test_round_trip_keeps_review_rates() {
        let mut leads = sample_leads();
        leads[0].review_rate = Some(4.7);
        leads[0].number_of_reviews = Some(128);
        leads[1] = Lead::from_input(LeadInput {
            review_rate: Some(Some(f64::NEG_INFINITY)),
            ..LeadInput::new("lead-2", "Coffee Shop Brooklyn")
        });

        let mut persistence = Persistence::new(MemorySlot::new(), DEFAULT_SLOT_KEY);
        persistence.save(&leads);
        let loaded = persistence.load();

        assert_eq!(loaded[0].review_rate, Some(4.7));
        assert_eq!(loaded[0].number_of_reviews, Some(128));
        assert_eq!(loaded[1].review_rate, leads[1].review_rate);
        assert_eq!(loaded[1].review_rate, None);
    }

    #[test]
    fn test_failed_write_is_counted_not_fatal() {
        let slot = MemorySlot::new();
        slot.fail_writes(true);
        let mut persistence = Persistence::new(slot.clone(), DEFAULT_SLOT_KEY);

        persistence.save(&sample_leads());
        assert_eq!(persistence.stats().failed_writes, 1);
        assert_eq!(persistence.stats().writes, 0);
        assert_eq!(persistence.state(), PersistState::Idle);
        assert!(slot.contents(DEFAULT_SLOT_KEY).is_none());
    }

    #[test]
    fn test_file_slot_round_trip() {
        let dir = tempdir().unwrap();
        let mut persistence = Persistence::file(dir.path(), "leads");
        persistence.save(&sample_leads());

        assert!(dir.path().join("leads.json").exists());
        assert!(!dir.path().join("leads.json.tmp").exists());

        let reopened = Persistence::file(dir.path(), "leads");
        let loaded = reopened.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].slug, "coffee-shop-brooklyn");
    }

    #[test]
    fn test_file_slot_missing_dir() {
        let dir = tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested"));
        assert!(slot.read("leads").unwrap().is_none());
    }

    #[test]
    fn test_load_unreadable_slot_is_empty() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("leads.json")).unwrap();

        let slot = FileSlot::new(dir.path());
        assert!(slot.read("leads").is_err());

        let persistence = Persistence::file(dir.path(), "leads");
        assert!(persistence.load().is_empty());
    }
}
