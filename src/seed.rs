//! Sample leads
//!
//! Five fixture businesses in New York and the Bay Area, with coordinates,
//! for populating an empty dashboard.

use crate::store::{Icon, LeadInput, LeadStore, OutreachMethod};

/// Fixture leads, in seeding order
pub fn sample_leads() -> Vec<LeadInput> {
    vec![
        // New York City
        LeadInput::new("lead-1", "Tech Startup NYC")
            .url("https://example.com")
            .icon(Icon::Building2)
            .stage(2)
            .outreach(OutreachMethod::Email)
            .address("123 Broadway, New York, NY 10001")
            .coordinates(40.7589, -73.9851),
        LeadInput::new("lead-2", "Coffee Shop Brooklyn")
            .url("https://example.com")
            .icon(Icon::Store)
            .stage(1)
            .outreach(OutreachMethod::Call)
            .address("456 Park Ave, Brooklyn, NY 11201")
            .coordinates(40.6892, -73.9442),
        LeadInput::new("lead-3", "Manufacturing Co")
            .url("https://example.com")
            .icon(Icon::Factory)
            .stage(3)
            .outreach(OutreachMethod::Email)
            .address("789 Industrial Blvd, Queens, NY 11101")
            .coordinates(40.7282, -73.7949),
        // San Francisco Bay Area
        LeadInput::new("lead-4", "SF Tech Company")
            .url("https://example.com")
            .icon(Icon::Building2)
            .stage(2)
            .outreach(OutreachMethod::Email)
            .address("101 Market St, San Francisco, CA 94105")
            .coordinates(37.7749, -122.4194),
        LeadInput::new("lead-5", "Silicon Valley Startup")
            .url("https://example.com")
            .icon(Icon::Building2)
            .stage(1)
            .outreach(OutreachMethod::Call)
            .address("200 Sand Hill Rd, Menlo Park, CA 94025")
            .coordinates(37.4419, -122.1430),
    ]
}

/// Add the fixture leads to `store`
///
/// Seeding an already seeded store merges instead of duplicating.
pub fn add_sample_leads(store: &mut LeadStore) {
    let samples = sample_leads();
    tracing::info!("Seeding {} sample leads", samples.len());
    for input in samples {
        store.add(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Coordinates, MemorySlot, Persistence, DEFAULT_SLOT_KEY};

    #[test]
    fn test_seed_and_remove_third_by_slug() {
        let mut store = LeadStore::in_memory();
        add_sample_leads(&mut store);
        assert_eq!(store.len(), 5);

        let third = store.leads()[2].clone();
        assert_eq!(third.slug, "manufacturing-co");

        let removed = store.remove(&third.slug).unwrap();
        assert_eq!(removed.id, "lead-3");
        assert_eq!(store.len(), 4);
        assert!(store.get(&third.id).is_none());
        assert!(store.get(&third.slug).is_none());
    }

    #[test]
    fn test_seed_values() {
        let mut store = LeadStore::in_memory();
        add_sample_leads(&mut store);

        let lead = store.get("silicon-valley-startup").unwrap();
        assert_eq!(lead.id, "lead-5");
        assert_eq!(lead.url, "https://example.com");
        assert_eq!(lead.stage, Some(1));
        assert_eq!(lead.outreach_method, Some(OutreachMethod::Call));
        assert_eq!(lead.coordinates, Some(Coordinates::new(37.4419, -122.1430)));
        assert_eq!(store.with_coordinates().len(), 5);
    }

    #[test]
    fn test_seed_twice_merges() {
        let slot = MemorySlot::new();
        let mut store = LeadStore::open(Persistence::new(slot, DEFAULT_SLOT_KEY));
        add_sample_leads(&mut store);
        store.edit("lead-1", |lead| lead.notes = Some("Warm".to_string()));
        add_sample_leads(&mut store);

        assert_eq!(store.len(), 5);
        assert_eq!(store.get("lead-1").unwrap().notes.as_deref(), Some("Warm"));
        assert_eq!(store.stats().persistence.writes, 11);
    }
}
