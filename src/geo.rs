//! Map scaffolding
//!
//! Plain data types a map view needs to plot leads: positions, bounds, and
//! the option objects handed to the map, marker and info window widgets.
//! Field names serialize camelCase to match what the widgets expect.

use crate::store::{Coordinates, Lead};
use serde::{Deserialize, Serialize};

/// Zoom level used when a map is centred on a single lead
pub const DEFAULT_ZOOM: u8 = 12;

/// A position as `{ lat, lng }`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for LatLngLiteral {
    fn from(c: Coordinates) -> Self {
        Self {
            lat: c.latitude,
            lng: c.longitude,
        }
    }
}

/// Smallest box containing every extended point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatLngBounds {
    corners: Option<(LatLngLiteral, LatLngLiteral)>,
}

impl LatLngBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the bounds to include `point`
    pub fn extend(&mut self, point: LatLngLiteral) {
        self.corners = Some(match self.corners {
            None => (point, point),
            Some((sw, ne)) => (
                LatLngLiteral {
                    lat: sw.lat.min(point.lat),
                    lng: sw.lng.min(point.lng),
                },
                LatLngLiteral {
                    lat: ne.lat.max(point.lat),
                    lng: ne.lng.max(point.lng),
                },
            ),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    /// South-west corner
    pub fn south_west(&self) -> Option<LatLngLiteral> {
        self.corners.map(|(sw, _)| sw)
    }

    /// North-east corner
    pub fn north_east(&self) -> Option<LatLngLiteral> {
        self.corners.map(|(_, ne)| ne)
    }

    /// Midpoint of the box
    pub fn center(&self) -> Option<LatLngLiteral> {
        self.corners.map(|(sw, ne)| LatLngLiteral {
            lat: (sw.lat + ne.lat) / 2.0,
            lng: (sw.lng + ne.lng) / 2.0,
        })
    }
}

/// Options for creating a map
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLngLiteral>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_id: Option<String>,
}

impl MapOptions {
    /// Centre on the middle of `bounds`
    pub fn centered_on(bounds: &LatLngBounds) -> Self {
        Self {
            zoom: Some(DEFAULT_ZOOM),
            center: bounds.center(),
            map_id: None,
        }
    }

    /// Builder method: set map id
    pub fn map_id(mut self, map_id: impl Into<String>) -> Self {
        self.map_id = Some(map_id.into());
        self
    }
}

/// Options for placing a marker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerOptions {
    pub position: LatLngLiteral,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Options for an info window
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InfoWindowOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl InfoWindowOptions {
    /// Info window summarising a lead
    pub fn for_lead(lead: &Lead) -> Self {
        let mut content = lead.name.clone();
        if let Some(address) = &lead.address {
            content.push('\n');
            content.push_str(address);
        }
        Self {
            content: Some(content),
        }
    }
}

/// One marker per lead with coordinates, titled with the lead name
pub fn lead_markers<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Vec<MarkerOptions> {
    leads
        .into_iter()
        .filter_map(|lead| {
            lead.coordinates.map(|c| MarkerOptions {
                position: c.into(),
                title: Some(lead.name.clone()),
            })
        })
        .collect()
}

/// Bounds covering every lead with coordinates
pub fn bounds_for<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> LatLngBounds {
    let mut bounds = LatLngBounds::new();
    for c in leads.into_iter().filter_map(|lead| lead.coordinates) {
        bounds.extend(c.into());
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::add_sample_leads;
    use crate::store::{LeadInput, LeadStore};

    #[test]
    fn test_markers_skip_leads_without_coordinates() {
        let mut store = LeadStore::in_memory();
        add_sample_leads(&mut store);
        store.add(LeadInput::new("lead-6", "Nowhere LLC"));

        let markers = lead_markers(&store);
        assert_eq!(markers.len(), 5);
        assert_eq!(markers[0].title.as_deref(), Some("Tech Startup NYC"));
        assert_eq!(markers[0].position, LatLngLiteral { lat: 40.7589, lng: -73.9851 });
    }

    #[test]
    fn test_bounds_cover_all_leads() {
        let mut store = LeadStore::in_memory();
        add_sample_leads(&mut store);

        let bounds = bounds_for(&store);
        let sw = bounds.south_west().unwrap();
        let ne = bounds.north_east().unwrap();
        assert_eq!(sw.lat, 37.4419);
        assert_eq!(sw.lng, -122.4194);
        assert_eq!(ne.lat, 40.7589);
        assert_eq!(ne.lng, -73.7949);
    }

    #[test]
    fn test_empty_bounds() {
        let bounds = bounds_for(&LeadStore::in_memory());
        assert!(bounds.is_empty());
        assert!(bounds.center().is_none());
        assert!(MapOptions::centered_on(&bounds).center.is_none());
    }

    #[test]
    fn test_map_options_serialize_camel_case() {
        let mut bounds = LatLngBounds::new();
        bounds.extend(LatLngLiteral { lat: 10.0, lng: 20.0 });
        let options = MapOptions::centered_on(&bounds).map_id("leads-map");

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["mapId"], "leads-map");
        assert_eq!(json["center"]["lat"], 10.0);
        assert_eq!(json["zoom"], DEFAULT_ZOOM);
    }

    #[test]
    fn test_info_window_content() {
        let lead = Lead::from_input(
            LeadInput::new("lead-2", "Coffee Shop Brooklyn").address("456 Park Ave"),
        );
        let info = InfoWindowOptions::for_lead(&lead);
        assert_eq!(info.content.as_deref(), Some("Coffee Shop Brooklyn\n456 Park Ave"));
    }
}
