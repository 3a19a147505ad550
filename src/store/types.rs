//! Core data types for the lead store
//!
//! This module defines the record and the two input shapes that mutate it:
//! - `Lead`: A business/contact record tracked through an outreach pipeline
//! - `LeadInput`: Partial record fed to `add` (create or selective merge)
//! - `LeadUpdate`: Partial record fed to `update` (unconditional shallow merge)
//! - `Icon`, `OutreachMethod`, `Coordinates`: Field value types
//!
//! Nullable input fields are `Option<Option<T>>`: `None` means the key was
//! absent, `Some(None)` an explicit null, `Some(Some(v))` a value.

use crate::store::slug::slugify;
use serde::{Deserialize, Deserializer, Serialize};

/// Stage assigned to a lead created without one
pub const DEFAULT_STAGE: u32 = 1;

/// Symbolic glyph shown next to a lead
///
/// Opaque to the store: stored and handed back, never interpreted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Generic glyph, also what every lead gets back after a reload
    #[default]
    Frame,
    Building2,
    Store,
    Factory,
}

impl Icon {
    /// Get all glyphs for iteration
    pub fn all() -> &'static [Icon] {
        &[Icon::Frame, Icon::Building2, Icon::Store, Icon::Factory]
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Icon::Frame => write!(f, "Frame"),
            Icon::Building2 => write!(f, "Building2"),
            Icon::Store => write!(f, "Store"),
            Icon::Factory => write!(f, "Factory"),
        }
    }
}

impl std::str::FromStr for Icon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::all()
            .iter()
            .copied()
            .find(|icon| icon.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown icon: {}", s))
    }
}

/// How a lead is being approached
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OutreachMethod {
    Email,
    Call,
}

impl std::fmt::Display for OutreachMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutreachMethod::Email => write!(f, "email"),
            OutreachMethod::Call => write!(f, "call"),
        }
    }
}

impl std::str::FromStr for OutreachMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Ok(OutreachMethod::Email),
            "call" => Ok(OutreachMethod::Call),
            other => Err(format!("unknown outreach method: {}", other)),
        }
    }
}

/// A `[latitude, longitude]` pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.latitude, c.longitude]
    }
}

/// A single lead record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Externally assigned unique key
    pub id: String,
    /// Display name
    pub name: String,
    /// URL-safe form of the name at creation time
    pub slug: String,
    /// Navigation target
    pub url: String,
    #[serde(default)]
    pub icon: Icon,

    // Contact/business fields
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// `add` and `update` store NaN and infinities as `None`
    pub review_rate: Option<f64>,
    pub number_of_reviews: Option<u32>,
    pub description: Option<String>,
    pub coordinates: Option<Coordinates>,

    // Outreach tracking
    pub stage: Option<u32>,
    pub outreach_method: Option<OutreachMethod>,
    pub email_transcript: Option<String>,
    pub call_transcript: Option<String>,
    pub notes: Option<String>,
}

impl Lead {
    /// Build a fresh record from an `add` input
    ///
    /// This is the only place a slug is derived.
    pub fn from_input(input: LeadInput) -> Self {
        let slug = slugify(&input.name);
        let url = input.url.unwrap_or_else(|| default_url(&slug));

        Self {
            id: input.id,
            name: input.name,
            url,
            slug,
            icon: input.icon.unwrap_or_default(),
            address: input.address.flatten(),
            phone_number: input.phone_number.flatten(),
            email: input.email.flatten(),
            website: input.website.flatten(),
            review_rate: finite(input.review_rate).flatten(),
            number_of_reviews: input.number_of_reviews.flatten(),
            description: input.description.flatten(),
            coordinates: input.coordinates.flatten(),
            stage: input.stage.unwrap_or(Some(DEFAULT_STAGE)),
            outreach_method: input.outreach_method.flatten(),
            email_transcript: input.email_transcript.flatten(),
            call_transcript: input.call_transcript.flatten(),
            notes: input.notes.flatten(),
        }
    }

    /// Selectively merge an `add` input into this record
    ///
    /// Absent fields are left alone; `id` and `slug` never change.
    pub fn merge(&mut self, input: LeadInput) {
        self.name = input.name;
        if let Some(url) = input.url {
            self.url = url;
        }
        if let Some(icon) = input.icon {
            self.icon = icon;
        }
        assign(&mut self.address, input.address);
        assign(&mut self.phone_number, input.phone_number);
        assign(&mut self.email, input.email);
        assign(&mut self.website, input.website);
        assign(&mut self.review_rate, finite(input.review_rate));
        assign(&mut self.number_of_reviews, input.number_of_reviews);
        assign(&mut self.description, input.description);
        assign(&mut self.coordinates, input.coordinates);
        assign(&mut self.stage, input.stage);
        assign(&mut self.outreach_method, input.outreach_method);
        assign(&mut self.email_transcript, input.email_transcript);
        assign(&mut self.call_transcript, input.call_transcript);
        assign(&mut self.notes, input.notes);
    }

    /// Shallow-assign every key present in `update`, identity fields included
    pub fn apply(&mut self, update: LeadUpdate) {
        if let Some(id) = update.id {
            self.id = id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(url) = update.url {
            self.url = url;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        assign(&mut self.address, update.address);
        assign(&mut self.phone_number, update.phone_number);
        assign(&mut self.email, update.email);
        assign(&mut self.website, update.website);
        assign(&mut self.review_rate, finite(update.review_rate));
        assign(&mut self.number_of_reviews, update.number_of_reviews);
        assign(&mut self.description, update.description);
        assign(&mut self.coordinates, update.coordinates);
        assign(&mut self.stage, update.stage);
        assign(&mut self.outreach_method, update.outreach_method);
        assign(&mut self.email_transcript, update.email_transcript);
        assign(&mut self.call_transcript, update.call_transcript);
        assign(&mut self.notes, update.notes);
    }

    /// Check whether `key` addresses this lead by id or slug
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.slug == key
    }
}

/// Default navigation target for a slug
pub fn default_url(slug: &str) -> String {
    format!("/leads/{}", slug)
}

fn assign<T>(field: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *field = value;
    }
}

/// JSON has no NaN or infinity, so such rates become null on the way in
fn finite(patch: Option<Option<f64>>) -> Option<Option<f64>> {
    patch.map(|rate| rate.filter(|r| r.is_finite()))
}

/// Deserialize a nullable field so a missing key stays `None`
/// while an explicit `null` becomes `Some(None)`.
///
/// Must be paired with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial record accepted by `LeadStore::add`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadInput {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub review_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub number_of_reviews: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub coordinates: Option<Option<Coordinates>>,
    #[serde(default, deserialize_with = "double_option")]
    pub stage: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub outreach_method: Option<Option<OutreachMethod>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email_transcript: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub call_transcript: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl LeadInput {
    /// Create an input with only the required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder method: set url
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder method: set icon
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Builder method: set stage
    pub fn stage(mut self, stage: u32) -> Self {
        self.stage = Some(Some(stage));
        self
    }

    /// Builder method: set outreach method
    pub fn outreach(mut self, method: OutreachMethod) -> Self {
        self.outreach_method = Some(Some(method));
        self
    }

    /// Builder method: set address
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(Some(address.into()));
        self
    }

    /// Builder method: set email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(Some(email.into()));
        self
    }

    /// Builder method: set phone number
    pub fn phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(Some(phone.into()));
        self
    }

    /// Builder method: set website
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(Some(website.into()));
        self
    }

    /// Builder method: set coordinates
    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Some(Coordinates::new(latitude, longitude)));
        self
    }
}

/// Partial record accepted by `LeadStore::update`
///
/// Every key present is assigned as-is, including `id` and `slug`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub review_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub number_of_reviews: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub coordinates: Option<Option<Coordinates>>,
    #[serde(default, deserialize_with = "double_option")]
    pub stage: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub outreach_method: Option<Option<OutreachMethod>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email_transcript: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub call_transcript: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl LeadUpdate {
    pub fn new() -> Self {
        Self::default()
    }
}
