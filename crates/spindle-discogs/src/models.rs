// SPDX-License-Identifier: GPL-3.0-or-later

use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency codes accepted for marketplace prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Gbp,
    Eur,
    Cad,
    Aud,
    Jpy,
    Chf,
    Mxn,
    Brl,
    Nzd,
    Sek,
    Zar,
}

/// Kind of entity in the Discogs database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Release,
    Master,
    Artist,
    Label,
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(s.to_ascii_uppercase()))
            .map_err(|_| format!("unknown currency: {s}"))
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(s.to_ascii_lowercase()))
            .map_err(|_| format!("unknown entity type: {s}"))
    }
}

/// Pagination parameters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page. Discogs defaults to 50 and caps at 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Pagination block returned with list responses.
///
/// See <https://www.discogs.com/developers#page:home,header:home-pagination>.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u64,
    pub pages: u64,
    pub items: u64,
    pub per_page: u64,
    pub urls: Option<PaginationUrls>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationUrls {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

/// Options for a release lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseOptions {
    /// Currency for marketplace data; defaults to the user's currency.
    #[serde(rename = "curr_abbr", skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

/// Search parameters for `/database/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    /// Free-text query.
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Artist name variation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "catno", skip_serializing_if = "Option::is_none")]
    pub catalog_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.pagination.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.pagination.per_page = Some(per_page);
        self
    }
}

/// Artist credit on a release or track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistCredit {
    /// Artist name variation used on this release.
    pub anv: String,
    pub id: Option<u64>,
    /// Join phrase (e.g., " & ", " feat. ").
    pub join: String,
    pub name: String,
    pub resource_url: String,
    pub role: String,
    pub tracks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRef {
    pub resource_url: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub average: Option<f64>,
    pub count: Option<u64>,
}

/// Community statistics for a release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Community {
    pub contributors: Vec<UserRef>,
    pub data_quality: String,
    pub have: Option<u64>,
    pub rating: Option<Rating>,
    pub status: Option<String>,
    pub submitter: Option<UserRef>,
    pub want: Option<u64>,
}

/// Company credited on a release (pressing plant, distributor, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    #[serde(rename = "catno")]
    pub catalog_number: String,
    pub entity_type: String,
    pub entity_type_name: String,
    pub id: Option<u64>,
    pub name: String,
    pub resource_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    pub descriptions: Vec<String>,
    pub name: String,
    /// Quantity, as a string (Discogs returns e.g. "1").
    pub qty: String,
}

/// Barcode, matrix number or other identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub identifier_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub height: Option<u32>,
    pub resource_url: String,
    #[serde(rename = "type")]
    pub image_type: String,
    pub uri: String,
    pub uri150: String,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelRef {
    #[serde(rename = "catno")]
    pub catalog_number: String,
    pub entity_type: String,
    pub id: Option<u64>,
    pub name: String,
    pub resource_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub duration: String,
    pub position: String,
    pub title: String,
    /// "track", "heading" or "index".
    #[serde(rename = "type_")]
    pub track_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub description: String,
    /// Length in seconds.
    pub duration: Option<u64>,
    pub embed: Option<bool>,
    pub title: String,
    pub uri: String,
}

/// A release as returned by `/releases/{release_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseResponse {
    pub title: String,
    pub id: u64,
    pub artists: Vec<ArtistCredit>,
    pub data_quality: String,
    pub thumb: String,
    pub community: Option<Community>,
    pub companies: Vec<Company>,
    pub country: String,
    pub date_added: Option<DateTime<FixedOffset>>,
    pub date_changed: Option<DateTime<FixedOffset>>,
    /// Estimated shipping weight in grams.
    pub estimated_weight: Option<u64>,
    #[serde(rename = "extraartists")]
    pub extra_artists: Vec<ArtistCredit>,
    pub format_quantity: Option<u64>,
    pub formats: Vec<Format>,
    pub genres: Vec<String>,
    pub identifiers: Vec<Identifier>,
    pub images: Vec<Image>,
    pub labels: Vec<LabelRef>,
    pub lowest_price: Option<f64>,
    pub master_id: Option<u64>,
    pub master_url: Option<String>,
    pub notes: String,
    pub num_for_sale: Option<u64>,
    /// Release date as entered (YYYY, YYYY-MM or YYYY-MM-DD).
    pub released: String,
    pub released_formatted: String,
    pub resource_url: String,
    pub series: Vec<Value>,
    pub status: String,
    pub styles: Vec<String>,
    pub tracklist: Vec<Track>,
    pub uri: String,
    pub videos: Vec<Video>,
    pub year: Option<u32>,
}

/// A master release as returned by `/masters/{master_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterRelease {
    pub id: u64,
    pub title: String,
    pub main_release: Option<u64>,
    pub main_release_url: Option<String>,
    pub versions_url: String,
    pub artists: Vec<ArtistCredit>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub year: Option<u32>,
    pub tracklist: Vec<Track>,
    pub images: Vec<Image>,
    pub num_for_sale: Option<u64>,
    pub lowest_price: Option<f64>,
    pub data_quality: String,
    pub resource_url: String,
    pub uri: String,
}

/// Member or group of an artist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistMember {
    pub id: Option<u64>,
    pub name: String,
    pub active: Option<bool>,
    pub resource_url: String,
}

/// An artist as returned by `/artists/{artist_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    #[serde(rename = "realname")]
    pub real_name: Option<String>,
    pub profile: String,
    #[serde(rename = "namevariations")]
    pub name_variations: Vec<String>,
    pub urls: Vec<String>,
    pub members: Vec<ArtistMember>,
    pub groups: Vec<ArtistMember>,
    pub images: Vec<Image>,
    pub releases_url: String,
    pub data_quality: String,
    pub resource_url: String,
    pub uri: String,
}

/// A label as returned by `/labels/{label_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub id: u64,
    pub name: String,
    pub profile: String,
    pub contact_info: Option<String>,
    pub parent_label: Option<LabelRef>,
    #[serde(rename = "sublabels")]
    pub sub_labels: Vec<LabelRef>,
    pub urls: Vec<String>,
    pub images: Vec<Image>,
    pub releases_url: String,
    pub data_quality: String,
    pub resource_url: String,
    pub uri: String,
}

/// Response from `/database/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub pagination: Option<Pagination>,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCommunity {
    pub want: Option<u64>,
    pub have: Option<u64>,
}

/// A single search hit. Which fields are populated depends on `entity_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub entity_type: Option<EntityType>,
    pub title: String,
    pub thumb: String,
    pub country: String,
    pub year: String,
    pub style: Vec<String>,
    pub genre: Vec<String>,
    pub format: Vec<String>,
    pub label: Vec<String>,
    #[serde(rename = "catno")]
    pub catalog_number: String,
    pub community: SearchCommunity,
    pub uri: String,
    pub resource_url: String,
}
