//! Normalized travel records consumed by the generator pipeline.
//!
//! These shapes arrive pre-validated from the upstream travel-data
//! transformer; the pipeline trusts them and does not re-check structure.
//! Everything is serde round-trippable so travels can be loaded from JSON
//! fixtures and persisted exports alike.

use chrono::NaiveDate;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Query-value encoding: everything except RFC 3986 unreserved characters.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One normalized travel record — the unit the book pipeline iterates over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Travel {
    pub id: String,
    pub title: String,
    /// Free-form markdown description shown on the content page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Trip length in days, when the upstream data carried both endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_count: Option<u32>,
    /// Hosted cover image URL (run through the image proxy at render time).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Structured content blocks rendered on the content page, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_blocks: Vec<TravelBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<Waypoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
}

/// A structured content block inside a travel's content page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TravelBlock {
    Heading { text: String },
    /// Markdown body, rendered to HTML at generation time.
    Paragraph { text: String },
    Quote { text: String },
}

/// A photo in a travel's gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<PhotoCaption>,
}

/// Caption data attached to a photo. `show_metadata` gates EXIF rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoCaption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub show_metadata: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExifMetadata>,
}

/// EXIF-style capture metadata. Each field renders independently; a missing
/// field is simply omitted, never shown as a placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExifMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,
}

/// A named stop on a travel's route. Coordinates are optional and may be
/// out of range — the map generator validates them before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Waypoint {
    /// Whether this waypoint carries finite, in-range coordinates.
    pub fn has_valid_coordinates(&self) -> bool {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                lat.is_finite()
                    && lng.is_finite()
                    && (-90.0..=90.0).contains(&lat)
                    && (-180.0..=180.0).contains(&lng)
            }
            _ => false,
        }
    }
}

/// A recommendation entry (restaurant, sight, tip) attached to a travel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A standalone article, exported outside the book pipeline as one
/// self-contained printable page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<ArticleSection>,
    /// Route waypoints; rendered only when the export enables map pages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<Waypoint>,
    /// Rendered only when the export enables recommendation pages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
}

/// Ordered article sections. The closed set mirrors what the editor emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArticleSection {
    Heading {
        text: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    /// Markdown body, rendered to HTML at generation time.
    Paragraph { text: String },
    List { items: Vec<String> },
    InfoBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        text: String,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    ImageGallery { urls: Vec<String> },
}

fn default_heading_level() -> u8 {
    2
}

/// Rewrite a hosted image URL through the resize proxy.
///
/// The proxy serves width-constrained variants so print exports do not pull
/// full-resolution originals. Empty input passes through empty — callers
/// treat that as "no image" rather than an error.
pub fn proxied_image_url(url: &str, width: u32) -> String {
    if url.is_empty() {
        return String::new();
    }
    // Already-proxied URLs (and data URLs) pass through untouched.
    if url.starts_with("data:") || url.contains("/img-proxy/") {
        return url.to_string();
    }
    format!(
        "https://images.travelbook.app/img-proxy/w{width}?src={}",
        utf8_percent_encode(url, QUERY_VALUE)
    )
}
