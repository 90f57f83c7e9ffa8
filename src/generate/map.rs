//! Map page generation.
//!
//! One page per travel, present only when the travel has waypoints. The
//! page tries a remote snapshot render of the route first; any failure —
//! network error, bad response, or simply no waypoint with usable
//! coordinates — degrades to an inline vector placeholder. The waypoint
//! list itself always renders, numbered and escaped, whether or not the
//! coordinates were good enough to plot.

use super::{GenerateError, PageContext, book_page};
use crate::types::Waypoint;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use maud::{Markup, PreEscaped, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot service unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot response was not an image")]
    BadResponse,
}

/// Remote map-snapshot collaborator.
///
/// Implementations return an embeddable `src` value (typically a data URL)
/// for an image of the plotted route. The map generator treats any error
/// as "use the fallback" — a failed snapshot must never abort an export.
pub trait SnapshotFetcher {
    fn render(&self, waypoints: &[Waypoint]) -> Result<String, SnapshotError>;
}

/// Production fetcher: GETs a rendered route image from the snapshot
/// service and inlines it as a data URL so the export stays self-contained.
pub struct UreqSnapshotFetcher {
    endpoint: String,
}

impl UreqSnapshotFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    fn snapshot_url(&self, waypoints: &[Waypoint]) -> String {
        let markers = waypoints
            .iter()
            .filter(|wp| wp.has_valid_coordinates())
            .map(|wp| format!("{:.5},{:.5}", wp.lat.unwrap_or(0.0), wp.lng.unwrap_or(0.0)))
            .collect::<Vec<_>>()
            .join("|");
        format!("{}?size=1200x800&markers={markers}", self.endpoint)
    }
}

impl Default for UreqSnapshotFetcher {
    fn default() -> Self {
        Self::new("https://maps.travelbook.app/snapshot")
    }
}

impl SnapshotFetcher for UreqSnapshotFetcher {
    fn render(&self, waypoints: &[Waypoint]) -> Result<String, SnapshotError> {
        let url = self.snapshot_url(waypoints);
        let mut response = ureq::get(&url)
            .call()
            .map_err(|e| SnapshotError::Unavailable(e.to_string()))?;
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(SnapshotError::BadResponse);
        }
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| SnapshotError::Unavailable(e.to_string()))?;
        Ok(format!("data:{content_type};base64,{}", BASE64.encode(bytes)))
    }
}

/// Render the map page, or nothing when the travel has no waypoints.
pub fn map_page(ctx: &PageContext) -> Result<String, GenerateError> {
    let travel = ctx.require_travel("map")?;
    if ctx.waypoints.is_empty() {
        return Ok(String::new());
    }

    let plottable = ctx.waypoints.iter().any(Waypoint::has_valid_coordinates);
    let snapshot = if plottable {
        match ctx.snapshot.render(ctx.waypoints) {
            Ok(src) => Some(src),
            Err(err) => {
                log::warn!(
                    "map snapshot failed for '{}', using placeholder: {err}",
                    travel.title
                );
                None
            }
        }
    } else {
        None
    };

    let content = html! {
        h2 { "Route" }
        @if let Some(src) = snapshot {
            img.map-snapshot src=(src) alt={ "Route map for " (travel.title) };
        } @else {
            (placeholder_map())
        }
        ol.waypoint-list {
            @for wp in ctx.waypoints {
                li.waypoint { (wp.name) }
            }
        }
    };
    Ok(book_page("map-page", ctx.page_number, content).into_string())
}

/// Inline vector placeholder shown when no snapshot is available.
fn placeholder_map() -> Markup {
    // Static markup authored here, not user content.
    PreEscaped(
        r##"<svg class="map-placeholder" viewBox="0 0 300 200" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="Map unavailable">
  <rect width="300" height="200" fill="var(--color-surface)"/>
  <path d="M40 150 Q100 60 150 110 T 260 70" fill="none" stroke="var(--color-accent)" stroke-width="3" stroke-dasharray="8 6"/>
  <circle cx="40" cy="150" r="6" fill="var(--color-accent)"/>
  <circle cx="260" cy="70" r="6" fill="var(--color-accent)"/>
</svg>"##.to_string(),
    )
}
