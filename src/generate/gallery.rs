//! Grid photo gallery layout.
//!
//! [`photo_grid`] is a layout generator: it turns an ordered photo list and
//! the gallery settings into a grid fragment, independent of any page. The
//! book's gallery page wraps one grid per travel; the article renderer
//! reuses the same grid for its image-gallery sections.
//!
//! Layout rules:
//! - column count maps 1:1 to equal-width grid tracks
//! - spacing preset maps to a fixed pixel gap (compact 8 / normal 16 /
//!   spacious 24)
//! - caption `top`/`bottom` place caption markup before/after the photo in
//!   document order; `overlay` absolutely positions it over a gradient scrim
//! - EXIF metadata renders only when the caption opts in via
//!   `show_metadata`, and each missing field is simply omitted
//! - an empty photo list still emits the grid container shell

use super::{GenerateError, PageContext, book_page};
use crate::settings::{CaptionPosition, GallerySettings};
use crate::types::{ExifMetadata, Photo, PhotoCaption, proxied_image_url};
use maud::{Markup, html};

/// Width requested from the image proxy for grid photos.
const GRID_IMAGE_WIDTH: u32 = 800;

/// Render the grid fragment for an ordered photo list.
pub fn photo_grid(photos: &[Photo], settings: &GallerySettings) -> Markup {
    let grid_style = format!(
        "display: grid; grid-template-columns: repeat({}, 1fr); gap: {}px;{}",
        settings.columns,
        settings.spacing.gap(),
        settings
            .background
            .as_deref()
            .map(|bg| format!(" background: {bg};"))
            .unwrap_or_default(),
    );

    html! {
        div.photo-grid style=(grid_style) {
            @for photo in photos {
                (grid_item(photo, settings))
            }
        }
    }
}

fn grid_item(photo: &Photo, settings: &GallerySettings) -> Markup {
    let item_style = settings.border_style.css();
    let caption = photo.caption.as_ref();
    let overlay = settings.caption_position == CaptionPosition::Overlay;

    html! {
        figure.photo-item style=[(!item_style.is_empty()).then_some(item_style)] {
            @if settings.caption_position == CaptionPosition::Top {
                @if let Some(c) = caption { (caption_markup(c, false)) }
            }
            div.photo-frame.photo-frame-overlay[overlay] {
                img src=(proxied_image_url(&photo.url, GRID_IMAGE_WIDTH)) alt=(alt_text(caption)) loading="lazy";
                @if overlay {
                    @if let Some(c) = caption { (caption_markup(c, true)) }
                }
            }
            @if settings.caption_position == CaptionPosition::Bottom {
                @if let Some(c) = caption { (caption_markup(c, false)) }
            }
        }
    }
}

fn alt_text(caption: Option<&PhotoCaption>) -> String {
    caption
        .and_then(|c| c.text.clone())
        .unwrap_or_else(|| "Photo".to_string())
}

/// Caption block. `overlay` switches to the scrim variant that sits on top
/// of the photo.
fn caption_markup(caption: &PhotoCaption, overlay: bool) -> Markup {
    html! {
        figcaption class=(if overlay { "photo-caption photo-caption-overlay" } else { "photo-caption" }) {
            @if let Some(text) = &caption.text {
                span.caption-text { (text) }
            }
            @if let Some(location) = &caption.location {
                span.caption-location { (location) }
            }
            @if let Some(date) = &caption.date {
                span.caption-date { (date) }
            }
            @if caption.show_metadata {
                @if let Some(meta) = &caption.metadata {
                    (exif_line(meta))
                }
            }
        }
    }
}

/// One line of EXIF facts; absent fields leave no trace.
fn exif_line(meta: &ExifMetadata) -> Markup {
    let fields = [
        meta.camera.as_deref(),
        meta.lens.as_deref(),
        meta.focal_length.as_deref(),
        meta.aperture.as_deref(),
        meta.iso.as_deref(),
        meta.shutter_speed.as_deref(),
    ];
    html! {
        span.caption-exif {
            @for field in fields.into_iter().flatten() {
                span.exif-field { (field) }
            }
        }
    }
}

/// Render the book's gallery page, or nothing when the travel has no
/// photos.
pub fn gallery_page(ctx: &PageContext) -> Result<String, GenerateError> {
    let travel = ctx.require_travel("gallery")?;
    if travel.photos.is_empty() {
        return Ok(String::new());
    }
    let content = html! {
        h2 { "Photos" }
        (photo_grid(&travel.photos, &ctx.settings.gallery))
    };
    Ok(book_page("gallery-page", ctx.page_number, content).into_string())
}
