//! Travel page generation: the photo page and content page pair, plus the
//! optional recommendations page.
//!
//! The pair is a fixed, declarative contract — every travel gets exactly
//! one photo page and one content page, never more, regardless of how much
//! text the travel carries. Overflowing content is clipped by print CSS
//! rather than reflowed onto extra pages.

use super::{GenerateError, PageContext, book_page, markdown};
use crate::types::{Travel, TravelBlock, proxied_image_url};
use maud::{Markup, html};

/// Width requested from the image proxy for full-bleed cover images.
const COVER_IMAGE_WIDTH: u32 = 1400;

/// Render the photo page and content page for one travel, concatenated.
///
/// Hard-fails when the context carries no travel; everything else (missing
/// cover image, absent metadata, empty description) degrades by omission.
pub fn travel_pages(ctx: &PageContext) -> Result<String, GenerateError> {
    let travel = ctx.require_travel("travel")?;

    let photo = book_page("travel-photo-page", ctx.page_number, photo_side(travel));
    let content = book_page(
        "travel-content-page",
        ctx.page_number + 1,
        content_side(travel),
    );

    log::debug!("generated travel pages for '{}'", travel.title);
    Ok(format!("{}{}", photo.into_string(), content.into_string()))
}

/// The full-bleed opening page: cover image, title, trip facts.
fn photo_side(travel: &Travel) -> Markup {
    let cover = travel
        .cover_image
        .as_deref()
        .map(|url| proxied_image_url(url, COVER_IMAGE_WIDTH))
        .filter(|url| !url.is_empty());

    html! {
        @if let Some(src) = cover {
            img.travel-cover src=(src) alt=(travel.title);
        } @else {
            div.travel-cover.travel-cover-empty {}
        }
        div.travel-title-panel {
            h1 { (travel.title) }
            (trip_facts(travel))
        }
    }
}

/// Country / year / duration line. Each fact renders only when present.
fn trip_facts(travel: &Travel) -> Markup {
    html! {
        p.trip-facts {
            @if let Some(country) = &travel.country {
                span.trip-fact { (country) }
            }
            @if let Some(year) = travel.year {
                span.trip-fact { (year) }
            }
            @if let Some(days) = travel.day_count {
                span.trip-fact { (days) " " (if days == 1 { "day" } else { "days" }) }
            }
        }
    }
}

/// The content page: description plus structured content blocks in order.
fn content_side(travel: &Travel) -> Markup {
    html! {
        h2.travel-content-title { (travel.title) }
        @if let Some(description) = &travel.description {
            div.travel-description { (markdown(description)) }
        }
        @for block in &travel.content_blocks {
            @match block {
                TravelBlock::Heading { text } => {
                    h3 { (text) }
                }
                TravelBlock::Paragraph { text } => {
                    div.travel-paragraph { (markdown(text)) }
                }
                TravelBlock::Quote { text } => {
                    blockquote { (text) }
                }
            }
        }
    }
}

/// Render the recommendations page, or nothing when the travel has none.
pub fn recommendations_page(ctx: &PageContext) -> Result<String, GenerateError> {
    let travel = ctx.require_travel("recommendations")?;
    if travel.recommendations.is_empty() {
        return Ok(String::new());
    }

    let content = html! {
        h2 { "Recommendations" }
        ul.recommendation-list {
            @for rec in &travel.recommendations {
                li.recommendation {
                    span.recommendation-title { (rec.title) }
                    @if let Some(category) = &rec.category {
                        span.recommendation-category { (category) }
                    }
                    @if let Some(note) = &rec.note {
                        p.recommendation-note { (note) }
                    }
                }
            }
        }
    };
    Ok(book_page("recommendations-page", ctx.page_number, content).into_string())
}
