//! Book-level pages: the cover and the table of contents.
//!
//! Both are book-scoped generators — they read the full travel list from
//! the context and never require a bound travel. The TOC's page numbers
//! come from the same `estimate_page_count` arithmetic the orchestrator
//! uses, so printed numbers line up with the emitted pages.

use super::{BookPage, PageContext, book_page};
use maud::html;

/// Render the cover page. Always exactly one page.
pub fn cover_page(ctx: &PageContext) -> String {
    let travel_count = ctx.travels.len();
    let year_range = year_range(ctx);

    let content = html! {
        div.cover-panel {
            p.cover-kicker { "Travel Book" }
            h1.cover-title { (book_title(ctx)) }
            p.cover-summary {
                (travel_count) " " (if travel_count == 1 { "journey" } else { "journeys" })
                @if let Some(range) = year_range {
                    " · " (range)
                }
            }
        }
    };
    book_page("cover-page", ctx.page_number, content).into_string()
}

fn book_title(ctx: &PageContext) -> String {
    match ctx.travels {
        [only] => only.title.clone(),
        _ => "Our Travels".to_string(),
    }
}

/// "2019 – 2025" style range, or a single year, or nothing.
fn year_range(ctx: &PageContext) -> Option<String> {
    let years: Vec<i32> = ctx.travels.iter().filter_map(|t| t.year).collect();
    let min = *years.iter().min()?;
    let max = *years.iter().max()?;
    Some(if min == max {
        min.to_string()
    } else {
        format!("{min} – {max}")
    })
}

/// Render the table of contents, or nothing for an empty travel list.
pub fn toc_page(ctx: &PageContext) -> String {
    if ctx.travels.is_empty() {
        return String::new();
    }

    let content = html! {
        h2.toc-title { "Contents" }
        ol.toc-list {
            @for (title, page) in toc_entries(ctx) {
                li.toc-entry {
                    span.toc-entry-title { (title) }
                    span.toc-entry-page { (page) }
                }
            }
        }
    };
    book_page("toc-page", ctx.page_number, content).into_string()
}

/// (title, first page number) per travel, mirroring orchestrator counting.
fn toc_entries<'a>(ctx: &PageContext<'a>) -> Vec<(&'a str, usize)> {
    // The first travel starts right after this TOC page.
    let mut next_page = ctx.page_number + 1;
    let mut entries = Vec::with_capacity(ctx.travels.len());
    for travel in ctx.travels {
        entries.push((travel.title.as_str(), next_page));
        let travel_ctx = PageContext {
            travel: Some(travel),
            waypoints: &travel.waypoints,
            ..*ctx
        };
        next_page += BookPage::Travel.estimate_page_count(&travel_ctx);
        if ctx.settings.include_map {
            next_page += BookPage::Map.estimate_page_count(&travel_ctx);
        }
        if ctx.settings.include_gallery {
            next_page += BookPage::Gallery.estimate_page_count(&travel_ctx);
        }
        if ctx.settings.include_recommendations {
            next_page += BookPage::Recommendations.estimate_page_count(&travel_ctx);
        }
    }
    entries
}
