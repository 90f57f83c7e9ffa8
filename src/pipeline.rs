//! The export orchestrator.
//!
//! Takes normalized travel records and export settings and produces one
//! concatenated HTML book: optional cover and table of contents, then per
//! travel — in the order the settings dictate — the fixed travel page
//! pair, an optional map page, an optional gallery, and an optional
//! recommendations page.
//!
//! Generation is strictly sequential so the final page order matches
//! `sort_order` deterministically. A generator returning an empty string
//! means "omit this page": nothing is emitted and the running page number
//! does not advance. The only hard failure is a per-travel generator
//! invoked without its travel; optional sub-steps (the map snapshot fetch)
//! degrade inside their generator and never abort the run.

use crate::generate::{BookPage, GenerateError, PageContext, SnapshotFetcher, UreqSnapshotFetcher};
use crate::settings::{ExportSettings, SortOrder};
use crate::theme::resolve_theme;
use crate::types::Travel;

/// Generate the full book HTML using the production snapshot fetcher.
pub fn generate_book(travels: &[Travel], settings: &ExportSettings) -> Result<String, GenerateError> {
    generate_book_with(travels, settings, &UreqSnapshotFetcher::default())
}

/// Generate the full book HTML with an explicit snapshot collaborator.
pub fn generate_book_with(
    travels: &[Travel],
    settings: &ExportSettings,
    snapshot: &dyn SnapshotFetcher,
) -> Result<String, GenerateError> {
    // Resolved once; every page context shares this bundle read-only.
    let theme = resolve_theme(&settings.theme);

    let ordered = sort_travels(travels, settings.sort_order);
    let mut html = String::new();
    let mut page_number = 1;

    let mut emit = |page: BookPage, ctx: &PageContext| -> Result<usize, GenerateError> {
        let fragment = page.generate(ctx)?;
        if fragment.is_empty() {
            return Ok(0);
        }
        let pages = page.estimate_page_count(ctx);
        html.push_str(&fragment);
        log::debug!("emitted {page:?} at page {}", ctx.page_number);
        Ok(pages)
    };

    let book_ctx = |page_number: usize| PageContext {
        travel: None,
        travels: &ordered,
        settings,
        theme: &theme,
        page_number,
        waypoints: &[],
        snapshot,
    };

    if settings.include_toc {
        page_number += emit(BookPage::Cover, &book_ctx(page_number))?;
        page_number += emit(BookPage::Toc, &book_ctx(page_number))?;
    }

    for travel in &ordered {
        let travel_ctx = |page_number: usize| PageContext {
            travel: Some(travel),
            waypoints: &travel.waypoints,
            ..book_ctx(page_number)
        };

        page_number += emit(BookPage::Travel, &travel_ctx(page_number))?;
        if settings.include_map {
            page_number += emit(BookPage::Map, &travel_ctx(page_number))?;
        }
        if settings.include_gallery {
            page_number += emit(BookPage::Gallery, &travel_ctx(page_number))?;
        }
        if settings.include_recommendations {
            page_number += emit(BookPage::Recommendations, &travel_ctx(page_number))?;
        }
    }

    log::info!(
        "generated book: {} travels, {} pages",
        ordered.len(),
        page_number - 1
    );
    Ok(html)
}

/// Clone travels into final book order.
fn sort_travels(travels: &[Travel], order: SortOrder) -> Vec<Travel> {
    let mut ordered = travels.to_vec();
    match order {
        // Undated travels sort last in both date orders.
        SortOrder::StartDateAsc => {
            ordered.sort_by_key(|t| (t.start_date.is_none(), t.start_date));
        }
        SortOrder::StartDateDesc => {
            ordered.sort_by_key(|t| (t.start_date.is_none(), std::cmp::Reverse(t.start_date)));
        }
        SortOrder::Title => ordered.sort_by(|a, b| a.title.cmp(&b.title)),
    }
    ordered
}
