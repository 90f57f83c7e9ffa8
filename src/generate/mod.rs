//! Themed HTML page generation.
//!
//! Every page of the exported book is produced by one of the [`BookPage`]
//! variants. The family is closed on purpose: dispatch is an exhaustive
//! match, so a new page type cannot ship without both `generate` and
//! `estimate_page_count`.
//!
//! The contract between the two methods: `estimate_page_count` returns 0
//! if and only if `generate` would return an empty string for the same
//! context. Empty means "omit this page"; the orchestrator neither emits
//! nor counts it.
//!
//! Failure tiers follow the export design: a per-travel generator invoked
//! without a travel in its context is the one hard error here. Everything
//! else — missing images, bad coordinates, a failed snapshot fetch —
//! degrades locally to a fallback and the pipeline continues.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping, which is
//! what keeps untrusted travel titles and descriptions inert in the output.

pub mod article;
pub mod cover;
pub mod gallery;
pub mod map;
pub mod travel;

use crate::settings::ExportSettings;
use crate::theme::Theme;
use crate::types::{Travel, Waypoint};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use thiserror::Error;

pub use map::{SnapshotError, SnapshotFetcher, UreqSnapshotFetcher};

#[derive(Error, Debug)]
pub enum GenerateError {
    /// A per-travel generator was invoked without a travel in its context.
    /// This is the generation layer's only hard failure.
    #[error("{page} page generator invoked without a travel in its context")]
    MissingTravel { page: &'static str },
}

/// Per-page input bundle. Constructed fresh by the orchestrator for every
/// page and discarded after generation; nothing here is persisted.
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    /// The travel this page belongs to. `None` for book-level pages
    /// (cover, table of contents).
    pub travel: Option<&'a Travel>,
    /// All travels in the export, in final book order.
    pub travels: &'a [Travel],
    pub settings: &'a ExportSettings,
    /// Resolved once per export, read-only.
    pub theme: &'a Theme,
    /// Running page number of the first page this generator would emit.
    pub page_number: usize,
    /// Resolved waypoints for map pages; empty for other page types.
    pub waypoints: &'a [Waypoint],
    /// Map snapshot collaborator. Failures degrade to the vector fallback.
    pub snapshot: &'a dyn SnapshotFetcher,
}

impl<'a> PageContext<'a> {
    /// The travel, or the hard error naming the page that needed it.
    pub fn require_travel(&self, page: &'static str) -> Result<&'a Travel, GenerateError> {
        self.travel.ok_or(GenerateError::MissingTravel { page })
    }
}

/// The closed set of book page types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookPage {
    Cover,
    Toc,
    /// Photo page + content page for one travel, always both.
    Travel,
    Map,
    Gallery,
    Recommendations,
}

impl BookPage {
    /// Render this page type for the given context. An empty string means
    /// the page is omitted from the book.
    pub fn generate(self, ctx: &PageContext) -> Result<String, GenerateError> {
        match self {
            BookPage::Cover => Ok(cover::cover_page(ctx)),
            BookPage::Toc => Ok(cover::toc_page(ctx)),
            BookPage::Travel => travel::travel_pages(ctx),
            BookPage::Map => map::map_page(ctx),
            BookPage::Gallery => gallery::gallery_page(ctx),
            BookPage::Recommendations => travel::recommendations_page(ctx),
        }
    }

    /// Number of pages `generate` will emit for the same context. Zero if
    /// and only if `generate` returns an empty string.
    pub fn estimate_page_count(self, ctx: &PageContext) -> usize {
        match self {
            BookPage::Cover => 1,
            BookPage::Toc => usize::from(!ctx.travels.is_empty()),
            // Fixed declarative contract: photo page + content page,
            // regardless of content length.
            BookPage::Travel => 2,
            BookPage::Map => usize::from(!ctx.waypoints.is_empty()),
            BookPage::Gallery => {
                usize::from(ctx.travel.is_some_and(|t| !t.photos.is_empty()))
            }
            BookPage::Recommendations => {
                usize::from(ctx.travel.is_some_and(|t| !t.recommendations.is_empty()))
            }
        }
    }
}

/// Wrap page content in the book-page container the export wrapper keys on.
///
/// `kind` becomes a modifier class for per-page-type print CSS.
pub(crate) fn book_page(kind: &str, page_number: usize, content: Markup) -> Markup {
    html! {
        section class={ "book-page " (kind) } data-page-number=(page_number) {
            (content)
        }
    }
}

/// Render a markdown body to HTML markup.
///
/// The markdown source is user content; pulldown-cmark escapes raw HTML in
/// it, so script tags survive only in escaped, inert form.
pub(crate) fn markdown(body: &str) -> Markup {
    let parser = Parser::new(body);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::theme::resolve_theme;
    use crate::types::Photo;

    /// Snapshot stub that always fails, forcing the vector fallback.
    pub struct FailingSnapshot;

    impl SnapshotFetcher for FailingSnapshot {
        fn render(&self, _waypoints: &[Waypoint]) -> Result<String, SnapshotError> {
            Err(SnapshotError::Unavailable("stubbed out".to_string()))
        }
    }

    /// Snapshot stub that returns a fixed data URL.
    pub struct FixedSnapshot(pub &'static str);

    impl SnapshotFetcher for FixedSnapshot {
        fn render(&self, _waypoints: &[Waypoint]) -> Result<String, SnapshotError> {
            Ok(self.0.to_string())
        }
    }

    pub fn test_travel() -> Travel {
        Travel {
            id: "t-1".to_string(),
            title: "Japan in Spring".to_string(),
            description: Some("Two weeks from Tokyo to Kyoto.".to_string()),
            country: Some("Japan".to_string()),
            year: Some(2025),
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 4, 1),
            day_count: Some(14),
            cover_image: Some("https://cdn.example.com/cover.jpg".to_string()),
            content_blocks: vec![],
            photos: vec![
                Photo {
                    url: "https://cdn.example.com/p1.jpg".to_string(),
                    caption: None,
                },
                Photo {
                    url: "https://cdn.example.com/p2.jpg".to_string(),
                    caption: None,
                },
            ],
            waypoints: vec![],
            recommendations: vec![],
        }
    }

    pub struct ContextFixture {
        pub travels: Vec<Travel>,
        pub settings: ExportSettings,
        pub theme: Theme,
        pub waypoints: Vec<Waypoint>,
    }

    impl ContextFixture {
        pub fn new() -> Self {
            Self {
                travels: vec![test_travel()],
                settings: ExportSettings::default(),
                theme: resolve_theme("classic"),
                waypoints: vec![],
            }
        }

        pub fn context<'a>(&'a self, snapshot: &'a dyn SnapshotFetcher) -> PageContext<'a> {
            PageContext {
                travel: self.travels.first(),
                travels: &self.travels,
                settings: &self.settings,
                theme: &self.theme,
                page_number: 1,
                waypoints: &self.waypoints,
                snapshot,
            }
        }

        /// Context for a book-level page (no travel bound).
        pub fn book_context<'a>(&'a self, snapshot: &'a dyn SnapshotFetcher) -> PageContext<'a> {
            PageContext {
                travel: None,
                ..self.context(snapshot)
            }
        }
    }
}
