//! # Travelbook
//!
//! A print-ready travel book generator. Normalized travel records become a
//! themed, paginated HTML book intended for browser print-to-PDF, and
//! single articles become standalone printable pages. Alongside the
//! generator pipeline sits an editable document model for the interactive
//! book-layout editor.
//!
//! # Architecture: Two Independent Halves
//!
//! ```text
//! 1. Editing     DocumentBuilder  →  Document (JSON)   (interactive layout)
//! 2. Exporting   travels + settings  →  book HTML       (generator pipeline)
//! ```
//!
//! The halves share nothing but page geometry: the builder manages an
//! editable [`document::Document`] (pages of positioned blocks) and does
//! not depend on the generators; the pipeline turns travel records into
//! themed page fragments and never touches a `Document`.
//!
//! The export flow is: settings resolve a [`theme::Theme`] once, the
//! [`pipeline`] orchestrator walks the travels in sorted order, each
//! [`generate::BookPage`] renders its fragment (or an empty string to be
//! omitted), and the [`export`] wrapper validates page markers and adds
//! the print shell.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Normalized travel records and the standalone article shapes |
//! | [`settings`] | `settings.toml` loading, merging, validation, stock defaults |
//! | [`document`] | Editable document model: `Document`, `Page`, `Block`, geometry |
//! | [`builder`] | `DocumentBuilder` — the sole mutator of one `Document` |
//! | [`theme`] | Named presets resolved into one immutable token bundle per export |
//! | [`generate`] | Page and layout generators producing themed HTML fragments |
//! | [`pipeline`] | Orchestrator sequencing generators into one book |
//! | [`export`] | Print wrapper: marker validation, toolbar, image preload |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, template
//! variables are Rust expressions, and all interpolation is auto-escaped —
//! which is load-bearing here, because travel titles, descriptions, and
//! waypoint names are untrusted user content headed for a browser.
//!
//! ## Fixed Page Counts, No Reflow
//!
//! Generators declare their page counts instead of measuring text: a
//! travel is always a photo page plus a content page, a map or gallery is
//! one page or absent. Print CSS clips overflow. This keeps
//! `estimate_page_count` exact, which the table of contents depends on.
//!
//! ## Infallible Builder
//!
//! The document builder never returns errors: mutating a missing page or
//! block reports `false`/`None` so editor callers can chain operations
//! freely. Anything that would actually throw is a bug, not an input
//! condition.
//!
//! ## Soft Degradation in Generators
//!
//! Only one condition hard-fails generation: a per-travel generator
//! invoked without its travel. Missing images, invalid coordinates, and
//! failed map-snapshot fetches all degrade to local fallbacks so one bad
//! record never loses a whole book.

pub mod builder;
pub mod document;
pub mod export;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod settings;
pub mod theme;
pub mod types;
