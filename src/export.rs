//! The export wrapper: turns generated book HTML into a printable document.
//!
//! The generation layer's contract toward this wrapper is minimal: a
//! non-empty result must contain at least one `book-page` container. An
//! empty book or one without page markers is a hard precondition failure —
//! it means a caller skipped the pipeline or the pipeline is broken, and
//! wrapping it would produce a blank printout.
//!
//! The wrapper adds what interactive preview needs: theme CSS custom
//! properties, the print stylesheet, a non-printing toolbar, and a preload
//! script that gates `window.print()` until every image in the document
//! has settled (loaded or errored) or 20 seconds elapse.

use crate::document::{Orientation, PageFormat, oriented_dimensions_mm};
use crate::theme::{Theme, theme_css};
use maud::{DOCTYPE, PreEscaped, html};
use thiserror::Error;

const PRINT_CSS: &str = include_str!("../static/print.css");
const PRELOAD_JS: &str = include_str!("../static/preload.js");

/// Marker the wrapper requires in generated book HTML.
pub const PAGE_MARKER: &str = "class=\"book-page";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("generated document is empty")]
    EmptyDocument,
    #[error("generated document contains no book-page containers")]
    NoPageMarkers,
}

/// Wrap generated book HTML in a complete printable document.
pub fn wrap_for_print(
    body: &str,
    title: &str,
    theme: &Theme,
    format: PageFormat,
    orientation: Orientation,
    lang: &str,
) -> Result<String, ExportError> {
    if body.trim().is_empty() {
        return Err(ExportError::EmptyDocument);
    }
    if !body.contains(PAGE_MARKER) {
        return Err(ExportError::NoPageMarkers);
    }

    let (width_mm, height_mm) = oriented_dimensions_mm(format, orientation);
    let page_css = format!(
        "@page {{ size: {width_mm}mm {height_mm}mm; margin: 0; }}\n:root {{ --page-width: {width_mm}mm; --page-height: {height_mm}mm; }}"
    );
    let css = format!("{}\n{}\n{}", theme_css(theme), page_css, PRINT_CSS);

    let doc = html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                div.print-toolbar {
                    button data-print-button { "Print" }
                }
                (PreEscaped(body.to_string()))
                script { (PreEscaped(PRELOAD_JS)) }
            }
        }
    };
    Ok(doc.into_string())
}
