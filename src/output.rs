//! CLI output formatting.
//!
//! Pure formatting functions returning lines for `main` to print, so they
//! stay testable without capturing stdout.

use crate::export::PAGE_MARKER;
use crate::types::Travel;

/// Summary printed after a successful book build.
pub fn format_build_summary(travels: &[Travel], html: &str, output: &str) -> Vec<String> {
    let pages = html.matches(PAGE_MARKER).count();
    let mut lines = vec![format!(
        "Generated {} page{} from {} travel{}",
        pages,
        plural(pages),
        travels.len(),
        plural(travels.len()),
    )];
    for travel in travels {
        lines.push(format!(
            "  {} ({} photos, {} waypoints)",
            travel.title,
            travel.photos.len(),
            travel.waypoints.len()
        ));
    }
    lines.push(format!("Written to {output} ({} bytes)", html.len()));
    lines
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
