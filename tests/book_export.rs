//! End-to-end export: travel records through the pipeline and the print
//! wrapper, exercising the public API the way the CLI does.

use travelbook::export::{self, ExportError};
use travelbook::generate::{SnapshotError, SnapshotFetcher};
use travelbook::pipeline::generate_book_with;
use travelbook::settings::ExportSettings;
use travelbook::theme::resolve_theme;
use travelbook::types::{Photo, PhotoCaption, Recommendation, Travel, TravelBlock, Waypoint};

/// Offline stand-in for the snapshot service.
struct StubSnapshot;

impl SnapshotFetcher for StubSnapshot {
    fn render(&self, _waypoints: &[Waypoint]) -> Result<String, SnapshotError> {
        Ok("data:image/png;base64,AAAA".to_string())
    }
}

fn travel(id: &str, title: &str, date: &str) -> Travel {
    Travel {
        id: id.to_string(),
        title: title.to_string(),
        description: Some("A wonderful trip".to_string()),
        country: Some("Japan".to_string()),
        year: Some(2025),
        start_date: date.parse().ok(),
        day_count: Some(10),
        cover_image: Some("https://cdn.example.com/cover.jpg".to_string()),
        content_blocks: vec![
            TravelBlock::Heading {
                text: "Day 1".to_string(),
            },
            TravelBlock::Paragraph {
                text: "We arrived in *Tokyo*.".to_string(),
            },
        ],
        photos: vec![Photo {
            url: "https://cdn.example.com/p1.jpg".to_string(),
            caption: Some(PhotoCaption {
                text: Some("Shibuya crossing".to_string()),
                ..Default::default()
            }),
        }],
        waypoints: vec![Waypoint {
            name: "Tokyo".to_string(),
            lat: Some(35.68),
            lng: Some(139.69),
        }],
        recommendations: vec![Recommendation {
            title: "Ichiran".to_string(),
            category: Some("Food".to_string()),
            note: None,
        }],
    }
}

fn export(travels: &[Travel], settings: &ExportSettings) -> String {
    let body = generate_book_with(travels, settings, &StubSnapshot).unwrap();
    export::wrap_for_print(
        &body,
        "Our Travels",
        &resolve_theme(&settings.theme),
        settings.page_format,
        settings.orientation,
        settings.language.code(),
    )
    .unwrap()
}

#[test]
fn full_export_produces_a_complete_printable_book() {
    let travels = vec![
        travel("t1", "Japan in Spring", "2025-04-01"),
        travel("t2", "Alps Hiking", "2024-07-15"),
    ];
    let html = export(&travels, &ExportSettings::default());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Our Travels</title>"));

    // Cover and TOC first, then both travels in date order.
    let cover = html.find("cover-page").unwrap();
    let toc = html.find("toc-page").unwrap();
    let alps = html.find("Alps Hiking").unwrap();
    let japan = html.rfind("Japan in Spring").unwrap();
    assert!(cover < toc);
    assert!(alps < japan);

    // Each travel contributes its fixed pair plus map, gallery, and
    // recommendations; with cover and TOC that is 12 page containers.
    assert_eq!(html.matches(export::PAGE_MARKER).count(), 12);
    for n in 1..=12 {
        assert!(
            html.contains(&format!(r#"data-page-number="{n}""#)),
            "missing page {n}"
        );
    }
}

#[test]
fn page_numbers_stay_contiguous_when_sections_are_disabled() {
    let travels = vec![travel("t1", "Japan in Spring", "2025-04-01")];
    let settings = ExportSettings {
        include_map: false,
        include_recommendations: false,
        ..Default::default()
    };
    let html = export(&travels, &settings);

    assert!(!html.contains("map-page"));
    assert!(!html.contains("recommendations-page"));
    // Cover, TOC, travel pair, gallery.
    assert_eq!(html.matches(export::PAGE_MARKER).count(), 5);
    assert!(html.contains(r#"data-page-number="5""#));
    assert!(!html.contains(r#"data-page-number="6""#));
}

#[test]
fn user_content_is_escaped_end_to_end() {
    let mut t = travel("t1", "<script>alert('x')</script>", "2025-04-01");
    t.waypoints[0].name = "<img src=x onerror=alert(1)>".to_string();
    let html = export(&[t], &ExportSettings::default());

    assert!(!html.contains("<script>alert"));
    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn snapshot_image_is_inlined_on_the_map_page() {
    let travels = vec![travel("t1", "Japan in Spring", "2025-04-01")];
    let html = export(&travels, &ExportSettings::default());
    assert!(html.contains("data:image/png;base64,AAAA"));
    assert!(!html.contains("map-placeholder"));
}

#[test]
fn wrapper_rejects_an_empty_book() {
    let settings = ExportSettings {
        include_toc: false,
        ..Default::default()
    };
    let body = generate_book_with(&[], &settings, &StubSnapshot).unwrap();
    let result = export::wrap_for_print(
        &body,
        "Empty",
        &resolve_theme("classic"),
        settings.page_format,
        settings.orientation,
        "en",
    );
    assert!(matches!(result, Err(ExportError::EmptyDocument)));
}
