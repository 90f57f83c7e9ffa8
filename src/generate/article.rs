//! Standalone article rendering.
//!
//! Articles are exported outside the book pipeline: one article becomes one
//! complete, self-contained printable HTML document. Long articles are
//! never truncated — multi-page output is expressed as repeated page
//! containers, split at top-level heading boundaries (a layout rule, not a
//! character count).

use super::{book_page, markdown};
use crate::generate::gallery::photo_grid;
use crate::settings::{ExportSettings, Language};
use crate::theme::{Theme, theme_css};
use crate::types::{Article, ArticleSection, Photo, proxied_image_url};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const ARTICLE_IMAGE_WIDTH: u32 = 1000;

/// Render one article as a complete printable HTML document.
pub fn render_article(article: &Article, settings: &ExportSettings, theme: &Theme) -> String {
    let css = theme_css(theme);
    let pages = article_pages(article, settings);

    let doc = html! {
        (DOCTYPE)
        html lang=(settings.language.code()) {
            head {
                meta charset="UTF-8";
                title { (article.title) }
                style { (PreEscaped(css)) }
            }
            body.article-export {
                @for page in &pages {
                    (page)
                }
            }
        }
    };
    doc.into_string()
}

/// Split sections into page containers at top-level heading boundaries.
fn article_pages(article: &Article, settings: &ExportSettings) -> Vec<Markup> {
    let mut pages = Vec::new();
    let mut page_number = 1;

    if article.sections.is_empty() {
        let content = html! {
            h1 { (article.title) }
            p.article-empty-notice { (empty_notice(settings.language)) }
        };
        pages.push(book_page("article-page", page_number, content));
        page_number += 1;
    } else {
        for (i, group) in section_groups(&article.sections).into_iter().enumerate() {
            let content = html! {
                @if i == 0 {
                    h1 { (article.title) }
                }
                @for section in group {
                    (section_markup(section))
                }
            };
            pages.push(book_page("article-page", page_number, content));
            page_number += 1;
        }
    }

    if settings.include_map && !article.waypoints.is_empty() {
        let content = html! {
            h2 { "Route" }
            ol.waypoint-list {
                @for wp in &article.waypoints {
                    li.waypoint { (wp.name) }
                }
            }
        };
        pages.push(book_page("article-map-page", page_number, content));
        page_number += 1;
    }

    if settings.include_recommendations && !article.recommendations.is_empty() {
        let content = html! {
            h2 { "Recommendations" }
            ul.recommendation-list {
                @for rec in &article.recommendations {
                    li.recommendation {
                        span.recommendation-title { (rec.title) }
                        @if let Some(note) = &rec.note {
                            p.recommendation-note { (note) }
                        }
                    }
                }
            }
        };
        pages.push(book_page("article-recommendations-page", page_number, content));
    }

    pages
}

/// Group sections into pages: a level-1 heading opens a new page, except
/// when it is the very first section.
fn section_groups(sections: &[ArticleSection]) -> Vec<Vec<&ArticleSection>> {
    let mut groups: Vec<Vec<&ArticleSection>> = Vec::new();
    for section in sections {
        let breaks_page = matches!(section, ArticleSection::Heading { level: 1, .. });
        if groups.is_empty() || (breaks_page && !groups.last().is_some_and(Vec::is_empty)) {
            groups.push(Vec::new());
        }
        groups.last_mut().expect("just pushed").push(section);
    }
    groups
}

fn section_markup(section: &ArticleSection) -> Markup {
    match section {
        ArticleSection::Heading { text, level } => heading(text, *level),
        ArticleSection::Paragraph { text } => html! {
            div.article-paragraph { (markdown(text)) }
        },
        ArticleSection::List { items } => html! {
            ul.article-list {
                @for item in items {
                    li { (item) }
                }
            }
        },
        ArticleSection::InfoBlock { title, text } => html! {
            aside.article-info-block {
                @if let Some(title) = title {
                    h4 { (title) }
                }
                p { (text) }
            }
        },
        ArticleSection::Image { url, caption } => html! {
            figure.article-image {
                img src=(proxied_image_url(url, ARTICLE_IMAGE_WIDTH)) alt=(caption.as_deref().unwrap_or(""));
                @if let Some(caption) = caption {
                    figcaption { (caption) }
                }
            }
        },
        ArticleSection::ImageGallery { urls } => {
            let photos: Vec<Photo> = urls
                .iter()
                .map(|url| Photo {
                    url: url.clone(),
                    caption: None,
                })
                .collect();
            // Article galleries reuse the grid layout with stock settings.
            photo_grid(&photos, &crate::settings::GallerySettings::default())
        }
    }
}

fn heading(text: &str, level: u8) -> Markup {
    match level {
        1 => html! { h2.article-heading { (text) } },
        2 => html! { h3.article-heading { (text) } },
        _ => html! { h4.article-heading { (text) } },
    }
}

/// Localized notice for an article with no sections.
fn empty_notice(language: Language) -> &'static str {
    match language {
        Language::En => "This article has no content yet.",
        Language::De => "Dieser Artikel hat noch keinen Inhalt.",
        Language::Fr => "Cet article n'a pas encore de contenu.",
        Language::Es => "Este artículo aún no tiene contenido.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::resolve_theme;

    fn article(sections: Vec<ArticleSection>) -> Article {
        Article {
            id: "a-1".to_string(),
            title: "Three Days in Lisbon".to_string(),
            sections,
            waypoints: vec![],
            recommendations: vec![],
        }
    }

    fn render(article: &Article) -> String {
        render_article(article, &ExportSettings::default(), &resolve_theme("classic"))
    }

    #[test]
    fn document_is_complete_and_localized() {
        let settings = ExportSettings {
            language: Language::De,
            ..Default::default()
        };
        let out = render_article(&article(vec![]), &settings, &resolve_theme("classic"));
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains(r#"<html lang="de">"#));
        assert!(out.contains("<style>"));
    }

    #[test]
    fn empty_sections_emit_localized_notice() {
        let out = render(&article(vec![]));
        assert!(out.contains("This article has no content yet."));
        assert!(out.contains("book-page article-page"));

        let settings = ExportSettings {
            language: Language::De,
            ..Default::default()
        };
        let out = render_article(&article(vec![]), &settings, &resolve_theme("classic"));
        assert!(out.contains("noch keinen Inhalt"));
    }

    #[test]
    fn all_section_kinds_render() {
        let out = render(&article(vec![
            ArticleSection::Heading {
                text: "Arrival".to_string(),
                level: 2,
            },
            ArticleSection::Paragraph {
                text: "Landed at **noon**.".to_string(),
            },
            ArticleSection::List {
                items: vec!["Tram 28".to_string(), "Alfama".to_string()],
            },
            ArticleSection::InfoBlock {
                title: Some("Tip".to_string()),
                text: "Buy a day pass.".to_string(),
            },
            ArticleSection::Image {
                url: "https://cdn.example.com/tram.jpg".to_string(),
                caption: Some("Tram 28".to_string()),
            },
            ArticleSection::ImageGallery {
                urls: vec!["https://cdn.example.com/g1.jpg".to_string()],
            },
        ]));
        assert!(out.contains("Arrival"));
        assert!(out.contains("<strong>noon</strong>"));
        assert!(out.contains("Alfama"));
        assert!(out.contains("article-info-block"));
        assert!(out.contains("img-proxy/w1000"));
        assert!(out.contains("photo-grid"));
    }

    #[test]
    fn level_one_headings_open_new_pages() {
        let out = render(&article(vec![
            ArticleSection::Heading {
                text: "Day 1".to_string(),
                level: 1,
            },
            ArticleSection::Paragraph {
                text: "First day.".to_string(),
            },
            ArticleSection::Heading {
                text: "Day 2".to_string(),
                level: 1,
            },
            ArticleSection::Paragraph {
                text: "Second day.".to_string(),
            },
        ]));
        assert_eq!(out.matches("book-page article-page").count(), 2);
    }

    #[test]
    fn long_text_is_never_truncated() {
        let long = "word ".repeat(20_000);
        let out = render(&article(vec![ArticleSection::Paragraph { text: long }]));
        assert!(out.matches("word").count() >= 20_000);
    }

    #[test]
    fn map_and_recommendations_honor_toggles() {
        let mut art = article(vec![ArticleSection::Paragraph {
            text: "Body".to_string(),
        }]);
        art.waypoints = vec![crate::types::Waypoint {
            name: "Belém".to_string(),
            lat: None,
            lng: None,
        }];
        art.recommendations = vec![crate::types::Recommendation {
            title: "Pastéis de Belém".to_string(),
            category: None,
            note: None,
        }];

        let on = render(&art);
        assert!(on.contains("article-map-page"));
        assert!(on.contains("article-recommendations-page"));

        let settings = ExportSettings {
            include_map: false,
            include_recommendations: false,
            ..Default::default()
        };
        let off = render_article(&art, &settings, &resolve_theme("classic"));
        assert!(!off.contains("article-map-page"));
        assert!(!off.contains("article-recommendations-page"));
    }

    #[test]
    fn section_text_is_escaped() {
        let out = render(&article(vec![ArticleSection::List {
            items: vec!["<script>alert(1)</script>".to_string()],
        }]));
        assert!(!out.contains("<script>alert"));
        assert!(out.contains("&lt;script&gt;"));
    }
}
