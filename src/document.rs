//! The editable document model: a book as pages of positioned blocks.
//!
//! These types are plain serializable data. All mutation goes through
//! [`crate::builder::DocumentBuilder`]; nothing here enforces invariants on
//! its own. The persisted form is JSON with RFC 3339 timestamps and a
//! monotonic `version` counter.
//!
//! Page numbering is always derived from array order (`pages[i].page_number
//! == i + 1`); numbering embedded in a loaded payload is discarded by the
//! builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Physical page format. Dimensions are the portrait width/height in mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    A5,
    Letter,
    /// 210 × 210 mm photo-book square.
    Square210,
}

impl PageFormat {
    /// Portrait (width, height) in millimetres.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageFormat::A4 => (210.0, 297.0),
            PageFormat::A5 => (148.0, 210.0),
            PageFormat::Letter => (215.9, 279.4),
            PageFormat::Square210 => (210.0, 210.0),
        }
    }
}

/// Page orientation; swaps effective width/height when `Landscape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Effective (width, height) in mm after applying orientation.
pub fn oriented_dimensions_mm(format: PageFormat, orientation: Orientation) -> (f64, f64) {
    let (w, h) = format.dimensions_mm();
    match orientation {
        Orientation::Portrait => (w, h),
        Orientation::Landscape => (h, w),
    }
}

/// Unit for block coordinates. Percent blocks are relative to the page and
/// survive format changes untouched; mm blocks are rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionUnit {
    #[default]
    Mm,
    Percent,
}

/// Position and size of a block on its page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: PositionUnit,
}

impl Default for BlockPosition {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 20.0,
            unit: PositionUnit::Mm,
        }
    }
}

/// Content kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading,
    Image,
    Divider,
}

/// Visual style attributes. All optional — unset fields inherit from the
/// theme at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A positioned content unit inside a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    /// Payload: text for paragraph/heading, URL for image, empty for divider.
    pub content: String,
    #[serde(default)]
    pub style: BlockStyle,
    pub position: BlockPosition,
}

/// Page margins in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 15.0,
            right: 15.0,
            bottom: 15.0,
            left: 15.0,
        }
    }
}

/// One slot in the editable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    /// 1-based, always contiguous and derived from array order.
    pub page_number: usize,
    pub format: PageFormat,
    pub orientation: Orientation,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub margins: Margins,
}

/// The whole editable book document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Theme preset name, resolved to tokens at export time.
    pub theme_name: String,
    pub format: PageFormat,
    pub orientation: Orientation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every builder mutation.
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_dimensions() {
        assert_eq!(PageFormat::A4.dimensions_mm(), (210.0, 297.0));
        assert_eq!(PageFormat::A5.dimensions_mm(), (148.0, 210.0));
        assert_eq!(PageFormat::Square210.dimensions_mm(), (210.0, 210.0));
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let (w, h) = oriented_dimensions_mm(PageFormat::A4, Orientation::Landscape);
        assert_eq!((w, h), (297.0, 210.0));
    }

    #[test]
    fn portrait_keeps_dimensions() {
        let (w, h) = oriented_dimensions_mm(PageFormat::Letter, Orientation::Portrait);
        assert_eq!((w, h), (215.9, 279.4));
    }

    #[test]
    fn block_position_default_is_mm() {
        assert_eq!(BlockPosition::default().unit, PositionUnit::Mm);
    }

    #[test]
    fn document_json_round_trip() {
        let doc = Document {
            id: "doc-1".to_string(),
            title: "My Book".to_string(),
            pages: vec![Page {
                id: "page-1".to_string(),
                page_number: 1,
                format: PageFormat::A4,
                orientation: Orientation::Portrait,
                blocks: vec![Block {
                    id: "block-1".to_string(),
                    kind: BlockKind::Paragraph,
                    content: "hello".to_string(),
                    style: BlockStyle::default(),
                    position: BlockPosition::default(),
                }],
                margins: Margins::default(),
            }],
            theme_name: "classic".to_string(),
            format: PageFormat::A4,
            orientation: Orientation::Portrait,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            version: 1,
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn format_serializes_lowercase() {
        let json = serde_json::to_string(&PageFormat::Square210).unwrap();
        assert_eq!(json, "\"square210\"");
    }
}
