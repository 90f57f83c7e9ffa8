//! Export settings module.
//!
//! Handles loading, validating, and merging `settings.toml` files. The
//! option set is closed: unknown keys are rejected to catch typos early,
//! and user files are sparse — they override only the values they name,
//! on top of stock defaults.
//!
//! ## Settings File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! theme = "classic"             # classic | modern | minimal | warm
//! page_format = "a4"            # a4 | a5 | letter | square210
//! orientation = "portrait"      # portrait | landscape
//! sort_order = "start_date_asc" # start_date_asc | start_date_desc | title
//! language = "en"               # en | de | fr | es
//!
//! include_toc = true
//! include_map = true
//! include_gallery = true
//! include_recommendations = true
//! include_checklists = false
//!
//! [gallery]
//! columns = 3                   # 1-6 equal-width grid tracks
//! spacing = "normal"            # compact | normal | spacious
//! caption_position = "bottom"   # top | bottom | overlay
//! border_style = "none"         # none | thin | thick | polaroid
//! # background = "#f5f0e8"      # optional gallery page background
//! ```

use crate::document::{Orientation, PageFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Settings validation error: {0}")]
    Validation(String),
}

/// The closed set of export options.
///
/// All fields have stock defaults; user files need only name what they
/// override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Theme preset name (resolved once per export).
    pub theme: String,
    pub page_format: PageFormat,
    pub orientation: Orientation,
    pub sort_order: SortOrder,
    pub language: Language,
    pub include_toc: bool,
    pub include_map: bool,
    pub include_gallery: bool,
    pub include_recommendations: bool,
    /// Accepted and round-tripped; no checklist page type exists in the
    /// current generator set, so the flag has no rendering effect yet.
    pub include_checklists: bool,
    pub gallery: GallerySettings,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            theme: "classic".to_string(),
            page_format: PageFormat::A4,
            orientation: Orientation::Portrait,
            sort_order: SortOrder::StartDateAsc,
            language: Language::En,
            include_toc: true,
            include_map: true,
            include_gallery: true,
            include_recommendations: true,
            include_checklists: false,
            gallery: GallerySettings::default(),
        }
    }
}

impl ExportSettings {
    /// Validate values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=6).contains(&self.gallery.columns) {
            return Err(SettingsError::Validation(
                "gallery.columns must be 1-6".into(),
            ));
        }
        Ok(())
    }
}

/// Order travels appear in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    StartDateAsc,
    StartDateDesc,
    Title,
}

/// Export language, used for the document `lang` attribute and fallback
/// copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
    Es,
}

impl Language {
    /// BCP 47 tag for the HTML `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
        }
    }
}

/// Grid gallery layout options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GallerySettings {
    /// Equal-width grid track count.
    pub columns: u32,
    pub spacing: SpacingPreset,
    pub caption_position: CaptionPosition,
    pub border_style: BorderStyle,
    /// Optional gallery page background color (CSS value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            columns: 3,
            spacing: SpacingPreset::Normal,
            caption_position: CaptionPosition::Bottom,
            border_style: BorderStyle::None,
            background: None,
        }
    }
}

/// Fixed gap presets between gallery items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingPreset {
    Compact,
    #[default]
    Normal,
    Spacious,
}

impl SpacingPreset {
    /// Gap in px units.
    pub fn gap(self) -> u32 {
        match self {
            SpacingPreset::Compact => 8,
            SpacingPreset::Normal => 16,
            SpacingPreset::Spacious => 24,
        }
    }
}

/// Where a photo's caption renders relative to the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionPosition {
    Top,
    #[default]
    Bottom,
    /// Absolutely positioned over the photo with a gradient scrim.
    Overlay,
}

/// Closed border-style set for gallery photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
    Thick,
    /// 12px white border plus drop shadow.
    Polaroid,
}

impl BorderStyle {
    /// Inline CSS for a photo container, empty for `None`.
    pub fn css(self) -> &'static str {
        match self {
            BorderStyle::None => "",
            BorderStyle::Thin => "border: 1px solid var(--color-border);",
            BorderStyle::Thick => "border: 3px solid var(--color-border);",
            BorderStyle::Polaroid => {
                "border: 12px solid #ffffff; box-shadow: 0 2px 8px rgba(0,0,0,0.25);"
            }
        }
    }
}

// =============================================================================
// Settings loading, merging, and validation
// =============================================================================

/// Returns the stock default settings as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ExportSettings::default()).expect("default settings must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `settings.toml` from a file path as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` on invalid TOML.
pub fn load_raw_settings(path: &Path) -> Result<Option<toml::Value>, SettingsError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_settings(overlay: Option<toml::Value>) -> Result<ExportSettings, SettingsError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let settings: ExportSettings = merged.try_into()?;
    settings.validate()?;
    Ok(settings)
}

/// Load export settings from a `settings.toml` path, falling back to stock
/// defaults when the file is absent.
pub fn load_settings(path: &Path) -> Result<ExportSettings, SettingsError> {
    let overlay = load_raw_settings(path)?;
    resolve_settings(overlay)
}

/// Returns a fully-commented stock `settings.toml` with all keys explained.
///
/// Used by the `gen-settings` CLI command.
pub fn stock_settings_toml() -> &'static str {
    r##"# Travelbook Export Settings
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Theme preset: classic | modern | minimal | warm
theme = "classic"

# Page format: a4 | a5 | letter | square210
page_format = "a4"

# Orientation: portrait | landscape
orientation = "portrait"

# Travel order in the book: start_date_asc | start_date_desc | title
sort_order = "start_date_asc"

# Export language (document lang attribute and fallback copy): en | de | fr | es
language = "en"

# Optional page types per travel
include_toc = true
include_map = true
include_gallery = true
include_recommendations = true

# Accepted for forward compatibility; no checklist page type renders yet.
include_checklists = false

# ---------------------------------------------------------------------------
# Photo gallery layout
# ---------------------------------------------------------------------------
[gallery]
# Equal-width grid track count (1-6).
columns = 3

# Gap preset between photos: compact (8px) | normal (16px) | spacious (24px)
spacing = "normal"

# Caption placement: top | bottom | overlay
caption_position = "bottom"

# Photo border: none | thin (1px) | thick (3px) | polaroid (12px white + shadow)
border_style = "none"

# Optional gallery page background (CSS color).
# background = "#f5f0e8"
"##
}
