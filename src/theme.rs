//! Theme resolution: named presets become one immutable token bundle.
//!
//! A theme is resolved exactly once per export and threaded read-only
//! through every generator call. Generators never compute colors, fonts, or
//! spacing themselves — they read token fields — so swapping themes never
//! touches generator logic.

use log::warn;
use serde::{Deserialize, Serialize};

/// Fully resolved design tokens for one export run. Never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Preset name this bundle was resolved from.
    pub name: String,
    pub colors: ThemeColors,
    pub typography: Typography,
    pub spacing: SpacingScale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    /// Card/info-block surface color.
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    pub accent: String,
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub body_font: String,
    pub heading_font: String,
    /// Base body size in pt.
    pub base_size: f64,
    /// Heading sizes in pt, h1 → h3.
    pub heading_sizes: [f64; 3],
    pub line_height: f64,
}

/// Spacing steps in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingScale {
    pub xs: f64,
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
}

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            xs: 2.0,
            sm: 4.0,
            md: 8.0,
            lg: 16.0,
            xl: 24.0,
        }
    }
}

/// Resolve a preset name into a token bundle.
///
/// The preset set is closed: {classic, modern, minimal, warm}. An unknown
/// name degrades to classic rather than failing the export.
pub fn resolve_theme(name: &str) -> Theme {
    match name {
        "classic" => classic(),
        "modern" => modern(),
        "minimal" => minimal(),
        "warm" => warm(),
        other => {
            warn!("unknown theme '{other}', falling back to classic");
            classic()
        }
    }
}

fn classic() -> Theme {
    Theme {
        name: "classic".to_string(),
        colors: ThemeColors {
            background: "#ffffff".to_string(),
            surface: "#f7f4ee".to_string(),
            text: "#1f1f1f".to_string(),
            text_muted: "#6b6b6b".to_string(),
            accent: "#8c6f46".to_string(),
            border: "#d9d2c4".to_string(),
        },
        typography: Typography {
            body_font: "'Georgia', 'Times New Roman', serif".to_string(),
            heading_font: "'Playfair Display', Georgia, serif".to_string(),
            base_size: 11.0,
            heading_sizes: [28.0, 18.0, 14.0],
            line_height: 1.5,
        },
        spacing: SpacingScale::default(),
    }
}

fn modern() -> Theme {
    Theme {
        name: "modern".to_string(),
        colors: ThemeColors {
            background: "#ffffff".to_string(),
            surface: "#f2f4f7".to_string(),
            text: "#111827".to_string(),
            text_muted: "#6b7280".to_string(),
            accent: "#2563eb".to_string(),
            border: "#e5e7eb".to_string(),
        },
        typography: Typography {
            body_font: "'Inter', 'Helvetica Neue', sans-serif".to_string(),
            heading_font: "'Inter', 'Helvetica Neue', sans-serif".to_string(),
            base_size: 10.5,
            heading_sizes: [30.0, 17.0, 13.0],
            line_height: 1.6,
        },
        spacing: SpacingScale::default(),
    }
}

fn minimal() -> Theme {
    Theme {
        name: "minimal".to_string(),
        colors: ThemeColors {
            background: "#ffffff".to_string(),
            surface: "#fafafa".to_string(),
            text: "#222222".to_string(),
            text_muted: "#888888".to_string(),
            accent: "#222222".to_string(),
            border: "#eeeeee".to_string(),
        },
        typography: Typography {
            body_font: "'Helvetica Neue', Arial, sans-serif".to_string(),
            heading_font: "'Helvetica Neue', Arial, sans-serif".to_string(),
            base_size: 10.0,
            heading_sizes: [24.0, 15.0, 12.0],
            line_height: 1.45,
        },
        spacing: SpacingScale {
            xs: 2.0,
            sm: 4.0,
            md: 6.0,
            lg: 12.0,
            xl: 20.0,
        },
    }
}

fn warm() -> Theme {
    Theme {
        name: "warm".to_string(),
        colors: ThemeColors {
            background: "#fdf9f3".to_string(),
            surface: "#f6ead8".to_string(),
            text: "#3d2f23".to_string(),
            text_muted: "#8a7663".to_string(),
            accent: "#c2703d".to_string(),
            border: "#e6d5bd".to_string(),
        },
        typography: Typography {
            body_font: "'Lora', Georgia, serif".to_string(),
            heading_font: "'Lora', Georgia, serif".to_string(),
            base_size: 11.0,
            heading_sizes: [27.0, 17.0, 13.5],
            line_height: 1.55,
        },
        spacing: SpacingScale::default(),
    }
}

/// Render the token bundle as CSS custom properties for the export shell.
pub fn theme_css(theme: &Theme) -> String {
    format!(
        r#":root {{
    --color-bg: {bg};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {muted};
    --color-accent: {accent};
    --color-border: {border};
    --font-body: {body_font};
    --font-heading: {heading_font};
    --size-base: {base}pt;
    --size-h1: {h1}pt;
    --size-h2: {h2}pt;
    --size-h3: {h3}pt;
    --line-height: {lh};
    --space-xs: {xs}mm;
    --space-sm: {sm}mm;
    --space-md: {md}mm;
    --space-lg: {lg}mm;
    --space-xl: {xl}mm;
}}"#,
        bg = theme.colors.background,
        surface = theme.colors.surface,
        text = theme.colors.text,
        muted = theme.colors.text_muted,
        accent = theme.colors.accent,
        border = theme.colors.border,
        body_font = theme.typography.body_font,
        heading_font = theme.typography.heading_font,
        base = theme.typography.base_size,
        h1 = theme.typography.heading_sizes[0],
        h2 = theme.typography.heading_sizes[1],
        h3 = theme.typography.heading_sizes[2],
        lh = theme.typography.line_height,
        xs = theme.spacing.xs,
        sm = theme.spacing.sm,
        md = theme.spacing.md,
        lg = theme.spacing.lg,
        xl = theme.spacing.xl,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_presets_resolve_by_name() {
        for name in ["classic", "modern", "minimal", "warm"] {
            assert_eq!(resolve_theme(name).name, name);
        }
    }

    #[test]
    fn unknown_preset_falls_back_to_classic() {
        let theme = resolve_theme("vaporwave");
        assert_eq!(theme.name, "classic");
    }

    #[test]
    fn css_includes_all_token_groups() {
        let css = theme_css(&resolve_theme("modern"));
        assert!(css.contains("--color-bg:"));
        assert!(css.contains("--color-accent: #2563eb"));
        assert!(css.contains("--font-body:"));
        assert!(css.contains("--size-h1: 30pt"));
        assert!(css.contains("--space-md: 8mm"));
    }

    #[test]
    fn themes_differ_in_tokens() {
        let a = resolve_theme("classic");
        let b = resolve_theme("minimal");
        assert_ne!(a.colors.accent, b.colors.accent);
        assert_ne!(a.typography.body_font, b.typography.body_font);
    }
}
