//! Style configuration.
//!
//! A single immutable [`Style`] is constructed at startup — from the
//! embedded classic theme or a user YAML file — and shared read-only into
//! the window tree.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// The built-in style, embedded at compile time.
pub const CLASSIC_YAML: &str = include_str!("../themes/classic.yaml");

/// RGBA color (0-255 per channel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to ARGB u32 for the pixel buffer.
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA".
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim_start_matches('#');
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| anyhow!("invalid color {s:?}: {e}"))
        };
        match hex.len() {
            6 => Ok(Color { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: 255 }),
            8 => Ok(Color { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
            _ => Err(anyhow!("invalid color {s:?}: expected #RRGGBB or #RRGGBBAA")),
        }
    }
}

/// Raw style data as parsed from YAML.
#[derive(Debug, Clone, Deserialize)]
struct StyleData {
    #[serde(default = "default_frame_px")]
    frame_px: i32,
    #[serde(default = "default_text_pad_px")]
    text_pad_px: i32,
    #[serde(default = "default_cursor_width_px")]
    cursor_width_px: i32,
    #[serde(default)]
    font_path: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    font_size: f32,
    #[serde(default = "default_column_tag_text")]
    column_tag_text: String,
    #[serde(default = "default_sheet_tag_text")]
    sheet_tag_text: String,
    colors: ColorData,
}

#[derive(Debug, Clone, Deserialize)]
struct ColorData {
    foreground: String,
    column_background: String,
    tag_background: String,
    body_background: String,
    highlight1: String,
    highlight2: String,
    highlight3: String,
    frame: String,
}

fn default_frame_px() -> i32 {
    1
}
fn default_text_pad_px() -> i32 {
    7
}
fn default_cursor_width_px() -> i32 {
    4
}
fn default_font_size() -> f32 {
    11.0
}
fn default_column_tag_text() -> String {
    "AddCol DelCol Add".to_string()
}
fn default_sheet_tag_text() -> String {
    " | Del".to_string()
}

/// Validated style constants, consumed read-only by the window tree.
#[derive(Debug, Clone)]
pub struct Style {
    /// Pixel width of the lines drawn between columns and rows.
    pub frame_px: i32,
    /// Padding between a text box edge and its text.
    pub text_pad_px: i32,
    /// Pixel width of the caret bar.
    pub cursor_width_px: i32,
    pub font_path: Option<PathBuf>,
    /// Font size in points.
    pub font_size: f32,
    pub fg: Color,
    pub col_bg: Color,
    pub tag_bg: Color,
    pub body_bg: Color,
    /// Selection backgrounds for 1-, 2-, and 3-click highlights.
    pub hi: [Color; 3],
    pub frame: Color,
    pub column_tag_text: String,
    pub sheet_tag_text: String,
}

impl Style {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let data: StyleData = serde_yaml::from_str(yaml).context("failed to parse style")?;
        Ok(Style {
            frame_px: data.frame_px,
            text_pad_px: data.text_pad_px,
            cursor_width_px: data.cursor_width_px,
            font_path: data.font_path,
            font_size: data.font_size,
            fg: Color::from_hex(&data.colors.foreground)?,
            col_bg: Color::from_hex(&data.colors.column_background)?,
            tag_bg: Color::from_hex(&data.colors.tag_background)?,
            body_bg: Color::from_hex(&data.colors.body_background)?,
            hi: [
                Color::from_hex(&data.colors.highlight1)?,
                Color::from_hex(&data.colors.highlight2)?,
                Color::from_hex(&data.colors.highlight3)?,
            ],
            frame: Color::from_hex(&data.colors.frame)?,
            column_tag_text: data.column_tag_text,
            sheet_tag_text: data.sheet_tag_text,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read style file {}", path.display()))?;
        Self::from_yaml(&yaml)
    }

    /// Load a user style file, or the embedded classic style.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_yaml(CLASSIC_YAML),
        }
    }

    /// Selection background for a 1/2/3 click count.
    pub fn highlight(&self, count: u8) -> Color {
        self.hi[(count.clamp(1, 3) - 1) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_style_loads() {
        let style = Style::load(None).unwrap();
        assert_eq!(style.frame_px, 1);
        assert_eq!(style.text_pad_px, 7);
        assert_eq!(style.tag_bg, Color::rgb(0xCF, 0xE0, 0xF7));
        assert_eq!(style.body_bg, Color::rgb(0xFA, 0xF0, 0xE6));
        assert_eq!(style.column_tag_text, "AddCol DelCol Add");
    }

    #[test]
    fn highlight_clamps_count() {
        let style = Style::load(None).unwrap();
        assert_eq!(style.highlight(1), style.hi[0]);
        assert_eq!(style.highlight(3), style.hi[2]);
        assert_eq!(style.highlight(0), style.hi[0]);
        assert_eq!(style.highlight(9), style.hi[2]);
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(Color::from_hex("#12").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert_eq!(Color::from_hex("#102834").unwrap(), Color::rgb(0x10, 0x28, 0x34));
    }

    #[test]
    fn user_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "frame_px: 2\ncolors:\n  foreground: \"#000000\"\n  column_background: \"#111111\"\n  \
             tag_background: \"#222222\"\n  body_background: \"#333333\"\n  highlight1: \"#444444\"\n  \
             highlight2: \"#555555\"\n  highlight3: \"#666666\"\n  frame: \"#777777\"\n"
        )
        .unwrap();
        let style = Style::load(Some(file.path())).unwrap();
        assert_eq!(style.frame_px, 2);
        assert_eq!(style.text_pad_px, 7); // defaulted
        assert_eq!(style.fg, Color::rgb(0, 0, 0));
    }
}
