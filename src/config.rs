use std::{fmt::Display, str::FromStr};

use ab_glyph::FontArc;
use image::{Rgba, RgbaImage};

use crate::error::{QRError, QRResult};

/// Canvas sizes offered by the size picker. Any other positive size is accepted as custom.
pub const PRESET_SIZES: [u32; 3] = [150, 250, 350];
pub const DEFAULT_SIZE: u32 = 250;

pub const DEFAULT_LOGO_SIZE: u8 = 20;
pub const DEFAULT_EMOJI_SIZE: u8 = 20;
pub const DEFAULT_CORNER_RADIUS: u32 = 20;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba(c.0)
    }
}

impl From<Rgba<u8>> for Color {
    fn from(p: Rgba<u8>) -> Self {
        Self(p.0)
    }
}

// Accepts #rrggbb and #rrggbbaa, leading '#' optional
impl FromStr for Color {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(QRError::InvalidColor(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| QRError::InvalidColor(s.to_string()))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?, a]))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

#[cfg(test)]
mod color_tests {
    use test_case::test_case;

    use super::Color;

    #[test_case("#000000", Color([0, 0, 0, 255]); "black")]
    #[test_case("#FFFFFF", Color([255, 255, 255, 255]); "white upper")]
    #[test_case("1e90ff", Color([30, 144, 255, 255]); "no hash")]
    #[test_case("#11223344", Color([17, 34, 51, 68]); "with alpha")]
    fn test_parse(s: &str, exp: Color) {
        assert_eq!(s.parse::<Color>().unwrap(), exp);
    }

    #[test_case(""; "empty")]
    #[test_case("#fff"; "short form")]
    #[test_case("#gg0000"; "not hex")]
    #[test_case("#ééé"; "non ascii")]
    fn test_parse_invalid(s: &str) {
        assert!(s.parse::<Color>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(30, 144, 255).to_string(), "#1e90ff");
        assert_eq!(Color([1, 2, 3, 4]).to_string(), "#01020304");
    }
}

// Style
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum StyleKind {
    #[default]
    None,
    Logo,
    Emoji,
    Colors,
    Rounded,
}

impl StyleKind {
    /// Unknown names, including the picker's "default" entry, select no style.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "logo" => Self::Logo,
            "emoji" => Self::Emoji,
            "colors" | "colours" => Self::Colors,
            "rounded" => Self::Rounded,
            _ => Self::None,
        }
    }
}

/// Shape of the white contrast pad painted beneath an emoji.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum PadShape {
    #[default]
    Square,
    Circle,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum ECLevel {
    L,
    M,
    Q,
    #[default]
    H,
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

// Customization config
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CustomizationConfig {
    style: StyleKind,
    size: u32,
    ec_level: ECLevel,
    fg: Color,
    bg: Color,
    logo: Option<RgbaImage>,
    logo_size: u8,
    emoji: Option<String>,
    emoji_size: u8,
    emoji_pad: PadShape,
    glyph_font: Option<FontArc>,
    corner_radius: u32,
}

impl Default for CustomizationConfig {
    fn default() -> Self {
        Self {
            style: StyleKind::None,
            size: DEFAULT_SIZE,
            ec_level: ECLevel::H,
            fg: Color::BLACK,
            bg: Color::WHITE,
            logo: None,
            logo_size: DEFAULT_LOGO_SIZE,
            emoji: None,
            emoji_size: DEFAULT_EMOJI_SIZE,
            emoji_pad: PadShape::Square,
            glyph_font: None,
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}

impl CustomizationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&mut self, style: StyleKind) -> &mut Self {
        self.style = style;
        self
    }

    pub fn size(&mut self, size: u32) -> &mut Self {
        self.size = size.max(1);
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn colors(&mut self, fg: Color, bg: Color) -> &mut Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn logo(&mut self, logo: RgbaImage) -> &mut Self {
        self.logo = Some(logo);
        self
    }

    pub fn clear_logo(&mut self) -> &mut Self {
        self.logo = None;
        self
    }

    pub fn logo_size(&mut self, percent: u8) -> &mut Self {
        self.logo_size = percent.clamp(1, 100);
        self
    }

    /// Empty or whitespace-only glyphs clear the selection.
    pub fn emoji(&mut self, glyph: impl Into<String>) -> &mut Self {
        let glyph = glyph.into();
        self.emoji = if glyph.trim().is_empty() { None } else { Some(glyph) };
        self
    }

    pub fn clear_emoji(&mut self) -> &mut Self {
        self.emoji = None;
        self
    }

    pub fn emoji_size(&mut self, percent: u8) -> &mut Self {
        self.emoji_size = percent.clamp(1, 100);
        self
    }

    pub fn emoji_pad(&mut self, shape: PadShape) -> &mut Self {
        self.emoji_pad = shape;
        self
    }

    pub fn glyph_font(&mut self, font: FontArc) -> &mut Self {
        self.glyph_font = Some(font);
        self
    }

    pub fn corner_radius(&mut self, px: u32) -> &mut Self {
        self.corner_radius = px;
        self
    }
}

impl CustomizationConfig {
    pub fn style_kind(&self) -> StyleKind {
        self.style
    }

    pub fn canvas_size(&self) -> u32 {
        self.size
    }

    pub fn error_correction(&self) -> ECLevel {
        self.ec_level
    }

    pub fn foreground(&self) -> Color {
        self.fg
    }

    pub fn background(&self) -> Color {
        self.bg
    }

    pub fn logo_image(&self) -> Option<&RgbaImage> {
        self.logo.as_ref()
    }

    pub fn logo_size_percent(&self) -> u8 {
        self.logo_size
    }

    pub fn emoji_glyph(&self) -> Option<&str> {
        self.emoji.as_deref()
    }

    pub fn emoji_size_percent(&self) -> u8 {
        self.emoji_size
    }

    pub fn emoji_pad_shape(&self) -> PadShape {
        self.emoji_pad
    }

    pub fn font(&self) -> Option<&FontArc> {
        self.glyph_font.as_ref()
    }

    pub fn corner_radius_px(&self) -> u32 {
        self.corner_radius
    }

    /// Colors handed to the encoder. Custom colors only apply while the colors style is active.
    pub fn encoder_colors(&self) -> (Color, Color) {
        match self.style {
            StyleKind::Colors => (self.fg, self.bg),
            _ => (Color::BLACK, Color::WHITE),
        }
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Style: {:?}, Size: {}, Ec level: {:?} }}",
            self.style, self.size, self.ec_level
        )
    }
}
