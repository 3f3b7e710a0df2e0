use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, Rect as GlyphRect, ScaleFont};
use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_text_mut},
    rect::Rect,
};
use tracing::{debug, warn};

use crate::bitmap::QRBitmap;
use crate::config::{Color, PadShape};

/// Margin of the logo's contrast pad on each side, in pixels.
pub const LOGO_PAD_MARGIN: f32 = 5.0;

/// Emoji pad side relative to the glyph box.
pub const EMOJI_PAD_RATIO: f32 = 1.2;

// Geometry
//------------------------------------------------------------------------------

/// Pixel span `[start, end)` of a segment of length `side` centered on `center`.
pub fn centered_span(center: f32, side: f32) -> (i32, i32) {
    let half = side / 2.0;
    ((center - half).round() as i32, (center + half).round() as i32)
}

/// Side of a box covering `percent`% of `size`.
pub fn percent_of(size: u32, percent: u8) -> f32 {
    size as f32 * percent as f32 / 100.0
}

fn fill_square(img: &mut RgbaImage, center: f32, side: f32, color: Rgba<u8>) {
    let (start, end) = centered_span(center, side);
    if end <= start {
        return;
    }
    let len = (end - start) as u32;
    draw_filled_rect_mut(img, Rect::at(start, start).of_size(len, len), color);
}

// Pixel centers within `radius` of the center are filled
fn fill_circle(img: &mut RgbaImage, center: f32, radius: f32, color: Rgba<u8>) {
    if radius <= 0.0 {
        return;
    }
    let (start, end) = centered_span(center, 2.0 * radius);
    let lo = start.max(0) as u32;
    let hi = end.clamp(0, img.width().min(img.height()) as i32) as u32;
    let r_sq = radius * radius;
    for y in lo..hi {
        for x in lo..hi {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            if dx * dx + dy * dy <= r_sq {
                img.put_pixel(x, y, color);
            }
        }
    }
}

// Logo
//------------------------------------------------------------------------------

/// Draws `logo` scaled to `L×L` at the center, over a white pad of side `L + 10`.
pub fn apply_logo(bmp: &mut QRBitmap, logo: &RgbaImage, percent: u8) {
    let center = bmp.size() as f32 / 2.0;
    let side = percent_of(bmp.size(), percent);

    debug!(side, "Drawing logo pad...");
    fill_square(bmp, center, side + 2.0 * LOGO_PAD_MARGIN, Color::WHITE.into());

    let (start, end) = centered_span(center, side);
    if end <= start || logo.width() == 0 || logo.height() == 0 {
        warn!(side, "Logo too small to draw, skipping");
        return;
    }
    let len = (end - start) as u32;

    debug!(len, "Drawing logo...");
    let scaled = imageops::resize(logo, len, len, FilterType::Triangle);
    imageops::overlay(&mut **bmp, &scaled, start as i64, start as i64);
}

// Emoji
//------------------------------------------------------------------------------

/// Pixel bounds of the inked area of `text`, relative to the origin handed to
/// `draw_text_mut`. Glyphs are laid out the way `draw_text_mut` does: pen on the ascent
/// line, advancing by the horizontal advance plus kerning.
pub fn ink_bounds(font: &FontArc, scale: PxScale, text: &str) -> Option<GlyphRect> {
    let sf = font.as_scaled(scale);
    let mut pen = 0.0;
    let mut last: Option<GlyphId> = None;
    let mut bounds: Option<GlyphRect> = None;

    for c in text.chars() {
        let id = sf.glyph_id(c);
        let g = id.with_scale_and_position(scale, point(pen, sf.ascent()));
        pen += sf.h_advance(id);
        let Some(outline) = sf.outline_glyph(g) else {
            continue;
        };
        if let Some(last) = last {
            pen += sf.kern(id, last);
        }
        last = Some(id);

        let bb = outline.px_bounds();
        bounds = Some(match bounds {
            None => bb,
            Some(acc) => GlyphRect {
                min: point(acc.min.x.min(bb.min.x), acc.min.y.min(bb.min.y)),
                max: point(acc.max.x.max(bb.max.x), acc.max.y.max(bb.max.y)),
            },
        });
    }
    bounds
}

/// Paints the emoji's contrast pad and, when a font is available, the glyph itself.
pub fn apply_emoji(
    bmp: &mut QRBitmap,
    glyph: &str,
    font: Option<&FontArc>,
    percent: u8,
    pad: PadShape,
) {
    let center = bmp.size() as f32 / 2.0;
    let side = percent_of(bmp.size(), percent);
    let pad_side = side * EMOJI_PAD_RATIO;

    debug!(pad_side, ?pad, "Drawing emoji pad...");
    match pad {
        PadShape::Square => fill_square(bmp, center, pad_side, Color::WHITE.into()),
        PadShape::Circle => fill_circle(bmp, center, pad_side / 2.0, Color::WHITE.into()),
    }

    let Some(font) = font else {
        warn!(glyph, "No font loaded for emoji, drawing pad only");
        return;
    };
    if side < 1.0 {
        return;
    }

    let scale = PxScale::from(side);
    let Some(ink) = ink_bounds(font, scale, glyph) else {
        warn!(glyph, "Font has no outline for emoji, drawing pad only");
        return;
    };

    // Ink box centered on the bitmap center
    let x = (center - (ink.min.x + ink.max.x) / 2.0).round() as i32;
    let y = (center - (ink.min.y + ink.max.y) / 2.0).round() as i32;
    debug!(glyph, x, y, "Drawing emoji glyph...");
    draw_text_mut(&mut **bmp, Color::BLACK.into(), x, y, scale, font, glyph);
}

#[cfg(test)]
mod overlay_tests {
    use image::{Rgba, RgbaImage};
    use test_case::test_case;

    use ab_glyph::{FontArc, PxScale};

    use super::{apply_emoji, apply_logo, centered_span, ink_bounds, percent_of};
    use crate::bitmap::QRBitmap;
    use crate::config::{Color, PadShape};

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    // Bounding box of pixels equal to `px`, as (min_x, min_y, max_x, max_y)
    fn bounds_of(bmp: &QRBitmap, px: [u8; 4]) -> Option<(u32, u32, u32, u32)> {
        bmp.enumerate_pixels().filter(|(_, _, p)| p.0 == px).fold(None, |acc, (x, y, _)| {
            Some(match acc {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            })
        })
    }

    #[test_case(125.0, 100.0, (75, 175); "even")]
    #[test_case(125.0, 260.0, (-5, 255); "overflowing")]
    #[test_case(50.0, 0.0, (50, 50); "empty")]
    fn test_centered_span(center: f32, side: f32, exp: (i32, i32)) {
        assert_eq!(centered_span(center, side), exp);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(250, 20), 50.0);
        assert_eq!(percent_of(150, 100), 150.0);
    }

    #[test]
    fn test_logo_centered_with_pad() {
        let mut bmp = QRBitmap::new(200, Color::BLACK);
        let logo = RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]));
        apply_logo(&mut bmp, &logo, 20);

        // Logo 40px at 80..120, pad 50px at 75..125
        assert_eq!(bounds_of(&bmp, [255, 0, 0, 255]), Some((80, 80, 119, 119)));
        assert_eq!(bounds_of(&bmp, WHITE), Some((75, 75, 124, 124)));
        assert_eq!(bmp.get_pixel(74, 100).0, BLACK);
    }

    #[test]
    fn test_logo_full_size_covers_canvas() {
        let mut bmp = QRBitmap::new(100, Color::BLACK);
        let logo = RgbaImage::from_pixel(7, 3, Rgba([0, 0, 255, 255]));
        apply_logo(&mut bmp, &logo, 100);
        assert!(bmp.pixels().all(|p| p.0 == [0, 0, 255, 255]));
    }

    #[test]
    fn test_logo_transparent_shows_pad() {
        let mut bmp = QRBitmap::new(100, Color::BLACK);
        let logo = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
        apply_logo(&mut bmp, &logo, 30);
        assert_eq!(bmp.get_pixel(50, 50).0, WHITE);
    }

    #[test_case(PadShape::Square; "square")]
    #[test_case(PadShape::Circle; "circle")]
    fn test_emoji_pad_centered(pad: PadShape) {
        let mut bmp = QRBitmap::new(250, Color::BLACK);
        apply_emoji(&mut bmp, "😀", None, 40, pad);

        // Glyph box 100px, pad 120px centered on 125
        let (x0, y0, x1, y1) = bounds_of(&bmp, WHITE).unwrap();
        assert_eq!(x0 + x1 + 1, 250);
        assert_eq!(y0 + y1 + 1, 250);
        assert!(x1 - x0 + 1 >= 119 && x1 - x0 + 1 <= 121);
        assert_eq!(bmp.get_pixel(125, 125).0, WHITE);
    }

    #[test]
    fn test_emoji_circle_leaves_corners() {
        let mut bmp = QRBitmap::new(250, Color::BLACK);
        apply_emoji(&mut bmp, "🔥", None, 40, PadShape::Circle);
        assert_eq!(bmp.get_pixel(66, 66).0, BLACK);
        assert_eq!(bmp.get_pixel(125, 66).0, WHITE);
    }

    #[test]
    fn test_emoji_full_size_pad_fills_canvas() {
        let mut bmp = QRBitmap::new(150, Color::BLACK);
        apply_emoji(&mut bmp, "⭐", None, 100, PadShape::Square);
        assert!(bmp.pixels().all(|p| p.0 == WHITE));
    }

    // System font used for glyph tests, overridable through QRCRAFT_TEST_FONT
    fn test_font() -> Option<FontArc> {
        let candidates = [
            std::env::var("QRCRAFT_TEST_FONT").unwrap_or_default(),
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string(),
            "/usr/share/fonts/dejavu/DejaVuSans.ttf".to_string(),
            "/Library/Fonts/Arial Unicode.ttf".to_string(),
            "C:\\Windows\\Fonts\\arial.ttf".to_string(),
        ];
        candidates
            .iter()
            .filter(|p| !p.is_empty())
            .find_map(|p| std::fs::read(p).ok())
            .and_then(|bytes| FontArc::try_from_vec(bytes).ok())
    }

    #[test_case("■"; "square")]
    #[test_case("●"; "circle")]
    #[test_case("O"; "letter")]
    #[test_case("-"; "hyphen")]
    fn test_emoji_glyph_centered(glyph: &str) {
        let Some(font) = test_font() else {
            eprintln!("No test font available, skipping");
            return;
        };
        if ink_bounds(&font, PxScale::from(100.0), glyph).is_none() {
            return;
        }

        let mut bmp = QRBitmap::new(250, Color::BLACK);
        apply_emoji(&mut bmp, glyph, Some(&font), 40, PadShape::Square);

        // Dark ink inside the white 120px pad at 65..185
        let ink = bmp
            .enumerate_pixels()
            .filter(|(x, y, p)| (65..185).contains(x) && (65..185).contains(y) && p[0] < 128)
            .fold(None, |acc: Option<(u32, u32, u32, u32)>, (x, y, _)| {
                Some(match acc {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                })
            });
        let (x0, y0, x1, y1) = ink.unwrap();

        let cx = (x0 + x1 + 1) as f32 / 2.0;
        let cy = (y0 + y1 + 1) as f32 / 2.0;
        assert!((cx - 125.0).abs() <= 2.0, "ink x {x0}..={x1} off center");
        assert!((cy - 125.0).abs() <= 2.0, "ink y {y0}..={y1} off center");
    }

    #[test]
    fn test_ink_bounds_wider_for_longer_text() {
        let Some(font) = test_font() else {
            return;
        };
        let scale = PxScale::from(40.0);
        let one = ink_bounds(&font, scale, "O").unwrap();
        let two = ink_bounds(&font, scale, "OO").unwrap();
        assert!(two.width() > one.width());
        assert_eq!(two.min.y, one.min.y);
        assert!(ink_bounds(&font, scale, " ").is_none());
    }
}
