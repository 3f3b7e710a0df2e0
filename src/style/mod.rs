mod overlay;
mod rounded;

pub use overlay::{apply_emoji, apply_logo, centered_span, ink_bounds, percent_of};
pub use rounded::{apply_rounded_corners, clamp_radius, inside_rounded_rect};

use tracing::debug;

use crate::bitmap::QRBitmap;
use crate::config::{CustomizationConfig, StyleKind};

/// Applies the active style of `cfg` to `bmp` in place and hands the same bitmap back.
///
/// Logo and emoji styles without a loaded asset leave the bitmap untouched. The colors
/// style has nothing to do here, since colors are baked in by the encoder.
pub fn apply_style<'a>(bmp: &'a mut QRBitmap, cfg: &CustomizationConfig) -> &'a mut QRBitmap {
    debug!(style = ?cfg.style_kind(), size = bmp.size(), "Applying style...");
    match cfg.style_kind() {
        StyleKind::Rounded => apply_rounded_corners(bmp, cfg.corner_radius_px()),
        StyleKind::Logo => match cfg.logo_image() {
            Some(logo) => apply_logo(bmp, logo, cfg.logo_size_percent()),
            None => debug!("No logo loaded, leaving bitmap as is"),
        },
        StyleKind::Emoji => match cfg.emoji_glyph() {
            Some(glyph) => apply_emoji(
                bmp,
                glyph,
                cfg.font(),
                cfg.emoji_size_percent(),
                cfg.emoji_pad_shape(),
            ),
            None => debug!("No emoji selected, leaving bitmap as is"),
        },
        StyleKind::Colors | StyleKind::None => {}
    }
    bmp
}
