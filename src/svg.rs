use tracing::debug;

use crate::bitmap::{QRBitmap, Rendered};
use crate::error::{QRError, QRResult};

// Rect mode
//------------------------------------------------------------------------------

/// How dark pixels are turned into rectangles.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum RectMode {
    /// One 1×1 rectangle per dark pixel.
    #[default]
    PerPixel,
    /// One rectangle per horizontal run of dark pixels. Renders identically, far smaller.
    RowRuns,
}

// SVG document
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    text: String,
    w: u32,
    h: u32,
}

impl SvgDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.w, self.h)
    }
}

impl AsRef<str> for SvgDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

// Re-encoder
//------------------------------------------------------------------------------

/// Vector copy of `bmp`: a white background plus one black 1×1 rectangle per dark pixel.
pub fn raster_to_svg(bmp: &QRBitmap) -> SvgDocument {
    raster_to_svg_with(bmp, RectMode::PerPixel)
}

pub fn raster_to_svg_with(bmp: &QRBitmap, mode: RectMode) -> SvgDocument {
    let (w, h) = bmp.dimensions();
    debug!(w, h, ?mode, "Converting canvas to SVG...");

    let mut text = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    text.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

    let mut rects = 0usize;
    for y in 0..h {
        let mut x = 0;
        while x < w {
            if !bmp.is_dark(x, y) {
                x += 1;
                continue;
            }

            let run = match mode {
                RectMode::PerPixel => 1,
                RectMode::RowRuns => (x..w).take_while(|&c| bmp.is_dark(c, y)).count() as u32,
            };
            text.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="{run}" height="1" fill="black"/>"#
            ));
            rects += 1;
            x += run;
        }
    }

    text.push_str("</svg>");
    debug!(rects, bytes = text.len(), "SVG ready");

    SvgDocument { text, w, h }
}

/// Re-encodes an artifact, failing when it offers no pixel access.
pub fn rendered_to_svg(rendered: &Rendered, mode: RectMode) -> QRResult<SvgDocument> {
    match rendered {
        Rendered::Canvas(bmp) => Ok(raster_to_svg_with(bmp, mode)),
        Rendered::Image(_) => Err(QRError::VectorUnavailable),
    }
}
