use qrcode::QrCode;
use tracing::debug;

use crate::bitmap::{QRBitmap, Rendered};
use crate::config::{Color, CustomizationConfig, ECLevel};
use crate::error::{QRError, QRResult};

// Encoder
//------------------------------------------------------------------------------

/// Turns text into a rendered QR code of `size × size` pixels. Returning is the completion
/// signal: the artifact is fully drawn when `encode` hands it back.
pub trait Encoder {
    fn encode(
        &self,
        text: &str,
        size: u32,
        fg: Color,
        bg: Color,
        ec_level: ECLevel,
    ) -> QRResult<Rendered>;

    fn encode_with(&self, text: &str, cfg: &CustomizationConfig) -> QRResult<Rendered> {
        let (fg, bg) = cfg.encoder_colors();
        self.encode(text, cfg.canvas_size(), fg, bg, cfg.error_correction())
    }
}

/// Module grid encoder backed by the `qrcode` crate.
///
/// The symbol is stretched edge to edge over the canvas with no quiet zone. Pixel `(x, y)`
/// takes the color of module `(x * w / size, y * w / size)`, where `w` is the symbol
/// width in modules, so every pixel is painted and the output is exactly `size` wide.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleEncoder;

impl Encoder for ModuleEncoder {
    fn encode(
        &self,
        text: &str,
        size: u32,
        fg: Color,
        bg: Color,
        ec_level: ECLevel,
    ) -> QRResult<Rendered> {
        if text.is_empty() {
            return Err(QRError::InputMissing);
        }

        debug!(len = text.len(), size, ?ec_level, "Encoding data...");
        let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level.into())
            .map_err(|e| QRError::EncodingUnavailable(e.to_string()))?;

        let w = code.width() as u64;
        let modules = code.to_colors();
        debug!(modules = w, "Drawing modules...");

        let size = size.max(1);
        let mut bmp = QRBitmap::new(size, bg);
        let fg = fg.into();
        for y in 0..size {
            let r = y as u64 * w / size as u64;
            for x in 0..size {
                let c = x as u64 * w / size as u64;
                if modules[(r * w + c) as usize] == qrcode::Color::Dark {
                    bmp.put_pixel(x, y, fg);
                }
            }
        }

        Ok(Rendered::Canvas(bmp))
    }
}
