use std::ops::{Deref, DerefMut};

use image::{ImageFormat, Rgba, RgbaImage};

use crate::config::Color;
use crate::error::QRResult;

// QR bitmap
//------------------------------------------------------------------------------

/// Square RGBA canvas holding a rendered QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRBitmap {
    canvas: RgbaImage,
}

impl QRBitmap {
    pub fn new(size: u32, fill: Color) -> Self {
        Self { canvas: RgbaImage::from_pixel(size, size, fill.into()) }
    }

    pub fn size(&self) -> u32 {
        self.canvas.width()
    }

    /// Dark module test used by the vector re-encoder. Alpha is ignored.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        let Rgba([r, g, b, _]) = *self.canvas.get_pixel(x, y);
        r < 128 && g < 128 && b < 128
    }
}

impl Deref for QRBitmap {
    type Target = RgbaImage;
    fn deref(&self) -> &Self::Target {
        &self.canvas
    }
}

impl DerefMut for QRBitmap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.canvas
    }
}

// Encoded image
//------------------------------------------------------------------------------

/// Raster image without pixel access, e.g. an encoder that only hands back an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn decode(&self) -> QRResult<RgbaImage> {
        Ok(image::load_from_memory_with_format(&self.bytes, self.format)?.to_rgba8())
    }
}

// Rendered artifact
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Canvas(QRBitmap),
    Image(EncodedImage),
}

impl Rendered {
    pub fn as_canvas(&self) -> Option<&QRBitmap> {
        match self {
            Self::Canvas(bmp) => Some(bmp),
            Self::Image(_) => None,
        }
    }

    pub fn as_canvas_mut(&mut self) -> Option<&mut QRBitmap> {
        match self {
            Self::Canvas(bmp) => Some(bmp),
            Self::Image(_) => None,
        }
    }

    /// Pixels of the artifact, decoding opaque images onto a fresh canvas.
    pub fn to_rgba(&self) -> QRResult<RgbaImage> {
        match self {
            Self::Canvas(bmp) => Ok((**bmp).clone()),
            Self::Image(img) => img.decode(),
        }
    }
}
