use std::{
    fmt::Display,
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{
    codecs::{jpeg::JpegEncoder, webp::WebPEncoder},
    DynamicImage, ImageFormat,
};
use tracing::{debug, info};

use crate::bitmap::Rendered;
use crate::error::{QRError, QRResult};
use crate::svg::{rendered_to_svg, RectMode};

/// JPEG quality on a 1..=100 scale.
pub const JPEG_QUALITY: u8 = 90;

pub const DEFAULT_FILE_STEM: &str = "QR_Code";

// Export format
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Svg,
}

impl ExportFormat {
    /// Unknown names fall back to PNG.
    pub fn parse(s: &str) -> Self {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "webp" => Self::Webp,
            "svg" => Self::Svg,
            _ => Self::Png,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
            Self::Svg => "svg",
        }
    }

    pub fn is_vector(self) -> bool {
        matches!(self, Self::Svg)
    }

    /// Caption of the download button.
    pub fn label(self) -> String {
        format!("Download as {self}")
    }

    pub fn default_filename(self) -> String {
        format!("{DEFAULT_FILE_STEM}.{}", self.extension())
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

#[cfg(test)]
mod format_tests {
    use test_case::test_case;

    use super::ExportFormat;

    #[test_case("png", ExportFormat::Png, "image/png", "png"; "png")]
    #[test_case("jpg", ExportFormat::Jpeg, "image/jpeg", "jpg"; "jpg")]
    #[test_case("JPEG", ExportFormat::Jpeg, "image/jpeg", "jpg"; "jpeg upper")]
    #[test_case(".webp", ExportFormat::Webp, "image/webp", "webp"; "webp dotted")]
    #[test_case("svg", ExportFormat::Svg, "image/svg+xml", "svg"; "svg")]
    #[test_case("tiff", ExportFormat::Png, "image/png", "png"; "unknown falls back")]
    fn test_parse(s: &str, exp: ExportFormat, mime: &str, ext: &str) {
        let fmt = ExportFormat::parse(s);
        assert_eq!(fmt, exp);
        assert_eq!(fmt.mime_type(), mime);
        assert_eq!(fmt.extension(), ext);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ExportFormat::Webp.label(), "Download as WEBP");
        assert_eq!(ExportFormat::Jpeg.default_filename(), "QR_Code.jpg");
        assert!(ExportFormat::Svg.is_vector());
        assert!(!ExportFormat::Png.is_vector());
    }
}

// Download
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Confirmation shown once the file is saved.
    pub fn message(&self) -> String {
        format!("QR Code downloaded as {}!", self.format)
    }
}

/// Serializes `rendered` as `format`. The artifact is left untouched whatever the outcome.
pub fn export(rendered: &Rendered, format: ExportFormat, filename: &str) -> QRResult<Download> {
    let filename =
        if filename.trim().is_empty() { format.default_filename() } else { filename.to_string() };
    debug!(%format, filename = %filename, "Exporting QR...");

    let bytes = if format.is_vector() {
        rendered_to_svg(rendered, RectMode::PerPixel)?.into_string().into_bytes()
    } else {
        encode_raster(rendered, format)?
    };

    info!(%format, filename = %filename, bytes = bytes.len(), "QR exported");
    Ok(Download { filename, format, bytes })
}

fn encode_raster(rendered: &Rendered, format: ExportFormat) -> QRResult<Vec<u8>> {
    let img = rendered.to_rgba()?;
    let mut buf = Cursor::new(Vec::new());

    match format {
        ExportFormat::Png => img.write_to(&mut buf, ImageFormat::Png).map_err(QRError::export)?,
        ExportFormat::Jpeg => {
            // No alpha in JPEG: transparent pixels keep their underlying color
            let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
            let enc = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            rgb.write_with_encoder(enc).map_err(QRError::export)?;
        }
        ExportFormat::Webp => {
            let enc = WebPEncoder::new_lossless(&mut buf);
            img.write_with_encoder(enc).map_err(QRError::export)?;
        }
        ExportFormat::Svg => return Err(QRError::export("SVG is not a raster format")),
    }

    Ok(buf.into_inner())
}

// Save target
//------------------------------------------------------------------------------

/// Destination of a finished download.
pub trait SaveTarget {
    fn save(&self, download: &Download) -> QRResult<PathBuf>;
}

/// Saves downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirTarget {
    dir: PathBuf,
}

impl DirTarget {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }
}

impl SaveTarget for DirTarget {
    fn save(&self, download: &Download) -> QRResult<PathBuf> {
        let path = self.dir.join(&download.filename);
        std::fs::write(&path, &download.bytes).map_err(QRError::export)?;
        info!(path = %path.display(), "Saved download");
        Ok(path)
    }
}
