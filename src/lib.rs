//! # qrcraft
//!
//! A Rust library for rendering customizable QR codes and exporting them as raster images or SVG.
//! Symbol encoding is delegated to the [`qrcode`] crate; this crate owns everything that happens
//! to the pixels afterwards.
//!
//! ## Features
//!
//! - **Rounded corners**: Clip the code to a rounded rectangle, leaving the corners transparent
//! - **Logo overlay**: Draw an uploaded logo at the center, over a white contrast pad
//! - **Emoji overlay**: Draw an emoji glyph at the center, over a square or round pad
//! - **Custom colors**: Foreground and background colors for the modules
//! - **Export**: PNG, JPEG, WebP, and SVG re-encoded from the final canvas
//!
//! ## Quick Start
//!
//! ```rust
//! use qrcraft::{
//!     apply_style, raster_to_svg, CustomizationConfig, Encoder, ModuleEncoder, StyleKind,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut cfg = CustomizationConfig::new();
//! cfg.style(StyleKind::Rounded).corner_radius(20).size(250);
//!
//! let mut rendered = ModuleEncoder.encode_with("Hello World!", &cfg)?;
//! if let Some(bmp) = rendered.as_canvas_mut() {
//!     apply_style(bmp, &cfg);
//!     let svg = raster_to_svg(bmp);
//!     assert!(svg.as_str().starts_with("<svg"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Driving it like a form
//!
//! ```rust
//! use qrcraft::{ExportFormat, Session, StyleKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new();
//! session.set_text("https://example.com");
//! session.set_format(ExportFormat::Png);
//! session.set_style(StyleKind::Colors)?;
//! session.generate()?;
//! assert_eq!(session.download_label(), "Download as PNG");
//! # Ok(())
//! # }
//! ```
//!
//! ## SVG output
//!
//! The SVG re-encoder scans the finished canvas and emits one black 1×1 rectangle per dark
//! pixel (all of red, green and blue below 128), over a white background. Use
//! [`RectMode::RowRuns`] with [`raster_to_svg_with`] to merge horizontal runs into wider
//! rectangles for much smaller files.

pub mod bitmap;
pub mod config;
pub mod encoder;
pub mod error;
pub mod export;
pub mod loader;
pub mod session;
pub mod style;
pub mod svg;

pub use bitmap::{EncodedImage, QRBitmap, Rendered};
pub use config::{Color, CustomizationConfig, ECLevel, PadShape, StyleKind};
pub use encoder::{Encoder, ModuleEncoder};
pub use error::{QRError, QRResult};
pub use export::{export, DirTarget, Download, ExportFormat, SaveTarget};
pub use loader::{decode_image, LoadTicket, LogoLoader};
pub use session::Session;
pub use style::apply_style;
pub use svg::{raster_to_svg, raster_to_svg_with, RectMode, SvgDocument};
