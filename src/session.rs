use tracing::{debug, info, warn};

use crate::bitmap::Rendered;
use crate::config::{Color, CustomizationConfig, StyleKind};
use crate::encoder::{Encoder, ModuleEncoder};
use crate::error::{QRError, QRResult};
use crate::export::{export, Download, ExportFormat, SaveTarget};
use crate::loader::{LoadTicket, LogoLoader};
use crate::style::apply_style;

// Session
// Form state plus the code on display. Each setter regenerates only when its control
// would visibly change the displayed code.
//------------------------------------------------------------------------------

#[derive(Debug)]
pub struct Session<E = ModuleEncoder> {
    encoder: E,
    text: String,
    format: ExportFormat,
    cfg: CustomizationConfig,
    loader: LogoLoader,
    current: Option<Rendered>,
}

impl Session<ModuleEncoder> {
    pub fn new() -> Self {
        Self::with_encoder(ModuleEncoder)
    }
}

impl Default for Session<ModuleEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Encoder> Session<E> {
    pub fn with_encoder(encoder: E) -> Self {
        Self {
            encoder,
            text: String::new(),
            format: ExportFormat::default(),
            cfg: CustomizationConfig::default(),
            loader: LogoLoader::default(),
            current: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn config(&self) -> &CustomizationConfig {
        &self.cfg
    }

    /// Direct access for settings without a regenerating control (font, pad shape, ...).
    pub fn config_mut(&mut self) -> &mut CustomizationConfig {
        &mut self.cfg
    }

    pub fn current(&self) -> Option<&Rendered> {
        self.current.as_ref()
    }

    pub fn download_label(&self) -> String {
        self.format.label()
    }

    /// Clears the display.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Encodes the current text, applies the active style and keeps the result.
    pub fn generate(&mut self) -> QRResult<&Rendered> {
        if self.text.is_empty() {
            return Err(QRError::InputMissing);
        }

        debug!("Generating QR {}...", self.cfg.metadata());
        self.current = None;
        let mut rendered = self.encoder.encode_with(&self.text, &self.cfg)?;
        match rendered.as_canvas_mut() {
            Some(bmp) => {
                apply_style(bmp, &self.cfg);
            }
            None => warn!("Encoder returned an image without pixel access, style not applied"),
        }

        info!(style = ?self.cfg.style_kind(), size = self.cfg.canvas_size(), "QR generated");
        Ok(&*self.current.insert(rendered))
    }

    fn refresh(&mut self, when: bool) -> QRResult<()> {
        if when && !self.text.is_empty() {
            self.generate()?;
        }
        Ok(())
    }

    /// Emptying the text clears the display. Typing never regenerates on its own.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if self.text.is_empty() {
            self.clear();
        }
    }

    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    /// Regenerates only when a code is already on display.
    pub fn set_size(&mut self, size: u32) -> QRResult<()> {
        self.cfg.size(size);
        self.refresh(self.current.is_some())
    }

    pub fn set_style(&mut self, style: StyleKind) -> QRResult<()> {
        self.cfg.style(style);
        self.refresh(true)
    }

    pub fn set_colors(&mut self, fg: Color, bg: Color) -> QRResult<()> {
        self.cfg.colors(fg, bg);
        self.refresh(true)
    }

    pub fn set_corner_radius(&mut self, px: u32) -> QRResult<()> {
        self.cfg.corner_radius(px);
        self.refresh(true)
    }

    pub fn set_emoji(&mut self, glyph: impl Into<String>) -> QRResult<()> {
        self.cfg.emoji(glyph);
        self.refresh(true)
    }

    pub fn set_logo_size(&mut self, percent: u8) -> QRResult<()> {
        self.cfg.logo_size(percent);
        self.refresh(self.cfg.logo_image().is_some())
    }

    pub fn set_emoji_size(&mut self, percent: u8) -> QRResult<()> {
        self.cfg.emoji_size(percent);
        self.refresh(self.cfg.emoji_glyph().is_some())
    }

    pub fn begin_logo_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    /// Returns whether the logo was installed; superseded loads are dropped.
    pub fn finish_logo_load(&mut self, ticket: LoadTicket, bytes: &[u8]) -> QRResult<bool> {
        let installed = self.loader.finish(ticket, bytes, &mut self.cfg)?;
        self.refresh(installed)?;
        Ok(installed)
    }

    /// Exports the displayed code as `QR_Code.<ext>` and hands it to `target`.
    pub fn download(&self, target: &impl SaveTarget) -> QRResult<Download> {
        let rendered = self.current.as_ref().ok_or(QRError::NothingToExport)?;
        let dl = export(rendered, self.format, &self.format.default_filename())?;
        target.save(&dl)?;
        info!("{}", dl.message());
        Ok(dl)
    }
}
