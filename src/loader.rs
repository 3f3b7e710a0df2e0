use image::RgbaImage;
use tracing::{debug, info};

use crate::config::CustomizationConfig;
use crate::error::QRResult;

/// Decodes an uploaded image (PNG, JPEG, WebP, ...) into RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> QRResult<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

// Logo loader
// Every upload takes a ticket. Only the newest ticket may install its logo, so a slow
// decode that finishes after a newer upload is dropped instead of overwriting it.
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct LogoLoader {
    latest: u64,
}

impl LogoLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load, superseding any load still in flight.
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        debug!(ticket = self.latest, "Logo load started");
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Cancels whatever load is in flight.
    pub fn cancel(&mut self) {
        self.latest += 1;
    }

    /// Completes a load with already decoded pixels. Returns whether the logo was installed.
    pub fn complete(
        &self,
        ticket: LoadTicket,
        logo: RgbaImage,
        cfg: &mut CustomizationConfig,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, latest = self.latest, "Dropping superseded logo");
            return false;
        }
        info!(w = logo.width(), h = logo.height(), "Logo loaded");
        cfg.logo(logo);
        true
    }

    /// Decodes `bytes` and completes the load. Decode failures are reported even for
    /// superseded tickets, but never touch the config.
    pub fn finish(
        &self,
        ticket: LoadTicket,
        bytes: &[u8],
        cfg: &mut CustomizationConfig,
    ) -> QRResult<bool> {
        let logo = decode_image(bytes)?;
        Ok(self.complete(ticket, logo, cfg))
    }
}
