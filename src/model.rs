use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{EcLevel, Rgba8};
use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::render::overlay::EXPORT_PADDING;

/// Allowed rendered QR edge length in pixels.
pub const SIZE_RANGE: std::ops::RangeInclusive<u32> = 150..=400;
/// Allowed quiet-zone width in modules.
pub const MARGIN_RANGE: std::ops::RangeInclusive<u32> = 0..=10;
/// Allowed logo edge length in pixels.
pub const LOGO_SIZE_RANGE: std::ops::RangeInclusive<u32> = 30..=80;

/// Appearance and payload of one QR render.
///
/// Owned by a single [`crate::QrComposer`]; every render takes it by reference, so one value is
/// one immutable render input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrCustomization {
    /// Absolute URL encoded into the symbol. Empty means "not loaded yet".
    pub target_url: String,
    /// Rendered edge length in pixels.
    pub size: u32,
    /// Error correction level.
    pub error_correction_level: EcLevel,
    /// Dark module color.
    pub foreground_color: Rgba8,
    /// Light module and backdrop color.
    pub background_color: Rgba8,
    /// Quiet-zone width in modules.
    pub margin_modules: u32,
    /// When `false`, `margin_modules` is ignored and the symbol fills the surface.
    pub include_margin: bool,
    /// Centered brand logo.
    pub logo: LogoOptions,
}

impl Default for QrCustomization {
    fn default() -> Self {
        Self {
            target_url: String::new(),
            size: 256,
            error_correction_level: EcLevel::H,
            foreground_color: Rgba8::BLACK,
            background_color: Rgba8::WHITE,
            margin_modules: 4,
            include_margin: true,
            logo: LogoOptions::default(),
        }
    }
}

impl QrCustomization {
    /// Quiet-zone width actually applied, in modules.
    pub fn effective_margin(&self) -> u32 {
        if self.include_margin {
            self.margin_modules
        } else {
            0
        }
    }

    /// Largest logo edge length whose backdrop still fits inside the surface.
    pub fn max_logo_size(&self) -> u32 {
        let half = (self.size / 2).saturating_sub(EXPORT_PADDING);
        (half * 2).min(*LOGO_SIZE_RANGE.end())
    }

    /// Check ranges and the logo containment law.
    ///
    /// The target URL is not checked here; the encoder owns that contract.
    pub fn validate(&self) -> MenuQrResult<()> {
        if !SIZE_RANGE.contains(&self.size) {
            return Err(MenuQrError::validation(format!(
                "size must be within {}..={} px (got {})",
                SIZE_RANGE.start(),
                SIZE_RANGE.end(),
                self.size
            )));
        }
        if !MARGIN_RANGE.contains(&self.margin_modules) {
            return Err(MenuQrError::validation(format!(
                "margin must be within {}..={} modules (got {})",
                MARGIN_RANGE.start(),
                MARGIN_RANGE.end(),
                self.margin_modules
            )));
        }
        if !LOGO_SIZE_RANGE.contains(&self.logo.size_px) {
            return Err(MenuQrError::validation(format!(
                "logo size must be within {}..={} px (got {})",
                LOGO_SIZE_RANGE.start(),
                LOGO_SIZE_RANGE.end(),
                self.logo.size_px
            )));
        }
        if self.logo.enabled && !logo_fits(self.size, self.logo.size_px, EXPORT_PADDING) {
            return Err(MenuQrError::validation(format!(
                "logo of {} px plus {} px backdrop does not fit a {} px code",
                self.logo.size_px, EXPORT_PADDING, self.size
            )));
        }
        Ok(())
    }

    /// Clamp the logo size into range and into the containment bound.
    ///
    /// Returns `true` when the value changed.
    pub fn clamp_logo(&mut self) -> bool {
        let hi = self.max_logo_size().max(*LOGO_SIZE_RANGE.start());
        let clamped = self.logo.size_px.clamp(*LOGO_SIZE_RANGE.start(), hi);
        let changed = clamped != self.logo.size_px;
        self.logo.size_px = clamped;
        changed
    }
}

/// `true` when a logo and its backdrop stay inside a `size`-px surface.
pub fn logo_fits(size: u32, logo_px: u32, padding: u32) -> bool {
    // Compare doubled values to stay in integers: logo/2 + pad <= size/2.
    logo_px + 2 * padding <= size
}

/// Logo overlay settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoOptions {
    /// Draw the logo at all.
    pub enabled: bool,
    /// Logo edge length in pixels.
    pub size_px: u32,
    /// Where the logo image comes from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LogoSource>,
}

impl Default for LogoOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            size_px: 50,
            source: None,
        }
    }
}

/// Origin of logo image bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LogoSource {
    /// Local file.
    Path(PathBuf),
    /// `http`/`https` URL.
    Url(String),
    /// Already-fetched encoded bytes.
    #[serde(skip)]
    Bytes(Arc<[u8]>),
}

impl LogoSource {
    /// Classify a CLI-style argument: URLs with an http(s) scheme, anything else a path.
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Self::Url(arg.to_owned())
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
