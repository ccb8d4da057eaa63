//! Async orchestration of encode, render, logo overlay and export.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::assets::logo::{LogoImage, load_logo};
use crate::encode::matrix::{QrMatrix, encode_url};
use crate::export::format::ExportFormat;
use crate::export::sink::ArtifactSink;
use crate::export::{Artifact, export_png, export_svg};
use crate::foundation::core::contrast_ratio;
use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::model::QrCustomization;
use crate::render::overlay::{EXPORT_PADDING, PREVIEW_PADDING, composite_logo};
use crate::render::raster::{QrSurface, render_matrix};
use crate::template::applier::{ApplierState, TemplateApplier};
use crate::template::card::CardInfo;
use crate::template::catalog::Template;

/// Foreground/background contrast below which a warning is emitted.
pub const MIN_CONTRAST: f64 = 3.0;

/// What a successful [`QrComposer::compose`] produced besides the surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComposeOutcome {
    /// The logo was drawn onto the surface.
    pub logo_applied: bool,
    /// Non-fatal problems, in the order they were hit.
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
struct Rendered {
    custom: QrCustomization,
    matrix: QrMatrix,
    surface: QrSurface,
    logo: Option<LogoImage>,
}

/// Owns one customization and the artifacts rendered from it.
#[derive(Debug)]
pub struct QrComposer {
    custom: QrCustomization,
    http: reqwest::Client,
    logo_padding: u32,
    rendered: Option<Rendered>,
    templates: TemplateApplier,
}

impl QrComposer {
    /// Composer for `custom` with a default HTTP client for logo URLs.
    pub fn new(custom: QrCustomization) -> Self {
        Self::with_client(custom, reqwest::Client::new())
    }

    /// Composer that fetches logo URLs through `http`.
    pub fn with_client(custom: QrCustomization, http: reqwest::Client) -> Self {
        Self {
            custom,
            http,
            logo_padding: EXPORT_PADDING,
            rendered: None,
            templates: TemplateApplier::new(),
        }
    }

    /// Use the narrower on-screen backdrop ring instead of the export one.
    pub fn for_preview(mut self) -> Self {
        self.logo_padding = PREVIEW_PADDING;
        self
    }

    /// Current customization.
    pub fn customization(&self) -> &QrCustomization {
        &self.custom
    }

    /// Edit the customization. Takes effect on the next [`QrComposer::compose`].
    pub fn customization_mut(&mut self) -> &mut QrCustomization {
        &mut self.custom
    }

    /// Surface from the last successful compose.
    pub fn surface(&self) -> Option<&QrSurface> {
        self.rendered.as_ref().map(|r| &r.surface)
    }

    /// Matrix from the last successful compose.
    pub fn matrix(&self) -> Option<&QrMatrix> {
        self.rendered.as_ref().map(|r| &r.matrix)
    }

    /// Template workflow state.
    pub fn template_state(&self) -> ApplierState {
        self.templates.state()
    }

    /// Encode and draw the current customization, then overlay the logo if one is enabled.
    ///
    /// The logo is only drawn after the base surface exists. A logo that cannot be loaded is
    /// reported in [`ComposeOutcome::warnings`] and the bare code is kept. When `cancel` fires
    /// before the result is committed, [`MenuQrError::Cancelled`] is returned and the previous
    /// render stays in place.
    #[tracing::instrument(skip_all, fields(size = self.custom.size, level = %self.custom.error_correction_level))]
    pub async fn compose(&mut self, cancel: &CancellationToken) -> MenuQrResult<ComposeOutcome> {
        if cancel.is_cancelled() {
            return Err(MenuQrError::Cancelled);
        }
        let custom = self.custom.clone();
        custom.validate()?;

        let mut outcome = ComposeOutcome::default();
        let ratio = contrast_ratio(custom.foreground_color, custom.background_color);
        if ratio < MIN_CONTRAST {
            tracing::warn!(ratio, "low foreground/background contrast; scanners may struggle");
            outcome.warnings.push(format!(
                "contrast ratio {ratio:.2} is below {MIN_CONTRAST:.1}; the code may not scan reliably"
            ));
        }

        let matrix = encode_url(&custom.target_url, custom.error_correction_level)?;
        let mut surface = render_matrix(&matrix, &custom)?;

        let mut logo = None;
        if custom.logo.enabled {
            match custom.logo.source.as_ref() {
                None => {
                    tracing::warn!("logo enabled without a source");
                    outcome.warnings.push("logo is enabled but no logo was provided".to_owned());
                }
                Some(source) => match load_logo(source, &self.http, cancel).await {
                    Ok(image) => logo = Some(image),
                    Err(MenuQrError::Cancelled) => return Err(MenuQrError::Cancelled),
                    Err(err) => {
                        tracing::warn!(error = %err, "logo unavailable, exporting without it");
                        outcome.warnings.push(format!("logo skipped: {err}"));
                    }
                },
            }
        }

        if cancel.is_cancelled() {
            return Err(MenuQrError::Cancelled);
        }

        if let Some(image) = &logo {
            match composite_logo(
                &mut surface,
                image,
                custom.logo.size_px,
                custom.background_color,
                self.logo_padding,
            ) {
                Ok(()) => outcome.logo_applied = true,
                Err(err) => {
                    tracing::warn!(error = %err, "logo overlay failed, exporting without it");
                    outcome.warnings.push(format!("logo skipped: {err}"));
                    surface = render_matrix(&matrix, &custom)?;
                    logo = None;
                }
            }
        }

        self.templates.record_render(&custom, &surface);
        self.rendered = Some(Rendered {
            custom,
            matrix,
            surface,
            logo,
        });
        tracing::debug!(logo_applied = outcome.logo_applied, "composed QR");
        Ok(outcome)
    }

    /// Serialize the last render in `format`.
    pub fn artifact(&self, format: ExportFormat, business_name: Option<&str>) -> MenuQrResult<Artifact> {
        let rendered = self.rendered.as_ref();
        match format {
            ExportFormat::Png => export_png(rendered.map(|r| &r.surface), business_name),
            ExportFormat::Svg => {
                let custom = rendered.map_or(&self.custom, |r| &r.custom);
                export_svg(
                    rendered.map(|r| &r.matrix),
                    custom,
                    rendered.and_then(|r| r.logo.as_ref()),
                    self.logo_padding,
                    business_name,
                )
            }
        }
    }

    /// Export the last render into `sink`.
    pub fn export(
        &self,
        format: ExportFormat,
        business_name: Option<&str>,
        sink: &mut dyn ArtifactSink,
    ) -> MenuQrResult<PathBuf> {
        let artifact = self.artifact(format, business_name)?;
        sink.write(&artifact)
    }

    /// Select `id` and assign its colors to the customization. Re-compose to see them.
    pub fn apply_template(&mut self, id: &str) -> MenuQrResult<&'static Template> {
        self.templates.select(id)?;
        self.templates.apply(&mut self.custom)
    }

    /// Printable card for the applied template, built from the last render.
    pub fn download_card(&mut self, info: &CardInfo) -> MenuQrResult<Artifact> {
        self.templates.download_card(info)
    }
}

#[cfg(test)]
#[path = "../tests/unit/composer.rs"]
mod tests;
