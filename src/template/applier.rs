use crate::export::Artifact;
use crate::export::filename::card_filename;
use crate::export::format::ExportFormat;
use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::model::QrCustomization;
use crate::render::raster::QrSurface;
use crate::template::card::{CardInfo, render_card};
use crate::template::catalog::{Template, TemplateColors, find};

/// Template workflow state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplierState {
    /// Nothing chosen yet.
    #[default]
    Idle,
    /// A template is chosen but its colors are not in the customization.
    Selected(&'static str),
    /// The template colors were assigned to the customization.
    Applied(&'static str),
    /// The printable card for the template was produced.
    CardDownloaded(&'static str),
}

#[derive(Clone, Debug)]
struct RenderedQr {
    colors: TemplateColors,
    surface: QrSurface,
}

/// Applies presets to a customization and produces printable cards from the current render.
#[derive(Clone, Debug, Default)]
pub struct TemplateApplier {
    state: ApplierState,
    selected: Option<&'static Template>,
    rendered: Option<RenderedQr>,
}

impl TemplateApplier {
    /// Fresh applier in [`ApplierState::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> ApplierState {
        self.state
    }

    /// Currently selected template.
    pub fn selected(&self) -> Option<&'static Template> {
        self.selected
    }

    /// Choose a template by id. Re-selecting the current template keeps the state as is.
    pub fn select(&mut self, id: &str) -> MenuQrResult<&'static Template> {
        let template = find(id)
            .ok_or_else(|| MenuQrError::validation(format!("unknown template \"{id}\"")))?;
        if self.selected.is_some_and(|t| t.id == template.id) {
            return Ok(template);
        }
        self.selected = Some(template);
        self.state = ApplierState::Selected(template.id);
        tracing::debug!(template = template.id, "selected template");
        Ok(template)
    }

    /// Assign the selected template's colors to `custom`.
    ///
    /// Pure assignment: applying twice leaves the same colors.
    pub fn apply(&mut self, custom: &mut QrCustomization) -> MenuQrResult<&'static Template> {
        let template = self
            .selected
            .ok_or_else(|| MenuQrError::not_ready("select a template first"))?;
        custom.foreground_color = template.colors.foreground;
        custom.background_color = template.colors.background;
        if !matches!(self.state, ApplierState::CardDownloaded(id) if id == template.id) {
            self.state = ApplierState::Applied(template.id);
        }
        Ok(template)
    }

    /// Remember the surface most recently rendered with `custom`'s colors.
    pub fn record_render(&mut self, custom: &QrCustomization, surface: &QrSurface) {
        self.rendered = Some(RenderedQr {
            colors: TemplateColors {
                foreground: custom.foreground_color,
                background: custom.background_color,
            },
            surface: surface.clone(),
        });
    }

    /// Build the printable card for the selected template from the recorded render.
    ///
    /// Fails with [`MenuQrError::NotReady`] unless the template was applied and a QR was
    /// rendered with its colors afterwards.
    pub fn download_card(&mut self, info: &CardInfo) -> MenuQrResult<Artifact> {
        let not_ready = || MenuQrError::not_ready("apply a template first");
        let template = self.selected.ok_or_else(not_ready)?;
        if !matches!(
            self.state,
            ApplierState::Applied(_) | ApplierState::CardDownloaded(_)
        ) {
            return Err(not_ready());
        }
        let rendered = self
            .rendered
            .as_ref()
            .filter(|r| r.colors == template.colors)
            .ok_or_else(not_ready)?;

        let frame = render_card(&rendered.surface, template, info)?;
        let artifact = Artifact {
            filename: card_filename(info.business_name.as_deref(), template.name),
            format: ExportFormat::Png,
            bytes: frame.encode_png()?,
        };
        self.state = ApplierState::CardDownloaded(template.id);
        tracing::info!(template = template.id, file = %artifact.filename, "printable card ready");
        Ok(artifact)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/applier.rs"]
mod tests;
