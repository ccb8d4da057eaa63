pub(crate) mod filename;
pub(crate) mod format;
pub(crate) mod sink;
pub(crate) mod svg;

use crate::assets::logo::LogoImage;
use crate::encode::matrix::QrMatrix;
use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::model::QrCustomization;
use crate::render::raster::QrSurface;

use filename::export_filename;
use format::ExportFormat;

/// A serialized export ready to hand to an [`sink::ArtifactSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Download file name, including extension.
    pub filename: String,
    /// Serialization format.
    pub format: ExportFormat,
    /// Encoded file contents.
    pub bytes: Vec<u8>,
}

/// Snapshot a composed raster as a PNG artifact.
pub fn export_png(surface: Option<&QrSurface>, business_name: Option<&str>) -> MenuQrResult<Artifact> {
    let surface =
        surface.ok_or_else(|| MenuQrError::not_ready("no QR code has been rendered yet"))?;
    Ok(Artifact {
        filename: export_filename(business_name, ExportFormat::Png),
        format: ExportFormat::Png,
        bytes: surface.encode_png()?,
    })
}

/// Serialize the rendered matrix as a standalone SVG artifact.
///
/// `logo_padding` is the backdrop ring the matching raster was composited with.
pub fn export_svg(
    matrix: Option<&QrMatrix>,
    custom: &QrCustomization,
    logo: Option<&LogoImage>,
    logo_padding: u32,
    business_name: Option<&str>,
) -> MenuQrResult<Artifact> {
    let matrix =
        matrix.ok_or_else(|| MenuQrError::not_ready("no QR code has been rendered yet"))?;
    let doc = svg::render_svg(matrix, custom, logo, logo_padding)?;
    Ok(Artifact {
        filename: export_filename(business_name, ExportFormat::Svg),
        format: ExportFormat::Svg,
        bytes: doc.into_bytes(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/mod.rs"]
mod tests;
