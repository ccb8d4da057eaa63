use resvg::tiny_skia::{FillRule, FilterQuality, Paint, PathBuilder, Pattern, SpreadMode, Transform};

use crate::assets::logo::LogoImage;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::model::logo_fits;
use crate::render::raster::{QrSurface, paint_color};

/// Backdrop ring width for on-screen previews, in pixels.
pub const PREVIEW_PADDING: u32 = 8;
/// Backdrop ring width for exported rasters, in pixels.
pub const EXPORT_PADDING: u32 = 16;

/// Draw `logo` centered on `surface` over a circular backdrop.
///
/// The backdrop has radius `size_px / 2 + padding` and is filled with `background`; the logo is
/// scaled to cover a `size_px` square and clipped to a circle of radius `size_px / 2`.
pub fn composite_logo(
    surface: &mut QrSurface,
    logo: &LogoImage,
    size_px: u32,
    background: Rgba8,
    padding: u32,
) -> MenuQrResult<()> {
    let edge = surface.width().min(surface.height());
    if !logo_fits(edge, size_px, padding) {
        return Err(MenuQrError::validation(format!(
            "logo of {size_px} px plus {padding} px backdrop does not fit a {edge} px code"
        )));
    }
    if logo.width() == 0 || logo.height() == 0 {
        return Err(MenuQrError::asset("logo image is empty"));
    }

    let cx = surface.width() as f32 / 2.0;
    let cy = surface.height() as f32 / 2.0;
    let radius = size_px as f32 / 2.0;

    let backdrop = PathBuilder::from_circle(cx, cy, radius + padding as f32)
        .ok_or_else(|| MenuQrError::validation("invalid logo backdrop geometry"))?;
    let mut paint = Paint::default();
    paint.set_color(paint_color(background));
    paint.anti_alias = true;
    surface
        .pixmap
        .fill_path(&backdrop, &paint, FillRule::Winding, Transform::identity(), None);

    let (lw, lh) = (logo.width() as f32, logo.height() as f32);
    let scale = (size_px as f32 / lw).max(size_px as f32 / lh);
    let tx = cx - lw * scale / 2.0;
    let ty = cy - lh * scale / 2.0;

    let clip = PathBuilder::from_circle(cx, cy, radius)
        .ok_or_else(|| MenuQrError::validation("invalid logo clip geometry"))?;
    let paint = Paint {
        shader: Pattern::new(
            logo.pixmap.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            1.0,
            Transform::from_row(scale, 0.0, 0.0, scale, tx, ty),
        ),
        anti_alias: true,
        ..Paint::default()
    };
    surface
        .pixmap
        .fill_path(&clip, &paint, FillRule::Winding, Transform::identity(), None);

    tracing::debug!(size_px, padding, "composited logo");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
