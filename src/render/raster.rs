use resvg::tiny_skia;

use crate::encode::matrix::QrMatrix;
use crate::foundation::core::{FrameRGBA, Rgba8};
use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::model::QrCustomization;

/// Rendered QR raster, exactly `size x size` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct QrSurface {
    pub(crate) pixmap: tiny_skia::Pixmap,
}

impl QrSurface {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha pixel value; `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba8 {
            r: c.red(),
            g: c.green(),
            b: c.blue(),
            a: c.alpha(),
        })
    }

    /// Copy out straight-alpha RGBA8 pixels.
    pub fn to_frame(&self) -> FrameRGBA {
        pixmap_to_frame(&self.pixmap)
    }

    /// Encode the surface as PNG bytes.
    pub fn encode_png(&self) -> MenuQrResult<Vec<u8>> {
        self.to_frame().encode_png()
    }
}

pub(crate) fn pixmap_to_frame(pixmap: &tiny_skia::Pixmap) -> FrameRGBA {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    FrameRGBA {
        width: pixmap.width(),
        height: pixmap.height(),
        data,
    }
}

pub(crate) fn premul(c: Rgba8) -> tiny_skia::PremultipliedColorU8 {
    tiny_skia::ColorU8::from_rgba(c.r, c.g, c.b, c.a).premultiply()
}

pub(crate) fn paint_color(c: Rgba8) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Rasterize `matrix` with the colors, quiet zone and size of `custom`.
///
/// Pixel `(x, y)` shows module `floor(x * span / size)` where `span` is the symbol width plus
/// both quiet zones, so the output is a pure function of its inputs.
///
/// A symbol wider than `size` pixels would drop whole module rows and columns, so that case is
/// rejected with [`MenuQrError::Validation`] instead of producing an unscannable code.
pub fn render_matrix(matrix: &QrMatrix, custom: &QrCustomization) -> MenuQrResult<QrSurface> {
    custom.validate()?;

    let size = custom.size;
    let margin = u64::from(custom.effective_margin());
    let span = matrix.width() as u64 + 2 * margin;
    if span > u64::from(size) {
        return Err(MenuQrError::validation(format!(
            "a {span}-module code does not fit in {size} px; raise the size, lower the error \
             correction level, shorten the URL or reduce the margin"
        )));
    }

    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| MenuQrError::validation("failed to allocate qr surface"))?;

    let dark = premul(custom.foreground_color);
    let light = premul(custom.background_color);

    // Module index per pixel column is shared by every row.
    let lut: Vec<i64> = (0..u64::from(size))
        .map(|p| (p * span / u64::from(size)) as i64 - margin as i64)
        .collect();

    let pixels = pixmap.pixels_mut();
    for (y, my) in lut.iter().enumerate() {
        let row = &mut pixels[y * size as usize..(y + 1) * size as usize];
        for (px, mx) in row.iter_mut().zip(lut.iter()) {
            *px = if matrix.is_dark(*mx, *my) { dark } else { light };
        }
    }

    tracing::debug!(size, span, "rendered qr surface");
    Ok(QrSurface { pixmap })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
