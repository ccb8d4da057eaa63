use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::assets::logo::LogoImage;
use crate::encode::matrix::QrMatrix;
use crate::foundation::core::Rgba8;
use crate::foundation::error::MenuQrResult;
use crate::model::QrCustomization;
use crate::render::raster::pixmap_to_frame;

/// Standalone SVG document for `matrix`.
///
/// The viewBox is measured in modules (symbol plus quiet zone) and the document is
/// `size x size` user units, so it prints at any scale. When `logo` is given and enabled the
/// backdrop circle (`logo_padding` px beyond the logo) and a clipped `<image>` are added with the
/// same geometry as the raster they mirror.
pub fn render_svg(
    matrix: &QrMatrix,
    custom: &QrCustomization,
    logo: Option<&LogoImage>,
    logo_padding: u32,
) -> MenuQrResult<String> {
    custom.validate()?;

    let margin = custom.effective_margin() as usize;
    let span = matrix.width() + 2 * margin;

    let mut out = String::new();
    out += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{0}\" height=\"{0}\" \
         viewBox=\"0 0 {1} {1}\" shape-rendering=\"crispEdges\" stroke=\"none\">",
        custom.size, span
    );
    let _ = writeln!(
        out,
        "\t<rect width=\"100%\" height=\"100%\"{}/>",
        fill_attrs(custom.background_color)
    );

    out += "\t<path d=\"";
    let mut first = true;
    for y in 0..matrix.width() as i64 {
        for x in 0..matrix.width() as i64 {
            if matrix.is_dark(x, y) {
                if !first {
                    out.push(' ');
                }
                first = false;
                let _ = write!(
                    out,
                    "M{},{}h1v1h-1z",
                    x + margin as i64,
                    y + margin as i64
                );
            }
        }
    }
    let _ = writeln!(out, "\"{}/>", fill_attrs(custom.foreground_color));

    if let (true, Some(logo)) = (custom.logo.enabled, logo) {
        write_logo(&mut out, logo, custom, span, logo_padding)?;
    }

    out += "</svg>\n";
    Ok(out)
}

fn write_logo(
    out: &mut String,
    logo: &LogoImage,
    custom: &QrCustomization,
    span: usize,
    padding: u32,
) -> MenuQrResult<()> {
    // Pixel geometry mapped into module units.
    let k = span as f64 / f64::from(custom.size);
    let c = span as f64 / 2.0;
    let r = f64::from(custom.logo.size_px) / 2.0 * k;
    let backdrop = r + f64::from(padding) * k;

    let png = pixmap_to_frame(&logo.pixmap).encode_png()?;
    let href = format!("data:image/png;base64,{}", STANDARD.encode(png));

    let _ = writeln!(
        out,
        "\t<circle cx=\"{c}\" cy=\"{c}\" r=\"{backdrop}\" shape-rendering=\"geometricPrecision\"{}/>",
        fill_attrs(custom.background_color)
    );
    let _ = writeln!(
        out,
        "\t<clipPath id=\"logo-clip\"><circle cx=\"{c}\" cy=\"{c}\" r=\"{r}\"/></clipPath>"
    );
    let _ = writeln!(
        out,
        "\t<image x=\"{0}\" y=\"{0}\" width=\"{1}\" height=\"{1}\" preserveAspectRatio=\"xMidYMid slice\" \
         clip-path=\"url(#logo-clip)\" href=\"{2}\"/>",
        c - r,
        2.0 * r,
        href
    );
    Ok(())
}

fn fill_attrs(color: Rgba8) -> String {
    let opaque = Rgba8 { a: 255, ..color };
    if color.a == 255 {
        format!(" fill=\"{}\"", opaque.to_hex())
    } else {
        format!(
            " fill=\"{}\" fill-opacity=\"{:.3}\"",
            opaque.to_hex(),
            f64::from(color.a) / 255.0
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
