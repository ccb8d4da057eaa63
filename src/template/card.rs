use std::fmt::Write as _;
use std::sync::{Arc, LazyLock};

use anyhow::Context as _;
use resvg::tiny_skia::{self, FilterQuality, PixmapPaint, Transform};
use serde::{Deserialize, Serialize};

use crate::foundation::core::{FrameRGBA, Rgba8};
use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::render::raster::{QrSurface, pixmap_to_frame};
use crate::template::catalog::Template;

/// Printable card width in pixels.
pub const CARD_WIDTH: u32 = 600;
/// Printable card height in pixels.
pub const CARD_HEIGHT: u32 = 800;
/// Height of the gradient header band.
pub const HEADER_HEIGHT: u32 = 160;
/// Edge length the QR is drawn at on the card.
pub const CARD_QR_SIZE: u32 = 360;
/// Top edge of the QR on the card.
pub const CARD_QR_TOP: u32 = 200;

/// Text printed around the QR on the printable card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardInfo {
    /// Business display name for the header.
    pub business_name: Option<String>,
    /// Line under the QR; defaults to the vertical's caption.
    pub caption: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

impl CardInfo {
    fn contact_lines(&self) -> impl Iterator<Item = &str> {
        [&self.phone, &self.email, &self.address]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

static CARD_FONTDB: LazyLock<Arc<usvg::fontdb::Database>> = LazyLock::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded card fonts");
    Arc::new(db)
});

/// Compose the 600x800 printable card around an already rendered QR surface.
///
/// Background, header and text layers are laid out as an SVG document and rasterized with
/// resvg; the QR pixels are then copied on top with nearest-neighbour scaling so modules stay
/// crisp.
pub fn render_card(
    surface: &QrSurface,
    template: &Template,
    info: &CardInfo,
) -> MenuQrResult<FrameRGBA> {
    let doc = card_svg(template, info);

    let opts = usvg::Options {
        fontdb: CARD_FONTDB.clone(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&doc, &opts).context("parse card layout")?;

    let mut pixmap = tiny_skia::Pixmap::new(CARD_WIDTH, CARD_HEIGHT)
        .ok_or_else(|| MenuQrError::validation("failed to allocate card pixmap"))?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    let scale = CARD_QR_SIZE as f32 / surface.width() as f32;
    let x = ((CARD_WIDTH - CARD_QR_SIZE) / 2) as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Nearest,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(
        0,
        0,
        surface.pixmap.as_ref(),
        &paint,
        Transform::from_row(scale, 0.0, 0.0, scale, x, CARD_QR_TOP as f32),
        None,
    );

    tracing::debug!(template = template.id, "rendered printable card");
    Ok(pixmap_to_frame(&pixmap))
}

fn card_svg(template: &Template, info: &CardInfo) -> String {
    let bg = template.colors.background;
    let fg = template.colors.foreground;
    let grad = template.card_background;
    let name = info
        .business_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Our Business");
    let caption = info
        .caption
        .as_deref()
        .unwrap_or(template.vertical.profile().card_caption);

    let qr_x = (CARD_WIDTH - CARD_QR_SIZE) / 2;
    let frame_pad = 16;
    let caption_y = CARD_QR_TOP + CARD_QR_SIZE + 60;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CARD_WIDTH}\" height=\"{CARD_HEIGHT}\" \
         viewBox=\"0 0 {CARD_WIDTH} {CARD_HEIGHT}\">"
    );
    let _ = writeln!(
        out,
        "<defs><linearGradient id=\"header\" gradientTransform=\"rotate({} 0.5 0.5)\">\
         <stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/>\
         </linearGradient></defs>",
        grad.angle_deg - 90.0,
        solid(grad.from),
        solid(grad.to)
    );
    let _ = writeln!(
        out,
        "<rect width=\"{CARD_WIDTH}\" height=\"{CARD_HEIGHT}\" fill=\"{}\"/>",
        solid(bg)
    );
    let _ = writeln!(
        out,
        "<rect width=\"{CARD_WIDTH}\" height=\"{HEADER_HEIGHT}\" fill=\"url(#header)\"/>"
    );
    let _ = writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" \
         font-size=\"40\" font-weight=\"bold\" fill=\"#ffffff\">{}</text>",
        CARD_WIDTH / 2,
        HEADER_HEIGHT / 2 + 14,
        xml_escape(name)
    );
    let _ = writeln!(
        out,
        "<rect x=\"{}\" y=\"{}\" width=\"{2}\" height=\"{2}\" rx=\"16\" fill=\"{3}\" \
         stroke=\"{4}\" stroke-opacity=\"0.15\" stroke-width=\"2\"/>",
        qr_x - frame_pad,
        CARD_QR_TOP - frame_pad,
        CARD_QR_SIZE + 2 * frame_pad,
        solid(bg),
        solid(fg)
    );
    let _ = writeln!(
        out,
        "<text x=\"{}\" y=\"{caption_y}\" text-anchor=\"middle\" font-family=\"sans-serif\" \
         font-size=\"26\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        CARD_WIDTH / 2,
        solid(fg),
        xml_escape(caption)
    );

    let mut y = caption_y + 44;
    for line in info.contact_lines() {
        let _ = writeln!(
            out,
            "<text x=\"{}\" y=\"{y}\" text-anchor=\"middle\" font-family=\"sans-serif\" \
             font-size=\"18\" fill=\"{}\" fill-opacity=\"0.8\">{}</text>",
            CARD_WIDTH / 2,
            solid(fg),
            xml_escape(line)
        );
        y += 28;
    }

    out += "</svg>\n";
    out
}

fn solid(c: Rgba8) -> String {
    Rgba8 { a: 255, ..c }.to_hex()
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/template/card.rs"]
mod tests;
