use std::path::Path;

use resvg::tiny_skia;
use tokio_util::sync::CancellationToken;

use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::model::LogoSource;

/// Upper bound on encoded logo bytes accepted from any source.
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

/// Decoded logo, premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct LogoImage {
    pub(crate) pixmap: tiny_skia::Pixmap,
}

impl LogoImage {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into a logo.
pub fn decode_logo(bytes: &[u8]) -> MenuQrResult<LogoImage> {
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(too_large(bytes.len() as u64));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MenuQrError::asset(format!("decode logo: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);

    let size = tiny_skia::IntSize::from_wh(width, height)
        .ok_or_else(|| MenuQrError::asset("logo has zero width or height"))?;
    let pixmap = tiny_skia::Pixmap::from_vec(data, size)
        .ok_or_else(|| MenuQrError::asset("logo pixel buffer does not match its size"))?;
    Ok(LogoImage { pixmap })
}

/// Fetch and decode a logo, giving up as soon as `cancel` fires.
///
/// Every failure is reported as [`MenuQrError::Asset`] so callers can fall back to a bare code.
pub async fn load_logo(
    source: &LogoSource,
    http: &reqwest::Client,
    cancel: &CancellationToken,
) -> MenuQrResult<LogoImage> {
    let fetch = async {
        match source {
            LogoSource::Bytes(b) => Ok(b.to_vec()),
            LogoSource::Path(p) => read_path(p).await,
            LogoSource::Url(u) => fetch_url(http, u).await,
        }
    };

    let bytes = tokio::select! {
        _ = cancel.cancelled() => return Err(MenuQrError::Cancelled),
        res = fetch => res?,
    };
    if cancel.is_cancelled() {
        return Err(MenuQrError::Cancelled);
    }
    decode_logo(&bytes)
}

fn too_large(len: u64) -> MenuQrError {
    MenuQrError::asset(format!("logo is {len} bytes (max {MAX_LOGO_BYTES})"))
}

async fn read_path(path: &Path) -> MenuQrResult<Vec<u8>> {
    let read_err =
        |e: std::io::Error| MenuQrError::asset(format!("read logo '{}': {e}", path.display()));
    let meta = tokio::fs::metadata(path).await.map_err(read_err)?;
    if meta.len() > MAX_LOGO_BYTES as u64 {
        return Err(too_large(meta.len()));
    }
    tokio::fs::read(path).await.map_err(read_err)
}

async fn fetch_url(http: &reqwest::Client, url: &str) -> MenuQrResult<Vec<u8>> {
    let mut resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| MenuQrError::asset(format!("fetch logo '{url}': {e}")))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(MenuQrError::asset(format!(
            "fetch logo '{url}': HTTP {status}"
        )));
    }
    if let Some(len) = resp.content_length()
        && len > MAX_LOGO_BYTES as u64
    {
        return Err(too_large(len));
    }

    // The declared length may be absent or wrong; stop reading once the cap is passed.
    let mut body = Vec::new();
    while let Some(chunk) = resp
        .chunk()
        .await
        .map_err(|e| MenuQrError::asset(format!("read logo body '{url}': {e}")))?
    {
        body.extend_from_slice(&chunk);
        if body.len() > MAX_LOGO_BYTES {
            return Err(too_large(body.len() as u64));
        }
    }
    Ok(body)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/logo.rs"]
mod tests;
