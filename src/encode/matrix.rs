use qrcode::types::QrError;

use crate::foundation::core::EcLevel;
use crate::foundation::error::{MenuQrError, MenuQrResult};

/// Square grid of QR modules (`true` = dark), row-major, without quiet zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
    level: EcLevel,
}

impl QrMatrix {
    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Error correction level the symbol was built with.
    pub fn level(&self) -> EcLevel {
        self.level
    }

    /// `true` for a dark module; coordinates outside the symbol are light.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.width {
            return false;
        }
        self.modules[y * self.width + x]
    }
}

/// Encode an absolute URL into a QR matrix.
///
/// Empty or non-absolute URLs are input errors; payloads that exceed the symbol capacity at
/// `level` surface as [`MenuQrError::Capacity`] instead of producing a blank code.
pub fn encode_url(target_url: &str, level: EcLevel) -> MenuQrResult<QrMatrix> {
    let target_url = target_url.trim();
    if target_url.is_empty() {
        return Err(MenuQrError::input("target URL is empty"));
    }
    let parsed = url::Url::parse(target_url)
        .map_err(|e| MenuQrError::input(format!("target URL is not absolute: {e}")))?;
    if !parsed.has_host() {
        return Err(MenuQrError::input("target URL must include a host"));
    }

    let code = qrcode::QrCode::with_error_correction_level(target_url.as_bytes(), level.to_qrcode())
        .map_err(|e| match e {
            QrError::DataTooLong => MenuQrError::Capacity {
                len: target_url.len(),
                level,
            },
            other => MenuQrError::input(format!("QR encode error: {other}")),
        })?;

    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    tracing::debug!(width, %level, "encoded target url");
    Ok(QrMatrix {
        width,
        modules,
        level,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/matrix.rs"]
mod tests;
