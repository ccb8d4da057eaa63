//! menuqr composes branded QR codes for digital menus and business profiles.
//!
//! The pipeline is owned by a [`QrComposer`]:
//!
//! - Encode the tenant's stable share URL into a [`QrMatrix`]
//! - Rasterize it into a [`QrSurface`] and overlay an optional circular logo
//! - Export PNG or SVG [`Artifact`]s into an [`ArtifactSink`]
//!
//! Named color presets and 600x800 printable cards come from the template catalog, and vanity
//! share links are reserved through a [`SlugValidator`] without ever changing what the QR encodes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod composer;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod export;
pub(crate) mod model;
pub(crate) mod render;
pub(crate) mod share;
pub(crate) mod template;
pub(crate) mod vertical;

pub use crate::foundation::core::{EcLevel, FrameRGBA, Rgba8, contrast_ratio};
pub use crate::foundation::error::{MenuQrError, MenuQrResult};

pub use crate::assets::logo::{LogoImage, MAX_LOGO_BYTES, decode_logo, load_logo};
pub use crate::composer::{ComposeOutcome, MIN_CONTRAST, QrComposer};
pub use crate::config::{ENV_API_BASE_URL, ENV_API_TOKEN, ENV_OUTPUT_DIR, MenuQrConfig};
pub use crate::encode::matrix::{QrMatrix, encode_url};
pub use crate::export::filename::{FALLBACK_NAME, card_filename, export_filename, sanitize_name};
pub use crate::export::format::ExportFormat;
pub use crate::export::sink::{ArtifactSink, DirectorySink, InMemorySink};
pub use crate::export::svg::render_svg;
pub use crate::export::{Artifact, export_png, export_svg};
pub use crate::model::{
    LOGO_SIZE_RANGE, LogoOptions, LogoSource, MARGIN_RANGE, QrCustomization, SIZE_RANGE, logo_fits,
};
pub use crate::render::overlay::{EXPORT_PADDING, PREVIEW_PADDING, composite_logo};
pub use crate::render::raster::{QrSurface, render_matrix};
pub use crate::share::backend::{HttpShareBackend, ShareBackend};
pub use crate::share::identity::ShareIdentity;
pub use crate::share::slug::{SLUG_CHECK_DEBOUNCE, SlugStatus, SlugValidator, is_valid_slug};
pub use crate::template::applier::{ApplierState, TemplateApplier};
pub use crate::template::card::{
    CARD_HEIGHT, CARD_QR_SIZE, CARD_QR_TOP, CARD_WIDTH, CardInfo, HEADER_HEIGHT, render_card,
};
pub use crate::template::catalog::{Gradient, Template, TemplateColors, catalog, find, for_vertical};
pub use crate::vertical::{BusinessVertical, VerticalProfile};

/// Re-exported so callers can cancel [`QrComposer::compose`] without a direct dependency.
pub use tokio_util::sync::CancellationToken;
