use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::model::QrCustomization;
use crate::share::backend::HttpShareBackend;
use crate::share::identity::ShareIdentity;

/// Environment variable overriding [`MenuQrConfig::api_base_url`].
pub const ENV_API_BASE_URL: &str = "MENUQR_API_BASE_URL";
/// Environment variable overriding [`MenuQrConfig::api_token`].
pub const ENV_API_TOKEN: &str = "MENUQR_API_TOKEN";
/// Environment variable overriding [`MenuQrConfig::output_dir`].
pub const ENV_OUTPUT_DIR: &str = "MENUQR_OUTPUT_DIR";

/// Runtime settings for the CLI and the share backend client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MenuQrConfig {
    /// Menu backend base URL used for slug calls.
    pub api_base_url: Option<String>,
    /// Bearer token for the menu backend.
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    /// Public host that share URLs are built on.
    pub share_base_url: String,
    /// Directory artifacts are written to.
    pub output_dir: PathBuf,
    /// Per-request timeout for backend and logo fetches.
    pub request_timeout_secs: u64,
    /// Customization applied before command-line overrides.
    pub defaults: QrCustomization,
}

impl Default for MenuQrConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_token: None,
            share_base_url: "https://menu.example.com".to_owned(),
            output_dir: PathBuf::from("generated"),
            request_timeout_secs: 10,
            defaults: QrCustomization::default(),
        }
    }
}

impl MenuQrConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MenuQrResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MenuQrError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a config file; a missing file yields the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> MenuQrResult<Self> {
        let path = path.as_ref();
        let f = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(MenuQrError::validation(format!(
                    "open config '{}': {e}",
                    path.display()
                )));
            }
        };
        Self::from_reader(BufReader::new(f))
    }

    /// File (or defaults), then environment overrides, then validation.
    pub fn load(path: Option<&Path>) -> MenuQrResult<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::default(),
        };
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `MENUQR_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`; empty values are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get(ENV_API_BASE_URL) {
            self.api_base_url = Some(v);
        }
        if let Some(v) = get(ENV_API_TOKEN) {
            self.api_token = Some(v);
        }
        if let Some(v) = get(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(v);
        }
    }

    /// Reject relative URLs, a zero timeout and out-of-range default customization.
    pub fn validate(&self) -> MenuQrResult<()> {
        check_absolute("shareBaseUrl", &self.share_base_url)?;
        if let Some(api) = &self.api_base_url {
            check_absolute("apiBaseUrl", api)?;
        }
        if self.request_timeout_secs == 0 {
            return Err(MenuQrError::validation("requestTimeoutSecs must be > 0"));
        }
        self.defaults.validate()
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Share identity of `tenant_id` on the configured public host.
    pub fn share_identity(&self, tenant_id: &str) -> ShareIdentity {
        ShareIdentity::for_tenant(&self.share_base_url, tenant_id)
    }

    /// HTTP client for the slug endpoints.
    pub fn share_backend(&self) -> MenuQrResult<HttpShareBackend> {
        let base = self.api_base_url.as_deref().ok_or_else(|| {
            MenuQrError::validation(format!(
                "apiBaseUrl is not configured (set it in the config file or {ENV_API_BASE_URL})"
            ))
        })?;
        HttpShareBackend::new(base, self.api_token.clone(), self.request_timeout())
    }
}

fn check_absolute(field: &str, value: &str) -> MenuQrResult<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| MenuQrError::validation(format!("{field} \"{value}\" is not an absolute URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(MenuQrError::validation(format!(
            "{field} \"{value}\" must be an http(s) URL with a host"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
