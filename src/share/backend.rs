//! REST client for the slug endpoints of the menu backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{MenuQrError, MenuQrResult};

/// Server side of vanity slug reservation.
#[async_trait]
pub trait ShareBackend: Send + Sync {
    /// `true` when `slug` is free for `tenant_id`. A tenant's own slug counts as available.
    async fn check_slug_availability(&self, slug: &str, tenant_id: &str) -> MenuQrResult<bool>;

    /// Set (`Some`) or remove (`None`) the tenant's vanity slug.
    async fn update_custom_slug(&self, tenant_id: &str, slug: Option<&str>) -> MenuQrResult<()>;
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSlugRequest<'a> {
    custom_slug: Option<&'a str>,
}

/// [`ShareBackend`] over HTTP with an optional bearer token.
#[derive(Clone, Debug)]
pub struct HttpShareBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpShareBackend {
    /// Client for the backend at `base_url` (e.g. `https://api.example.com`).
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> MenuQrResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, token))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client,
            base_url,
            token,
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn ensure_success(response: reqwest::Response) -> MenuQrResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let body = body.trim();
        Err(MenuQrError::network(if body.is_empty() {
            format!("backend returned {status}")
        } else {
            format!("backend returned {status}: {body}")
        }))
    }
}

#[async_trait]
impl ShareBackend for HttpShareBackend {
    async fn check_slug_availability(&self, slug: &str, tenant_id: &str) -> MenuQrResult<bool> {
        let req = self
            .client
            .get(format!("{}/api/businesses/check-slug", self.base_url))
            .query(&[("slug", slug), ("businessId", tenant_id)]);
        let response = Self::ensure_success(self.authorize(req).send().await?).await?;
        let parsed: AvailabilityResponse = response.json().await?;
        tracing::debug!(slug, available = parsed.available, "slug availability");
        Ok(parsed.available)
    }

    async fn update_custom_slug(&self, tenant_id: &str, slug: Option<&str>) -> MenuQrResult<()> {
        let req = self
            .client
            .put(format!("{}/api/businesses/{tenant_id}/custom-slug", self.base_url))
            .json(&UpdateSlugRequest { custom_slug: slug });
        Self::ensure_success(self.authorize(req).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/share/backend.rs"]
mod tests;
