use serde::{Deserialize, Serialize};

/// Stable, tenant-scoped public address of a menu.
///
/// The QR always encodes [`ShareIdentity::qr_target`]; the vanity slug only changes the
/// human-facing share link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareIdentity {
    /// Tenant (business) id.
    pub tenant_id: String,
    /// Stable URL encoded into the QR.
    pub primary_url: String,
    /// Optional vanity path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_slug: Option<String>,
    #[serde(skip)]
    base_url: String,
}

impl ShareIdentity {
    /// Identity rooted at `base_url` (`{base}/menu/{tenant_id}`).
    pub fn for_tenant(base_url: &str, tenant_id: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            tenant_id: tenant_id.to_owned(),
            primary_url: format!("{base}/menu/{tenant_id}"),
            custom_slug: None,
            base_url: base.to_owned(),
        }
    }

    /// URL that goes into the QR symbol.
    pub fn qr_target(&self) -> &str {
        &self.primary_url
    }

    /// Link to hand out: the vanity link when a slug is set, otherwise the primary URL.
    pub fn share_link(&self) -> String {
        match self.custom_slug.as_deref() {
            Some(slug) if !self.base_url.is_empty() => format!("{}/m/{slug}", self.base_url),
            _ => self.primary_url.clone(),
        }
    }

    /// Copy with a different vanity slug. `primary_url` is never touched.
    pub fn with_custom_slug(&self, slug: Option<&str>) -> Self {
        Self {
            custom_slug: slug.map(str::to_owned),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/share/identity.rs"]
mod tests;
