use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::foundation::error::{MenuQrError, MenuQrResult};
use crate::share::backend::ShareBackend;

/// Quiet period before an availability check is sent while the user is typing.
pub const SLUG_CHECK_DEBOUNCE: Duration = Duration::from_millis(500);

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]{2,49}$").expect("valid regex"));

/// Lowercase ASCII letters, digits and single hyphens; 3 to 50 chars; no leading hyphen.
pub fn is_valid_slug(s: &str) -> bool {
    SLUG_RE.is_match(s) && !s.contains("--")
}

/// Where the slug editor currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SlugStatus {
    /// Nothing to check.
    #[default]
    Idle,
    /// Availability request in flight.
    Checking,
    /// Free for this tenant (or already the tenant's own).
    Available,
    /// Used by another tenant.
    Taken,
    /// Fails the format rules.
    Invalid,
    /// Save request in flight.
    Saving,
    /// Last request failed; retry is allowed.
    Error(String),
}

impl fmt::Display for SlugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Checking => f.write_str("checking"),
            Self::Available => f.write_str("available"),
            Self::Taken => f.write_str("taken"),
            Self::Invalid => f.write_str("invalid"),
            Self::Saving => f.write_str("saving"),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// Holds the status at an in-flight value and puts it back to idle if the request future is
/// dropped before it settles.
struct InFlight<'a> {
    status: &'a mut SlugStatus,
}

impl<'a> InFlight<'a> {
    fn enter(status: &'a mut SlugStatus, state: SlugStatus) -> Self {
        *status = state;
        Self { status }
    }

    fn settle(self, next: SlugStatus) {
        *self.status = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if matches!(*self.status, SlugStatus::Checking | SlugStatus::Saving) {
            *self.status = SlugStatus::Idle;
        }
    }
}

/// Validates, checks and saves one tenant's vanity slug.
#[derive(Debug)]
pub struct SlugValidator<B> {
    backend: B,
    tenant_id: String,
    draft: String,
    saved: Option<String>,
    status: SlugStatus,
}

impl<B: ShareBackend> SlugValidator<B> {
    /// Validator for `tenant_id` whose currently stored slug is `saved`.
    pub fn new(backend: B, tenant_id: impl Into<String>, saved: Option<String>) -> Self {
        let saved = saved.filter(|s| !s.is_empty());
        Self {
            backend,
            tenant_id: tenant_id.into(),
            draft: saved.clone().unwrap_or_default(),
            saved,
            status: SlugStatus::Idle,
        }
    }

    /// Current status.
    pub fn status(&self) -> &SlugStatus {
        &self.status
    }

    /// Text being edited.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Slug last confirmed by the backend.
    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }

    /// Backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validate `draft` and, if well formed, ask the backend whether it is free.
    ///
    /// Network failures end in [`SlugStatus::Error`]. Dropping the future mid-request (a caller
    /// timeout, a newer keystroke) puts the status back to [`SlugStatus::Idle`], so it is never
    /// left at [`SlugStatus::Checking`].
    pub async fn check(&mut self, draft: &str) -> &SlugStatus {
        self.draft = draft.trim().to_owned();

        if self.draft.is_empty() {
            self.status = SlugStatus::Idle;
            return &self.status;
        }
        if !is_valid_slug(&self.draft) {
            self.status = SlugStatus::Invalid;
            return &self.status;
        }
        if self.saved.as_deref() == Some(self.draft.as_str()) {
            self.status = SlugStatus::Available;
            return &self.status;
        }

        let in_flight = InFlight::enter(&mut self.status, SlugStatus::Checking);
        let next = match self
            .backend
            .check_slug_availability(&self.draft, &self.tenant_id)
            .await
        {
            Ok(true) => SlugStatus::Available,
            Ok(false) => SlugStatus::Taken,
            Err(err) => {
                tracing::warn!(slug = %self.draft, error = %err, "slug availability check failed");
                SlugStatus::Error(err.to_string())
            }
        };
        in_flight.settle(next);
        &self.status
    }

    /// Like [`SlugValidator::check`], but waits out `delay` first.
    ///
    /// A keystroke that supersedes this one cancels `cancel` and [`MenuQrError::Cancelled`] is
    /// returned. Cancelled during the quiet period, the draft and status are left as they were;
    /// cancelled while the request is in flight, the status goes back to [`SlugStatus::Idle`].
    pub async fn check_debounced(
        &mut self,
        draft: &str,
        delay: Duration,
        cancel: &CancellationToken,
    ) -> MenuQrResult<&SlugStatus> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(MenuQrError::Cancelled),
            _ = tokio::time::sleep(delay) => {}
        }
        let cancelled = tokio::select! {
            biased;
            _ = cancel.cancelled() => true,
            _ = self.check(draft) => false,
        };
        if cancelled {
            tracing::debug!(slug = %draft, "slug availability check superseded");
            return Err(MenuQrError::Cancelled);
        }
        Ok(&self.status)
    }

    /// Persist the current draft. An empty draft removes the vanity slug.
    ///
    /// Refused while the draft is taken, invalid or still being checked.
    pub async fn save(&mut self) -> MenuQrResult<Option<String>> {
        match &self.status {
            SlugStatus::Taken => {
                return Err(MenuQrError::validation(format!(
                    "slug \"{}\" is already taken",
                    self.draft
                )));
            }
            SlugStatus::Invalid => {
                return Err(MenuQrError::validation(format!(
                    "slug \"{}\" must be 3-50 lowercase letters, digits or single hyphens",
                    self.draft
                )));
            }
            SlugStatus::Checking | SlugStatus::Saving => {
                return Err(MenuQrError::validation("wait for the availability check to finish"));
            }
            _ => {}
        }
        // A draft that was never checked still has to satisfy the format rules.
        if !self.draft.is_empty() && !is_valid_slug(&self.draft) {
            self.status = SlugStatus::Invalid;
            return Err(MenuQrError::validation(format!("slug \"{}\" is not valid", self.draft)));
        }

        let next = (!self.draft.is_empty()).then(|| self.draft.clone());
        let in_flight = InFlight::enter(&mut self.status, SlugStatus::Saving);
        match self
            .backend
            .update_custom_slug(&self.tenant_id, next.as_deref())
            .await
        {
            Ok(()) => {
                tracing::info!(tenant = %self.tenant_id, slug = ?next, "saved custom slug");
                in_flight.settle(SlugStatus::Idle);
                self.saved = next.clone();
                Ok(next)
            }
            Err(err) => {
                tracing::warn!(tenant = %self.tenant_id, error = %err, "saving custom slug failed");
                in_flight.settle(SlugStatus::Error(err.to_string()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/share/slug.rs"]
mod tests;
