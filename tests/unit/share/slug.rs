use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::*;

#[derive(Default)]
struct FakeBackend {
    taken: HashSet<String>,
    offline: bool,
    checks: Mutex<Vec<String>>,
    updates: Mutex<Vec<Option<String>>>,
}

impl FakeBackend {
    fn with_taken(slugs: &[&str]) -> Self {
        Self {
            taken: slugs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    fn check_count(&self) -> usize {
        self.checks.lock().unwrap().len()
    }
}

#[async_trait]
impl ShareBackend for FakeBackend {
    async fn check_slug_availability(&self, slug: &str, _tenant_id: &str) -> MenuQrResult<bool> {
        self.checks.lock().unwrap().push(slug.to_owned());
        if self.offline {
            return Err(MenuQrError::network("connection refused"));
        }
        Ok(!self.taken.contains(slug))
    }

    async fn update_custom_slug(&self, _tenant_id: &str, slug: Option<&str>) -> MenuQrResult<()> {
        if self.offline {
            return Err(MenuQrError::network("connection refused"));
        }
        self.updates.lock().unwrap().push(slug.map(str::to_owned));
        Ok(())
    }
}

#[test]
fn slug_format_law() {
    assert!(is_valid_slug("my-shop"));
    assert!(is_valid_slug("abc"));
    assert!(is_valid_slug("0-a"));
    assert!(is_valid_slug(&"a".repeat(50)));
    assert!(!is_valid_slug(&"a".repeat(51)));
    assert!(!is_valid_slug("-bad"));
    assert!(!is_valid_slug("ab"));
    assert!(!is_valid_slug("AB-cd"));
    assert!(!is_valid_slug("a--b"));
    assert!(!is_valid_slug("café"));
    assert!(!is_valid_slug("has space"));
    assert!(!is_valid_slug(""));
}

#[tokio::test]
async fn invalid_and_empty_drafts_skip_the_network() {
    let mut v = SlugValidator::new(FakeBackend::default(), "t1", None);
    assert_eq!(*v.check("AB-cd").await, SlugStatus::Invalid);
    assert_eq!(*v.check("   ").await, SlugStatus::Idle);
    assert_eq!(v.backend().check_count(), 0);
}

#[tokio::test]
async fn available_and_taken() {
    let mut v = SlugValidator::new(FakeBackend::with_taken(&["pizza"]), "t1", None);
    assert_eq!(*v.check("pizza").await, SlugStatus::Taken);
    assert_eq!(*v.check("joes-cafe").await, SlugStatus::Available);
    assert_eq!(v.backend().check_count(), 2);
}

#[tokio::test]
async fn own_saved_slug_is_available_without_a_request() {
    let mut v = SlugValidator::new(FakeBackend::with_taken(&["joes-cafe"]), "t1", Some("joes-cafe".into()));
    assert_eq!(v.draft(), "joes-cafe");
    assert_eq!(*v.check("joes-cafe").await, SlugStatus::Available);
    assert_eq!(v.backend().check_count(), 0);
}

#[tokio::test]
async fn network_failure_never_leaves_checking() {
    let mut v = SlugValidator::new(FakeBackend::offline(), "t1", None);
    let status = v.check("joes-cafe").await.clone();
    assert!(matches!(status, SlugStatus::Error(ref m) if m.contains("connection refused")));
    assert_ne!(*v.status(), SlugStatus::Checking);
}

#[tokio::test]
async fn save_is_refused_for_taken_or_invalid() {
    let mut v = SlugValidator::new(FakeBackend::with_taken(&["pizza"]), "t1", None);

    v.check("pizza").await;
    assert!(matches!(v.save().await, Err(MenuQrError::Validation(_))));

    v.check("a--b").await;
    assert!(matches!(v.save().await, Err(MenuQrError::Validation(_))));

    assert!(v.backend().updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn save_then_clear() {
    let mut v = SlugValidator::new(FakeBackend::default(), "t1", None);

    v.check("joes-cafe").await;
    assert_eq!(v.save().await.unwrap().as_deref(), Some("joes-cafe"));
    assert_eq!(v.saved(), Some("joes-cafe"));
    assert_eq!(*v.status(), SlugStatus::Idle);

    v.check("").await;
    assert_eq!(v.save().await.unwrap(), None);
    assert_eq!(v.saved(), None);

    let updates = v.backend().updates.lock().unwrap().clone();
    assert_eq!(updates, vec![Some("joes-cafe".to_owned()), None]);
}

#[tokio::test]
async fn failed_save_is_retryable() {
    let mut v = SlugValidator::new(FakeBackend::offline(), "t1", Some("old-name".into()));
    v.check("old-name").await;
    let err = v.save().await.unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(v.status(), SlugStatus::Error(_)));
    assert_eq!(v.saved(), Some("old-name"));
}

#[tokio::test(start_paused = true)]
async fn debounced_check_can_be_superseded() {
    let mut v = SlugValidator::new(FakeBackend::default(), "t1", None);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = v
        .check_debounced("joes", SLUG_CHECK_DEBOUNCE, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, MenuQrError::Cancelled));
    assert_eq!(v.draft(), "");
    assert_eq!(v.backend().check_count(), 0);

    let fresh = CancellationToken::new();
    let status = v
        .check_debounced("joes-cafe", SLUG_CHECK_DEBOUNCE, &fresh)
        .await
        .unwrap();
    assert_eq!(*status, SlugStatus::Available);
}

/// Backend whose requests never complete.
struct HangingBackend;

#[async_trait]
impl ShareBackend for HangingBackend {
    async fn check_slug_availability(&self, _slug: &str, _tenant_id: &str) -> MenuQrResult<bool> {
        std::future::pending().await
    }

    async fn update_custom_slug(&self, _tenant_id: &str, _slug: Option<&str>) -> MenuQrResult<()> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn dropped_check_returns_to_idle() {
    let mut v = SlugValidator::new(HangingBackend, "t1", None);

    let timed_out = tokio::time::timeout(Duration::from_secs(1), v.check("my-shop")).await;
    assert!(timed_out.is_err());
    assert_eq!(*v.status(), SlugStatus::Idle);
    assert_eq!(v.draft(), "my-shop");

    // Not blocked by a stale in-flight state; the save itself is what hangs now.
    let timed_out = tokio::time::timeout(Duration::from_secs(1), v.save()).await;
    assert!(timed_out.is_err());
    assert_eq!(*v.status(), SlugStatus::Idle);
    assert_eq!(v.saved(), None);
}

#[tokio::test(start_paused = true)]
async fn debounced_check_cancelled_mid_request() {
    let mut v = SlugValidator::new(HangingBackend, "t1", None);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(SLUG_CHECK_DEBOUNCE + Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = v
        .check_debounced("my-shop", SLUG_CHECK_DEBOUNCE, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, MenuQrError::Cancelled));
    assert_eq!(*v.status(), SlugStatus::Idle);
}
