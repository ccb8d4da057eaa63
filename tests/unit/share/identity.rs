use super::*;

#[test]
fn primary_url_is_built_from_base_and_tenant() {
    let id = ShareIdentity::for_tenant("https://menu.example.com/", "abc123");
    assert_eq!(id.primary_url, "https://menu.example.com/menu/abc123");
    assert_eq!(id.qr_target(), id.primary_url);
    assert_eq!(id.share_link(), id.primary_url);
}

#[test]
fn slug_changes_share_link_but_never_qr_target() {
    let id = ShareIdentity::for_tenant("https://menu.example.com", "abc123");
    let before = id.qr_target().to_owned();

    let vanity = id.with_custom_slug(Some("joes-cafe"));
    assert_eq!(vanity.qr_target(), before);
    assert_eq!(vanity.share_link(), "https://menu.example.com/m/joes-cafe");

    let cleared = vanity.with_custom_slug(None);
    assert_eq!(cleared.qr_target(), before);
    assert_eq!(cleared.share_link(), before);
}

#[test]
fn serializes_camel_case_without_empty_slug() {
    let id = ShareIdentity::for_tenant("https://menu.example.com", "t1");
    let v = serde_json::to_value(&id).unwrap();
    assert_eq!(v["tenantId"], "t1");
    assert_eq!(v["primaryUrl"], "https://menu.example.com/menu/t1");
    assert!(v.get("customSlug").is_none());
}
