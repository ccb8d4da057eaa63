use super::*;
use crate::encode::matrix::encode_url;
use crate::foundation::core::EcLevel;
use crate::render::raster::render_matrix;

fn custom() -> QrCustomization {
    QrCustomization {
        target_url: "https://example.com/menu/abc123".to_owned(),
        ..Default::default()
    }
}

fn render(c: &QrCustomization) -> QrSurface {
    let m = encode_url(&c.target_url, EcLevel::H).unwrap();
    render_matrix(&m, c).unwrap()
}

#[test]
fn select_is_idempotent_and_does_not_touch_colors() {
    let mut a = TemplateApplier::new();
    assert_eq!(a.state(), ApplierState::Idle);
    a.select("espresso").unwrap();
    assert_eq!(a.state(), ApplierState::Selected("espresso"));
    a.select("espresso").unwrap();
    assert_eq!(a.state(), ApplierState::Selected("espresso"));
    assert!(a.select("nope").is_err());
    assert_eq!(a.selected().unwrap().id, "espresso");
}

#[test]
fn applying_twice_leaves_colors_unchanged() {
    let mut a = TemplateApplier::new();
    let mut c = custom();
    a.select("midnight").unwrap();
    a.apply(&mut c).unwrap();
    let once = (c.foreground_color, c.background_color);
    a.apply(&mut c).unwrap();
    assert_eq!((c.foreground_color, c.background_color), once);
    assert_eq!(once.0, find("midnight").unwrap().colors.foreground);
    assert_eq!(a.state(), ApplierState::Applied("midnight"));
}

#[test]
fn apply_without_selection_is_not_ready() {
    let mut a = TemplateApplier::new();
    let err = a.apply(&mut custom()).unwrap_err();
    assert!(matches!(err, MenuQrError::NotReady(_)));
}

#[test]
fn card_requires_apply_then_render() {
    let mut a = TemplateApplier::new();
    let mut c = custom();
    let info = CardInfo {
        business_name: Some("Joe's Café".to_owned()),
        ..Default::default()
    };

    a.select("classic-menu").unwrap();
    let err = a.download_card(&info).unwrap_err();
    assert!(matches!(err, MenuQrError::NotReady(ref m) if m.contains("apply a template first")));

    a.apply(&mut c).unwrap();
    // Applied but nothing rendered with the template colors yet.
    assert!(a.download_card(&info).is_err());

    let s = render(&c);
    a.record_render(&c, &s);
    let art = a.download_card(&info).unwrap();
    assert_eq!(art.filename, "Joe's Café-classic-menu-template.png");
    assert_eq!(a.state(), ApplierState::CardDownloaded("classic-menu"));

    let img = image::load_from_memory(&art.bytes).unwrap();
    assert_eq!((img.width(), img.height()), (600, 800));
}

#[test]
fn stale_render_with_other_colors_is_rejected() {
    let mut a = TemplateApplier::new();
    let mut c = custom();
    a.select("classic-menu").unwrap();
    a.apply(&mut c).unwrap();
    a.record_render(&c, &render(&c));

    a.select("lavender").unwrap();
    a.apply(&mut c).unwrap();
    let err = a.download_card(&CardInfo::default()).unwrap_err();
    assert!(matches!(err, MenuQrError::NotReady(_)));
}
