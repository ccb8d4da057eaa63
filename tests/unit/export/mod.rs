use super::*;
use crate::encode::matrix::encode_url;
use crate::foundation::core::EcLevel;
use crate::render::overlay::EXPORT_PADDING;
use crate::render::raster::render_matrix;

#[test]
fn exports_without_render_are_not_ready() {
    let err = export_png(None, Some("Deli")).unwrap_err();
    assert!(matches!(err, MenuQrError::NotReady(_)));

    let err = export_svg(None, &QrCustomization::default(), None, EXPORT_PADDING, Some("Deli"))
        .unwrap_err();
    assert!(matches!(err, MenuQrError::NotReady(_)));
}

#[test]
fn png_export_is_named_and_decodable() {
    let custom = QrCustomization {
        target_url: "https://example.com/menu/abc123".to_owned(),
        ..Default::default()
    };
    let m = encode_url(&custom.target_url, EcLevel::H).unwrap();
    let s = render_matrix(&m, &custom).unwrap();

    let art = export_png(Some(&s), Some("Joe's Café")).unwrap();
    assert_eq!(art.filename, "Joe's Café-qr-code.png");
    assert_eq!(art.format, ExportFormat::Png);
    let img = image::load_from_memory(&art.bytes).unwrap();
    assert_eq!((img.width(), img.height()), (256, 256));

    let svg = export_svg(Some(&m), &custom, None, EXPORT_PADDING, None).unwrap();
    assert_eq!(svg.filename, "business-qr-code.svg");
    assert!(String::from_utf8(svg.bytes).unwrap().contains("<svg"));
}
