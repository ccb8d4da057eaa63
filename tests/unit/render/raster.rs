use super::*;
use crate::encode::matrix::encode_url;
use crate::foundation::core::EcLevel;

const URL: &str = "https://example.com/menu/abc123";

fn custom(size: u32) -> QrCustomization {
    QrCustomization {
        target_url: URL.to_owned(),
        size,
        ..Default::default()
    }
}

#[test]
fn surface_is_exactly_size_square() {
    let m = encode_url(URL, EcLevel::H).unwrap();
    for size in [150, 256, 333, 400] {
        let s = render_matrix(&m, &custom(size)).unwrap();
        assert_eq!((s.width(), s.height()), (size, size));
        assert_eq!(s.to_frame().data.len(), (size * size * 4) as usize);
    }
}

#[test]
fn render_is_pixel_identical_across_runs() {
    let m = encode_url(URL, EcLevel::H).unwrap();
    let c = QrCustomization {
        foreground_color: Rgba8::rgb(0x1f, 0x29, 0x37),
        background_color: Rgba8::rgb(0xfe, 0xf3, 0xc7),
        ..custom(256)
    };
    let a = render_matrix(&m, &c).unwrap();
    let b = render_matrix(&m, &c).unwrap();
    assert_eq!(a.to_frame(), b.to_frame());
    assert_eq!(a.encode_png().unwrap(), b.encode_png().unwrap());
}

#[test]
fn quiet_zone_uses_background_and_modules_use_foreground() {
    let m = encode_url(URL, EcLevel::H).unwrap();
    let c = QrCustomization {
        foreground_color: Rgba8::rgb(10, 20, 30),
        background_color: Rgba8::rgb(240, 230, 220),
        margin_modules: 4,
        ..custom(400)
    };
    let s = render_matrix(&m, &c).unwrap();
    let span = m.width() as u32 + 8;
    let module_px = 400.0 / span as f64;

    assert_eq!(s.pixel(0, 0), Some(c.background_color));
    assert_eq!(s.pixel(399, 399), Some(c.background_color));

    // Center of the top-left finder module (module 0,0 after the 4-module quiet zone).
    let p = ((4.0 + 0.5) * module_px) as u32;
    assert_eq!(s.pixel(p, p), Some(c.foreground_color));
}

#[test]
fn no_margin_puts_finder_at_origin() {
    let m = encode_url(URL, EcLevel::H).unwrap();
    let c = QrCustomization {
        include_margin: false,
        margin_modules: 10,
        ..custom(200)
    };
    let s = render_matrix(&m, &c).unwrap();
    assert_eq!(s.pixel(0, 0), Some(Rgba8::BLACK));
    assert_eq!(s.pixel(199, 0), Some(Rgba8::BLACK));
}

#[test]
fn sampled_modules_match_matrix() {
    let m = encode_url(URL, EcLevel::Q).unwrap();
    let c = custom(300);
    let s = render_matrix(&m, &c).unwrap();
    let margin = c.effective_margin() as i64;
    let span = m.width() as f64 + 2.0 * margin as f64;
    let module_px = 300.0 / span;
    for my in 0..m.width() as i64 {
        for mx in 0..m.width() as i64 {
            let px = ((mx + margin) as f64 + 0.5) * module_px;
            let py = ((my + margin) as f64 + 0.5) * module_px;
            let want = if m.is_dark(mx, my) {
                Rgba8::BLACK
            } else {
                Rgba8::WHITE
            };
            assert_eq!(s.pixel(px as u32, py as u32), Some(want), "module {mx},{my}");
        }
    }
}

#[test]
fn invalid_customization_blocks_render() {
    let m = encode_url(URL, EcLevel::H).unwrap();
    assert!(render_matrix(&m, &custom(100)).is_err());
}

#[test]
fn symbol_wider_than_surface_is_rejected() {
    let url = format!("https://example.com/{}", "a".repeat(1800));
    let m = encode_url(&url, EcLevel::L).unwrap();
    let c = QrCustomization {
        target_url: url,
        size: 150,
        margin_modules: 10,
        ..Default::default()
    };
    assert!(m.width() + 20 > 150);

    let err = render_matrix(&m, &c).unwrap_err();
    assert!(matches!(err, MenuQrError::Validation(ref msg) if msg.contains("raise the size")));
}

#[test]
fn one_pixel_per_module_still_renders() {
    let url = format!("https://example.com/{}", "a".repeat(1800));
    let m = encode_url(&url, EcLevel::L).unwrap();
    let c = QrCustomization {
        target_url: url,
        size: 150,
        include_margin: false,
        ..Default::default()
    };
    assert!(m.width() <= 150);
    let s = render_matrix(&m, &c).unwrap();
    assert_eq!(s.width(), 150);
}
