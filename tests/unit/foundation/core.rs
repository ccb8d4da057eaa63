use super::*;

#[test]
fn parses_short_long_and_alpha_hex() {
    assert_eq!(Rgba8::from_hex("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::from_hex("#FF0000").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(
        Rgba8::from_hex("0000ff80").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 255,
            a: 128
        }
    );
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#gg0000").is_err());
    assert!(Rgba8::from_hex("#ééé").is_err());
}

#[test]
fn hex_serde_is_lowercase_and_drops_opaque_alpha() {
    let c = Rgba8::rgb(0x1A, 0x2B, 0x3C);
    assert_eq!(serde_json::to_value(c).unwrap(), serde_json::json!("#1a2b3c"));

    let back: Rgba8 = serde_json::from_value(serde_json::json!("#1A2B3C")).unwrap();
    assert_eq!(back, c);

    let bad = serde_json::from_value::<Rgba8>(serde_json::json!("red"));
    assert!(bad.is_err());
}

#[test]
fn contrast_ratio_bounds() {
    let max = contrast_ratio(Rgba8::BLACK, Rgba8::WHITE);
    assert!((max - 21.0).abs() < 1e-6);
    let min = contrast_ratio(Rgba8::WHITE, Rgba8::WHITE);
    assert!((min - 1.0).abs() < 1e-9);
    assert_eq!(
        contrast_ratio(Rgba8::BLACK, Rgba8::WHITE),
        contrast_ratio(Rgba8::WHITE, Rgba8::BLACK)
    );
}

#[test]
fn ec_level_parses_and_displays_single_letter() {
    assert_eq!("h".parse::<EcLevel>().unwrap(), EcLevel::H);
    assert_eq!(" q ".parse::<EcLevel>().unwrap(), EcLevel::Q);
    assert!("X".parse::<EcLevel>().is_err());
    assert_eq!(EcLevel::M.to_string(), "M");
    assert_eq!(serde_json::to_value(EcLevel::L).unwrap(), serde_json::json!("L"));
    assert_eq!(EcLevel::default(), EcLevel::H);
}

#[test]
fn frame_pixel_bounds_and_png_signature() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 255, 4, 5, 6, 255],
    };
    assert_eq!(frame.pixel(1, 0), Some(Rgba8::rgb(4, 5, 6)));
    assert_eq!(frame.pixel(2, 0), None);

    let png = frame.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
