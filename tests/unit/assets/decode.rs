use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = decode_image(b"definitely not a png").unwrap_err();
    assert!(matches!(err, PanelGridError::Other(_)));
}

#[test]
fn from_rgba8_checks_length_and_clears_transparent_color() {
    assert!(PreparedImage::from_rgba8(2, 2, vec![0; 12]).is_err());

    let img = PreparedImage::from_rgba8(1, 1, vec![255, 10, 20, 0]).unwrap();
    assert_eq!(img.rgba8_premul.as_slice(), &[0, 0, 0, 0]);

    let solid = PreparedImage::solid(3, 2, [9, 8, 7, 255]).unwrap();
    assert_eq!(solid.rgba8_premul.len(), 24);
    assert!(!solid.is_empty());
}
