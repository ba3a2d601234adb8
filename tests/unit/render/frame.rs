use super::*;

#[test]
fn pixel_lookup_is_bounds_checked() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 255, 4, 5, 6, 255],
        premultiplied: true,
    };
    assert_eq!(frame.pixel(1, 0), Some([4, 5, 6, 255]));
    assert_eq!(frame.pixel(2, 0), None);
    assert_eq!(frame.pixel(0, 1), None);
}

#[test]
fn unpremultiply_restores_straight_color() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 0, 128, 128, 9, 9, 9, 0],
        premultiplied: true,
    };
    let straight = frame.to_straight_rgba8();
    assert_eq!(&straight[..4], &[128, 0, 255, 128]);
    assert_eq!(&straight[4..], &[9, 9, 9, 0]);
}
