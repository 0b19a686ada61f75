use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_opaque_pixels() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let bmp = decode_image(&png_bytes(img)).unwrap();
    assert_eq!((bmp.width, bmp.height), (3, 2));
    assert!(bmp.is_uniform([10, 20, 30]));
}

#[test]
fn straight_alpha_is_flattened_over_black() {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 128]));
    let bmp = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(bmp.pixel(0, 0), [128, 0, 0]);

    let clear = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 0]));
    assert_eq!(flatten_over_black(&clear).pixel(0, 0), [0, 0, 0]);
}

#[test]
fn garbage_bytes_are_a_source_error() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, PtvError::Source(_)));
}

#[test]
fn gif_frames_decode_in_order() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_source_decode");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("anim.gif");
    {
        let file = std::fs::File::create(&path).unwrap();
        let mut enc = image::codecs::gif::GifEncoder::new(file);
        let frames = [[255u8, 0, 0, 255], [0, 0, 255, 255]].map(|c| {
            image::Frame::new(image::RgbaImage::from_pixel(4, 4, image::Rgba(c)))
        });
        enc.encode_frames(frames).unwrap();
    }

    let frames = decode_gif_frames(&path).unwrap();
    assert_eq!(frames.len(), 2);
    assert!(frames[0].pixel(1, 1)[0] > 200);
    assert!(frames[1].pixel(1, 1)[2] > 200);
}
