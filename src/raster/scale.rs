use image::imageops::{self, FilterType};

use crate::foundation::math::scale_len;
use crate::raster::bitmap::Bitmap;

/// Resize to exactly `width` x `height` with bilinear filtering.
///
/// Returns the input untouched when the size already matches.
pub fn resize_exact(src: Bitmap, width: u32, height: u32) -> Bitmap {
    if src.width == width && src.height == height {
        return src;
    }
    if src.width == 0 || src.height == 0 || width == 0 || height == 0 {
        return Bitmap::black(width, height);
    }
    let Some(img) = src.into_rgb_image() else {
        return Bitmap::black(width, height);
    };
    Bitmap::from_rgb_image(imageops::resize(&img, width, height, FilterType::Triangle))
}

/// Scale so the width equals `dst_width`, preserving aspect ratio.
///
/// An empty image becomes an empty band of the requested width.
pub fn scale_to_width(src: Bitmap, dst_width: u32) -> Bitmap {
    if dst_width == 0 {
        return src;
    }
    if src.width == 0 || src.height == 0 {
        return Bitmap::black(dst_width, 0);
    }
    let h = scale_len(src.height, dst_width, src.width);
    resize_exact(src, dst_width, h)
}

/// Scale so the height equals `dst_height`, preserving aspect ratio.
pub fn scale_to_height(src: Bitmap, dst_height: u32) -> Bitmap {
    if dst_height == 0 {
        return src;
    }
    if src.width == 0 || src.height == 0 {
        return Bitmap::black(0, dst_height);
    }
    let w = scale_len(src.width, dst_height, src.height);
    resize_exact(src, w, dst_height)
}

/// Scale up or down until the image fits inside `vw` x `vh`, preserving aspect ratio.
pub fn scale_to_fit(src: Bitmap, vw: u32, vh: u32) -> Bitmap {
    if src.width == 0 || src.height == 0 || vw == 0 || vh == 0 {
        return src;
    }
    let sw = f64::from(vw) / f64::from(src.width);
    let sh = f64::from(vh) / f64::from(src.height);
    let (w, h) = if sw <= sh {
        (vw, scale_len(src.height, vw, src.width).min(vh))
    } else {
        (scale_len(src.width, vh, src.height).min(vw), vh)
    };
    resize_exact(src, w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/scale.rs"]
mod tests;
