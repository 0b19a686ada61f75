use std::path::Path;

use anyhow::Context as _;
use image::AnimationDecoder as _;

use crate::foundation::error::{PtvError, PtvResult};
use crate::foundation::math::mul_div255_u16;
use crate::raster::bitmap::{Bitmap, RGB8_BPP};

/// Decode an encoded still image into an opaque RGB8 bitmap.
pub fn decode_image(bytes: &[u8]) -> PtvResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PtvError::source(format!("decode image from memory: {e}")))?;
    Ok(flatten_over_black(&dyn_img.to_rgba8()))
}

/// Read and decode an image file.
pub fn decode_image_file(path: &Path) -> PtvResult<Bitmap> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
        .map_err(|e| PtvError::source(format!("'{}': {e}", path.display())))
}

/// Decode every frame of an animated GIF, in display order.
pub fn decode_gif_frames(path: &Path) -> PtvResult<Vec<Bitmap>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open gif '{}'", path.display()))?;
    let decoder = image::codecs::gif::GifDecoder::new(std::io::BufReader::new(file))
        .map_err(|e| PtvError::source(format!("'{}': {e}", path.display())))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| PtvError::source(format!("'{}': {e}", path.display())))?;
    Ok(frames
        .into_iter()
        .map(|f| flatten_over_black(f.buffer()))
        .collect())
}

/// Composite straight-alpha RGBA over black and drop the alpha channel.
pub fn flatten_over_black(rgba: &image::RgbaImage) -> Bitmap {
    let (width, height) = rgba.dimensions();
    let mut data = Vec::with_capacity(width as usize * height as usize * RGB8_BPP);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        if a == 255 {
            data.extend_from_slice(&[r, g, b]);
            continue;
        }
        let a = u16::from(a);
        data.extend_from_slice(&[
            mul_div255_u16(u16::from(r), a) as u8,
            mul_div255_u16(u16::from(g), a) as u8,
            mul_div255_u16(u16::from(b), a) as u8,
        ]);
    }
    Bitmap {
        width,
        height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/decode.rs"]
mod tests;
