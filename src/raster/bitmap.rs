use crate::foundation::error::{PtvError, PtvResult};

/// Bytes per RGB8 pixel.
pub const RGB8_BPP: usize = 3;

/// Largest buffer [`Bitmap::try_black`] will allocate (4 GiB).
pub const MAX_BITMAP_BYTES: usize = 1 << 32;

/// An owned RGB8 raster, tightly packed, row-major.
///
/// Used both for decoded source images and for emitted video frames.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 3` bytes.
    pub data: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Bitmap {
    /// Allocate a bitmap filled with `fill`.
    pub fn filled(width: u32, height: u32, fill: [u8; 3]) -> Self {
        let px = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(px * RGB8_BPP);
        for _ in 0..px {
            data.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Allocate a black bitmap.
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * RGB8_BPP],
        }
    }

    /// Allocate a black bitmap, failing with [`PtvError::Bounds`] instead of aborting when the
    /// buffer would exceed [`MAX_BITMAP_BYTES`] or the allocator refuses it.
    pub fn try_black(width: u32, height: u32) -> PtvResult<Self> {
        let too_big = || {
            PtvError::bounds(format!(
                "{width}x{height} rgb8 buffer exceeds {MAX_BITMAP_BYTES} bytes"
            ))
        };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(RGB8_BPP))
            .filter(|&n| n <= MAX_BITMAP_BYTES)
            .ok_or_else(too_big)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            PtvError::bounds(format!("cannot allocate {width}x{height} rgb8 buffer: {e}"))
        })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap raw RGB8 bytes, checking the length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> PtvResult<Self> {
        let expected = (width as usize) * (height as usize) * RGB8_BPP;
        if data.len() != expected {
            return Err(PtvError::validation(format!(
                "rgb8 buffer for {width}x{height} must be {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * RGB8_BPP
    }

    /// Read one pixel. Panics when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = y as usize * self.stride() + x as usize * RGB8_BPP;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Write one pixel. Panics when out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 3]) {
        let i = y as usize * self.stride() + x as usize * RGB8_BPP;
        self.data[i..i + RGB8_BPP].copy_from_slice(&px);
    }

    /// `true` when every pixel equals `px`.
    pub fn is_uniform(&self, px: [u8; 3]) -> bool {
        self.data.chunks_exact(RGB8_BPP).all(|c| c == px)
    }

    /// Convert into an `image` buffer for encoders.
    pub fn into_rgb_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data)
    }

    /// Take ownership of an `image` buffer.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// An axis-aligned pixel rectangle. Signed so that drifted arithmetic is caught
/// by [`Region::check_within`] instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width.
    pub w: i64,
    /// Height.
    pub h: i64,
}

impl Region {
    /// Build a region.
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// Fail unless `0 <= x`, `0 <= y`, `x + w <= width` and `y + h <= height`.
    pub fn check_within(&self, bitmap: &Bitmap, what: &str) -> PtvResult<()> {
        let cols = i64::from(bitmap.width);
        let rows = i64::from(bitmap.height);
        if self.x < 0
            || self.y < 0
            || self.w < 0
            || self.h < 0
            || self.x + self.w > cols
            || self.y + self.h > rows
        {
            return Err(PtvError::bounds(format!(
                "{what} region {}x{}+{}+{} outside {}x{} buffer",
                self.w, self.h, self.x, self.y, cols, rows
            )));
        }
        Ok(())
    }
}

/// Copy `src_region` of `src` into `dst` with its top-left at (`dst_x`, `dst_y`).
///
/// Both rectangles are validated before any byte moves.
pub fn copy_region(
    src: &Bitmap,
    src_region: Region,
    dst: &mut Bitmap,
    dst_x: i64,
    dst_y: i64,
) -> PtvResult<()> {
    src_region.check_within(src, "source")?;
    let dst_region = Region::new(dst_x, dst_y, src_region.w, src_region.h);
    dst_region.check_within(dst, "destination")?;

    if src_region.w == 0 || src_region.h == 0 {
        return Ok(());
    }

    let row_bytes = src_region.w as usize * RGB8_BPP;
    let src_stride = src.stride();
    let dst_stride = dst.stride();
    for row in 0..src_region.h as usize {
        let s = (src_region.y as usize + row) * src_stride + src_region.x as usize * RGB8_BPP;
        let d = (dst_y as usize + row) * dst_stride + dst_x as usize * RGB8_BPP;
        dst.data[d..d + row_bytes].copy_from_slice(&src.data[s..s + row_bytes]);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bitmap.rs"]
mod tests;
