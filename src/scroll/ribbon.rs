use crate::foundation::error::{PtvError, PtvResult};
use crate::raster::bitmap::{Bitmap, copy_region};
use crate::scroll::axis::Axis;

/// The scroll buffer: the undrained tail of earlier content followed by the next image.
///
/// Offsets passed to a ribbon are *logical*: 0 is the edge the viewport starts from and values
/// grow in consumption order. For reversed directions (Down, Right) logical offset `a` of a
/// band of length `n` lives at physical offset `len - a - n`, so the ribbon grows toward
/// decreasing coordinates while image pixels keep their orientation.
#[derive(Debug)]
pub struct Ribbon {
    axis: Axis,
    reversed: bool,
    cross: u32,
    buf: Bitmap,
}

impl Ribbon {
    /// Allocate a black ribbon `along_len` pixels long.
    ///
    /// Fails with [`PtvError::Bounds`] when the buffer cannot be allocated.
    pub fn empty(axis: Axis, reversed: bool, cross: u32, along_len: u32) -> PtvResult<Self> {
        Ok(Self {
            axis,
            reversed,
            cross,
            buf: axis.try_black_bitmap(along_len, cross)?,
        })
    }

    /// Initial ribbon: `lead` pixels of background, `first`, then `tail` pixels of background.
    pub fn with_first(
        axis: Axis,
        reversed: bool,
        cross: u32,
        lead: u32,
        first: &Bitmap,
        tail: u32,
    ) -> PtvResult<Self> {
        let along_len = checked_len(
            i64::from(lead) + i64::from(axis.along_len(first)) + i64::from(tail),
        )?;
        let mut ribbon = Self::empty(axis, reversed, cross, along_len)?;
        ribbon.place(i64::from(lead), first)?;
        Ok(ribbon)
    }

    /// Along-axis length in pixels.
    pub fn len(&self) -> u32 {
        self.axis.along_len(&self.buf)
    }

    /// `true` when the ribbon has no along-axis extent.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backing buffer in physical coordinates.
    pub fn bitmap(&self) -> &Bitmap {
        &self.buf
    }

    /// Byte size of the backing buffer.
    pub fn byte_len(&self) -> usize {
        self.buf.data.len()
    }

    fn physical(&self, logical_start: i64, len: i64) -> i64 {
        if self.reversed {
            i64::from(self.len()) - logical_start - len
        } else {
            logical_start
        }
    }

    /// Copy `img` into the band starting at logical offset `at`.
    ///
    /// `img` must span the ribbon's full cross axis.
    pub fn place(&mut self, at: i64, img: &Bitmap) -> PtvResult<()> {
        let img_cross = self.axis.cross_len(img);
        if img_cross != self.cross {
            return Err(PtvError::precondition(format!(
                "image is {}x{}, but its cross-axis size must equal the ribbon's {}",
                img.width, img.height, self.cross
            )));
        }
        let len = i64::from(self.axis.along_len(img));
        let start = self.physical(at, len);
        let src = self.axis.band(0, len, self.cross);
        let (x, y) = self.axis.band_origin(start);
        copy_region(img, src, &mut self.buf, x, y)
    }

    /// Copy the viewport window `[at, at + frame_along)` into `frame`.
    pub fn slice_into(&self, at: i64, frame: &mut Bitmap) -> PtvResult<()> {
        let len = i64::from(self.axis.along_len(frame));
        let start = self.physical(at, len);
        let src = self.axis.band(start, len, self.cross);
        copy_region(&self.buf, src, frame, 0, 0)
    }

    /// Build the next ribbon.
    ///
    /// The new ribbon holds `[carry_from, len)` of this one at logical offset 0, then `next`,
    /// then `tail` pixels of background. The old buffer is released when `self` is dropped.
    pub fn rebuild(&self, carry_from: i64, next: &Bitmap, tail: u32) -> PtvResult<Ribbon> {
        let carry_len = i64::from(self.len()) - carry_from;
        if carry_from < 0 || carry_len < 0 {
            return Err(PtvError::bounds(format!(
                "carry range starts at {carry_from}, ribbon length is {}",
                self.len()
            )));
        }
        let along_len = checked_len(
            carry_len + i64::from(self.axis.along_len(next)) + i64::from(tail),
        )?;

        let mut out = Self::empty(self.axis, self.reversed, self.cross, along_len)?;
        let src = self
            .axis
            .band(self.physical(carry_from, carry_len), carry_len, self.cross);
        let (x, y) = self.axis.band_origin(out.physical(0, carry_len));
        copy_region(&self.buf, src, &mut out.buf, x, y)?;
        out.place(carry_len, next)?;
        Ok(out)
    }
}

fn checked_len(len: i64) -> PtvResult<u32> {
    u32::try_from(len)
        .map_err(|_| PtvError::bounds(format!("ribbon length {len} does not fit a buffer")))
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/ribbon.rs"]
mod tests;
