use crate::foundation::core::Viewport;
use crate::foundation::error::PtvResult;
use crate::raster::bitmap::{Bitmap, Region};

/// Which geometric axis the content travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Along = rows (y), cross = columns (x).
    Vertical,
    /// Along = columns (x), cross = rows (y).
    Horizontal,
}

/// Direction the content moves on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Content enters at the bottom edge and moves up.
    Up,
    /// Content enters at the top edge and moves down.
    Down,
    /// Content enters at the right edge and moves left.
    Left,
    /// Content enters at the left edge and moves right.
    Right,
}

impl ScrollDirection {
    /// The axis content moves along.
    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// `true` when the ribbon grows toward decreasing coordinates.
    pub fn reversed(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

impl Axis {
    /// Along-axis extent of a bitmap.
    pub fn along_len(self, b: &Bitmap) -> u32 {
        match self {
            Self::Vertical => b.height,
            Self::Horizontal => b.width,
        }
    }

    /// Cross-axis extent of a bitmap.
    pub fn cross_len(self, b: &Bitmap) -> u32 {
        match self {
            Self::Vertical => b.width,
            Self::Horizontal => b.height,
        }
    }

    /// Viewport length along the scroll axis.
    pub fn viewport_along(self, vp: &Viewport) -> u32 {
        match self {
            Self::Vertical => vp.height,
            Self::Horizontal => vp.width,
        }
    }

    /// Viewport length across the scroll axis.
    pub fn viewport_cross(self, vp: &Viewport) -> u32 {
        match self {
            Self::Vertical => vp.width,
            Self::Horizontal => vp.height,
        }
    }

    /// Black bitmap with the given along/cross extents.
    pub fn black_bitmap(self, along: u32, cross: u32) -> Bitmap {
        match self {
            Self::Vertical => Bitmap::black(cross, along),
            Self::Horizontal => Bitmap::black(along, cross),
        }
    }

    /// Fallible [`Axis::black_bitmap`] for buffers whose size depends on pacing.
    pub fn try_black_bitmap(self, along: u32, cross: u32) -> PtvResult<Bitmap> {
        match self {
            Self::Vertical => Bitmap::try_black(cross, along),
            Self::Horizontal => Bitmap::try_black(along, cross),
        }
    }

    /// Full-cross region covering `[start, start + len)` along the axis.
    pub fn band(self, start: i64, len: i64, cross: u32) -> Region {
        match self {
            Self::Vertical => Region::new(0, start, i64::from(cross), len),
            Self::Horizontal => Region::new(start, 0, len, i64::from(cross)),
        }
    }

    /// Top-left pixel coordinate of a band starting at `start`.
    pub fn band_origin(self, start: i64) -> (i64, i64) {
        match self {
            Self::Vertical => (0, start),
            Self::Horizontal => (start, 0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/axis.rs"]
mod tests;
