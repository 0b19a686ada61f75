use crate::foundation::core::Viewport;
use crate::raster::bitmap::Bitmap;
use crate::scroll::axis::Axis;

/// Rate used when the computed rate is not positive.
pub const FALLBACK_PIXELS_PER_FRAME: f64 = 1.0;

/// Recoverable issue found while computing the scroll rate.
#[derive(Clone, Debug, PartialEq)]
pub struct PacingWarning {
    /// The value that was rejected.
    pub computed: f64,
    /// Human-readable explanation.
    pub message: String,
}

/// Constant scroll velocity for one video.
#[derive(Clone, Debug, PartialEq)]
pub struct Pacing {
    /// Along-axis pixels advanced per emitted frame. Always `> 0`.
    pub pixels_per_frame: f64,
    /// Sum of along-axis extents of all images.
    pub total_extent: u64,
    /// Set when the computed value was clamped.
    pub warning: Option<PacingWarning>,
}

impl Pacing {
    /// Derive pixels-per-frame from the ordered sequence and viewport timing.
    ///
    /// With a duration set the whole extent scrolls in `duration` seconds, otherwise each image
    /// accounts for `seconds_per_item` seconds on average.
    pub fn compute(images: &[Bitmap], vp: &Viewport, axis: Axis) -> Self {
        let total_extent: u64 = images.iter().map(|b| u64::from(axis.along_len(b))).sum();
        let extent = total_extent as f64;
        let computed = if vp.has_duration() {
            extent / (vp.fps * vp.duration)
        } else {
            extent / (vp.fps * vp.seconds_per_item * images.len() as f64)
        };

        if computed.is_finite() && computed > 0.0 {
            tracing::info!(pixels_per_frame = computed, total_extent, "scroll pacing");
            return Self {
                pixels_per_frame: computed,
                total_extent,
                warning: None,
            };
        }

        let message = format!(
            "pixels per frame value was {computed}, set value to {FALLBACK_PIXELS_PER_FRAME}"
        );
        tracing::warn!("{message}");
        Self {
            pixels_per_frame: FALLBACK_PIXELS_PER_FRAME,
            total_extent,
            warning: Some(PacingWarning { computed, message }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/pacing.rs"]
mod tests;
