use crate::foundation::error::{PtvError, PtvResult};

/// Zero-based index of an emitted video frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output frame geometry and timing.
///
/// `duration == 0.0` means "unset": scroll pacing then falls back to `seconds_per_item`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Frame width in pixels (positive, even).
    pub width: u32,
    /// Frame height in pixels (positive, even).
    pub height: u32,
    /// Frames per second.
    pub fps: f64,
    /// Seconds each source image stays on screen.
    pub seconds_per_item: f64,
    /// Total scroll duration override in seconds.
    pub duration: f64,
}

impl Viewport {
    /// Build a validated viewport.
    pub fn new(
        width: u32,
        height: u32,
        fps: f64,
        seconds_per_item: f64,
        duration: f64,
    ) -> PtvResult<Self> {
        let vp = Self {
            width,
            height,
            fps,
            seconds_per_item,
            duration,
        };
        vp.validate()?;
        Ok(vp)
    }

    /// Check the invariants downstream encoders rely on.
    pub fn validate(&self) -> PtvResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PtvError::validation(
                "viewport width/height must be non-zero",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(PtvError::validation(format!(
                "viewport {}x{} must have even dimensions (required for yuv420p output)",
                self.width, self.height
            )));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(PtvError::validation("fps must be a positive number"));
        }
        if !self.seconds_per_item.is_finite() || self.seconds_per_item < 0.0 {
            return Err(PtvError::validation(
                "seconds per item must be a non-negative number",
            ));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(PtvError::validation(
                "duration must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// `true` when an explicit total duration overrides per-item pacing.
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
