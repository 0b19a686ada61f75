use crate::encode::sink::FrameSink;
use crate::foundation::core::{FrameIndex, Viewport};
use crate::foundation::error::{PtvError, PtvResult};
use crate::foundation::math::ceil_px;
use crate::raster::bitmap::Bitmap;
use crate::scroll::axis::{Axis, ScrollDirection};
use crate::scroll::ribbon::Ribbon;

/// Where the compositor is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// First image placed after a viewport of background.
    Init,
    /// Intermediate images appended one ribbon at a time.
    Steady,
    /// Final image placed with trailing background.
    Draining,
    /// Ribbon exhausted; no further frames.
    Done,
}

/// Counters collected during one compositor run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Ribbon rebuilds performed (one per image after the first).
    pub rebuilds: u32,
    /// Along-axis ribbon length after INIT and after each rebuild, in order.
    pub ribbon_lengths: Vec<u32>,
    /// Largest ribbon buffer held, in bytes.
    pub peak_ribbon_bytes: usize,
}

/// Constant-velocity scroll compositor.
///
/// Stitches the ordered images into a ribbon that never holds more than the undrained tail plus
/// one pending image, and samples viewport windows from it every `pixels_per_frame` pixels.
/// Frame `k` shows stream offset `floor(k * pixels_per_frame)`; the ribbon-local cursor is
/// derived from the frame index and the whole pixels dropped at rebuilds, never accumulated.
#[derive(Clone, Debug)]
pub struct ScrollCompositor {
    viewport: Viewport,
    direction: ScrollDirection,
    pixels_per_frame: f64,
}

impl ScrollCompositor {
    /// Create a compositor. `pixels_per_frame` must be positive and finite.
    pub fn new(
        viewport: Viewport,
        direction: ScrollDirection,
        pixels_per_frame: f64,
    ) -> PtvResult<Self> {
        viewport.validate()?;
        if !pixels_per_frame.is_finite() || pixels_per_frame <= 0.0 {
            return Err(PtvError::validation(format!(
                "pixels per frame must be positive, got {pixels_per_frame}"
            )));
        }
        Ok(Self {
            viewport,
            direction,
            pixels_per_frame,
        })
    }

    fn axis(&self) -> Axis {
        self.direction.axis()
    }

    /// Trailing background appended after the final image.
    ///
    /// One viewport scrolls the last image fully out; `2 * pixels_per_frame` more guarantees the
    /// last emitted window lies entirely in background.
    pub fn tail_len(&self) -> u32 {
        self.axis()
            .viewport_along(&self.viewport)
            .saturating_add(ceil_px(2.0 * self.pixels_per_frame))
    }

    /// Reject sequences the ribbon cannot hold.
    pub fn check_sequence(&self, images: &[Bitmap]) -> PtvResult<()> {
        if images.is_empty() {
            return Err(PtvError::precondition("image sequence is empty"));
        }
        let axis = self.axis();
        let cross = axis.viewport_cross(&self.viewport);
        for (i, img) in images.iter().enumerate() {
            if img.data.len() != img.stride() * img.height as usize {
                return Err(PtvError::precondition(format!(
                    "image {i} buffer does not match its {}x{} size",
                    img.width, img.height
                )));
            }
            if axis.cross_len(img) != cross {
                return Err(PtvError::precondition(format!(
                    "image {i} is {}x{}, but its cross-axis size must equal the viewport's {cross}",
                    img.width, img.height
                )));
            }
        }
        Ok(())
    }

    /// Composite every frame of the scroll into `sink`, in order.
    ///
    /// Images are consumed; each buffer is released once copied into the ribbon. The sink is
    /// neither started nor finished here.
    #[tracing::instrument(skip(self, images, sink), fields(direction = ?self.direction, images = images.len()))]
    pub fn run(&self, images: Vec<Bitmap>, sink: &mut dyn FrameSink) -> PtvResult<ScrollStats> {
        self.check_sequence(&images)?;

        let axis = self.axis();
        let reversed = self.direction.reversed();
        let lead = axis.viewport_along(&self.viewport);
        let cross = axis.viewport_cross(&self.viewport);
        let tail = self.tail_len();
        let count = images.len();

        let mut frame = axis.black_bitmap(lead, cross);
        let mut stats = ScrollStats::default();
        let mut images = images.into_iter();

        let Some(first) = images.next() else {
            return Err(PtvError::precondition("image sequence is empty"));
        };
        let mut phase = if count == 1 {
            Phase::Draining
        } else {
            Phase::Init
        };
        let first_tail = if phase == Phase::Draining { tail } else { 0 };
        let mut ribbon = Ribbon::with_first(axis, reversed, cross, lead, &first, first_tail)
            .inspect_err(|e| tracing::error!("ribbon init failed: {e}"))?;
        drop(first);
        self.record(&ribbon, &mut stats);
        // Stream pixels dropped from the front of the ribbon so far.
        let mut consumed = 0i64;

        for (i, next) in images.enumerate() {
            let index = i + 1;
            self.drain(&ribbon, consumed, &mut frame, sink, &mut stats)?;

            phase = if index + 1 == count {
                Phase::Draining
            } else {
                Phase::Steady
            };
            let next_tail = if phase == Phase::Draining { tail } else { 0 };
            let carry_from = self.stream_offset(stats.frames) - consumed;
            ribbon = ribbon
                .rebuild(carry_from, &next, next_tail)
                .inspect_err(|e| tracing::error!(image = index, "ribbon rebuild failed: {e}"))?;
            consumed += carry_from;
            drop(next);

            stats.rebuilds += 1;
            self.record(&ribbon, &mut stats);
            tracing::debug!(
                image = index + 1,
                of = count,
                ?phase,
                ribbon_len = ribbon.len(),
                "ribbon rebuilt"
            );
        }

        self.drain(&ribbon, consumed, &mut frame, sink, &mut stats)?;
        phase = Phase::Done;
        tracing::info!(frames = stats.frames, ?phase, "scroll composited");
        Ok(stats)
    }

    fn record(&self, ribbon: &Ribbon, stats: &mut ScrollStats) {
        stats.ribbon_lengths.push(ribbon.len());
        stats.peak_ribbon_bytes = stats.peak_ribbon_bytes.max(ribbon.byte_len());
    }

    /// Whole stream pixels scrolled past before frame `k`.
    fn stream_offset(&self, k: u64) -> i64 {
        (k as f64 * self.pixels_per_frame).floor() as i64
    }

    /// Emit every window that fits before the ribbon has to grow.
    fn drain(
        &self,
        ribbon: &Ribbon,
        consumed: i64,
        frame: &mut Bitmap,
        sink: &mut dyn FrameSink,
        stats: &mut ScrollStats,
    ) -> PtvResult<()> {
        let len = f64::from(ribbon.len());
        let view = f64::from(self.axis().viewport_along(&self.viewport));
        loop {
            let cursor = stats.frames as f64 * self.pixels_per_frame - consumed as f64;
            if len - (cursor + view) <= self.pixels_per_frame {
                return Ok(());
            }
            ribbon
                .slice_into(self.stream_offset(stats.frames) - consumed, frame)
                .inspect_err(|e| tracing::error!(frame = stats.frames, "slice failed: {e}"))?;
            sink.push_frame(FrameIndex(stats.frames), frame)?;
            stats.frames += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/compositor.rs"]
mod tests;
