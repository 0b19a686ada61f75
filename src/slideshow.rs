use crate::encode::sink::FrameSink;
use crate::foundation::core::{FrameIndex, Viewport};
use crate::foundation::error::{PtvError, PtvResult};
use crate::raster::bitmap::{Bitmap, Region, copy_region};

/// Counters collected during one slideshow run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideshowStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Frames each image was held for.
    pub frames_per_item: u64,
}

/// Offset that centres `inner` within `outer`; images touching an edge within a pixel stay put.
pub fn centre_offset(outer: u32, inner: u32) -> u32 {
    let slack = outer.saturating_sub(inner);
    if slack >= 2 { slack / 2 } else { 0 }
}

/// Slideshow compositor: every image centred on a black viewport and held for
/// `max(1, round(fps * seconds_per_item))` frames. The viewport's duration is not used.
#[derive(Clone, Debug)]
pub struct FramesCompositor {
    viewport: Viewport,
}

impl FramesCompositor {
    /// Create a compositor for a validated viewport.
    pub fn new(viewport: Viewport) -> PtvResult<Self> {
        viewport.validate()?;
        Ok(Self { viewport })
    }

    /// Frames each image is shown for.
    pub fn frames_per_item(&self) -> u64 {
        let n = (self.viewport.fps * self.viewport.seconds_per_item).round();
        if n.is_finite() && n >= 1.0 { n as u64 } else { 1 }
    }

    /// Place `img` centred on a black canvas the size of the viewport.
    pub fn compose(&self, img: &Bitmap) -> PtvResult<Bitmap> {
        let (vw, vh) = (self.viewport.width, self.viewport.height);
        if img.width > vw || img.height > vh {
            return Err(PtvError::precondition(format!(
                "image {}x{} does not fit the {vw}x{vh} viewport",
                img.width, img.height
            )));
        }
        let mut canvas = Bitmap::black(vw, vh);
        let src = Region::new(0, 0, i64::from(img.width), i64::from(img.height));
        copy_region(
            img,
            src,
            &mut canvas,
            i64::from(centre_offset(vw, img.width)),
            i64::from(centre_offset(vh, img.height)),
        )?;
        Ok(canvas)
    }

    /// Emit every image in order.
    #[tracing::instrument(skip(self, images, sink), fields(images = images.len()))]
    pub fn run(&self, images: Vec<Bitmap>, sink: &mut dyn FrameSink) -> PtvResult<SlideshowStats> {
        if images.is_empty() {
            return Err(PtvError::precondition("image sequence is empty"));
        }
        if self.viewport.has_duration() {
            tracing::info!("duration is ignored for the FRAMES style");
        }
        let repeat = self.frames_per_item();
        let mut stats = SlideshowStats {
            frames: 0,
            frames_per_item: repeat,
        };
        for img in images {
            let canvas = self.compose(&img)?;
            drop(img);
            for _ in 0..repeat {
                sink.push_frame(FrameIndex(stats.frames), &canvas)?;
                stats.frames += 1;
            }
        }
        tracing::info!(frames = stats.frames, "slideshow composited");
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../tests/unit/slideshow.rs"]
mod tests;
