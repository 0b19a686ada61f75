use std::path::PathBuf;

use crate::config::{Settings, Style};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Viewport;
use crate::foundation::error::{PtvError, PtvResult};
use crate::raster::bitmap::Bitmap;
use crate::scroll::compositor::{ScrollCompositor, ScrollStats};
use crate::scroll::pacing::{Pacing, PacingWarning};
use crate::slideshow::FramesCompositor;
use crate::source::{LoadReport, auto_resolution, load_images, scale_images};

/// Images ready for compositing together with the viewport they were scaled for.
#[derive(Debug)]
pub struct Prepared {
    /// Ordered, pre-scaled images.
    pub images: Vec<Bitmap>,
    /// Viewport with auto dimensions resolved.
    pub viewport: Viewport,
    /// What the source adapter loaded and skipped.
    pub load: LoadReport,
}

/// Outcome of one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderReport {
    /// Frames handed to the sink.
    pub frames: u64,
    /// Scroll rate, for scroll styles.
    pub pixels_per_frame: Option<f64>,
    /// Set when the scroll rate had to be clamped.
    pub pacing_warning: Option<PacingWarning>,
    /// Compositor counters, for scroll styles.
    pub scroll: Option<ScrollStats>,
}

/// Load `inputs`, resolve the viewport and scale every image for the style.
#[tracing::instrument(skip(inputs, settings), fields(inputs = inputs.len(), style = %settings.style))]
pub fn prepare(inputs: &[PathBuf], settings: &Settings) -> PtvResult<Prepared> {
    settings.validate()?;
    let (images, load) = load_images(inputs, &settings.source_opts())?;
    let Some(first) = images.first() else {
        return Err(PtvError::precondition("no images loaded from the inputs"));
    };
    let (width, height) = auto_resolution(settings.width, settings.height, first);
    let viewport = Viewport::new(
        width,
        height,
        settings.fps,
        settings.seconds_per_item,
        settings.duration,
    )?;
    let images = scale_images(images, settings.style.scale_mode(), width, height);
    Ok(Prepared {
        images,
        viewport,
        load,
    })
}

/// Composite `images` in `style` into `sink`, driving its whole lifecycle.
///
/// A failure after `begin` aborts the sink so no partial output remains.
#[tracing::instrument(skip(images, sink), fields(images = images.len()))]
pub fn render_to_sink(
    images: Vec<Bitmap>,
    viewport: Viewport,
    style: Style,
    sink: &mut dyn FrameSink,
) -> PtvResult<RenderReport> {
    viewport.validate()?;
    let cfg = SinkConfig {
        width: viewport.width,
        height: viewport.height,
        fps: viewport.fps,
    };

    let Some(direction) = style.scroll_direction() else {
        let comp = FramesCompositor::new(viewport)?;
        sink.begin(cfg)?;
        let stats = finish(comp.run(images, sink), sink)?;
        return Ok(RenderReport {
            frames: stats.frames,
            pixels_per_frame: None,
            pacing_warning: None,
            scroll: None,
        });
    };

    let pacing = Pacing::compute(&images, &viewport, direction.axis());
    let comp = ScrollCompositor::new(viewport, direction, pacing.pixels_per_frame)?;
    comp.check_sequence(&images)?;

    sink.begin(cfg)?;
    let stats = finish(comp.run(images, sink), sink)?;
    Ok(RenderReport {
        frames: stats.frames,
        pixels_per_frame: Some(pacing.pixels_per_frame),
        pacing_warning: pacing.warning,
        scroll: Some(stats),
    })
}

fn finish<T>(run: PtvResult<T>, sink: &mut dyn FrameSink) -> PtvResult<T> {
    match run {
        Ok(v) => {
            if let Err(e) = sink.end() {
                sink.abort();
                return Err(e);
            }
            Ok(v)
        }
        Err(e) => {
            tracing::error!("render failed, discarding partial output: {e}");
            sink.abort();
            Err(e)
        }
    }
}

/// [`prepare`] then [`render_to_sink`].
pub fn render_inputs(
    inputs: &[PathBuf],
    settings: &Settings,
    sink: &mut dyn FrameSink,
) -> PtvResult<RenderReport> {
    let prepared = prepare(inputs, settings)?;
    render_to_sink(prepared.images, prepared.viewport, settings.style, sink)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
