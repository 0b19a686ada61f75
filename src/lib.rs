//! ptv turns PDFs and image sequences into videos.
//!
//! Two presentation styles are supported: a slideshow (`FRAMES`) that shows each image centred
//! on black, and a constant-velocity scroll (`UP`, `DOWN`, `LEFT`, `RIGHT`) that stitches the
//! images into one continuous strip moving through the viewport.
//!
//! # Pipeline overview
//!
//! 1. **Load**: PDFs (via `pdftoppm`), image files and directories -> ordered RGB8 [`Bitmap`]s
//! 2. **Scale**: fit every image to the viewport for the chosen [`Style`]
//! 3. **Pace**: derive pixels-per-frame once from extent, fps and timing ([`Pacing`])
//! 4. **Composite**: [`ScrollCompositor`] or [`FramesCompositor`] emits frames in order
//! 5. **Encode**: a [`FrameSink`] consumes them; [`FfmpegSink`] streams to the system `ffmpeg`
//!
//! The scroll compositor never holds more than the undrained tail of earlier content plus one
//! pending image, and the scroll always ends on a frame of pure background.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod encode;
mod foundation;
mod pipeline;
mod raster;
mod scroll;
mod slideshow;
mod source;

pub use config::{Settings, Style, parse_resolution};
pub use encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, default_output_path, ensure_parent_dir, is_ffmpeg_on_path,
    unique_output_path,
};
pub use encode::image_seq::{FRAME_JPEG_QUALITY, ImageSequenceSink};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{FrameIndex, Viewport};
pub use foundation::error::{PtvError, PtvResult};
pub use pipeline::{Prepared, RenderReport, prepare, render_inputs, render_to_sink};
pub use raster::bitmap::{Bitmap, MAX_BITMAP_BYTES, RGB8_BPP, Region, copy_region};
pub use raster::scale::{resize_exact, scale_to_fit, scale_to_height, scale_to_width};
pub use scroll::axis::{Axis, ScrollDirection};
pub use scroll::compositor::{Phase, ScrollCompositor, ScrollStats};
pub use scroll::pacing::{FALLBACK_PIXELS_PER_FRAME, Pacing, PacingWarning};
pub use scroll::ribbon::Ribbon;
pub use slideshow::{FramesCompositor, SlideshowStats, centre_offset};
pub use source::decode::{decode_gif_frames, decode_image, decode_image_file, flatten_over_black};
pub use source::dir::{IMAGE_EXTENSIONS, InputKind, classify, list_dir_paths, natural_cmp};
pub use source::pdf::{DEFAULT_PDF_DPI, is_pdftoppm_on_path, render_pdf_pages};
pub use source::{LoadReport, ScaleMode, SourceOpts, auto_resolution, load_images, scale_images};
