//! Image source adapter: PDFs and image directories to one ordered, pre-scaled RGB8 sequence.

pub mod decode;
pub mod dir;
pub mod pdf;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::foundation::error::{PtvError, PtvResult};
use crate::foundation::math::even_up;
use crate::raster::bitmap::Bitmap;
use crate::raster::scale::{scale_to_fit, scale_to_height, scale_to_width};
use crate::source::dir::{InputKind, classify, list_dir_paths};

/// Options controlling how inputs are expanded into images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceOpts {
    /// Add every frame of directory GIFs instead of skipping them.
    pub render_gifs: bool,
    /// Walk directory entries back to front.
    pub reverse: bool,
    /// PDF rasterisation resolution.
    pub dpi: u32,
}

impl Default for SourceOpts {
    fn default() -> Self {
        Self {
            render_gifs: false,
            reverse: false,
            dpi: pdf::DEFAULT_PDF_DPI,
        }
    }
}

/// How each image is fitted to the viewport before compositing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleMode {
    /// Fit inside the viewport, preserving aspect.
    Fit,
    /// Match the viewport width (vertical scroll).
    Width,
    /// Match the viewport height (horizontal scroll).
    Height,
}

/// Counts reported after loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Images in the final sequence.
    pub images: usize,
    /// Inputs skipped because they failed to load.
    pub failed: Vec<PathBuf>,
    /// GIFs skipped because GIF rendering is off.
    pub skipped_gifs: Vec<PathBuf>,
}

fn load_file(
    path: &Path,
    kind: InputKind,
    opts: &SourceOpts,
    out: &mut Vec<Bitmap>,
    report: &mut LoadReport,
) {
    let loaded = match kind {
        InputKind::Pdf => pdf::render_pdf_pages(path, opts.dpi),
        InputKind::Gif if !opts.render_gifs => {
            tracing::info!(path = %path.display(), "gif skipped; enable gif rendering to include it");
            report.skipped_gifs.push(path.to_path_buf());
            return;
        }
        InputKind::Gif => decode::decode_gif_frames(path),
        InputKind::Image => decode::decode_image_file(path).map(|b| vec![b]),
    };
    match loaded {
        Ok(images) => out.extend(images),
        Err(e) => {
            tracing::warn!(path = %path.display(), "input skipped: {e}");
            report.failed.push(path.to_path_buf());
        }
    }
}

/// Expand `inputs` (PDF files, image files or directories) into decoded images, in order.
///
/// Items that fail to load are omitted with a warning. A missing input path or an empty final
/// sequence is an error.
#[tracing::instrument(skip(inputs), fields(inputs = inputs.len()))]
pub fn load_images(inputs: &[PathBuf], opts: &SourceOpts) -> PtvResult<(Vec<Bitmap>, LoadReport)> {
    let mut images = Vec::new();
    let mut report = LoadReport::default();

    for input in inputs {
        if input.is_dir() {
            let mut paths = list_dir_paths(input)?;
            if opts.reverse {
                paths.reverse();
            }
            for path in &paths {
                if let Some(kind) = classify(path) {
                    load_file(path, kind, opts, &mut images, &mut report);
                }
            }
            continue;
        }
        if !input.exists() {
            return Err(PtvError::source(format!(
                "input '{}' does not exist",
                input.display()
            )));
        }
        let Some(kind) = classify(input) else {
            return Err(PtvError::source(format!(
                "input '{}' is not a pdf, image or directory",
                input.display()
            )));
        };
        // A GIF named explicitly is always rendered.
        let kind_opts = SourceOpts {
            render_gifs: true,
            ..*opts
        };
        load_file(input, kind, &kind_opts, &mut images, &mut report);
    }

    if images.is_empty() {
        return Err(PtvError::precondition("no images loaded from the inputs"));
    }
    report.images = images.len();
    tracing::info!(
        images = report.images,
        failed = report.failed.len(),
        "images loaded"
    );
    Ok((images, report))
}

/// Fill a zero viewport dimension from the first image, rounded up to even.
pub fn auto_resolution(width: u32, height: u32, first: &Bitmap) -> (u32, u32) {
    let pick = |requested: u32, natural: u32| {
        if requested == 0 {
            even_up(natural.max(1))
        } else {
            requested
        }
    };
    (pick(width, first.width), pick(height, first.height))
}

/// Scale every image for the style, in parallel, preserving order.
#[tracing::instrument(skip(images), fields(images = images.len()))]
pub fn scale_images(images: Vec<Bitmap>, mode: ScaleMode, width: u32, height: u32) -> Vec<Bitmap> {
    images
        .into_par_iter()
        .map(|img| match mode {
            ScaleMode::Fit => scale_to_fit(img, width, height),
            ScaleMode::Width => scale_to_width(img, width),
            ScaleMode::Height => scale_to_height(img, height),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/source/mod.rs"]
mod tests;
