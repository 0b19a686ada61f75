use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PtvError, PtvResult};
use crate::raster::bitmap::Bitmap;

/// JPEG quality used for exported frames.
pub const FRAME_JPEG_QUALITY: u8 = 90;

/// Sink writing each frame as `frame000001.jpg`, `frame000002.jpg`, ... into a directory.
#[derive(Debug)]
pub struct ImageSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    next_idx: u64,
    written: Vec<PathBuf>,
}

impl ImageSequenceSink {
    /// Sink targeting `dir`; created on `begin` if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            next_idx: 0,
            written: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name for a 0-based frame index (names start at 1).
    pub fn frame_file_name(idx: FrameIndex) -> String {
        format!("frame{:06}.jpg", idx.0 + 1)
    }
}

impl FrameSink for ImageSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> PtvResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create frames directory '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.next_idx = 0;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Bitmap) -> PtvResult<()> {
        let Some(cfg) = self.cfg.as_ref() else {
            return Err(PtvError::encode("image sequence sink is not started"));
        };
        if idx.0 != self.next_idx {
            return Err(PtvError::encode(format!(
                "out-of-order frame: got {}, expected {}",
                idx.0, self.next_idx
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PtvError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let path = self.dir.join(Self::frame_file_name(idx));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        let mut enc = image::codecs::jpeg::JpegEncoder::new_with_quality(
            std::io::BufWriter::new(file),
            FRAME_JPEG_QUALITY,
        );
        enc.encode(
            &frame.data,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PtvError::encode(format!("failed to encode '{}': {e}", path.display())))?;

        self.written.push(path);
        self.next_idx += 1;
        Ok(())
    }

    fn end(&mut self) -> PtvResult<()> {
        tracing::info!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "frames written"
        );
        Ok(())
    }

    fn abort(&mut self) {
        for path in self.written.drain(..) {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/image_seq.rs"]
mod tests;
