use crate::foundation::core::FrameIndex;
use crate::foundation::error::PtvResult;
use crate::raster::bitmap::Bitmap;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: f64,
}

/// Sink contract for consuming composited frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing, gap-free `FrameIndex`
/// values starting at 0, and never after `end` or `abort`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PtvResult<()>;
    /// Push one RGB8 frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Bitmap) -> PtvResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PtvResult<()>;
    /// Called instead of `end` when generation failed. Sinks discard partial output.
    fn abort(&mut self) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Bitmap)>,
    ended: bool,
    aborted: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, Bitmap)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn ended(&self) -> bool {
        self.ended
    }

    /// `true` once `abort` has been called.
    pub fn aborted(&self) -> bool {
        self.aborted
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PtvResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Bitmap) -> PtvResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PtvResult<()> {
        self.ended = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
        self.aborted = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
