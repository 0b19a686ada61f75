use std::{
    io::Read as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
    thread::JoinHandle,
};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PtvError, PtvResult};
use crate::raster::bitmap::{Bitmap, RGB8_BPP};

/// Options for the ffmpeg-backed MP4 sink.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output video path. The container follows the extension.
    pub out_path: PathBuf,
    /// Replace an existing file instead of failing.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Options writing to `out_path` without overwriting.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: false,
        }
    }
}

/// `true` when an `ffmpeg` binary answers `-version`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> PtvResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Video path derived from the first input.
///
/// A file keeps its stem with a `.mp4` extension next to it; a directory becomes
/// `<dir name>.mp4` beside the directory.
pub fn default_output_path(first_input: &Path) -> PathBuf {
    let stem = if first_input.is_dir() {
        first_input.file_name()
    } else {
        first_input.file_stem()
    };
    let name = stem
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "output".to_owned());
    let parent = first_input.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{name}.mp4"))
}

/// First of `path`, `stem_1.ext`, `stem_2.ext`, ... that does not exist yet.
pub fn unique_output_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    (1u32..)
        .map(|n| parent.join(format!("{stem}_{n}{ext}")))
        .find(|p| !p.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

struct Running {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<String>>,
    next_idx: u64,
}

/// Sink streaming raw `rgb24` frames into the system `ffmpeg` (H.264, yuv420p).
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    cfg: Option<SinkConfig>,
    running: Option<Running>,
}

impl FfmpegSink {
    /// Create a sink; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            running: None,
        }
    }

    /// Output path this sink writes.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }
}

fn validate_config(cfg: &SinkConfig) -> PtvResult<()> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(PtvError::validation("encode width/height must be non-zero"));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(PtvError::validation(
            "encode width/height must be even (required for yuv420p output)",
        ));
    }
    if !cfg.fps.is_finite() || cfg.fps <= 0.0 {
        return Err(PtvError::validation(format!(
            "encode fps must be positive, got {}",
            cfg.fps
        )));
    }
    Ok(())
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(skip(self), fields(out = %self.opts.out_path.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> PtvResult<()> {
        validate_config(&cfg)?;
        if self.running.is_some() {
            return Err(PtvError::encode("ffmpeg sink already started"));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(PtvError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(PtvError::encode(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            PtvError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PtvError::encode("failed to open ffmpeg stdin"))?;
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                buf
            })
        });

        tracing::debug!(width = cfg.width, height = cfg.height, fps = cfg.fps, "ffmpeg started");
        self.cfg = Some(cfg);
        self.running = Some(Running {
            child,
            stdin: Some(stdin),
            stderr,
            next_idx: 0,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Bitmap) -> PtvResult<()> {
        let (Some(cfg), Some(run)) = (self.cfg.as_ref(), self.running.as_mut()) else {
            return Err(PtvError::encode("ffmpeg sink is not started"));
        };
        if idx.0 != run.next_idx {
            return Err(PtvError::encode(format!(
                "out-of-order frame: got {}, expected {}",
                idx.0, run.next_idx
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PtvError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != cfg.width as usize * cfg.height as usize * RGB8_BPP {
            return Err(PtvError::encode("frame data size mismatch with width*height*3"));
        }
        let Some(stdin) = run.stdin.as_mut() else {
            return Err(PtvError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin
            .write_all(&frame.data)
            .map_err(|e| PtvError::encode(format!("failed to write frame to ffmpeg stdin: {e}")))?;
        run.next_idx += 1;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(out = %self.opts.out_path.display()))]
    fn end(&mut self) -> PtvResult<()> {
        let Some(mut run) = self.running.take() else {
            return Err(PtvError::encode("ffmpeg sink is not started"));
        };
        drop(run.stdin.take());

        let status = run
            .child
            .wait()
            .map_err(|e| PtvError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr = run
            .stderr
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or_default();

        if !status.success() {
            return Err(PtvError::encode(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }
        tracing::info!(frames = run.next_idx, "video written");
        Ok(())
    }

    fn abort(&mut self) {
        let Some(mut run) = self.running.take() else {
            return;
        };
        drop(run.stdin.take());
        let _ = run.child.kill();
        let _ = run.child.wait();
        if let Some(h) = run.stderr.take() {
            let _ = h.join();
        }
        match std::fs::remove_file(&self.opts.out_path) {
            Ok(()) => tracing::warn!(
                out = %self.opts.out_path.display(),
                "removed partial video"
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                out = %self.opts.out_path.display(),
                "could not remove partial video: {e}"
            ),
        }
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.running.is_some() {
            self.abort();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
