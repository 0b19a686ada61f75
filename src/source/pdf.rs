use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;

use crate::foundation::error::{PtvError, PtvResult};
use crate::raster::bitmap::Bitmap;
use crate::source::decode::decode_image_file;
use crate::source::dir::sort_natural;

/// Rasterisation resolution used when none is configured.
pub const DEFAULT_PDF_DPI: u32 = 150;

/// `true` when poppler's `pdftoppm` answers `-v`.
pub fn is_pdftoppm_on_path() -> bool {
    Command::new("pdftoppm")
        .arg("-v")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

struct TempDirGuard(Option<PathBuf>);

impl TempDirGuard {
    fn create() -> PtvResult<Self> {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let path = std::env::temp_dir().join(format!(
            "ptv_pdf_{}_{}_{}",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));
        std::fs::create_dir_all(&path)
            .with_context(|| format!("create temporary directory '{}'", path.display()))?;
        Ok(Self(Some(path)))
    }

    fn path(&self) -> &Path {
        self.0.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_dir_all(path);
        }
    }
}

/// Rasterise every page of `pdf` at `dpi`, in page order.
///
/// Pages that fail to decode are skipped with a warning. A document that `pdftoppm` cannot
/// open is a source error.
#[tracing::instrument(skip_all, fields(pdf = %pdf.display(), dpi = dpi))]
pub fn render_pdf_pages(pdf: &Path, dpi: u32) -> PtvResult<Vec<Bitmap>> {
    if dpi == 0 {
        return Err(PtvError::validation("pdf dpi must be non-zero"));
    }
    if !is_pdftoppm_on_path() {
        return Err(PtvError::source(
            "pdftoppm (poppler-utils) is required for PDF input, but was not found on PATH",
        ));
    }

    let tmp = TempDirGuard::create()?;
    let prefix = tmp.path().join("page");
    let out = Command::new("pdftoppm")
        .arg("-r")
        .arg(dpi.to_string())
        .arg("-png")
        .arg(pdf)
        .arg(&prefix)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| PtvError::source(format!("failed to spawn pdftoppm: {e}")))?;
    if !out.status.success() {
        return Err(PtvError::source(format!(
            "pdftoppm failed for '{}' with status {}: {}",
            pdf.display(),
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let mut pages: Vec<PathBuf> = std::fs::read_dir(tmp.path())
        .with_context(|| format!("read directory '{}'", tmp.path().display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("png")))
        .collect();
    sort_natural(&mut pages);

    let mut bitmaps = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        match decode_image_file(page) {
            Ok(b) => bitmaps.push(b),
            Err(e) => tracing::warn!(page = i + 1, "page skipped: {e}"),
        }
    }
    tracing::debug!(pages = bitmaps.len(), "pdf rasterised");
    Ok(bitmaps)
}

#[cfg(test)]
#[path = "../../tests/unit/source/pdf.rs"]
mod tests;
