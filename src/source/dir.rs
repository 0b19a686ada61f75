use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::PtvResult;

/// Image extensions read from directories (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"];

/// What a path contributes to the image sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// PDF document; one image per page.
    Pdf,
    /// Animated GIF; one image per frame when enabled.
    Gif,
    /// Still image.
    Image,
}

fn lower_ext(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Classify a file by extension; `None` for unsupported files.
pub fn classify(path: &Path) -> Option<InputKind> {
    let ext = lower_ext(path)?;
    match ext.as_str() {
        "pdf" => Some(InputKind::Pdf),
        "gif" => Some(InputKind::Gif),
        e if IMAGE_EXTENSIONS.contains(&e) => Some(InputKind::Image),
        _ => None,
    }
}

enum Chunk<'a> {
    Text(&'a str),
    Number(&'a str),
}

fn chunks(s: &str) -> impl Iterator<Item = Chunk<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        rest = tail;
        Some(if digit {
            Chunk::Number(head)
        } else {
            Chunk::Text(head)
        })
    })
}

fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural ordering: digit runs compare by value, everything else byte-wise.
///
/// `page2` sorts before `page10`. Names equal under this rule fall back to plain comparison so the
/// order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = chunks(a);
    let mut cb = chunks(b);
    loop {
        let ord = match (ca.next(), cb.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Number(x)), Some(Chunk::Number(y))) => cmp_numeric(x, y),
            (Some(Chunk::Text(x) | Chunk::Number(x)), Some(Chunk::Text(y) | Chunk::Number(y))) => {
                x.cmp(y)
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Sort paths by file name in natural order.
pub fn sort_natural(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&file_name_of(a), &file_name_of(b)));
}

/// Supported files directly inside `dir`, naturally sorted. Subdirectories are not descended.
pub fn list_dir_paths(dir: &Path) -> PtvResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_dir() || classify(&path).is_none() {
            continue;
        }
        paths.push(path);
    }
    sort_natural(&mut paths);
    Ok(paths)
}

#[cfg(test)]
#[path = "../../tests/unit/source/dir.rs"]
mod tests;
