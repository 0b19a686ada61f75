use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context as _;

use crate::foundation::error::{PtvError, PtvResult};
use crate::scroll::axis::ScrollDirection;
use crate::source::{ScaleMode, SourceOpts, pdf::DEFAULT_PDF_DPI};

/// Presentation style of the output video.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Style {
    /// One still per image, centred on black.
    #[default]
    Frames,
    /// Scroll with content moving up.
    Up,
    /// Scroll with content moving down.
    Down,
    /// Scroll with content moving left.
    Left,
    /// Scroll with content moving right.
    Right,
}

impl Style {
    /// Scroll direction, or `None` for the slideshow.
    pub fn scroll_direction(self) -> Option<ScrollDirection> {
        match self {
            Self::Frames => None,
            Self::Up => Some(ScrollDirection::Up),
            Self::Down => Some(ScrollDirection::Down),
            Self::Left => Some(ScrollDirection::Left),
            Self::Right => Some(ScrollDirection::Right),
        }
    }

    /// How source images are fitted to the viewport for this style.
    pub fn scale_mode(self) -> ScaleMode {
        match self {
            Self::Frames => ScaleMode::Fit,
            Self::Up | Self::Down => ScaleMode::Width,
            Self::Left | Self::Right => ScaleMode::Height,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Frames => "FRAMES",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = PtvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FRAMES" | "FRAME" => Ok(Self::Frames),
            "UP" | "U" => Ok(Self::Up),
            "DOWN" | "D" => Ok(Self::Down),
            "LEFT" | "L" => Ok(Self::Left),
            "RIGHT" | "R" => Ok(Self::Right),
            _ => Err(PtvError::validation(format!(
                "unknown style '{s}' (expected FRAMES, UP, DOWN, LEFT or RIGHT)"
            ))),
        }
    }
}

impl TryFrom<String> for Style {
    type Error = PtvError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Style> for String {
    fn from(s: Style) -> Self {
        s.as_str().to_owned()
    }
}

/// Parse `WxH` (either separator case). `0` in a dimension means "take it from the first image".
pub fn parse_resolution(s: &str) -> PtvResult<(u32, u32)> {
    let bad = || PtvError::validation(format!("bad resolution '{s}' (expected WIDTHxHEIGHT)"));
    let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(bad)?;
    let w = w.trim().parse::<u32>().map_err(|_| bad())?;
    let h = h.trim().parse::<u32>().map_err(|_| bad())?;
    Ok((w, h))
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_one() -> f64 {
    1.0
}

fn default_dpi() -> u32 {
    DEFAULT_PDF_DPI
}

/// Everything that shapes one video, loadable from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Viewport width; 0 takes the first image's width.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Viewport height; 0 takes the first image's height.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Output frame rate.
    #[serde(default = "default_one")]
    pub fps: f64,
    /// Seconds each image stays on screen (on average, for scrolls).
    #[serde(default = "default_one")]
    pub seconds_per_item: f64,
    /// Total scroll duration in seconds; 0 derives it from `seconds_per_item`.
    #[serde(default)]
    pub duration: f64,
    /// Presentation style.
    #[serde(default)]
    pub style: Style,
    /// Include GIF frames found in directories.
    #[serde(default)]
    pub render_gifs: bool,
    /// Walk directories back to front.
    #[serde(default)]
    pub reverse: bool,
    /// PDF rasterisation resolution.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Replace an existing output instead of picking a fresh name.
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_one(),
            seconds_per_item: default_one(),
            duration: 0.0,
            style: Style::default(),
            render_gifs: false,
            reverse: false,
            dpi: default_dpi(),
            overwrite: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> PtvResult<Self> {
        let settings: Self = serde_json::from_str(text)
            .map_err(|e| PtvError::validation(format!("invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn from_json_path(path: &Path) -> PtvResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings file '{}'", path.display()))?;
        Self::from_json_str(&text)
            .map_err(|e| PtvError::validation(format!("'{}': {e}", path.display())))
    }

    /// Reject values no run could use. Resolution parity is checked once auto sizes are known.
    pub fn validate(&self) -> PtvResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(PtvError::validation(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if !self.seconds_per_item.is_finite() || self.seconds_per_item < 0.0 {
            return Err(PtvError::validation(format!(
                "seconds per item must be non-negative, got {}",
                self.seconds_per_item
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(PtvError::validation(format!(
                "duration must be non-negative, got {}",
                self.duration
            )));
        }
        if self.dpi == 0 {
            return Err(PtvError::validation("dpi must be non-zero"));
        }
        Ok(())
    }

    /// Source adapter options carried by these settings.
    pub fn source_opts(&self) -> SourceOpts {
        SourceOpts {
            render_gifs: self.render_gifs,
            reverse: self.reverse,
            dpi: self.dpi,
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dim = |v: u32| {
            if v == 0 {
                "auto".to_owned()
            } else {
                v.to_string()
            }
        };
        writeln!(f, "Resolution: {}x{}", dim(self.width), dim(self.height))?;
        writeln!(f, "FPS: {}", self.fps)?;
        writeln!(f, "Seconds per item: {}", self.seconds_per_item)?;
        if self.duration > 0.0 {
            writeln!(f, "Duration: {}", self.duration)?;
        }
        writeln!(f, "Style: {}", self.style)?;
        writeln!(f, "Render GIFs: {}", self.render_gifs)?;
        write!(f, "Reverse sequence: {}", self.reverse)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
