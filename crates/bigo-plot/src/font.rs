//! Font registration for plot text.
//!
//! Text in the plot (title, axis descriptions, tick labels) is drawn with
//! the `sans-serif` family, which must be registered from a TTF/OTF file
//! before it can be used. Registration happens once at startup.

use std::path::{Path, PathBuf};

use plotters::style::FontStyle;
use tracing::{debug, info};

use crate::error::PlotError;

/// Well-known locations of a sans-serif TrueType font on common systems.
pub fn default_font_candidates() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Registers `path` as the `sans-serif` family.
///
/// The font bytes live for the rest of the process.
pub fn register_font_file(path: &Path) -> Result<(), PlotError> {
    let bytes = std::fs::read(path)?;
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());

    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| PlotError::InvalidFont(path.display().to_string()))?;

    info!(path = %path.display(), "plot font registered");
    Ok(())
}

/// Registers the first candidate that loads. Returns the chosen path.
pub fn register_first_available<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match register_font_file(&path) {
            Ok(())  => return Some(path),
            Err(e)  => debug!(path = %path.display(), error = %e, "font candidate rejected"),
        }
    }
    None
}
