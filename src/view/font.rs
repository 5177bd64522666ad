//! Monospace font discovery
//!
//! A font set in the config wins. Otherwise the first readable file from a
//! per-platform list of common monospace fonts is used.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings};

#[cfg(target_os = "macos")]
const SYSTEM_FONTS: &[&str] = &[
    "/System/Library/Fonts/SFNSMono.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "/Library/Fonts/Courier New.ttf",
];

#[cfg(target_os = "windows")]
const SYSTEM_FONTS: &[&str] = &[
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
    "C:\\Windows\\Fonts\\lucon.ttf",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
];

/// Paths to try, configured font first
pub fn candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONTS.iter().map(PathBuf::from))
        .collect()
}

/// Load the first usable font
pub fn load_font(configured: Option<&Path>) -> Result<Font> {
    for path in candidates(configured) {
        match read_font(&path) {
            Ok(font) => {
                tracing::info!("Using font {}", path.display());
                return Ok(font);
            }
            Err(e) => tracing::debug!("Skipping font {}: {:#}", path.display(), e),
        }
    }

    Err(anyhow!(
        "No monospace font found; set font_path in the config file"
    ))
}

fn read_font(path: &Path) -> Result<Font> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Font::from_bytes(bytes, FontSettings::default()).map_err(|e| anyhow!("{}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_font_is_tried_first() {
        let configured = PathBuf::from("/fonts/Custom.ttf");
        let list = candidates(Some(&configured));
        assert_eq!(list[0], configured);
        assert_eq!(list.len(), SYSTEM_FONTS.len() + 1);
    }

    #[test]
    fn unreadable_font_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();
        assert!(read_font(&bogus).is_err());
        assert!(read_font(&dir.path().join("missing.ttf")).is_err());
    }
}
