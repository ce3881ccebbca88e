use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

use crate::error::AssetError;

/// First font in `paths` that exists and parses. Broken candidates are
/// skipped, not reported as errors.
pub fn load_first(paths: &[PathBuf]) -> Option<FontVec> {
    paths.iter().filter(|p| p.exists()).find_map(|p| match load(p) {
        Ok(font) => {
            log::debug!("using font {}", p.display());
            Some(font)
        }
        Err(e) => {
            log::debug!("skipping font: {}", e);
            None
        }
    })
}

/// Load a TrueType/OpenType font; collections (`.ttc`) use their first face.
pub fn load(path: &Path) -> Result<FontVec, AssetError> {
    let bytes = fs::read(path)?;
    FontVec::try_from_vec_and_index(bytes, 0).map_err(|e| AssetError::Font {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
