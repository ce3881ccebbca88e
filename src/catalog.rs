//! Xcode asset catalog manifests for the app icon set.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Point sizes listed in the icon set, each at 1x and 2x.
pub const CATALOG_POINT_SIZES: [u32; 5] = [16, 32, 128, 256, 512];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contents {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageEntry>,
    pub info: Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    pub idiom: String,
    pub scale: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub author: String,
    pub version: u32,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

/// `icon_16x16.png`, `icon_16x16@2x.png`, ...
pub fn icon_file_name(points: u32, scale: u32) -> String {
    if scale == 1 {
        format!("icon_{}x{}.png", points, points)
    } else {
        format!("icon_{}x{}@{}x.png", points, points, scale)
    }
}

pub fn appiconset_contents() -> Contents {
    let images = CATALOG_POINT_SIZES
        .iter()
        .flat_map(|&points| {
            [1, 2].map(|scale| ImageEntry {
                filename: icon_file_name(points, scale),
                idiom: "mac".to_string(),
                scale: format!("{}x", scale),
                size: format!("{}x{}", points, points),
            })
        })
        .collect();
    Contents {
        images,
        info: Info::default(),
    }
}

/// Write `Contents.json` into the `.appiconset` and an info-only one into
/// the enclosing `.xcassets` directory.
pub fn write_manifests(appiconset_dir: &Path) -> Result<(), AssetError> {
    fs::create_dir_all(appiconset_dir)?;
    let json = serde_json::to_string_pretty(&appiconset_contents())?;
    fs::write(appiconset_dir.join("Contents.json"), json)?;

    if let Some(assets_dir) = appiconset_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        let root = Contents {
            images: Vec::new(),
            info: Info::default(),
        };
        fs::write(assets_dir.join("Contents.json"), serde_json::to_string_pretty(&root)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_iconset_convention() {
        assert_eq!(icon_file_name(16, 1), "icon_16x16.png");
        assert_eq!(icon_file_name(512, 2), "icon_512x512@2x.png");
    }

    #[test]
    fn contents_lists_ten_mac_entries() {
        let contents = appiconset_contents();
        assert_eq!(contents.images.len(), 10);
        assert!(contents.images.iter().all(|e| e.idiom == "mac"));
        assert_eq!(
            contents.images[1],
            ImageEntry {
                filename: "icon_16x16@2x.png".to_string(),
                idiom: "mac".to_string(),
                scale: "2x".to_string(),
                size: "16x16".to_string(),
            }
        );
        let json = serde_json::to_value(&contents).unwrap();
        assert_eq!(json["info"]["author"], "xcode");
        assert_eq!(json["info"]["version"], 1);
    }

    #[test]
    fn writes_both_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let set = dir.path().join("Assets.xcassets").join("AppIcon.appiconset");
        write_manifests(&set).unwrap();

        let inner = fs::read_to_string(set.join("Contents.json")).unwrap();
        assert!(inner.starts_with("{\n  \"images\": ["));
        let parsed: Contents = serde_json::from_str(&inner).unwrap();
        assert_eq!(parsed, appiconset_contents());

        let outer = fs::read_to_string(dir.path().join("Assets.xcassets/Contents.json")).unwrap();
        let outer: serde_json::Value = serde_json::from_str(&outer).unwrap();
        assert_eq!(outer, serde_json::json!({"info": {"author": "xcode", "version": 1}}));
    }
}
