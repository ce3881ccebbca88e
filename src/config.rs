use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use mixlink_core::Rgb;

use crate::background::Strategy;

/// System fonts tried in order for the installer label.
pub const DEFAULT_FONT_PATHS: [&str; 4] = [
    "/System/Library/Fonts/SFNSText.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/HelveticaNeue.ttc",
    "/Library/Fonts/Arial.ttf",
];

/// Colors, label and fallback order for the DMG background.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundStyle {
    pub background: Rgb,
    pub arrow_color: Rgb,
    pub text_color: Rgb,
    pub label: String,
    pub font_size: u32,
    /// Raster strategy draws at this multiple and downsamples.
    pub supersample: u32,
    pub font_paths: Vec<PathBuf>,
    pub converter_timeout_secs: u64,
    /// SVG rasterizer tried first, called as `-w W -h H -o OUT SVG`.
    pub rsvg_program: String,
    /// Quick Look thumbnailer tried second.
    pub quicklook_program: String,
    pub strategies: Vec<Strategy>,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            arrow_color: Rgb(140, 145, 155),
            text_color: Rgb(100, 105, 115),
            label: "Drag to Applications".to_string(),
            font_size: 13,
            supersample: 3,
            font_paths: DEFAULT_FONT_PATHS.iter().map(PathBuf::from).collect(),
            converter_timeout_secs: 10,
            rsvg_program: "rsvg-convert".to_string(),
            quicklook_program: "qlmanage".to_string(),
            strategies: vec![Strategy::Raster, Strategy::Svg, Strategy::Solid],
        }
    }
}

/// Defaults, optionally overridden by a `key = value` file.
pub fn read_style(path: Option<&Path>) -> Result<BackgroundStyle, io::Error> {
    match path {
        Some(p) => Ok(parse_style(&fs::read_to_string(p)?)),
        None => Ok(BackgroundStyle::default()),
    }
}

pub fn parse_style(content: &str) -> BackgroundStyle {
    let mut cfg = BackgroundStyle::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else {
            log::warn!("config: ignoring line without '=': {}", line);
            continue;
        };
        let v = v.trim();
        match k.trim() {
            "background" => cfg.background = parsed(k, v, cfg.background),
            "arrow_color" => cfg.arrow_color = parsed(k, v, cfg.arrow_color),
            "text_color" => cfg.text_color = parsed(k, v, cfg.text_color),
            "label" => cfg.label = v.to_string(),
            "font_size" => cfg.font_size = parsed(k, v, cfg.font_size).max(1),
            "supersample" => cfg.supersample = parsed(k, v, cfg.supersample).clamp(1, 8),
            "font_paths" => {
                cfg.font_paths = v
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect()
            }
            "converter_timeout_secs" => {
                cfg.converter_timeout_secs = parsed(k, v, cfg.converter_timeout_secs).max(1)
            }
            "rsvg_convert" if !v.is_empty() => cfg.rsvg_program = v.to_string(),
            "qlmanage" if !v.is_empty() => cfg.quicklook_program = v.to_string(),
            "strategies" => {
                let list: Result<Vec<Strategy>, _> = v.split(',').map(|s| s.trim().parse()).collect();
                match list {
                    Ok(list) if !list.is_empty() => cfg.strategies = list,
                    Ok(_) => log::warn!("config: empty strategies list, keeping defaults"),
                    Err(e) => log::warn!("config: {}, keeping default strategies", e),
                }
            }
            other => log::debug!("config: unknown key '{}'", other),
        }
    }
    cfg
}

fn parsed<T>(key: &str, value: &str, fallback: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().unwrap_or_else(|e| {
        log::warn!("config: bad value for {}: {} ({})", key.trim(), value, e);
        fallback
    })
}
