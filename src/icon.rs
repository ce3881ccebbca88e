use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, ImageFormat, Rgba, RgbaImage};

use crate::catalog::{icon_file_name, write_manifests};
use crate::draw::{fill_rounded_rect, in_ellipse, lerp};
use crate::error::AssetError;
use crate::logger::log_line;

/// Pixel sizes rendered for the icon set. Sizes up to 512 also get a 2x file.
pub const ICON_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

// Design units on a 1024px canvas
const BASE: f32 = 1024.0;
const MARGIN: f32 = 20.0;
const BAR_WIDTH: f32 = 65.0;
const BAR_SPACING: f32 = 110.0;
const MAX_BAR_HEIGHT: f32 = 450.0;
const GLOW_PAD: f32 = 10.0;
const CORNER_RADIUS: f32 = 30.0;
const GLOW_BLUR: f32 = 30.0;

const BAR_HEIGHTS: [f32; 5] = [0.35, 0.75, 1.0, 0.6, 0.25];

const DISC: Rgba<u8> = Rgba([18, 18, 20, 255]);
const GLOW: Rgba<u8> = Rgba([0, 212, 255, 100]);
const CYAN: [f32; 3] = [0.0, 212.0, 255.0];
const TEAL: [f32; 3] = [0.0, 255.0, 200.0];

/// Render the waveform app icon: five rounded bars with a cyan glow on a
/// dark disc, transparent outside the disc.
pub fn render_icon(size: u32) -> RgbaImage {
    let s = size as f32 / BASE;
    let px = |v: f32| (v * s) as i32;

    let mut img = RgbaImage::new(size, size);
    let m = px(MARGIN) as f32;
    let edge = size as f32 - m;
    for (x, y, p) in img.enumerate_pixels_mut() {
        if in_ellipse(x as f32 + 0.5, y as f32 + 0.5, m, m, edge, edge) {
            *p = DISC;
        }
    }

    let bar_width = px(BAR_WIDTH);
    let spacing = px(BAR_SPACING);
    let max_height = px(MAX_BAR_HEIGHT);
    let pad = px(GLOW_PAD);
    let radius = px(CORNER_RADIUS);
    let blur = px(GLOW_BLUR);

    let c = (size / 2) as i32;
    let start_x = c - (BAR_HEIGHTS.len() as i32 - 1) * spacing / 2;
    let bars: Vec<(i32, i32, i32)> = BAR_HEIGHTS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let height = (max_height as f32 * h) as i32;
            (start_x + i as i32 * spacing, c - height / 2, height)
        })
        .collect();

    let mut glow = RgbaImage::new(size, size);
    for &(x, y1, height) in &bars {
        let y2 = c + height / 2;
        fill_rounded_rect(
            &mut glow,
            (x - pad, y1 - pad, x + bar_width + pad, y2 + pad),
            radius,
            |_, _| GLOW,
        );
    }
    if blur > 0 {
        glow = imageops::blur(&glow, blur as f32);
    }
    imageops::overlay(&mut img, &glow, 0, 0);

    for &(x, y1, height) in &bars {
        fill_rounded_rect(&mut img, (x, y1, x + bar_width, y1 + height), radius, |_, y| {
            let t = if height > 0 {
                ((y - y1) as f32 / height as f32).clamp(0.0, 1.0)
            } else {
                0.0
            };
            Rgba([
                lerp(CYAN[0], TEAL[0], t) as u8,
                lerp(CYAN[1], TEAL[1], t) as u8,
                lerp(CYAN[2], TEAL[2], t) as u8,
                255,
            ])
        });
    }

    img
}

/// Render every size into `dir` and write the asset catalog manifests.
/// Returns the PNG paths written.
pub fn write_iconset(dir: &Path, sizes: &[u32]) -> Result<Vec<PathBuf>, AssetError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for &size in sizes {
        log_line(&format!("Generating {}x{} icon...", size, size));
        let path = dir.join(icon_file_name(size, 1));
        render_icon(size).save_with_format(&path, ImageFormat::Png)?;
        written.push(path);

        if size <= 512 {
            let path = dir.join(icon_file_name(size, 2));
            render_icon(size * 2).save_with_format(&path, ImageFormat::Png)?;
            written.push(path);
        }
    }
    write_manifests(dir)?;
    Ok(written)
}
