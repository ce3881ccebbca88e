//! DMG installer background: app icon slot on top, a downward arrow, the
//! Applications folder slot below it and a "Drag to Applications" label.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use mixlink_core::{write_png, RasterImage};

use crate::config::BackgroundStyle;
use crate::error::AssetError;
use crate::logger::{log_error, log_line};
use crate::svg;

/// Ways of producing the background, tried in the configured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Supersampled in-process drawing (needs the `render` feature).
    Raster,
    /// SVG handed to `rsvg-convert` or Quick Look.
    Svg,
    /// Solid background color through the built-in PNG encoder.
    Solid,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Raster => "raster",
            Strategy::Svg => "svg",
            Strategy::Solid => "solid",
        })
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raster" => Ok(Strategy::Raster),
            "svg" => Ok(Strategy::Svg),
            "solid" => Ok(Strategy::Solid),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

/// Image size plus the Finder window positions of the two icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmgLayout {
    pub width: u32,
    pub height: u32,
    pub app_x: i32,
    pub app_y: i32,
    pub apps_x: i32,
    pub apps_y: i32,
    pub window_width: i32,
    pub window_height: i32,
}

/// Try each configured strategy until one writes `output`.
pub async fn generate_background(
    output: &Path,
    layout: &DmgLayout,
    style: &BackgroundStyle,
) -> Result<Strategy, AssetError> {
    for &strategy in &style.strategies {
        let result = match strategy {
            Strategy::Raster => write_raster(output, layout, style),
            Strategy::Svg => svg::write_via_converters(output, layout, style).await,
            Strategy::Solid => write_solid(output, layout, style),
        };
        match result {
            Ok(()) => {
                log_line(&format!("{} background written to {}", strategy, output.display()));
                return Ok(strategy);
            }
            Err(e) => log_error(&format!("{} background failed", strategy), &e),
        }
    }
    Err(AssetError::Exhausted)
}

fn write_solid(output: &Path, layout: &DmgLayout, style: &BackgroundStyle) -> Result<(), AssetError> {
    let image = RasterImage::filled(layout.width, layout.height, style.background);
    write_png(output, &image)?;
    Ok(())
}

#[cfg(not(feature = "render"))]
fn write_raster(_: &Path, _: &DmgLayout, _: &BackgroundStyle) -> Result<(), AssetError> {
    Err(AssetError::Unavailable("render"))
}

#[cfg(feature = "render")]
fn write_raster(output: &Path, layout: &DmgLayout, style: &BackgroundStyle) -> Result<(), AssetError> {
    render_raster(layout, style)?.save_with_format(output, image::ImageFormat::Png)?;
    Ok(())
}

/// Supersampled geometry in canvas pixels. Fails instead of overflowing
/// on absurd window positions.
#[cfg(feature = "render")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArrowGeometry {
    canvas: (u32, u32),
    arrow_x: i32,
    start_y: i32,
    shaft_end_y: i32,
    half_shaft: i32,
    head_half_width: i32,
    head_height: i32,
    label_y: i32,
}

#[cfg(feature = "render")]
impl ArrowGeometry {
    fn new(layout: &DmgLayout, s: u32) -> Result<Self, AssetError> {
        let si = s as i32;
        let scaled = |v: i32, name: &str| {
            v.checked_mul(si)
                .ok_or_else(|| AssetError::Layout(format!("{} = {} at {}x", name, v, s)))
        };
        let offset = |v: i32, d: i32, name: &str| {
            v.checked_add(d)
                .ok_or_else(|| AssetError::Layout(format!("{} = {}", name, v)))
                .and_then(|v| scaled(v, name))
        };
        let canvas_w = layout
            .width
            .checked_mul(s)
            .filter(|w| *w <= i32::MAX as u32)
            .ok_or_else(|| AssetError::Layout(format!("width = {} at {}x", layout.width, s)))?;
        let canvas_h = layout
            .height
            .checked_mul(s)
            .filter(|h| *h <= i32::MAX as u32)
            .ok_or_else(|| AssetError::Layout(format!("height = {} at {}x", layout.height, s)))?;

        let end_y = offset(layout.apps_y, -70, "apps_y")?;
        let shaft_end_y = end_y
            .checked_sub(4 * si)
            .ok_or_else(|| AssetError::Layout(format!("apps_y = {}", layout.apps_y)))?;
        let geometry = Self {
            canvas: (canvas_w, canvas_h),
            arrow_x: scaled(layout.window_width.div_euclid(2), "win_width")?,
            start_y: offset(layout.app_y, 80, "app_y")?,
            shaft_end_y,
            half_shaft: 3 * si,
            head_half_width: 15 * si,
            head_height: 20 * si,
            label_y: offset(layout.apps_y, 75, "apps_y")?,
        };
        // the head and shaft corners must stay representable too
        geometry
            .arrow_x
            .checked_sub(geometry.head_half_width)
            .and_then(|_| geometry.arrow_x.checked_add(geometry.head_half_width))
            .and_then(|_| geometry.shaft_end_y.checked_add(geometry.head_height))
            .and_then(|_| geometry.shaft_end_y.checked_sub(geometry.start_y))
            .ok_or_else(|| AssetError::Layout(format!("{:?}", layout)))?;
        Ok(geometry)
    }
}

/// Draw at `supersample` times the output size, then downsample with
/// Lanczos3 for smooth edges.
#[cfg(feature = "render")]
pub fn render_raster(layout: &DmgLayout, style: &BackgroundStyle) -> Result<image::RgbImage, AssetError> {
    use ab_glyph::PxScale;
    use image::imageops::{self, FilterType};
    use image::{Rgb, RgbImage};
    use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut, draw_text_mut, text_size};
    use imageproc::point::Point;
    use imageproc::rect::Rect;

    let s = style.supersample.clamp(1, 8);
    let g = ArrowGeometry::new(layout, s)?;
    let mut img = RgbImage::from_pixel(g.canvas.0, g.canvas.1, Rgb(style.background.channels()));

    let arrow = Rgb(style.arrow_color.channels());
    if g.shaft_end_y >= g.start_y {
        let shaft = Rect::at(g.arrow_x - g.half_shaft, g.start_y)
            .of_size((2 * g.half_shaft + 1) as u32, (g.shaft_end_y - g.start_y) as u32 + 1);
        draw_filled_rect_mut(&mut img, shaft, arrow);
    }

    let head = [
        Point::new(g.arrow_x, g.shaft_end_y + g.head_height),
        Point::new(g.arrow_x - g.head_half_width, g.shaft_end_y),
        Point::new(g.arrow_x + g.head_half_width, g.shaft_end_y),
    ];
    draw_polygon_mut(&mut img, &head, arrow);

    match crate::fonts::load_first(&style.font_paths) {
        Some(font) => {
            let scale = PxScale::from(style.font_size.saturating_mul(s) as f32);
            let (text_w, _) = text_size(scale, &font, &style.label);
            draw_text_mut(
                &mut img,
                Rgb(style.text_color.channels()),
                g.arrow_x.saturating_sub(text_w as i32 / 2),
                g.label_y,
                scale,
                &font,
                &style.label,
            );
        }
        None => log::warn!("no usable font among {:?}, label skipped", style.font_paths),
    }

    if s == 1 {
        return Ok(img);
    }
    Ok(imageops::resize(&img, layout.width, layout.height, FilterType::Lanczos3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DmgLayout {
        DmgLayout {
            width: 300,
            height: 400,
            app_x: 150,
            app_y: 80,
            apps_x: 150,
            apps_y: 300,
            window_width: 300,
            window_height: 400,
        }
    }

    fn style(strategies: Vec<Strategy>) -> BackgroundStyle {
        BackgroundStyle {
            strategies,
            font_paths: Vec::new(),
            ..BackgroundStyle::default()
        }
    }

    #[test]
    fn strategy_names() {
        for s in [Strategy::Raster, Strategy::Svg, Strategy::Solid] {
            assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        }
        assert_eq!(" SVG ".parse::<Strategy>(), Ok(Strategy::Svg));
        assert!("pil".parse::<Strategy>().is_err());
    }

    #[tokio::test]
    async fn solid_strategy_writes_background_color() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bg.png");
        let mut st = style(vec![Strategy::Solid]);
        st.background = mixlink_core::Rgb(12, 34, 56);

        let used = generate_background(&out, &layout(), &st).await.unwrap();
        assert_eq!(used, Strategy::Solid);

        let img = image::open(&out).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (300, 400));
        assert!(img.pixels().all(|p| p.0 == [12, 34, 56]));
    }

    #[tokio::test]
    async fn svg_failure_falls_through_to_solid() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bg.png");
        let st = BackgroundStyle {
            rsvg_program: "mixlink-missing-rsvg".to_string(),
            quicklook_program: "mixlink-missing-qlmanage".to_string(),
            ..style(vec![Strategy::Svg, Strategy::Solid])
        };

        let used = generate_background(&out, &layout(), &st).await.unwrap();
        assert_eq!(used, Strategy::Solid);
        assert!(!out.with_extension("svg").exists());
        let img = image::open(&out).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (300, 400));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[tokio::test]
    async fn exhausted_when_nothing_can_write() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing-dir").join("bg.png");
        let err = generate_background(&out, &layout(), &style(vec![Strategy::Solid]))
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::Exhausted));
    }

    #[cfg(feature = "render")]
    #[tokio::test]
    async fn raster_strategy_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bg.png");
        let st = style(vec![Strategy::Raster, Strategy::Solid]);
        assert_eq!(generate_background(&out, &layout(), &st).await.unwrap(), Strategy::Raster);
        assert_eq!(image::open(&out).unwrap().to_rgb8().dimensions(), (300, 400));
    }

    #[cfg(feature = "render")]
    #[test]
    fn raster_draws_arrow_between_icons() {
        let img = render_raster(&layout(), &style(vec![Strategy::Raster])).unwrap();
        assert_eq!(img.dimensions(), (300, 400));

        let near = |p: [u8; 3], want: [u8; 3]| {
            p.iter().zip(want).all(|(a, b)| (*a as i32 - b as i32).abs() <= 4)
        };
        // shaft spans y 160..=226 at x 150
        assert!(near(img.get_pixel(150, 190).0, [140, 145, 155]));
        // head just below the shaft end
        assert!(near(img.get_pixel(150, 230).0, [140, 145, 155]));
        assert!(near(img.get_pixel(0, 0).0, [0, 0, 0]));
        assert!(near(img.get_pixel(100, 190).0, [0, 0, 0]));
    }

    #[cfg(feature = "render")]
    #[test]
    fn collapsed_layout_still_renders() {
        let mut l = layout();
        l.apps_y = l.app_y;
        let st = BackgroundStyle {
            supersample: 1,
            ..style(vec![Strategy::Raster])
        };
        let img = render_raster(&l, &st).unwrap();
        assert_eq!(img.dimensions(), (300, 400));
    }

    #[cfg(feature = "render")]
    #[test]
    fn label_skipped_without_font() {
        let img = render_raster(&layout(), &style(vec![Strategy::Raster])).unwrap();
        // label would sit at apps_y + 75, centered under the arrow
        for y in 370..400 {
            for x in 60..240 {
                let p = img.get_pixel(x, y).0;
                assert!(p.iter().all(|c| *c <= 2), "({}, {}) = {:?}", x, y, p);
            }
        }
    }

    #[cfg(feature = "render")]
    #[test]
    fn extreme_positions_are_rejected() {
        let mut l = layout();
        l.apps_y = i32::MAX - 10;
        let err = render_raster(&l, &style(vec![Strategy::Raster])).unwrap_err();
        assert!(matches!(err, AssetError::Layout(_)), "got {}", err);

        let mut l = layout();
        l.app_y = i32::MIN;
        assert!(matches!(
            render_raster(&l, &style(vec![Strategy::Raster])),
            Err(AssetError::Layout(_))
        ));
    }

    #[cfg(feature = "render")]
    #[tokio::test]
    async fn out_of_range_raster_falls_back_to_solid() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bg.png");
        let mut l = layout();
        l.window_width = i32::MAX;
        let st = style(vec![Strategy::Raster, Strategy::Solid]);
        assert_eq!(generate_background(&out, &l, &st).await.unwrap(), Strategy::Solid);
        assert_eq!(image::open(&out).unwrap().to_rgb8().dimensions(), (300, 400));
    }
}
