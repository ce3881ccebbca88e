//! SVG rendition of the installer background, rasterized by external tools.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::background::DmgLayout;
use crate::config::BackgroundStyle;
use crate::convert::{run_converter, ConvertError};
use crate::error::AssetError;
use crate::logger::log_error;

/// Build the SVG document. Geometry is in output pixels (no supersampling).
pub fn document(layout: &DmgLayout, style: &BackgroundStyle) -> String {
    let arrow_x = i64::from(layout.window_width).div_euclid(2);
    let start_y = i64::from(layout.app_y) + 95;
    let shaft_end_y = i64::from(layout.apps_y) - 55 - 2;
    let text_y = i64::from(layout.apps_y) + 80;
    let shaft_height = (shaft_end_y - start_y).max(0);
    let arrow = style.arrow_color;

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">
  <rect width="100%" height="100%" fill="{bg}"/>
  <rect x="{shaft_x}" y="{start_y}" width="4" height="{shaft_height}" fill="{arrow}"/>
  <polygon points="{arrow_x},{tip_y} {left_x},{shaft_end_y} {right_x},{shaft_end_y}" fill="{arrow}"/>
  <text x="{arrow_x}" y="{text_y}" fill="{text}" font-family="Helvetica, Arial, sans-serif"
        font-size="{font_size}" text-anchor="middle">{label}</text>
</svg>"##,
        w = layout.width,
        h = layout.height,
        bg = style.background,
        shaft_x = arrow_x - 2,
        tip_y = shaft_end_y + 16,
        left_x = arrow_x - 11,
        right_x = arrow_x + 11,
        text = style.text_color,
        font_size = style.font_size,
        label = escape_xml(&style.label),
    )
}

/// Write the SVG next to `output`, convert it, and remove the SVG again.
pub async fn write_via_converters(
    output: &Path,
    layout: &DmgLayout,
    style: &BackgroundStyle,
) -> Result<(), AssetError> {
    let svg_path = output.with_extension("svg");
    fs::write(&svg_path, document(layout, style))?;

    let result = convert(&svg_path, output, layout, style).await;

    if let Err(e) = fs::remove_file(&svg_path) {
        log_error("Could not remove intermediate SVG", &e);
    }
    result
}

async fn convert(
    svg: &Path,
    output: &Path,
    layout: &DmgLayout,
    style: &BackgroundStyle,
) -> Result<(), AssetError> {
    let timeout = Duration::from_secs(style.converter_timeout_secs);
    let rsvg_args = vec![
        "-w".to_string(),
        layout.width.to_string(),
        "-h".to_string(),
        layout.height.to_string(),
        "-o".to_string(),
        output.display().to_string(),
        svg.display().to_string(),
    ];
    match run_converter(&style.rsvg_program, &rsvg_args, timeout).await {
        Ok(()) => return Ok(()),
        Err(e) => log_error("SVG rasterizer", &e),
    }

    // Quick Look writes `<svg>.png` into the target directory.
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let ql_args = vec![
        "-t".to_string(),
        "-s".to_string(),
        layout.width.max(layout.height).to_string(),
        "-o".to_string(),
        dir.display().to_string(),
        svg.display().to_string(),
    ];
    run_converter(&style.quicklook_program, &ql_args, timeout).await?;

    let ql_output = quicklook_output(svg);
    if !ql_output.exists() {
        return Err(ConvertError::MissingOutput {
            program: style.quicklook_program.clone(),
            path: ql_output,
        }
        .into());
    }
    fs::rename(&ql_output, output)?;
    Ok(())
}

fn quicklook_output(svg: &Path) -> PathBuf {
    let mut name = OsString::from(svg.as_os_str());
    name.push(".png");
    PathBuf::from(name)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DmgLayout {
        DmgLayout {
            width: 400,
            height: 500,
            app_x: 200,
            app_y: 120,
            apps_x: 200,
            apps_y: 360,
            window_width: 400,
            window_height: 500,
        }
    }

    #[test]
    fn document_places_arrow_between_icons() {
        let svg = document(&layout(), &BackgroundStyle::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"<svg width="400" height="500""#));
        assert!(svg.contains(r##"fill="#000000""##));
        // shaft from app_y + 95 to apps_y - 57
        assert!(svg.contains(r##"<rect x="198" y="215" width="4" height="88" fill="#8c919b"/>"##));
        assert!(svg.contains(r#"points="200,319 189,303 211,303""#));
        assert!(svg.contains(r##"<text x="200" y="440" fill="#646973""##));
        assert!(svg.contains(">Drag to Applications</text>"));
    }

    #[test]
    fn shaft_height_never_negative() {
        let mut l = layout();
        l.apps_y = l.app_y;
        let svg = document(&l, &BackgroundStyle::default());
        assert!(svg.contains(r#"width="4" height="0""#));
    }

    #[test]
    fn label_is_escaped() {
        let style = BackgroundStyle {
            label: "Drag <App> & \"Go\"".to_string(),
            ..BackgroundStyle::default()
        };
        let svg = document(&layout(), &style);
        assert!(svg.contains(">Drag &lt;App&gt; &amp; &quot;Go&quot;</text>"));
    }

    #[test]
    fn extreme_positions_do_not_overflow() {
        let mut l = layout();
        l.app_y = i32::MAX;
        l.apps_y = i32::MIN;
        let svg = document(&l, &BackgroundStyle::default());
        assert!(svg.contains(r#"width="4" height="0""#));
    }

    #[tokio::test]
    async fn failed_conversion_removes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("bg.png");
        let style = BackgroundStyle {
            rsvg_program: "mixlink-missing-rsvg".to_string(),
            quicklook_program: "mixlink-missing-qlmanage".to_string(),
            ..BackgroundStyle::default()
        };

        let err = write_via_converters(&output, &layout(), &style).await.unwrap_err();
        match err {
            AssetError::Convert(ConvertError::NotFound(program)) => {
                assert_eq!(program, "mixlink-missing-qlmanage")
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!output.with_extension("svg").exists());
        assert!(!output.exists());
    }

    #[test]
    fn quicklook_appends_png() {
        assert_eq!(
            quicklook_output(Path::new("/tmp/bg.svg")),
            PathBuf::from("/tmp/bg.svg.png")
        );
    }
}
