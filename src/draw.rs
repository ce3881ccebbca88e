use image::{Rgba, RgbaImage};

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Pixel-center test against the ellipse inscribed in `[x0, x1] x [y0, y1]`.
pub fn in_ellipse(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
    let rx = (x1 - x0) * 0.5;
    let ry = (y1 - y0) * 0.5;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let dx = (px - (x0 + rx)) / rx;
    let dy = (py - (y0 + ry)) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Integer pixel test for a rectangle with inclusive corners and round
/// corners of `radius` (clamped to half the shorter side).
pub fn in_rounded_rect(x: i32, y: i32, x0: i32, y0: i32, x1: i32, y1: i32, radius: i32) -> bool {
    if x < x0 || x > x1 || y < y0 || y > y1 {
        return false;
    }
    let r = radius.min((x1 - x0) / 2).min((y1 - y0) / 2).max(0);
    let dx = (x0 + r - x).max(x - (x1 - r)).max(0);
    let dy = (y0 + r - y).max(y - (y1 - r)).max(0);
    dx * dx + dy * dy <= r * r
}

/// Fill a rounded rectangle, asking `shade` for each covered pixel.
/// Parts outside the canvas are clipped.
pub fn fill_rounded_rect<F>(img: &mut RgbaImage, rect: (i32, i32, i32, i32), radius: i32, shade: F)
where
    F: Fn(i32, i32) -> Rgba<u8>,
{
    let (x0, y0, x1, y1) = rect;
    let (w, h) = (img.width() as i32, img.height() as i32);
    for y in y0.max(0)..=y1.min(h - 1) {
        for x in x0.max(0)..=x1.min(w - 1) {
            if in_rounded_rect(x, y, x0, y0, x1, y1, radius) {
                img.put_pixel(x as u32, y as u32, shade(x, y));
            }
        }
    }
}
