use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 8-bit RGB triple, no alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb(c[0], c[1], c[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Accepts `#rrggbb` (hash optional) or `r,g,b`.
impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(',') {
            let parts: Vec<&str> = s.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(format!("expected three channels in '{}'", s));
            }
            let mut c = [0u8; 3];
            for (slot, part) in c.iter_mut().zip(&parts) {
                *slot = part
                    .parse::<u8>()
                    .map_err(|e| format!("bad channel '{}': {}", part, e))?;
            }
            return Ok(Rgb::from(c));
        }
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #rrggbb, got '{}'", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("bad hex '{}': {}", s, e))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// A grid of RGB pixels stored as scanlines.
///
/// Every scanline holds exactly `width` pixels. The image is built once and
/// handed to the encoder; there is no mutation API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rows: Vec<Vec<Rgb>>,
}

impl RasterImage {
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let row = vec![color; width as usize];
        Self {
            width,
            height,
            rows: vec![row; height as usize],
        }
    }

    /// Build from explicit scanlines. The first row fixes the width.
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, CoreError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(CoreError::RaggedScanline {
                row,
                found: r.len(),
                expected,
            });
        }
        Ok(Self {
            width: expected as u32,
            height: rows.len() as u32,
            rows,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Rgb>] {
        &self.rows
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.rows.get(y as usize)?.get(x as usize).copied()
    }
}
